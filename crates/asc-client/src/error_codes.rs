//! Error categories for App Store Connect failures.
//!
//! The API reports failures as HTTP statuses with a JSON:API `errors` array.
//! Categories group those statuses so callers can pick exit codes and decide
//! whether a retry is worth suggesting.

pub const BAD_REQUEST: u16 = 400;
pub const UNAUTHORIZED: u16 = 401;
pub const FORBIDDEN: u16 = 403;
pub const NOT_FOUND: u16 = 404;
pub const CONFLICT: u16 = 409;
pub const UNPROCESSABLE: u16 = 422;
pub const TOO_MANY_REQUESTS: u16 = 429;

/// Error category for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Resource not found (app, build, tester)
    NotFound,
    /// Invalid input parameters or rejected request body
    InvalidInput,
    /// Missing or rejected credentials
    Unauthorized,
    /// Rate limited or conflicting state
    Busy,
    /// Bug or unexpected response shape
    Internal,
    /// Network or upstream server failure
    External,
    /// Request timed out
    Timeout,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::NotFound => "not_found",
            ErrorCategory::InvalidInput => "invalid_input",
            ErrorCategory::Unauthorized => "unauthorized",
            ErrorCategory::Busy => "busy",
            ErrorCategory::Internal => "internal",
            ErrorCategory::External => "external",
            ErrorCategory::Timeout => "timeout",
        }
    }

    /// UNIX sysexits.h-compliant exit code.
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorCategory::InvalidInput => 64, // EX_USAGE
            ErrorCategory::NotFound => 69,     // EX_UNAVAILABLE
            ErrorCategory::Busy => 73,         // EX_CANTCREAT
            ErrorCategory::External => 74,     // EX_IOERR
            ErrorCategory::Internal => 74,     // EX_IOERR
            ErrorCategory::Timeout => 75,      // EX_TEMPFAIL
            ErrorCategory::Unauthorized => 77, // EX_NOPERM
        }
    }
}

impl std::str::FromStr for ErrorCategory {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "not_found" => Ok(ErrorCategory::NotFound),
            "invalid_input" => Ok(ErrorCategory::InvalidInput),
            "unauthorized" => Ok(ErrorCategory::Unauthorized),
            "busy" => Ok(ErrorCategory::Busy),
            "internal" => Ok(ErrorCategory::Internal),
            "external" => Ok(ErrorCategory::External),
            "timeout" => Ok(ErrorCategory::Timeout),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Returns whether an HTTP status represents a transient condition.
pub fn is_retryable_status(status: u16) -> bool {
    status == TOO_MANY_REQUESTS || (500..=599).contains(&status)
}

/// Returns the error category for a given HTTP status.
pub fn category_for_status(status: u16) -> ErrorCategory {
    match status {
        NOT_FOUND => ErrorCategory::NotFound,
        BAD_REQUEST | UNPROCESSABLE => ErrorCategory::InvalidInput,
        UNAUTHORIZED | FORBIDDEN => ErrorCategory::Unauthorized,
        CONFLICT | TOO_MANY_REQUESTS => ErrorCategory::Busy,
        500..=599 => ErrorCategory::External,
        _ => ErrorCategory::Internal,
    }
}
