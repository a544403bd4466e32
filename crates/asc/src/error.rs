//! CLI errors with structured context for scripts and agents.
//!
//! Every error carries a category, an optional suggestion and a UNIX
//! sysexits.h-compliant exit code.

use std::io;

use asc_client::ClientError;
use asc_client::ErrorCategory;
use serde_json::Value;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl CliError {
    /// Returns the error category for programmatic handling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            CliError::InvalidInput(_) => ErrorCategory::InvalidInput,
            CliError::NotFound(_) => ErrorCategory::NotFound,
            CliError::Client(e) => e.category(),
            CliError::Io(_) => ErrorCategory::External,
        }
    }

    pub fn suggestion(&self) -> Option<String> {
        match self {
            CliError::InvalidInput(_) => {
                Some("Run the command with --help to see accepted values.".to_string())
            }
            CliError::NotFound(_) => None,
            CliError::Client(e) => e.suggestion(),
            CliError::Io(_) => None,
        }
    }

    /// Returns whether this error is potentially transient and may succeed on retry.
    pub fn is_retryable(&self) -> bool {
        match self {
            CliError::Client(e) => e.is_retryable(),
            _ => false,
        }
    }

    /// Converts to UNIX sysexits.h-compliant exit code.
    pub fn exit_code(&self) -> i32 {
        self.category().exit_code()
    }

    /// Returns structured JSON representation of this error.
    pub fn to_json(&self) -> Value {
        let context = match self {
            CliError::Client(e) => e.context(),
            _ => Value::Null,
        };
        json!({
            "error": {
                "message": self.to_string(),
                "category": self.category().as_str(),
                "retryable": self.is_retryable(),
                "exit_code": self.exit_code(),
                "context": context,
                "suggestion": self.suggestion(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use asc_client::ApiErrorDetail;
    use asc_client::ConfigError;

    #[test]
    fn test_exit_codes_follow_sysexits() {
        assert_eq!(CliError::InvalidInput("bad".into()).exit_code(), 64);
        assert_eq!(CliError::NotFound("none".into()).exit_code(), 69);
        let timeout = CliError::Client(ClientError::Timeout("slow".into()));
        assert_eq!(timeout.exit_code(), 75);
        let io = CliError::Io(io::Error::other("disk"));
        assert_eq!(io.exit_code(), 74);
    }

    #[test]
    fn test_unauthorized_api_error_exits_77() {
        let err = CliError::Client(ClientError::Api {
            status: 401,
            errors: vec![ApiErrorDetail {
                title: Some("Authentication credentials are missing or invalid.".into()),
                ..Default::default()
            }],
            raw: None,
        });
        assert_eq!(err.exit_code(), 77);
        assert!(err.suggestion().is_some());
    }

    #[test]
    fn test_rate_limited_is_retryable() {
        let err = CliError::Client(ClientError::Api {
            status: 429,
            errors: vec![],
            raw: Some("slow down".into()),
        });
        assert!(err.is_retryable());
        assert_eq!(err.exit_code(), 73);
    }

    #[test]
    fn test_missing_credential_is_invalid_input() {
        let err = CliError::from(ClientError::from(ConfigError::MissingCredential(
            "ASC_KEY_ID",
        )));
        assert_eq!(err.exit_code(), 64);
        assert!(err.suggestion().unwrap().contains("ASC_KEY_ID"));
    }

    #[test]
    fn test_to_json_shape() {
        let json = CliError::InvalidInput("--limit must be between 1 and 200".into()).to_json();
        assert_eq!(json["error"]["category"], "invalid_input");
        assert_eq!(json["error"]["exit_code"], 64);
        assert_eq!(json["error"]["retryable"], false);
        assert_eq!(json["error"]["message"], "--limit must be between 1 and 200");
    }
}
