use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use serde_json::json;
use thiserror::Error;

use crate::auth::AuthError;
use crate::config::ConfigError;
use crate::error_codes::{self, ErrorCategory};

/// One entry of the JSON:API `errors` array returned by App Store Connect.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorDetail {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Value>,
}

impl ApiErrorDetail {
    fn message(&self) -> String {
        match (&self.title, &self.detail) {
            (Some(title), Some(detail)) if title != detail => format!("{}: {}", title, detail),
            (_, Some(detail)) => detail.clone(),
            (Some(title), None) => title.clone(),
            (None, None) => self
                .code
                .clone()
                .unwrap_or_else(|| "Unknown API error".to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub errors: Vec<ApiErrorDetail>,
}

fn summarize_api_errors(errors: &[ApiErrorDetail], raw: &Option<String>) -> String {
    match errors.split_first() {
        Some((first, [])) => first.message(),
        Some((first, rest)) => format!("{} (+{} more)", first.message(), rest.len()),
        None => raw
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or("no error details returned")
            .to_string(),
    }
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("App Store Connect API error ({status}): {}", summarize_api_errors(.errors, .raw))]
    Api {
        status: u16,
        errors: Vec<ApiErrorDetail>,
        raw: Option<String>,
    },

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid URL '{0}'")]
    InvalidUrl(String),

    #[error("Invalid resource ID '{0}': must be a single URL path segment")]
    InvalidPathSegment(String),

    #[error("Refusing to send credentials to '{0}': not the configured API host")]
    ForeignUrl(String),

    #[error("Pagination loop detected: next link '{0}' was already fetched")]
    PaginationLoop(String),

    #[error("Invalid response from App Store Connect: {0}")]
    InvalidResponse(String),

    #[error("Unknown relationship '{relationship}' for {family} (expected one of: {})", .valid.join(", "))]
    UnknownRelationship {
        family: String,
        relationship: String,
        valid: Vec<&'static str>,
    },
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout(err.to_string())
        } else if err.is_decode() {
            ClientError::InvalidResponse(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

impl ClientError {
    /// HTTP status for API errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the error category for programmatic handling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ClientError::Config(_) => ErrorCategory::InvalidInput,
            ClientError::Auth(_) => ErrorCategory::Unauthorized,
            ClientError::Transport(_) => ErrorCategory::External,
            ClientError::Timeout(_) => ErrorCategory::Timeout,
            ClientError::Api { status, .. } => error_codes::category_for_status(*status),
            ClientError::Decode(_) => ErrorCategory::Internal,
            ClientError::InvalidUrl(_) => ErrorCategory::InvalidInput,
            ClientError::InvalidPathSegment(_) => ErrorCategory::InvalidInput,
            ClientError::ForeignUrl(_) => ErrorCategory::InvalidInput,
            ClientError::PaginationLoop(_) => ErrorCategory::External,
            ClientError::InvalidResponse(_) => ErrorCategory::Internal,
            ClientError::UnknownRelationship { .. } => ErrorCategory::InvalidInput,
        }
    }

    /// Returns whether this error is potentially transient and may succeed on retry.
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Transport(_) | ClientError::Timeout(_) => true,
            ClientError::Api { status, .. } => error_codes::is_retryable_status(*status),
            _ => false,
        }
    }

    /// Returns a helpful suggestion for resolving the error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            ClientError::Config(ConfigError::MissingCredential(name)) => Some(format!(
                "Set {} or add it to the config file (see 'asc auth status').",
                name
            )),
            ClientError::Config(_) => {
                Some("Check the config file with 'asc auth status'.".to_string())
            }
            ClientError::Auth(_) => Some(
                "Verify the .p8 key matches the key ID and issuer ID from App Store Connect > Users and Access > Integrations."
                    .to_string(),
            ),
            ClientError::Api { status, .. } => match *status {
                error_codes::UNAUTHORIZED => Some(
                    "The API rejected the token. Check key ID, issuer ID and that the key is not revoked."
                        .to_string(),
                ),
                error_codes::FORBIDDEN => Some(
                    "The API key lacks the role required for this operation.".to_string(),
                ),
                error_codes::NOT_FOUND => {
                    Some("Check the resource ID. Use a 'list' command to find it.".to_string())
                }
                error_codes::TOO_MANY_REQUESTS => {
                    Some("Rate limit reached. Wait a minute and try again.".to_string())
                }
                _ => None,
            },
            ClientError::Timeout(_) => {
                Some("Increase the timeout with --timeout or ASC_TIMEOUT.".to_string())
            }
            ClientError::InvalidPathSegment(_) => Some(
                "Pass the ID exactly as a 'list' command returns it.".to_string(),
            ),
            ClientError::ForeignUrl(_) => Some(
                "Pass a --next URL taken from a previous response of the same API host."
                    .to_string(),
            ),
            ClientError::UnknownRelationship { .. } => {
                Some("Pick one of the listed relationship names.".to_string())
            }
            _ => None,
        }
    }

    /// Returns structured context about the error for debugging.
    pub fn context(&self) -> Value {
        match self {
            ClientError::Api { status, errors, .. } => json!({
                "status": status,
                "errors": errors,
            }),
            ClientError::ForeignUrl(url)
            | ClientError::PaginationLoop(url)
            | ClientError::InvalidUrl(url) => json!({ "url": url }),
            ClientError::InvalidPathSegment(id) => json!({ "id": id }),
            ClientError::UnknownRelationship {
                family,
                relationship,
                valid,
            } => json!({
                "family": family,
                "relationship": relationship,
                "valid": valid,
            }),
            _ => Value::Null,
        }
    }

    /// Returns structured JSON representation of this error.
    pub fn to_json(&self) -> Value {
        json!({
            "message": self.to_string(),
            "category": self.category().as_str(),
            "retryable": self.is_retryable(),
            "context": self.context(),
            "suggestion": self.suggestion(),
        })
    }
}
