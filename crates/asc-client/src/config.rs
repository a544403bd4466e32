//! Layered client configuration.
//!
//! Precedence, highest first: explicit overrides (CLI flags), `ASC_*`
//! environment variables, the JSON config file, built-in defaults.

use std::env;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;
use serde_json::Value;
use serde_json::json;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://api.appstoreconnect.apple.com";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const ENV_KEY_ID: &str = "ASC_KEY_ID";
pub const ENV_ISSUER_ID: &str = "ASC_ISSUER_ID";
pub const ENV_PRIVATE_KEY_PATH: &str = "ASC_PRIVATE_KEY_PATH";
pub const ENV_PRIVATE_KEY: &str = "ASC_PRIVATE_KEY";
pub const ENV_PRIVATE_KEY_B64: &str = "ASC_PRIVATE_KEY_B64";
pub const ENV_BASE_URL: &str = "ASC_BASE_URL";
pub const ENV_TIMEOUT: &str = "ASC_TIMEOUT";
pub const ENV_CONFIG_PATH: &str = "ASC_CONFIG_PATH";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing credential: {0}")]
    MissingCredential(&'static str),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid value for {name}: '{value}'")]
    InvalidValue { name: &'static str, value: String },
}

/// Where the signing key comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum KeySource {
    Path(PathBuf),
    Inline(String),
}

/// Values supplied on the command line. `None` means "not given".
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub key_id: Option<String>,
    pub issuer_id: Option<String>,
    pub private_key_path: Option<PathBuf>,
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub config_path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    key_id: Option<String>,
    issuer_id: Option<String>,
    private_key_path: Option<PathBuf>,
    base_url: Option<String>,
    timeout_secs: Option<u64>,
}

/// Fully resolved signing material.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub key_id: String,
    pub issuer_id: String,
    pub private_key_pem: String,
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub key_id: Option<String>,
    pub issuer_id: Option<String>,
    pub private_key: Option<KeySource>,
    pub base_url: String,
    pub timeout: Duration,
    pub config_path: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            key_id: None,
            issuer_id: None,
            private_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            config_path: None,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn process_env(name: &str) -> Option<String> {
    env::var(name).ok()
}

pub fn default_config_path() -> Option<PathBuf> {
    env::var_os("HOME").map(|home| PathBuf::from(home).join(".asc").join("config.json"))
}

fn read_file_config(path: &Path) -> Result<FileConfig, ConfigError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(FileConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    match url::Url::parse(trimmed) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(trimmed.to_string()),
        _ => Err(ConfigError::InvalidValue {
            name: ENV_BASE_URL,
            value: raw.to_string(),
        }),
    }
}

impl ClientConfig {
    pub fn load(overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        Self::load_with(overrides, process_env)
    }

    /// Resolves configuration with an injectable environment lookup.
    pub fn load_with<F>(overrides: ConfigOverrides, env_lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |name: &str| non_empty(env_lookup(name));

        let config_path = overrides
            .config_path
            .clone()
            .or_else(|| lookup(ENV_CONFIG_PATH).map(PathBuf::from))
            .or_else(default_config_path);
        let file = match &config_path {
            Some(path) => read_file_config(path)?,
            None => FileConfig::default(),
        };

        let key_id = non_empty(overrides.key_id)
            .or_else(|| lookup(ENV_KEY_ID))
            .or_else(|| non_empty(file.key_id));
        let issuer_id = non_empty(overrides.issuer_id)
            .or_else(|| lookup(ENV_ISSUER_ID))
            .or_else(|| non_empty(file.issuer_id));

        let private_key = if let Some(path) = overrides.private_key_path {
            Some(KeySource::Path(path))
        } else if let Some(path) = lookup(ENV_PRIVATE_KEY_PATH) {
            Some(KeySource::Path(PathBuf::from(path)))
        } else if let Some(pem) = lookup(ENV_PRIVATE_KEY) {
            Some(KeySource::Inline(pem))
        } else if let Some(encoded) = lookup(ENV_PRIVATE_KEY_B64) {
            let decoded = STANDARD
                .decode(encoded.as_bytes())
                .ok()
                .and_then(|bytes| String::from_utf8(bytes).ok())
                .ok_or(ConfigError::InvalidValue {
                    name: ENV_PRIVATE_KEY_B64,
                    value: "<redacted>".to_string(),
                })?;
            Some(KeySource::Inline(decoded))
        } else {
            file.private_key_path.map(KeySource::Path)
        };

        let base_url = match non_empty(overrides.base_url)
            .or_else(|| lookup(ENV_BASE_URL))
            .or_else(|| non_empty(file.base_url))
        {
            Some(raw) => normalize_base_url(&raw)?,
            None => DEFAULT_BASE_URL.to_string(),
        };

        let timeout_secs = match overrides.timeout_secs {
            Some(secs) => secs,
            None => match lookup(ENV_TIMEOUT) {
                Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                    name: ENV_TIMEOUT,
                    value: raw.clone(),
                })?,
                None => file.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
            },
        };
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                name: ENV_TIMEOUT,
                value: "0".to_string(),
            });
        }

        Ok(Self {
            key_id,
            issuer_id,
            private_key,
            base_url,
            timeout: Duration::from_secs(timeout_secs),
            config_path,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_credentials(
        mut self,
        key_id: impl Into<String>,
        issuer_id: impl Into<String>,
        private_key: KeySource,
    ) -> Self {
        self.key_id = Some(key_id.into());
        self.issuer_id = Some(issuer_id.into());
        self.private_key = Some(private_key);
        self
    }

    /// Reads the signing key and returns everything needed to mint tokens.
    pub fn credentials(&self) -> Result<Credentials, ConfigError> {
        let key_id = self
            .key_id
            .clone()
            .ok_or(ConfigError::MissingCredential(ENV_KEY_ID))?;
        let issuer_id = self
            .issuer_id
            .clone()
            .ok_or(ConfigError::MissingCredential(ENV_ISSUER_ID))?;
        let private_key_pem = match &self.private_key {
            Some(KeySource::Inline(pem)) => pem.clone(),
            Some(KeySource::Path(path)) => {
                std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                    path: path.clone(),
                    source,
                })?
            }
            None => return Err(ConfigError::MissingCredential(ENV_PRIVATE_KEY_PATH)),
        };
        Ok(Credentials {
            key_id,
            issuer_id,
            private_key_pem,
        })
    }

    /// Resolved settings with the key material itself left out.
    pub fn describe(&self) -> Value {
        let private_key = match &self.private_key {
            Some(KeySource::Path(path)) => json!({ "source": "path", "path": path }),
            Some(KeySource::Inline(_)) => json!({ "source": "environment" }),
            None => Value::Null,
        };
        json!({
            "key_id": self.key_id,
            "issuer_id": self.issuer_id,
            "private_key": private_key,
            "base_url": self.base_url,
            "timeout_secs": self.timeout.as_secs(),
            "config_path": self.config_path,
            "complete": self.key_id.is_some() && self.issuer_id.is_some() && self.private_key.is_some(),
        })
    }
}
