//! ES256 bearer tokens for the App Store Connect API.

use std::sync::Mutex;

use asc_common::mutex_lock_or_recover;
use chrono::Utc;
use jsonwebtoken::Algorithm;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::config::Credentials;

pub const AUDIENCE: &str = "appstoreconnect-v1";
/// Apple rejects tokens valid for more than 20 minutes.
pub const TOKEN_LIFETIME_SECS: i64 = 20 * 60;
const REFRESH_MARGIN_SECS: i64 = 60;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid private key: {0}")]
    InvalidKey(String),

    #[error("Failed to sign token: {0}")]
    Signing(String),
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
    pub aud: String,
}

#[derive(Debug, Clone)]
struct CachedToken {
    token: String,
    expires_at: i64,
}

/// Signs tokens on demand and reuses them until shortly before expiry.
pub struct TokenProvider {
    key_id: String,
    issuer_id: String,
    key: EncodingKey,
    cached: Mutex<Option<CachedToken>>,
}

impl std::fmt::Debug for TokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenProvider")
            .field("key_id", &self.key_id)
            .field("issuer_id", &self.issuer_id)
            .finish_non_exhaustive()
    }
}

impl TokenProvider {
    pub fn new(credentials: &Credentials) -> Result<Self, AuthError> {
        let key = EncodingKey::from_ec_pem(credentials.private_key_pem.trim().as_bytes())
            .map_err(|e| AuthError::InvalidKey(e.to_string()))?;
        Ok(Self {
            key_id: credentials.key_id.clone(),
            issuer_id: credentials.issuer_id.clone(),
            key,
            cached: Mutex::new(None),
        })
    }

    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    /// Returns a valid token, signing a fresh one when the cached token is stale.
    pub fn bearer_token(&self) -> Result<String, AuthError> {
        self.token_at(Utc::now().timestamp())
    }

    fn token_at(&self, now: i64) -> Result<String, AuthError> {
        let mut cached = mutex_lock_or_recover(&self.cached);
        if let Some(existing) = cached.as_ref() {
            if existing.expires_at - now > REFRESH_MARGIN_SECS {
                return Ok(existing.token.clone());
            }
        }

        let claims = Claims {
            iss: self.issuer_id.clone(),
            iat: now,
            exp: now + TOKEN_LIFETIME_SECS,
            aud: AUDIENCE.to_string(),
        };
        let mut header = Header::new(Algorithm::ES256);
        header.kid = Some(self.key_id.clone());
        let token = jsonwebtoken::encode(&header, &claims, &self.key)
            .map_err(|e| AuthError::Signing(e.to_string()))?;

        tracing::debug!(key_id = %self.key_id, expires_at = claims.exp, "signed new API token");
        *cached = Some(CachedToken {
            token: token.clone(),
            expires_at: claims.exp,
        });
        Ok(token)
    }
}
