use std::time::Instant;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde_json::Value;
use url::Url;

use crate::auth::TokenProvider;
use crate::config::ClientConfig;
use crate::error::ApiErrorBody;
use crate::error::ClientError;
use crate::request::ApiRequest;
use crate::request::Method;
use crate::request::check_path_segment;

pub const USER_AGENT: &str = concat!("asc/", env!("CARGO_PKG_VERSION"));

/// Anything that can execute an [`ApiRequest`] and hand back the decoded body.
///
/// Empty bodies (e.g. `204 No Content` after a delete) come back as `Value::Null`.
#[async_trait]
pub trait ApiClient: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<Value, ClientError>;
}

/// The reqwest-backed client used by every command.
pub struct HttpClient {
    http: reqwest::Client,
    base_url: Url,
    tokens: TokenProvider,
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url.as_str())
            .field("tokens", &self.tokens)
            .finish()
    }
}

fn same_origin(a: &Url, b: &Url) -> bool {
    a.scheme() == b.scheme()
        && a.host_str() == b.host_str()
        && a.port_or_known_default() == b.port_or_known_default()
}

fn reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
    }
}

pub(crate) fn decode_api_error(status: u16, body: &str) -> ClientError {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) if !parsed.errors.is_empty() => ClientError::Api {
            status,
            errors: parsed.errors,
            raw: None,
        },
        _ => ClientError::Api {
            status,
            errors: Vec::new(),
            raw: Some(body.to_string()),
        },
    }
}

impl HttpClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let credentials = config.credentials()?;
        let tokens = TokenProvider::new(&credentials)?;
        let base_url = Url::parse(&config.base_url)
            .map_err(|_| ClientError::InvalidUrl(config.base_url.clone()))?;
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            http,
            base_url,
            tokens,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds the final URL, refusing absolute URLs that point away from the API host.
    pub fn resolve_url(&self, request: &ApiRequest) -> Result<Url, ClientError> {
        let mut url = if request.is_absolute() {
            let url = Url::parse(&request.path)
                .map_err(|_| ClientError::InvalidUrl(request.path.clone()))?;
            if !same_origin(&url, &self.base_url) {
                return Err(ClientError::ForeignUrl(request.path.clone()));
            }
            url
        } else {
            for segment in request.path.trim_start_matches('/').split('/') {
                check_path_segment(segment)?;
            }
            let base = self.base_url.as_str().trim_end_matches('/');
            let path = if request.path.starts_with('/') {
                request.path.clone()
            } else {
                format!("/{}", request.path)
            };
            let joined = format!("{}{}", base, path);
            Url::parse(&joined).map_err(|_| ClientError::InvalidUrl(joined))?
        };

        if !request.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &request.query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }
}

#[async_trait]
impl ApiClient for HttpClient {
    async fn send(&self, request: ApiRequest) -> Result<Value, ClientError> {
        let url = self.resolve_url(&request)?;
        let token = self.tokens.bearer_token()?;

        let mut builder = self
            .http
            .request(reqwest_method(request.method), url.clone())
            .bearer_auth(token)
            .header(ACCEPT, "application/json");
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let started = Instant::now();
        let response = builder.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;
        tracing::debug!(
            method = %request.method,
            path = url.path(),
            status,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "api request"
        );

        if !(200..300).contains(&status) {
            return Err(decode_api_error(status, &text));
        }
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }
}
