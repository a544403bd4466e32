use std::collections::HashMap;
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;

use asc_common::mutex_lock_or_recover;
use async_trait::async_trait;
use serde_json::Value;
use serde_json::json;

use crate::client::ApiClient;
use crate::error::ApiErrorDetail;
use crate::error::ClientError;
use crate::request::ApiRequest;
use crate::request::Method;

#[derive(Debug, Clone)]
enum MockReply {
    Body(Value),
    ApiError { status: u16, detail: String },
}

/// A mock implementation of `ApiClient` for testing.
///
/// Responses are keyed by `"<METHOD> <path>"`, where `path` is the request
/// path without its query string (or the full URL for `links.next` requests).
/// Several responses pushed for one key are returned in order, and the last
/// one keeps being returned once the queue is down to it.
///
/// # Example
///
/// ```ignore
/// use asc_client::{ApiClient, ApiRequest, Method, MockClient};
/// use serde_json::json;
///
/// let mock = MockClient::new();
/// mock.set_response(Method::Get, "/v1/apps", json!({ "data": [] }));
///
/// let result = mock.send(ApiRequest::get("/v1/apps")).await.unwrap();
/// assert_eq!(result, json!({ "data": [] }));
/// assert_eq!(mock.call_count(Method::Get, "/v1/apps"), 1);
/// ```
#[derive(Clone)]
pub struct MockClient {
    responses: Arc<Mutex<HashMap<String, VecDeque<MockReply>>>>,
    calls: Arc<Mutex<Vec<ApiRequest>>>,
    default_response: Value,
    error_on_missing: bool,
}

impl Default for MockClient {
    fn default() -> Self {
        Self::new()
    }
}

fn key(method: Method, path: &str) -> String {
    format!("{} {}", method, path)
}

impl MockClient {
    /// Creates a mock that answers unconfigured requests with an empty list document.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            default_response: json!({ "data": [] }),
            error_on_missing: false,
        }
    }

    /// Creates a mock that fails every unconfigured request.
    pub fn new_strict() -> Self {
        Self {
            error_on_missing: true,
            ..Self::new()
        }
    }

    /// Replaces any queued responses for `method path` with one sticky response.
    pub fn set_response(&self, method: Method, path: &str, response: Value) {
        mutex_lock_or_recover(&self.responses)
            .insert(key(method, path), VecDeque::from([MockReply::Body(response)]));
    }

    /// Appends a response to the queue for `method path`.
    pub fn push_response(&self, method: Method, path: &str, response: Value) {
        mutex_lock_or_recover(&self.responses)
            .entry(key(method, path))
            .or_default()
            .push_back(MockReply::Body(response));
    }

    /// Makes `method path` fail with an API error.
    pub fn set_api_error(&self, method: Method, path: &str, status: u16, detail: &str) {
        mutex_lock_or_recover(&self.responses).insert(
            key(method, path),
            VecDeque::from([MockReply::ApiError {
                status,
                detail: detail.to_string(),
            }]),
        );
    }

    /// Returns all requests made to this client.
    pub fn get_calls(&self) -> Vec<ApiRequest> {
        mutex_lock_or_recover(&self.calls).clone()
    }

    /// Returns the number of requests made to `method path`.
    pub fn call_count(&self, method: Method, path: &str) -> usize {
        mutex_lock_or_recover(&self.calls)
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    /// Returns the last request made to `method path`.
    pub fn last_call(&self, method: Method, path: &str) -> Option<ApiRequest> {
        mutex_lock_or_recover(&self.calls)
            .iter()
            .rev()
            .find(|r| r.method == method && r.path == path)
            .cloned()
    }

    fn next_reply(&self, method: Method, path: &str) -> Option<MockReply> {
        let mut responses = mutex_lock_or_recover(&self.responses);
        let queue = responses.get_mut(&key(method, path))?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

#[async_trait]
impl ApiClient for MockClient {
    async fn send(&self, request: ApiRequest) -> Result<Value, ClientError> {
        let (method, path) = (request.method, request.path.clone());
        mutex_lock_or_recover(&self.calls).push(request);

        match self.next_reply(method, &path) {
            Some(MockReply::Body(value)) => Ok(value),
            Some(MockReply::ApiError { status, detail }) => Err(ClientError::Api {
                status,
                errors: vec![ApiErrorDetail {
                    status: Some(status.to_string()),
                    detail: Some(detail),
                    ..Default::default()
                }],
                raw: None,
            }),
            None if self.error_on_missing => Err(ClientError::InvalidResponse(format!(
                "no mock response for {}",
                key(method, &path)
            ))),
            None => Ok(self.default_response.clone()),
        }
    }
}
