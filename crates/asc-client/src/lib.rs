#![deny(clippy::all)]

pub mod auth;
mod client;
pub mod config;
pub mod document;
mod error;
pub mod error_codes;
pub mod linkage;
mod mock_client;
pub mod pagination;
mod request;

pub use auth::AuthError;
pub use auth::TokenProvider;
pub use client::ApiClient;
pub use client::HttpClient;
pub use client::USER_AGENT;
pub use config::ClientConfig;
pub use config::ConfigError;
pub use config::ConfigOverrides;
pub use config::Credentials;
pub use config::KeySource;
pub use error::ApiErrorDetail;
pub use error::ClientError;
pub use error_codes::ErrorCategory;
pub use mock_client::MockClient;
pub use pagination::fetch_list;
pub use pagination::paginate_all;
pub use request::ApiRequest;
pub use request::MAX_PAGE_LIMIT;
pub use request::check_path_segment;
pub use request::Method;

pub type Result<T> = std::result::Result<T, ClientError>;
