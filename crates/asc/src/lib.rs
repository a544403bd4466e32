#![deny(clippy::all)]

pub mod app;
pub mod build_number;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod presenter;
pub mod telemetry;
pub mod validation;

pub use app::Application;
pub use build_number::BuildNumber;
pub use error::CliError;
pub use handlers::HandlerContext;
pub use handlers::HandlerResult;
