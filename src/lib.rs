pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod pricing;
pub mod session;
pub mod utils;

pub use client::ApiClient;
pub use config::Config;
pub use error::{ApiError, ApiResult};
