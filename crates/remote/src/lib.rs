//! HTTP access layer for the internet users API.
//!
//! This crate contains:
//! - HTTP client construction and URL handling
//! - Per-endpoint repositories for users and reference lists
//! - The `RemoteUserStore` implementation used by the console
//! - Request duration metrics

pub mod client;
pub mod error;
pub mod metrics;
pub mod repositories;
pub mod store;

pub use client::{ApiClient, HttpConfig};
pub use error::RemoteError;
pub use store::HttpUserStore;
