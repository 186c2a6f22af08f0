//! Workshop Client - HTTP client for the workshop REST backend
//!
//! Provides the typed [`WorkshopApi`] over a pluggable [`HttpClient`] and
//! the gateway implementations the order core consumes.

pub mod api;
pub mod config;
pub mod error;
pub mod gateway;
pub mod http;
#[cfg(feature = "in-process")]
pub mod oneshot;

pub use api::WorkshopApi;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use crate::http::{HttpClient, NetworkHttpClient};
#[cfg(feature = "in-process")]
pub use oneshot::OneshotHttpClient;

// Re-export shared types for convenience
pub use shared::models::{Client, ClientQuery, PaymentPeriod};
pub use shared::PaginatedResponse;
