//! Shared types for the workshop framework
//!
//! Wire models exchanged with the workshop REST backend, the unified
//! error codes, and the paginated/list response shapes used by both the
//! order core and the HTTP client.

pub mod error;
pub mod models;
pub mod response;

// Re-exports
pub use http;
pub use rust_decimal::Decimal;
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use response::{MessageResponse, PaginatedResponse};
