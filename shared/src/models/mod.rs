//! Data models
//!
//! Wire shapes of the workshop backend. All IDs are `i64` (backend integer
//! primary keys); all money is `Decimal`, serialized as JSON numbers.

pub mod catalog;
pub mod client;
pub mod order;
pub mod payment;
pub mod vehicle;

// Re-exports
pub use catalog::*;
pub use client::*;
pub use order::*;
pub use payment::*;
pub use vehicle::*;
