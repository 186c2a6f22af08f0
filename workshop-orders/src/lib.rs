//! Workshop order core
//!
//! Client-side logic for building a service order and taking payment on it:
//!
//! - **draft** (`draft`): client → vehicle cascade, line items with the
//!   duplicate-service guard, running total
//! - **money** (`money`): decimal arithmetic, bounds, rounding
//! - **payment** (`payment`): cash / card / QR attempts and their submission
//! - **session** (`session`): catalog loading and order submission
//!
//! HTTP lives in `workshop-client`; this crate only sees the traits in
//! [`traits`].

pub mod config;
pub mod draft;
pub mod error;
pub mod logger;
pub mod money;
pub mod payment;
pub mod session;
pub mod traits;

pub use config::PaymentConfig;
pub use draft::{CascadeState, Catalog, LineItem, LineItemId, OrderDraft, SelectionCascade};
pub use error::{OrderError, OrderResult};
pub use logger::{init_json_logger, init_logger};
pub use payment::{
    AttemptSnapshot, AttemptStatus, CardDetails, ConfirmationDesk, PaymentAllocator, PaymentAttempt,
};
pub use session::OrderSession;
pub use traits::{CatalogSource, OrderGateway, PaymentGateway, PaymentVerifier};
