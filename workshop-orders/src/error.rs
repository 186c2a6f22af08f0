//! Order core errors

use rust_decimal::Decimal;
use shared::error::{AppError, ErrorCode};
use shared::models::{LineItemKind, PaymentMethod};
use std::time::Duration;
use thiserror::Error;

use crate::draft::LineItemId;

/// Errors raised by the order draft and payment core
///
/// Everything up to `WrongMethod` is a local validation failure: the
/// mutation is rejected and the draft/attempt is left exactly as it was.
/// The remaining variants come back from the backend or the verifier.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OrderError {
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    #[error("Service {0} is already part of the order")]
    DuplicateItem(i64),

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    #[error("{kind:?} {id} not found in catalog")]
    CatalogEntryNotFound { kind: LineItemKind, id: i64 },

    #[error("Insufficient stock for part {part_id}: requested {requested}, available {available}")]
    InsufficientStock {
        part_id: i64,
        requested: i32,
        available: i32,
    },

    #[error("Line item not found: {0}")]
    LineItemNotFound(LineItemId),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Tendered {tendered} is less than the amount due {due}")]
    InsufficientTender { tendered: Decimal, due: Decimal },

    #[error("Amount due {due} exceeds the outstanding balance {outstanding}")]
    ExceedsBalance { due: Decimal, outstanding: Decimal },

    #[error("Invalid card details: {0}")]
    InvalidCardDetails(String),

    #[error("Order {order_id} is not payable in status {status}")]
    OrderNotPayable { order_id: i64, status: String },

    #[error("Payment attempt has not been validated")]
    NotValidated,

    #[error("Operation requires a {expected} payment, attempt is {actual}")]
    WrongMethod {
        expected: PaymentMethod,
        actual: PaymentMethod,
    },

    #[error("Order rejected: {0}")]
    OrderRejected(String),

    #[error("Payment verification timed out after {0:?}")]
    VerificationTimeout(Duration),

    #[error("Payment attempt already submitted")]
    AlreadySubmitted,

    #[error("Backend error: {0}")]
    Backend(String),
}

impl OrderError {
    /// Stable error code for the UI layer
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidSelection(_) => ErrorCode::InvalidSelection,
            Self::DuplicateItem(_) => ErrorCode::DuplicateItem,
            Self::InvalidQuantity(_) => ErrorCode::InvalidQuantity,
            Self::CatalogEntryNotFound { .. } => ErrorCode::CatalogEntryNotFound,
            Self::InsufficientStock { .. } => ErrorCode::InsufficientStock,
            Self::LineItemNotFound(_) => ErrorCode::NotFound,
            Self::InvalidAmount(_) => ErrorCode::InvalidAmount,
            Self::InsufficientTender { .. } => ErrorCode::InsufficientTender,
            Self::ExceedsBalance { .. } => ErrorCode::ExceedsBalance,
            Self::InvalidCardDetails(_) => ErrorCode::InvalidCardDetails,
            Self::OrderNotPayable { .. } => ErrorCode::OrderNotPayable,
            Self::NotValidated => ErrorCode::PaymentNotValidated,
            Self::WrongMethod { .. } => ErrorCode::InvalidRequest,
            Self::OrderRejected(_) => ErrorCode::OrderRejected,
            Self::VerificationTimeout(_) => ErrorCode::VerificationTimeout,
            Self::AlreadySubmitted => ErrorCode::AlreadySubmitted,
            Self::Backend(_) => ErrorCode::NetworkError,
        }
    }

    /// Local validation failures are shown inline; the rest as a notification
    pub fn is_local(&self) -> bool {
        self.code().is_local_validation()
    }
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        let code = err.code();
        let app = AppError::with_message(code, err.to_string());
        match err {
            OrderError::DuplicateItem(id) => app.with_detail("catalog_ref", id),
            OrderError::CatalogEntryNotFound { id, .. } => app.with_detail("catalog_ref", id),
            OrderError::InsufficientStock {
                part_id,
                requested,
                available,
            } => app
                .with_detail("catalog_ref", part_id)
                .with_detail("requested", requested)
                .with_detail("available", available),
            OrderError::InsufficientTender { tendered, due } => app
                .with_detail("tendered", tendered.to_string())
                .with_detail("amount_due", due.to_string()),
            OrderError::ExceedsBalance { due, outstanding } => app
                .with_detail("amount_due", due.to_string())
                .with_detail("outstanding", outstanding.to_string()),
            OrderError::OrderNotPayable { order_id, status } => app
                .with_detail("order_id", order_id)
                .with_detail("status", status),
            _ => app,
        }
    }
}

/// Result type for order core operations
pub type OrderResult<T> = Result<T, OrderError>;
