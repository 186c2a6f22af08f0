//! Unified error codes for the workshop framework
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 4xxx: Order draft errors
//! - 5xxx: Payment errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so the UI layer can
/// localise them without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Invalid request
    InvalidRequest = 5,

    // ==================== 4xxx: Order ====================
    /// Client/vehicle selection is not valid for the draft
    InvalidSelection = 4001,
    /// Service already present in the draft
    DuplicateItem = 4002,
    /// Quantity is zero, negative or too large
    InvalidQuantity = 4003,
    /// Catalog entry does not exist
    CatalogEntryNotFound = 4004,
    /// Part stock is lower than the requested quantity
    InsufficientStock = 4005,
    /// Backend rejected the order
    OrderRejected = 4006,

    // ==================== 5xxx: Payment ====================
    /// Tendered cash is lower than the amount due
    InsufficientTender = 5001,
    /// Amount due exceeds the outstanding balance
    ExceedsBalance = 5002,
    /// Card form is incomplete or invalid
    InvalidCardDetails = 5003,
    /// External verification did not confirm in time
    VerificationTimeout = 5004,
    /// Attempt already submitted or in flight
    AlreadySubmitted = 5005,
    /// Amount is zero, negative or too large
    InvalidAmount = 5006,
    /// Order is not in a payable status
    OrderNotPayable = 5007,
    /// Attempt has not been validated yet
    PaymentNotValidated = 5008,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Network error talking to the backend
    NetworkError = 9101,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::InvalidRequest => "Invalid request",

            // Order
            ErrorCode::InvalidSelection => "Invalid client or vehicle selection",
            ErrorCode::DuplicateItem => "Service is already part of the order",
            ErrorCode::InvalidQuantity => "Invalid quantity",
            ErrorCode::CatalogEntryNotFound => "Catalog entry not found",
            ErrorCode::InsufficientStock => "Insufficient stock",
            ErrorCode::OrderRejected => "Order rejected by the server",

            // Payment
            ErrorCode::InsufficientTender => "Tendered amount is lower than the amount due",
            ErrorCode::ExceedsBalance => "Amount exceeds the outstanding balance",
            ErrorCode::InvalidCardDetails => "Invalid card details",
            ErrorCode::VerificationTimeout => "Payment verification timed out",
            ErrorCode::AlreadySubmitted => "Payment already submitted",
            ErrorCode::InvalidAmount => "Invalid amount",
            ErrorCode::OrderNotPayable => "Order is not ready for payment",
            ErrorCode::PaymentNotValidated => "Payment has not been validated",

            // System
            ErrorCode::InternalError => "Internal error",
            ErrorCode::NetworkError => "Network error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            5 => Ok(ErrorCode::InvalidRequest),

            4001 => Ok(ErrorCode::InvalidSelection),
            4002 => Ok(ErrorCode::DuplicateItem),
            4003 => Ok(ErrorCode::InvalidQuantity),
            4004 => Ok(ErrorCode::CatalogEntryNotFound),
            4005 => Ok(ErrorCode::InsufficientStock),
            4006 => Ok(ErrorCode::OrderRejected),

            5001 => Ok(ErrorCode::InsufficientTender),
            5002 => Ok(ErrorCode::ExceedsBalance),
            5003 => Ok(ErrorCode::InvalidCardDetails),
            5004 => Ok(ErrorCode::VerificationTimeout),
            5005 => Ok(ErrorCode::AlreadySubmitted),
            5006 => Ok(ErrorCode::InvalidAmount),
            5007 => Ok(ErrorCode::OrderNotPayable),
            5008 => Ok(ErrorCode::PaymentNotValidated),

            9001 => Ok(ErrorCode::InternalError),
            9101 => Ok(ErrorCode::NetworkError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
