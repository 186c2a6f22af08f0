//! Payment allocation
//!
//! A [`PaymentAttempt`] is validated locally (cash tender, card form) and
//! then submitted through the [`PaymentAllocator`], which handles external
//! verification and recording against the backend.

mod allocator;
mod attempt;
pub mod card;
mod verifier;

pub use allocator::PaymentAllocator;
pub use attempt::{AttemptSnapshot, AttemptStatus, PaymentAttempt};
pub use card::{CardDetails, ValidatedCard};
pub use verifier::{ConfirmationDesk, PaymentConfirmation, VerificationRequest};
