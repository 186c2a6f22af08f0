//! External confirmation of QR / transfer payments
//!
//! [`ConfirmationDesk`] is an in-process [`PaymentVerifier`]: `verify` parks
//! until someone (the cashier UI, a bank webhook handler) calls `confirm`
//! with the attempt id. The allocator bounds the wait.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::models::PaymentMethod;
use std::sync::Arc;
use tokio::sync::oneshot;
use uuid::Uuid;

use crate::error::{OrderError, OrderResult};
use crate::traits::PaymentVerifier;

/// What the verifier is asked to confirm
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationRequest {
    pub attempt_id: Uuid,
    pub order_id: i64,
    pub amount: Decimal,
    pub method: PaymentMethod,
}

/// Positive confirmation; `reference` is recorded with the payment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentConfirmation {
    pub reference: String,
}

type Pending = Arc<DashMap<Uuid, oneshot::Sender<Option<String>>>>;

#[derive(Debug, Clone, Default)]
pub struct ConfirmationDesk {
    pending: Pending,
}

impl ConfirmationDesk {
    pub fn new() -> Self {
        Self::default()
    }

    /// Confirm a waiting attempt. Returns false if nothing was waiting.
    pub fn confirm(&self, attempt_id: Uuid, reference: impl Into<String>) -> bool {
        self.resolve(attempt_id, Some(reference.into()))
    }

    /// Decline a waiting attempt. Returns false if nothing was waiting.
    pub fn decline(&self, attempt_id: Uuid) -> bool {
        self.resolve(attempt_id, None)
    }

    pub fn is_waiting(&self, attempt_id: Uuid) -> bool {
        self.pending.contains_key(&attempt_id)
    }

    pub fn waiting_count(&self) -> usize {
        self.pending.len()
    }

    fn resolve(&self, attempt_id: Uuid, outcome: Option<String>) -> bool {
        match self.pending.remove(&attempt_id) {
            Some((_, tx)) => tx.send(outcome).is_ok(),
            None => false,
        }
    }
}

/// Removes the pending entry when `verify` returns or is dropped
struct PendingGuard {
    pending: Pending,
    attempt_id: Uuid,
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        self.pending.remove(&self.attempt_id);
    }
}

#[async_trait]
impl PaymentVerifier for ConfirmationDesk {
    async fn verify(&self, request: &VerificationRequest) -> OrderResult<PaymentConfirmation> {
        let (tx, rx) = oneshot::channel();
        // One waiter per attempt; a second one must not replace the first
        match self.pending.entry(request.attempt_id) {
            Entry::Occupied(_) => {
                tracing::warn!(
                    attempt_id = %request.attempt_id,
                    "Attempt already awaiting confirmation"
                );
                return Err(OrderError::AlreadySubmitted);
            }
            Entry::Vacant(slot) => {
                slot.insert(tx);
            }
        }
        let _guard = PendingGuard {
            pending: self.pending.clone(),
            attempt_id: request.attempt_id,
        };

        tracing::info!(
            attempt_id = %request.attempt_id,
            order_id = request.order_id,
            amount = %request.amount,
            method = %request.method,
            "Waiting for payment confirmation"
        );

        match rx.await {
            Ok(Some(reference)) => Ok(PaymentConfirmation { reference }),
            Ok(None) => Err(OrderError::Backend(format!(
                "{} payment declined",
                request.method
            ))),
            Err(_) => Err(OrderError::Backend(
                "confirmation channel closed".to_string(),
            )),
        }
    }
}
