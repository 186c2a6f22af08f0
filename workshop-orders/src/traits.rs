//! Seams to the external REST backend
//!
//! The core never talks HTTP itself. The client crate implements these
//! traits on top of its API wrapper; tests implement them in memory.

use async_trait::async_trait;
use shared::models::{
    CatalogPart, CatalogService, CreateOrderRequest, OrderBalance, OrderSummary,
    PaymentRecordedResponse, RecordPaymentRequest, Vehicle,
};

use crate::error::OrderResult;
use crate::payment::{PaymentConfirmation, VerificationRequest};

/// Read-only catalog and vehicle lookups
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// `GET /services`
    async fn services(&self) -> OrderResult<Vec<CatalogService>>;
    /// `GET /inventory/parts`
    async fn parts(&self) -> OrderResult<Vec<CatalogPart>>;
    /// `GET /clients/{id}/vehicles`
    async fn client_vehicles(&self, client_id: i64) -> OrderResult<Vec<Vehicle>>;
}

/// Order creation
#[async_trait]
pub trait OrderGateway: Send + Sync {
    /// `POST /orders`; a 4xx must come back as `OrderError::OrderRejected`
    async fn create_order(&self, request: &CreateOrderRequest) -> OrderResult<OrderSummary>;
}

/// Payment recording and balance lookup
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// `GET /payments/order/{id}/balance`
    async fn order_balance(&self, order_id: i64) -> OrderResult<OrderBalance>;
    /// `POST /payments`
    async fn record_payment(
        &self,
        request: &RecordPaymentRequest,
    ) -> OrderResult<PaymentRecordedResponse>;
}

/// External confirmation for QR / bank transfer payments
///
/// Implementations may wait indefinitely; the allocator bounds the wait.
#[async_trait]
pub trait PaymentVerifier: Send + Sync {
    async fn verify(&self, request: &VerificationRequest) -> OrderResult<PaymentConfirmation>;
}
