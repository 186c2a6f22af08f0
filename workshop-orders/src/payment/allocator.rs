//! Payment allocator
//!
//! Opens attempts against the backend balance and drives a validated
//! attempt through verification (QR / transfer) and recording.

use rust_decimal::Decimal;
use shared::models::{PaymentMethod, PaymentRecordedResponse};
use std::sync::Arc;

use super::attempt::PaymentAttempt;
use super::verifier::VerificationRequest;
use crate::config::PaymentConfig;
use crate::error::{OrderError, OrderResult};
use crate::traits::{PaymentGateway, PaymentVerifier};

#[derive(Clone)]
pub struct PaymentAllocator {
    gateway: Arc<dyn PaymentGateway>,
    verifier: Arc<dyn PaymentVerifier>,
    config: PaymentConfig,
}

impl PaymentAllocator {
    pub fn new(
        gateway: Arc<dyn PaymentGateway>,
        verifier: Arc<dyn PaymentVerifier>,
        config: PaymentConfig,
    ) -> Self {
        Self {
            gateway,
            verifier,
            config,
        }
    }

    pub fn config(&self) -> &PaymentConfig {
        &self.config
    }

    /// Fetch the order balance and open an attempt against it
    ///
    /// `amount_due` defaults to the whole outstanding balance.
    pub async fn open(
        &self,
        order_id: i64,
        method: PaymentMethod,
        amount_due: Option<Decimal>,
    ) -> OrderResult<PaymentAttempt> {
        let balance = self.gateway.order_balance(order_id).await?;
        let attempt = PaymentAttempt::open(&balance, method, amount_due)?;
        tracing::debug!(
            attempt_id = %attempt.id(),
            order_id,
            %method,
            amount_due = %attempt.amount_due(),
            outstanding = %attempt.outstanding_balance(),
            "Payment attempt opened"
        );
        Ok(attempt)
    }

    /// Submit a validated attempt
    ///
    /// On an external failure the attempt is back in Validated and may be
    /// resubmitted. If this future is dropped before completing, the attempt
    /// stays in flight and rejects further submissions with `AlreadySubmitted`.
    pub async fn submit(&self, attempt: &mut PaymentAttempt) -> OrderResult<PaymentRecordedResponse> {
        attempt.begin_submission()?;

        match self.record(attempt).await {
            Ok(response) => {
                attempt.complete_submission();
                tracing::info!(
                    attempt_id = %attempt.id(),
                    order_id = attempt.order_id(),
                    payment_id = response.payment.id,
                    amount = %attempt.amount_due(),
                    outstanding = %response.balance.outstanding,
                    "Payment recorded"
                );
                Ok(response)
            }
            Err(e) => {
                attempt.abort_submission();
                tracing::warn!(
                    attempt_id = %attempt.id(),
                    order_id = attempt.order_id(),
                    error = %e,
                    "Payment submission failed"
                );
                Err(e)
            }
        }
    }

    async fn record(&self, attempt: &mut PaymentAttempt) -> OrderResult<PaymentRecordedResponse> {
        if attempt.method().requires_verification() {
            let request = VerificationRequest {
                attempt_id: attempt.id(),
                order_id: attempt.order_id(),
                amount: attempt.amount_due(),
                method: attempt.method(),
            };
            let timeout = self.config.verification_timeout;
            let confirmation = tokio::time::timeout(timeout, self.verifier.verify(&request))
                .await
                .map_err(|_| OrderError::VerificationTimeout(timeout))??;
            attempt.set_reference(confirmation.reference);
        }

        self.gateway.record_payment(&attempt.to_request()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payment::attempt::AttemptStatus;
    use crate::payment::verifier::{ConfirmationDesk, PaymentConfirmation};
    use async_trait::async_trait;
    use shared::models::{BalanceSnapshot, OrderBalance, PaymentRecord, RecordPaymentRequest};
    use std::sync::Mutex;
    use std::time::Duration;

    fn dec(cents: i64) -> Decimal {
        Decimal::new(cents, 2)
    }

    #[derive(Default)]
    struct FakeGateway {
        status: Option<String>,
        recorded: Mutex<Vec<RecordPaymentRequest>>,
        fail_next: Mutex<bool>,
    }

    impl FakeGateway {
        fn payable() -> Self {
            Self {
                status: Some("Finalizado".into()),
                ..Default::default()
            }
        }

        fn recorded(&self) -> Vec<RecordPaymentRequest> {
            self.recorded.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PaymentGateway for FakeGateway {
        async fn order_balance(&self, order_id: i64) -> OrderResult<OrderBalance> {
            Ok(OrderBalance {
                order_id,
                estimated_total: dec(15000),
                total_paid: Decimal::ZERO,
                outstanding: dec(15000),
                fully_paid: false,
                status: self.status.clone(),
                payments: vec![],
            })
        }

        async fn record_payment(
            &self,
            request: &RecordPaymentRequest,
        ) -> OrderResult<PaymentRecordedResponse> {
            if std::mem::take(&mut *self.fail_next.lock().unwrap()) {
                return Err(OrderError::Backend("connection reset".into()));
            }
            let mut recorded = self.recorded.lock().unwrap();
            recorded.push(request.clone());
            let paid: Decimal = recorded.iter().map(|r| r.amount).sum();
            Ok(PaymentRecordedResponse {
                msg: Some("Pago registrado exitosamente".into()),
                payment: PaymentRecord {
                    id: recorded.len() as i64,
                    order_id: Some(request.order_id),
                    amount: request.amount,
                    method: request.method.as_str().to_string(),
                    reference: request.reference.clone(),
                    paid_at: None,
                },
                balance: BalanceSnapshot {
                    order_total: dec(15000),
                    total_paid: paid,
                    outstanding: dec(15000) - paid,
                    fully_paid: paid >= dec(15000),
                },
            })
        }
    }

    /// Never answers
    struct SilentVerifier;

    #[async_trait]
    impl PaymentVerifier for SilentVerifier {
        async fn verify(&self, _request: &VerificationRequest) -> OrderResult<PaymentConfirmation> {
            std::future::pending().await
        }
    }

    struct InstantVerifier;

    #[async_trait]
    impl PaymentVerifier for InstantVerifier {
        async fn verify(&self, request: &VerificationRequest) -> OrderResult<PaymentConfirmation> {
            Ok(PaymentConfirmation {
                reference: format!("QR-{}", request.order_id),
            })
        }
    }

    fn allocator(gateway: Arc<FakeGateway>, verifier: Arc<dyn PaymentVerifier>) -> PaymentAllocator {
        PaymentAllocator::new(gateway, verifier, PaymentConfig::default())
    }

    #[tokio::test]
    async fn test_cash_payment_recorded() {
        let gateway = Arc::new(FakeGateway::payable());
        let allocator = allocator(gateway.clone(), Arc::new(InstantVerifier));

        let mut attempt = allocator.open(7, PaymentMethod::Cash, None).await.unwrap();
        attempt.set_tendered_amount(dec(20000)).unwrap();
        let response = allocator.submit(&mut attempt).await.unwrap();

        assert_eq!(attempt.status(), AttemptStatus::Submitted);
        assert!(response.balance.fully_paid);
        let recorded = gateway.recorded();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].amount, dec(15000));
        assert_eq!(recorded[0].reference, "");
    }

    #[tokio::test]
    async fn test_open_rejects_unfinished_order() {
        let gateway = Arc::new(FakeGateway {
            status: Some("En Proceso".into()),
            ..Default::default()
        });
        let allocator = allocator(gateway, Arc::new(InstantVerifier));

        let err = allocator.open(7, PaymentMethod::Cash, None).await.unwrap_err();
        assert!(matches!(err, OrderError::OrderNotPayable { .. }));
    }

    #[tokio::test]
    async fn test_second_submit_is_rejected() {
        let gateway = Arc::new(FakeGateway::payable());
        let allocator = allocator(gateway.clone(), Arc::new(InstantVerifier));

        let mut attempt = allocator.open(7, PaymentMethod::Cash, None).await.unwrap();
        attempt.set_tendered_amount(dec(15000)).unwrap();
        allocator.submit(&mut attempt).await.unwrap();

        assert_eq!(
            allocator.submit(&mut attempt).await.unwrap_err(),
            OrderError::AlreadySubmitted
        );
        assert_eq!(gateway.recorded().len(), 1);
    }

    #[tokio::test]
    async fn test_unvalidated_attempt_not_submitted() {
        let gateway = Arc::new(FakeGateway::payable());
        let allocator = allocator(gateway.clone(), Arc::new(InstantVerifier));

        let mut attempt = allocator.open(7, PaymentMethod::Cash, None).await.unwrap();
        assert_eq!(
            allocator.submit(&mut attempt).await.unwrap_err(),
            OrderError::NotValidated
        );
        assert!(gateway.recorded().is_empty());
    }

    #[tokio::test]
    async fn test_qr_reference_from_verifier() {
        let gateway = Arc::new(FakeGateway::payable());
        let allocator = allocator(gateway.clone(), Arc::new(InstantVerifier));

        let mut attempt = allocator
            .open(7, PaymentMethod::Qr, Some(dec(5000)))
            .await
            .unwrap();
        assert_eq!(attempt.status(), AttemptStatus::Validated);
        let response = allocator.submit(&mut attempt).await.unwrap();

        assert_eq!(response.payment.reference, "QR-7");
        assert_eq!(response.balance.outstanding, dec(10000));
        assert_eq!(attempt.reference(), Some("QR-7"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_verification_timeout_returns_to_validated() {
        let gateway = Arc::new(FakeGateway::payable());
        let allocator = PaymentAllocator::new(
            gateway.clone(),
            Arc::new(SilentVerifier),
            PaymentConfig::default().with_verification_timeout(Duration::from_secs(30)),
        );

        let mut attempt = allocator.open(7, PaymentMethod::Qr, None).await.unwrap();
        let err = allocator.submit(&mut attempt).await.unwrap_err();

        assert_eq!(err, OrderError::VerificationTimeout(Duration::from_secs(30)));
        assert_eq!(attempt.status(), AttemptStatus::Validated);
        assert!(!attempt.is_in_flight());
        assert!(gateway.recorded().is_empty());
    }

    #[tokio::test]
    async fn test_backend_failure_allows_retry() {
        let gateway = Arc::new(FakeGateway::payable());
        *gateway.fail_next.lock().unwrap() = true;
        let allocator = allocator(gateway.clone(), Arc::new(InstantVerifier));

        let mut attempt = allocator.open(7, PaymentMethod::Cash, None).await.unwrap();
        attempt.set_tendered_amount(dec(15000)).unwrap();

        assert!(matches!(
            allocator.submit(&mut attempt).await,
            Err(OrderError::Backend(_))
        ));
        assert_eq!(attempt.status(), AttemptStatus::Validated);

        allocator.submit(&mut attempt).await.unwrap();
        assert_eq!(attempt.status(), AttemptStatus::Submitted);
        assert_eq!(gateway.recorded().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_submission_stays_in_flight() {
        let gateway = Arc::new(FakeGateway::payable());
        let allocator = allocator(gateway.clone(), Arc::new(SilentVerifier));

        let mut attempt = allocator.open(7, PaymentMethod::Transfer, None).await.unwrap();
        let outer = tokio::time::timeout(Duration::from_secs(1), allocator.submit(&mut attempt)).await;
        assert!(outer.is_err());

        assert!(attempt.is_in_flight());
        assert_eq!(
            allocator.submit(&mut attempt).await.unwrap_err(),
            OrderError::AlreadySubmitted
        );
    }

    #[tokio::test]
    async fn test_attempt_recorded_at_most_once() {
        let gateway = Arc::new(FakeGateway::payable());
        *gateway.fail_next.lock().unwrap() = true;
        let allocator = allocator(gateway.clone(), Arc::new(InstantVerifier));

        let mut attempt = allocator.open(7, PaymentMethod::Cash, None).await.unwrap();
        attempt.set_tendered_amount(dec(15000)).unwrap();
        let view = attempt.snapshot();

        assert!(allocator.submit(&mut attempt).await.is_err());
        allocator.submit(&mut attempt).await.unwrap();
        for _ in 0..3 {
            assert_eq!(
                allocator.submit(&mut attempt).await.unwrap_err(),
                OrderError::AlreadySubmitted
            );
        }

        let recorded = gateway.recorded();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].amount, dec(15000));
        // The earlier view still reads Validated but carries no way to submit
        assert_eq!(view.status, AttemptStatus::Validated);
        assert_eq!(attempt.status(), AttemptStatus::Submitted);
    }

    #[tokio::test]
    async fn test_concurrent_wait_on_same_attempt_keeps_first() {
        let gateway = Arc::new(FakeGateway::payable());
        let desk = ConfirmationDesk::new();
        let allocator = allocator(gateway.clone(), Arc::new(desk.clone()));

        let mut attempt = allocator.open(7, PaymentMethod::Qr, None).await.unwrap();
        let stray = VerificationRequest {
            attempt_id: attempt.id(),
            order_id: 7,
            amount: attempt.amount_due(),
            method: PaymentMethod::Qr,
        };

        let confirmer = tokio::spawn(async move {
            while !desk.is_waiting(stray.attempt_id) {
                tokio::task::yield_now().await;
            }
            let second = desk.verify(&stray).await;
            let confirmed = desk.confirm(stray.attempt_id, "QR-ONCE");
            (second, confirmed)
        });

        let response = allocator.submit(&mut attempt).await.unwrap();
        let (second, confirmed) = confirmer.await.unwrap();

        assert_eq!(second, Err(OrderError::AlreadySubmitted));
        assert!(confirmed);
        assert_eq!(response.payment.reference, "QR-ONCE");
        assert_eq!(gateway.recorded().len(), 1);
    }

    #[tokio::test]
    async fn test_confirmation_desk_end_to_end() {
        let gateway = Arc::new(FakeGateway::payable());
        let desk = ConfirmationDesk::new();
        let allocator = allocator(gateway.clone(), Arc::new(desk.clone()));

        let mut attempt = allocator.open(7, PaymentMethod::Qr, None).await.unwrap();
        let attempt_id = attempt.id();

        let confirmer = tokio::spawn(async move {
            while !desk.is_waiting(attempt_id) {
                tokio::task::yield_now().await;
            }
            desk.confirm(attempt_id, "BNB-0042")
        });

        let response = allocator.submit(&mut attempt).await.unwrap();
        assert!(confirmer.await.unwrap());
        assert_eq!(response.payment.reference, "BNB-0042");
        assert_eq!(gateway.recorded()[0].method, PaymentMethod::Qr);
    }
}
