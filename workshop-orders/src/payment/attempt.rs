//! Payment attempt state machine
//!
//! `Draft → Validated → Submitted`, no way back. Retrying after a
//! successful submission needs a new attempt. Validation failures leave the
//! attempt exactly as it was.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::models::{OrderBalance, PaymentMethod, RecordPaymentRequest};
use uuid::Uuid;

use super::card::{self, CardDetails};
use crate::error::{OrderError, OrderResult};
use crate::money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttemptStatus {
    Draft,
    Validated,
    Submitted,
}

/// Read-only view of an attempt; cannot be submitted
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttemptSnapshot {
    pub id: Uuid,
    pub order_id: i64,
    pub method: PaymentMethod,
    pub amount_due: Decimal,
    pub outstanding_balance: Decimal,
    pub status: AttemptStatus,
    pub tendered: Option<Decimal>,
    pub change: Option<Decimal>,
    pub reference: Option<String>,
    pub in_flight: bool,
}

/// One payment against one order
///
/// Not `Clone`: the attempt id is what the verifier and the backend key a
/// submission on, so there is exactly one owner that can submit it. Use
/// [`PaymentAttempt::snapshot`] for a copy to display.
#[derive(Debug)]
pub struct PaymentAttempt {
    id: Uuid,
    order_id: i64,
    method: PaymentMethod,
    /// Amount this attempt pays
    amount_due: Decimal,
    /// What the order still owes, snapshotted when the attempt was opened
    outstanding_balance: Decimal,
    status: AttemptStatus,
    tendered: Option<Decimal>,
    change: Option<Decimal>,
    reference: Option<String>,
    in_flight: bool,
}

impl PaymentAttempt {
    /// New attempt for `amount_due` against an order owing `outstanding_balance`
    ///
    /// QR and transfer attempts have nothing to fill in and validate
    /// immediately when the amount is acceptable.
    pub fn new(
        order_id: i64,
        method: PaymentMethod,
        amount_due: Decimal,
        outstanding_balance: Decimal,
    ) -> Self {
        let mut attempt = Self {
            id: Uuid::new_v4(),
            order_id,
            method,
            amount_due,
            outstanding_balance,
            status: AttemptStatus::Draft,
            tendered: None,
            change: None,
            reference: None,
            in_flight: false,
        };
        if method.requires_verification() && attempt.check_amount_due().is_ok() {
            attempt.status = AttemptStatus::Validated;
        }
        attempt
    }

    /// Open an attempt from a backend balance
    ///
    /// Only finished/delivered orders are payable. `amount_due` defaults to
    /// the full outstanding balance.
    pub fn open(
        balance: &OrderBalance,
        method: PaymentMethod,
        amount_due: Option<Decimal>,
    ) -> OrderResult<Self> {
        if !balance.is_payable() {
            return Err(OrderError::OrderNotPayable {
                order_id: balance.order_id,
                status: balance.status.clone().unwrap_or_else(|| "unknown".to_string()),
            });
        }
        Ok(Self::new(
            balance.order_id,
            method,
            amount_due.unwrap_or(balance.outstanding),
            balance.outstanding,
        ))
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn order_id(&self) -> i64 {
        self.order_id
    }

    pub fn method(&self) -> PaymentMethod {
        self.method
    }

    pub fn amount_due(&self) -> Decimal {
        self.amount_due
    }

    pub fn outstanding_balance(&self) -> Decimal {
        self.outstanding_balance
    }

    pub fn status(&self) -> AttemptStatus {
        self.status
    }

    pub fn tendered(&self) -> Option<Decimal> {
        self.tendered
    }

    /// Change owed for a validated cash attempt
    pub fn change(&self) -> Option<Decimal> {
        self.change
    }

    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn snapshot(&self) -> AttemptSnapshot {
        AttemptSnapshot {
            id: self.id,
            order_id: self.order_id,
            method: self.method,
            amount_due: self.amount_due,
            outstanding_balance: self.outstanding_balance,
            status: self.status,
            tendered: self.tendered,
            change: self.change,
            reference: self.reference.clone(),
            in_flight: self.in_flight,
        }
    }

    /// Change the amount of a partial payment (Draft only)
    pub fn set_amount_due(&mut self, amount: Decimal) -> OrderResult<()> {
        self.ensure_open()?;
        if self.status != AttemptStatus::Draft {
            return Err(OrderError::InvalidAmount(
                "amount is frozen once the attempt is validated".to_string(),
            ));
        }
        money::validate_payment_amount(amount)?;
        if amount > self.outstanding_balance {
            return Err(OrderError::ExceedsBalance {
                due: amount,
                outstanding: self.outstanding_balance,
            });
        }
        self.amount_due = amount;
        if self.method.requires_verification() {
            self.status = AttemptStatus::Validated;
        }
        Ok(())
    }

    /// Record the cash handed over; returns the change
    ///
    /// May be called again while Validated to correct the tender.
    pub fn set_tendered_amount(&mut self, tendered: Decimal) -> OrderResult<Decimal> {
        self.ensure_method(PaymentMethod::Cash)?;
        self.ensure_open()?;
        self.check_amount_due()?;
        if tendered < self.amount_due {
            return Err(OrderError::InsufficientTender {
                tendered,
                due: self.amount_due,
            });
        }

        let change = money::change_due(tendered, self.amount_due);
        self.tendered = Some(tendered);
        self.change = Some(change);
        self.status = AttemptStatus::Validated;
        tracing::debug!(attempt_id = %self.id, %tendered, %change, "Cash attempt validated");
        Ok(change)
    }

    /// Validate the card form against the current date
    pub fn set_card_details(&mut self, card: &CardDetails) -> OrderResult<()> {
        self.set_card_details_at(card, chrono::Local::now().date_naive())
    }

    /// Validate the card form against `today`
    pub fn set_card_details_at(&mut self, card: &CardDetails, today: NaiveDate) -> OrderResult<()> {
        self.ensure_method(PaymentMethod::Card)?;
        self.ensure_open()?;
        if self.amount_due <= Decimal::ZERO || self.amount_due > self.outstanding_balance {
            return Err(OrderError::InvalidCardDetails(format!(
                "amount {} must be positive and at most the outstanding {}",
                self.amount_due, self.outstanding_balance
            )));
        }
        let validated = card::validate_card(card, today)?;

        self.reference = Some(validated.masked());
        self.status = AttemptStatus::Validated;
        tracing::debug!(attempt_id = %self.id, last4 = %validated.last4, "Card attempt validated");
        Ok(())
    }

    /// Mark the attempt in flight and build the payment body
    ///
    /// Rejects a second submission while one is pending or after success.
    pub(crate) fn begin_submission(&mut self) -> OrderResult<()> {
        self.ensure_open()?;
        if self.status != AttemptStatus::Validated {
            return Err(OrderError::NotValidated);
        }
        self.in_flight = true;
        Ok(())
    }

    pub(crate) fn set_reference(&mut self, reference: String) {
        self.reference = Some(reference);
    }

    pub(crate) fn to_request(&self) -> RecordPaymentRequest {
        RecordPaymentRequest {
            order_id: self.order_id,
            amount: self.amount_due,
            method: self.method,
            reference: self.reference.clone().unwrap_or_default(),
        }
    }

    /// External call failed; back to Validated so the user may retry
    pub(crate) fn abort_submission(&mut self) {
        self.in_flight = false;
    }

    pub(crate) fn complete_submission(&mut self) {
        self.in_flight = false;
        self.status = AttemptStatus::Submitted;
    }

    fn ensure_open(&self) -> OrderResult<()> {
        if self.in_flight || self.status == AttemptStatus::Submitted {
            return Err(OrderError::AlreadySubmitted);
        }
        Ok(())
    }

    fn ensure_method(&self, expected: PaymentMethod) -> OrderResult<()> {
        if self.method != expected {
            return Err(OrderError::WrongMethod {
                expected,
                actual: self.method,
            });
        }
        Ok(())
    }

    fn check_amount_due(&self) -> OrderResult<()> {
        if self.amount_due > self.outstanding_balance {
            return Err(OrderError::ExceedsBalance {
                due: self.amount_due,
                outstanding: self.outstanding_balance,
            });
        }
        money::validate_payment_amount(self.amount_due)
    }
}
