//! Card form validation
//!
//! No card processing happens here. A valid form yields the last four
//! digits, which become the opaque reference sent to the backend.

use chrono::{Datelike, NaiveDate};
use std::fmt;

use crate::error::{OrderError, OrderResult};

const CARD_DIGITS: usize = 16;
const CVV_DIGITS: usize = 3;

/// Card form as typed by the cashier
#[derive(Clone, PartialEq, Eq)]
pub struct CardDetails {
    pub number: String,
    /// `MM/YY`
    pub expiry: String,
    pub cvv: String,
}

impl CardDetails {
    pub fn new(
        number: impl Into<String>,
        expiry: impl Into<String>,
        cvv: impl Into<String>,
    ) -> Self {
        Self {
            number: number.into(),
            expiry: expiry.into(),
            cvv: cvv.into(),
        }
    }
}

impl fmt::Debug for CardDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardDetails")
            .field("number", &"<redacted>")
            .field("expiry", &self.expiry)
            .field("cvv", &"<redacted>")
            .finish()
    }
}

/// A card form that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedCard {
    pub last4: String,
    pub expiry_year: i32,
    pub expiry_month: u32,
}

impl ValidatedCard {
    /// Reference string recorded with the payment
    pub fn masked(&self) -> String {
        format!("**** **** **** {}", self.last4)
    }
}

/// Strip spaces and dashes; `None` unless exactly 16 digits remain
pub fn normalize_card_number(raw: &str) -> Option<String> {
    let digits: String = raw.chars().filter(|c| !matches!(c, ' ' | '-')).collect();
    (digits.len() == CARD_DIGITS && digits.chars().all(|c| c.is_ascii_digit())).then_some(digits)
}

/// Parse `MM/YY` into `(year, month)`
pub fn parse_expiry(raw: &str) -> Option<(i32, u32)> {
    let (mm, yy) = raw.trim().split_once('/')?;
    let two_digits = |part: &str| part.len() == 2 && part.bytes().all(|b| b.is_ascii_digit());
    if !two_digits(mm) || !two_digits(yy) {
        return None;
    }
    let month: u32 = mm.parse().ok()?;
    let year: i32 = yy.parse().ok()?;
    (1..=12).contains(&month).then_some((2000 + year, month))
}

/// Validate the card form against `today`
///
/// A card is usable through the last day of its expiry month.
pub fn validate_card(card: &CardDetails, today: NaiveDate) -> OrderResult<ValidatedCard> {
    let number = normalize_card_number(&card.number).ok_or_else(|| {
        OrderError::InvalidCardDetails("card number must have 16 digits".to_string())
    })?;

    let (expiry_year, expiry_month) = parse_expiry(&card.expiry).ok_or_else(|| {
        OrderError::InvalidCardDetails("expiry must be MM/YY".to_string())
    })?;
    if (expiry_year, expiry_month) < (today.year(), today.month()) {
        return Err(OrderError::InvalidCardDetails(format!(
            "card expired {:02}/{}",
            expiry_month, expiry_year
        )));
    }

    if card.cvv.len() != CVV_DIGITS || !card.cvv.chars().all(|c| c.is_ascii_digit()) {
        return Err(OrderError::InvalidCardDetails(
            "CVV must have 3 digits".to_string(),
        ));
    }

    Ok(ValidatedCard {
        last4: number[CARD_DIGITS - 4..].to_string(),
        expiry_year,
        expiry_month,
    })
}
