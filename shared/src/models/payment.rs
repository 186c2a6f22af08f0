//! Payment Models
//!
//! Bodies for `/payments` routes. The backend speaks Spanish on the wire
//! (`metodo_pago`, `saldo_pendiente`, ...); Rust field names are English and
//! mapped with serde renames.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Order statuses in which the backend accepts payments
pub const PAYABLE_ORDER_STATUSES: [&str; 2] = ["Finalizado", "Entregado"];

/// Payment method
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PaymentMethod {
    #[serde(rename = "Efectivo")]
    Cash,
    #[serde(rename = "Tarjeta")]
    Card,
    #[serde(rename = "QR")]
    Qr,
    #[serde(rename = "Transferencia")]
    Transfer,
}

impl PaymentMethod {
    /// Wire name as stored by the backend
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "Efectivo",
            Self::Card => "Tarjeta",
            Self::Qr => "QR",
            Self::Transfer => "Transferencia",
        }
    }

    /// QR and bank transfer need an external confirmation before recording
    pub const fn requires_verification(&self) -> bool {
        matches!(self, Self::Qr | Self::Transfer)
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `POST /payments` body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecordPaymentRequest {
    pub order_id: i64,
    pub amount: Decimal,
    #[serde(rename = "metodo_pago")]
    pub method: PaymentMethod,
    #[serde(rename = "referencia")]
    pub reference: String,
}

/// A payment as stored by the backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentRecord {
    pub id: i64,
    #[serde(default, alias = "orden_id", skip_serializing_if = "Option::is_none")]
    pub order_id: Option<i64>,
    #[serde(rename = "monto", alias = "amount")]
    pub amount: Decimal,
    #[serde(rename = "metodo_pago")]
    pub method: String,
    #[serde(rename = "referencia", default)]
    pub reference: String,
    #[serde(rename = "fecha_pago", default)]
    pub paid_at: Option<NaiveDateTime>,
}

/// Balance of an order after (or before) recording a payment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BalanceSnapshot {
    #[serde(rename = "total_orden", alias = "total_estimado")]
    pub order_total: Decimal,
    #[serde(rename = "total_pagado")]
    pub total_paid: Decimal,
    #[serde(rename = "saldo_pendiente")]
    pub outstanding: Decimal,
    #[serde(rename = "pagado_completamente")]
    pub fully_paid: bool,
}

/// `POST /payments` response envelope
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentRecordedResponse {
    #[serde(default)]
    pub msg: Option<String>,
    pub payment: PaymentRecord,
    pub balance: BalanceSnapshot,
}

/// `GET /payments/order/{id}/balance` response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderBalance {
    #[serde(rename = "orden_id")]
    pub order_id: i64,
    #[serde(rename = "total_estimado")]
    pub estimated_total: Decimal,
    #[serde(rename = "total_pagado")]
    pub total_paid: Decimal,
    #[serde(rename = "saldo_pendiente")]
    pub outstanding: Decimal,
    #[serde(rename = "pagado_completamente")]
    pub fully_paid: bool,
    #[serde(rename = "estado_orden", default)]
    pub status: Option<String>,
    #[serde(rename = "pagos", default)]
    pub payments: Vec<PaymentRecord>,
}

impl OrderBalance {
    /// Payments are only taken for finished or delivered orders
    pub fn is_payable(&self) -> bool {
        self.status
            .as_deref()
            .is_some_and(|s| PAYABLE_ORDER_STATUSES.contains(&s))
    }
}

/// One row of `GET /payments/history`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentHistoryEntry {
    pub id: i64,
    #[serde(rename = "orden_id")]
    pub order_id: i64,
    #[serde(rename = "monto")]
    pub amount: Decimal,
    #[serde(rename = "metodo_pago")]
    pub method: String,
    #[serde(rename = "referencia", default)]
    pub reference: String,
    #[serde(rename = "fecha_pago", default)]
    pub paid_at: Option<NaiveDateTime>,
    #[serde(rename = "cliente_nombre", default)]
    pub client_name: String,
    #[serde(rename = "placa", default)]
    pub plate: String,
}

/// Date window shared by the history and revenue queries
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentPeriod {
    #[serde(rename = "fecha_inicio", skip_serializing_if = "Option::is_none")]
    pub from: Option<NaiveDate>,
    #[serde(rename = "fecha_fin", skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,
}

impl PaymentPeriod {
    pub fn between(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
        }
    }
}

/// `GET /payments/revenue` response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RevenueSummary {
    #[serde(rename = "total_ingresos")]
    pub total_revenue: Decimal,
    #[serde(rename = "total_pagos")]
    pub payment_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_method_wire_names() {
        assert_eq!(serde_json::to_string(&PaymentMethod::Cash).unwrap(), "\"Efectivo\"");
        assert_eq!(
            serde_json::from_str::<PaymentMethod>("\"Transferencia\"").unwrap(),
            PaymentMethod::Transfer
        );
        assert!(PaymentMethod::Qr.requires_verification());
        assert!(!PaymentMethod::Card.requires_verification());
    }

    #[test]
    fn test_record_payment_request_keys() {
        let req = RecordPaymentRequest {
            order_id: 12,
            amount: Decimal::new(15000, 2),
            method: PaymentMethod::Card,
            reference: "**** **** **** 1111".into(),
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["order_id"], 12);
        assert_eq!(value["amount"], 150.0);
        assert_eq!(value["metodo_pago"], "Tarjeta");
        assert_eq!(value["referencia"], "**** **** **** 1111");
    }

    #[test]
    fn test_order_balance_payable() {
        let json = r#"{
            "orden_id": 5,
            "total_estimado": 300.0,
            "total_pagado": 150.0,
            "saldo_pendiente": 150.0,
            "pagado_completamente": false,
            "estado_orden": "Finalizado",
            "pagos": [{"id": 1, "monto": 150.0, "metodo_pago": "Efectivo",
                       "referencia": "", "fecha_pago": "2024-05-02T10:15:00"}]
        }"#;
        let balance: OrderBalance = serde_json::from_str(json).unwrap();
        assert!(balance.is_payable());
        assert_eq!(balance.outstanding, Decimal::new(150, 0));
        assert_eq!(balance.payments.len(), 1);
        assert!(balance.payments[0].paid_at.is_some());

        let pending = OrderBalance {
            status: Some("Pendiente".into()),
            ..balance.clone()
        };
        assert!(!pending.is_payable());
        let unknown = OrderBalance { status: None, ..balance };
        assert!(!unknown.is_payable());
    }

    #[test]
    fn test_revenue_summary() {
        let summary: RevenueSummary =
            serde_json::from_str(r#"{"total_ingresos": 1250.5, "total_pagos": 9}"#).unwrap();
        assert_eq!(summary.total_revenue, Decimal::new(12505, 1));
        assert_eq!(summary.payment_count, 9);
    }
}
