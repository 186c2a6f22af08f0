//! Order Models
//!
//! Request/response bodies for `POST /orders`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Kind of line item in an order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum LineItemKind {
    /// Labour; quantity is always 1 and a service appears at most once
    Service,
    /// Spare part; may repeat across rows
    Part,
}

/// One line item as sent to the backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItemPayload {
    pub kind: LineItemKind,
    pub catalog_ref: i64,
    pub quantity: i32,
    pub applied_unit_price: Decimal,
}

/// `POST /orders` body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateOrderRequest {
    pub client_id: i64,
    pub vehicle_id: i64,
    pub line_items: Vec<LineItemPayload>,
    pub total: Decimal,
}

/// Order as echoed back by the backend after creation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderSummary {
    pub id: i64,
    #[serde(default, alias = "total_estimado", skip_serializing_if = "Option::is_none")]
    pub total: Option<Decimal>,
    #[serde(default, alias = "estado", skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// `POST /orders` response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreatedResponse {
    #[serde(default)]
    pub msg: Option<String>,
    pub order: OrderSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_order_request_wire_shape() {
        let req = CreateOrderRequest {
            client_id: 1,
            vehicle_id: 2,
            line_items: vec![LineItemPayload {
                kind: LineItemKind::Part,
                catalog_ref: 9,
                quantity: 3,
                applied_unit_price: Decimal::new(1010, 2),
            }],
            total: Decimal::new(3030, 2),
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["line_items"][0]["kind"], "part");
        assert_eq!(value["line_items"][0]["applied_unit_price"], 10.1);
        assert_eq!(value["total"], 30.3);
    }

    #[test]
    fn test_order_created_response() {
        let json = r#"{"msg":"Orden creada exitosamente","order":{"id":41,"total_estimado":155.55}}"#;
        let resp: OrderCreatedResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.order.id, 41);
        assert_eq!(resp.order.total, Some(Decimal::new(15555, 2)));
        assert!(resp.order.status.is_none());
    }
}
