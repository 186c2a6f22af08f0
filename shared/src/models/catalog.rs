//! Catalog Models
//!
//! Read-only entries fetched once per order-editing session.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Service offered by the workshop (labour)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogService {
    pub id: i64,
    #[serde(alias = "nombre")]
    pub name: String,
    #[serde(alias = "base_price", alias = "precio")]
    pub unit_price: Decimal,
}

/// Spare part held in inventory
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogPart {
    pub id: i64,
    #[serde(alias = "nombre")]
    pub name: String,
    #[serde(alias = "price", alias = "precio_venta")]
    pub unit_price: Decimal,
    #[serde(alias = "stock")]
    pub stock_quantity: i32,
}
