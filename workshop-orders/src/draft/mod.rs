//! Order draft
//!
//! Client-side state of an order being edited: the client/vehicle cascade,
//! the line items, and the derived total. All mutations are synchronous and
//! either succeed or leave the draft untouched.

mod cascade;
mod catalog;
mod line_items;

pub use cascade::{CascadeState, SelectionCascade};
pub use catalog::Catalog;
pub use line_items::{LineItem, LineItemId, LineItemStore};

use rust_decimal::Decimal;
use shared::models::{CreateOrderRequest, LineItemKind, Vehicle};
use std::sync::Arc;

use crate::error::{OrderError, OrderResult};
use crate::money;

#[derive(Debug, Clone)]
pub struct OrderDraft {
    catalog: Arc<Catalog>,
    cascade: SelectionCascade,
    items: LineItemStore,
}

impl OrderDraft {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            cascade: SelectionCascade::new(),
            items: LineItemStore::new(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cascade(&self) -> &SelectionCascade {
        &self.cascade
    }

    // ========== Selection ==========

    pub fn load_vehicles(&mut self, client_id: i64, vehicles: Vec<Vehicle>) {
        self.cascade.load_vehicles(client_id, vehicles);
    }

    pub fn select_client(&mut self, client_id: i64) {
        self.cascade.select_client(client_id);
    }

    pub fn clear_client(&mut self) {
        self.cascade.clear_client();
    }

    pub fn select_vehicle(&mut self, vehicle_id: i64) -> OrderResult<()> {
        self.cascade.select_vehicle(vehicle_id)
    }

    pub fn client_id(&self) -> Option<i64> {
        self.cascade.client_id()
    }

    pub fn vehicle_id(&self) -> Option<i64> {
        self.cascade.vehicle_id()
    }

    pub fn eligible_vehicles(&self) -> impl Iterator<Item = &Vehicle> {
        self.cascade.eligible_vehicles()
    }

    // ========== Line items ==========

    pub fn add_service(&mut self, catalog_id: i64) -> OrderResult<LineItemId> {
        let service = self
            .catalog
            .service(catalog_id)
            .ok_or(OrderError::CatalogEntryNotFound {
                kind: LineItemKind::Service,
                id: catalog_id,
            })?;
        self.items.add_service(service)
    }

    pub fn add_part(&mut self, catalog_id: i64, quantity: i32) -> OrderResult<LineItemId> {
        let part = self
            .catalog
            .part(catalog_id)
            .ok_or(OrderError::CatalogEntryNotFound {
                kind: LineItemKind::Part,
                id: catalog_id,
            })?;
        self.items.add_part(part, quantity)
    }

    pub fn update_quantity(&mut self, id: LineItemId, quantity: i32) -> OrderResult<()> {
        let part = self
            .items
            .get(id)
            .filter(|i| i.kind == LineItemKind::Part)
            .and_then(|i| self.catalog.part(i.catalog_ref));
        self.items.update_quantity(id, quantity, part)
    }

    /// Idempotent: removing an unknown id is not an error
    pub fn remove_line_item(&mut self, id: LineItemId) {
        self.items.remove(id);
    }

    pub fn line_items(&self) -> &[LineItem] {
        self.items.items()
    }

    /// Running total, recomputed from the line items on every call
    pub fn computed_total(&self) -> Decimal {
        money::compute_total(self.items.items())
    }

    // ========== Submission ==========

    /// Build the `POST /orders` body
    ///
    /// Fails with `InvalidSelection` until both client and vehicle are chosen.
    pub fn to_request(&self) -> OrderResult<CreateOrderRequest> {
        let (Some(client_id), Some(vehicle_id)) = (self.client_id(), self.vehicle_id()) else {
            return Err(OrderError::InvalidSelection(
                "client and vehicle are required".to_string(),
            ));
        };
        Ok(CreateOrderRequest {
            client_id,
            vehicle_id,
            line_items: self.items.to_payloads(),
            total: self.computed_total(),
        })
    }

    /// Discard selection and line items, keeping the session catalog
    pub fn reset(&mut self) {
        self.cascade.clear_client();
        self.items.clear();
    }
}
