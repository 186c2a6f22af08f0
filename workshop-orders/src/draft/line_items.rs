//! Line item store
//!
//! Holds the selected services and parts of one draft. Services are unique
//! per catalog entry (the duplicate guard in [`LineItemStore::add_service`]);
//! parts may repeat, each add creating its own row.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::models::{CatalogPart, CatalogService, LineItemKind, LineItemPayload};
use std::fmt;

use crate::error::{OrderError, OrderResult};
use crate::money;

/// Draft-local identifier of a line item row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LineItemId(pub u32);

impl fmt::Display for LineItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One service or part row of a draft
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: LineItemId,
    pub kind: LineItemKind,
    pub catalog_ref: i64,
    /// Catalog name snapshot, for display
    pub name: String,
    /// Always 1 for services
    pub quantity: i32,
    /// Unit price captured when the row was added
    pub applied_unit_price: Decimal,
}

impl LineItem {
    /// Unrounded `applied_unit_price × quantity`
    pub fn line_total(&self) -> Decimal {
        money::line_total(self)
    }

    pub fn to_payload(&self) -> LineItemPayload {
        LineItemPayload {
            kind: self.kind,
            catalog_ref: self.catalog_ref,
            quantity: self.quantity,
            applied_unit_price: self.applied_unit_price,
        }
    }
}

/// Ordered collection of line items owned by one draft
#[derive(Debug, Clone, Default)]
pub struct LineItemStore {
    items: Vec<LineItem>,
    next_id: u32,
}

impl LineItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows in insertion order
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn get(&self, id: LineItemId) -> Option<&LineItem> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether a service row for this catalog entry already exists
    pub fn contains_service(&self, catalog_ref: i64) -> bool {
        self.items
            .iter()
            .any(|i| i.kind == LineItemKind::Service && i.catalog_ref == catalog_ref)
    }

    /// Summed quantity of every row referencing this part
    pub fn part_quantity(&self, catalog_ref: i64) -> i32 {
        self.items
            .iter()
            .filter(|i| i.kind == LineItemKind::Part && i.catalog_ref == catalog_ref)
            .map(|i| i.quantity)
            .sum()
    }

    /// Add a service row (quantity 1, price snapshotted now)
    ///
    /// Fails with `DuplicateItem` if the service is already in the draft.
    pub fn add_service(&mut self, service: &CatalogService) -> OrderResult<LineItemId> {
        if self.contains_service(service.id) {
            return Err(OrderError::DuplicateItem(service.id));
        }
        money::validate_unit_price(service.unit_price)?;

        let id = self.push(LineItem {
            id: LineItemId(0),
            kind: LineItemKind::Service,
            catalog_ref: service.id,
            name: service.name.clone(),
            quantity: 1,
            applied_unit_price: service.unit_price,
        });
        tracing::debug!(line_item = %id, service_id = service.id, price = %service.unit_price, "Service added");
        Ok(id)
    }

    /// Add a part row; repeated adds of the same part create new rows
    ///
    /// The summed quantity across rows of this part may not exceed stock.
    pub fn add_part(&mut self, part: &CatalogPart, quantity: i32) -> OrderResult<LineItemId> {
        money::validate_quantity(quantity)?;
        money::validate_unit_price(part.unit_price)?;
        self.check_stock(part, self.part_quantity(part.id) + quantity)?;

        let id = self.push(LineItem {
            id: LineItemId(0),
            kind: LineItemKind::Part,
            catalog_ref: part.id,
            name: part.name.clone(),
            quantity,
            applied_unit_price: part.unit_price,
        });
        tracing::debug!(line_item = %id, part_id = part.id, quantity, price = %part.unit_price, "Part added");
        Ok(id)
    }

    /// Change the quantity of a part row
    ///
    /// Quantity is validated for every kind; for services a valid quantity
    /// is accepted and ignored (fixed at 1). `part` supplies the stock limit
    /// and is only consulted for part rows.
    pub fn update_quantity(
        &mut self,
        id: LineItemId,
        quantity: i32,
        part: Option<&CatalogPart>,
    ) -> OrderResult<()> {
        money::validate_quantity(quantity)?;

        let index = self
            .items
            .iter()
            .position(|i| i.id == id)
            .ok_or(OrderError::LineItemNotFound(id))?;

        let item = &self.items[index];
        if item.kind == LineItemKind::Service {
            return Ok(());
        }

        if let Some(part) = part {
            let others = self.part_quantity(item.catalog_ref) - item.quantity;
            self.check_stock(part, others + quantity)?;
        }

        self.items[index].quantity = quantity;
        tracing::debug!(line_item = %id, quantity, "Quantity updated");
        Ok(())
    }

    /// Remove a row; unknown ids are ignored
    pub fn remove(&mut self, id: LineItemId) -> Option<LineItem> {
        let index = self.items.iter().position(|i| i.id == id)?;
        let removed = self.items.remove(index);
        tracing::debug!(line_item = %id, catalog_ref = removed.catalog_ref, "Line item removed");
        Some(removed)
    }

    /// Drop every row
    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn to_payloads(&self) -> Vec<LineItemPayload> {
        self.items.iter().map(LineItem::to_payload).collect()
    }

    fn push(&mut self, mut item: LineItem) -> LineItemId {
        self.next_id += 1;
        let id = LineItemId(self.next_id);
        item.id = id;
        self.items.push(item);
        id
    }

    fn check_stock(&self, part: &CatalogPart, requested: i32) -> OrderResult<()> {
        if requested > part.stock_quantity {
            return Err(OrderError::InsufficientStock {
                part_id: part.id,
                requested,
                available: part.stock_quantity,
            });
        }
        Ok(())
    }
}
