//! Session catalog
//!
//! Services and parts fetched once when an order-editing session starts.

use shared::models::{CatalogPart, CatalogService};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    services: HashMap<i64, CatalogService>,
    parts: HashMap<i64, CatalogPart>,
}

impl Catalog {
    pub fn new(services: Vec<CatalogService>, parts: Vec<CatalogPart>) -> Self {
        Self {
            services: services.into_iter().map(|s| (s.id, s)).collect(),
            parts: parts.into_iter().map(|p| (p.id, p)).collect(),
        }
    }

    pub fn service(&self, id: i64) -> Option<&CatalogService> {
        self.services.get(&id)
    }

    pub fn part(&self, id: i64) -> Option<&CatalogPart> {
        self.parts.get(&id)
    }

    /// Services sorted by name, for pickers
    pub fn services(&self) -> Vec<&CatalogService> {
        let mut list: Vec<_> = self.services.values().collect();
        list.sort_by(|a, b| a.name.cmp(&b.name));
        list
    }

    /// Parts sorted by name, for pickers
    pub fn parts(&self) -> Vec<&CatalogPart> {
        let mut list: Vec<_> = self.parts.values().collect();
        list.sort_by(|a, b| a.name.cmp(&b.name));
        list
    }
}
