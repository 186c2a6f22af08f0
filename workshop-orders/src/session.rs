//! Order editing session
//!
//! Loads the catalog once, feeds the cascade with vehicles fetched per
//! client, and submits the finished draft.

use shared::models::OrderSummary;
use std::sync::Arc;

use crate::draft::{Catalog, OrderDraft};
use crate::error::OrderResult;
use crate::traits::{CatalogSource, OrderGateway};

pub struct OrderSession {
    source: Arc<dyn CatalogSource>,
    orders: Arc<dyn OrderGateway>,
    draft: OrderDraft,
}

impl OrderSession {
    /// Fetch services and parts, then open an empty draft
    pub async fn start(
        source: Arc<dyn CatalogSource>,
        orders: Arc<dyn OrderGateway>,
    ) -> OrderResult<Self> {
        let (services, parts) = tokio::try_join!(source.services(), source.parts())?;
        tracing::info!(
            services = services.len(),
            parts = parts.len(),
            "Order session catalog loaded"
        );
        let catalog = Arc::new(Catalog::new(services, parts));
        Ok(Self {
            source,
            orders,
            draft: OrderDraft::new(catalog),
        })
    }

    pub fn draft(&self) -> &OrderDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut OrderDraft {
        &mut self.draft
    }

    /// Fetch the client's vehicles and select the client
    ///
    /// The draft is untouched if the lookup fails.
    pub async fn select_client(&mut self, client_id: i64) -> OrderResult<()> {
        let vehicles = self.source.client_vehicles(client_id).await?;
        self.draft.load_vehicles(client_id, vehicles);
        self.draft.select_client(client_id);
        Ok(())
    }

    /// Refresh the vehicles of the selected client
    pub async fn reload_vehicles(&mut self) -> OrderResult<()> {
        let Some(client_id) = self.draft.client_id() else {
            return Ok(());
        };
        let vehicles = self.source.client_vehicles(client_id).await?;
        self.draft.load_vehicles(client_id, vehicles);
        Ok(())
    }

    /// Send the draft to the backend
    ///
    /// On success the draft is reset for the next order. On rejection it is
    /// kept so the user can fix it and retry.
    pub async fn submit(&mut self) -> OrderResult<OrderSummary> {
        let request = self.draft.to_request()?;
        match self.orders.create_order(&request).await {
            Ok(order) => {
                tracing::info!(
                    order_id = order.id,
                    client_id = request.client_id,
                    vehicle_id = request.vehicle_id,
                    items = request.line_items.len(),
                    total = %request.total,
                    "Order created"
                );
                self.draft.reset();
                Ok(order)
            }
            Err(e) => {
                tracing::warn!(
                    client_id = request.client_id,
                    total = %request.total,
                    error = %e,
                    "Order submission failed"
                );
                Err(e)
            }
        }
    }
}
