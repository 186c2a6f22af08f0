//! Backend gateways for the order core
//!
//! Plugs [`WorkshopApi`] into the traits `workshop-orders` talks through.

use async_trait::async_trait;
use shared::models::{
    CatalogPart, CatalogService, CreateOrderRequest, OrderBalance, OrderSummary,
    PaymentRecordedResponse, RecordPaymentRequest, Vehicle,
};
use workshop_orders::{CatalogSource, OrderError, OrderGateway, OrderResult, PaymentGateway};

use crate::{ClientError, HttpClient, WorkshopApi};

impl From<ClientError> for OrderError {
    fn from(err: ClientError) -> Self {
        OrderError::Backend(err.user_message())
    }
}

#[async_trait]
impl<C: HttpClient> CatalogSource for WorkshopApi<C> {
    async fn services(&self) -> OrderResult<Vec<CatalogService>> {
        Ok(WorkshopApi::services(self).await?)
    }

    async fn parts(&self) -> OrderResult<Vec<CatalogPart>> {
        Ok(WorkshopApi::parts(self).await?)
    }

    async fn client_vehicles(&self, client_id: i64) -> OrderResult<Vec<Vehicle>> {
        Ok(WorkshopApi::client_vehicles(self, client_id).await?)
    }
}

#[async_trait]
impl<C: HttpClient> OrderGateway for WorkshopApi<C> {
    async fn create_order(&self, request: &CreateOrderRequest) -> OrderResult<OrderSummary> {
        WorkshopApi::create_order(self, request)
            .await
            .map_err(|e| {
                if e.is_rejection() {
                    OrderError::OrderRejected(e.user_message())
                } else {
                    e.into()
                }
            })
    }
}

#[async_trait]
impl<C: HttpClient> PaymentGateway for WorkshopApi<C> {
    async fn order_balance(&self, order_id: i64) -> OrderResult<OrderBalance> {
        Ok(WorkshopApi::order_balance(self, order_id).await?)
    }

    async fn record_payment(
        &self,
        request: &RecordPaymentRequest,
    ) -> OrderResult<PaymentRecordedResponse> {
        Ok(WorkshopApi::record_payment(self, request).await?)
    }
}
