//! Typed workshop API
//!
//! One method per backend route the order core depends on, plus the
//! read-only payment reports.

use serde::Serialize;
use shared::PaginatedResponse;
use shared::models::{
    CatalogPart, CatalogService, Client, ClientQuery, CreateOrderRequest, OrderBalance,
    OrderCreatedResponse, OrderSummary, PaymentHistoryEntry, PaymentPeriod,
    PaymentRecordedResponse, RecordPaymentRequest, RevenueSummary, Vehicle,
};

use crate::{ClientConfig, ClientResult, HttpClient, NetworkHttpClient};

#[derive(Serialize)]
struct HistoryQuery<'a> {
    #[serde(flatten)]
    period: &'a PaymentPeriod,
    #[serde(skip_serializing_if = "Option::is_none")]
    per_page: Option<u32>,
}

/// Append an encoded query string, if there is one
fn with_query<Q: Serialize>(path: &str, query: &Q) -> ClientResult<String> {
    let encoded = serde_urlencoded::to_string(query)?;
    Ok(if encoded.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, encoded)
    })
}

#[derive(Debug, Clone)]
pub struct WorkshopApi<C> {
    http: C,
}

impl WorkshopApi<NetworkHttpClient> {
    /// Network client built from `config`
    pub fn connect(config: &ClientConfig) -> ClientResult<Self> {
        Ok(Self::new(NetworkHttpClient::new(config)?))
    }
}

impl<C: HttpClient> WorkshopApi<C> {
    pub fn new(http: C) -> Self {
        Self { http }
    }

    pub fn http(&self) -> &C {
        &self.http
    }

    // ========== Clients ==========

    /// `GET /clients?search=&page=&per_page=`
    pub async fn clients(&self, query: &ClientQuery) -> ClientResult<PaginatedResponse<Client>> {
        self.http.get(&with_query("/clients", query)?).await
    }

    /// `GET /clients/{id}/vehicles`
    pub async fn client_vehicles(&self, client_id: i64) -> ClientResult<Vec<Vehicle>> {
        self.http
            .get(&format!("/clients/{}/vehicles", client_id))
            .await
    }

    // ========== Catalog ==========

    /// `GET /services`
    pub async fn services(&self) -> ClientResult<Vec<CatalogService>> {
        self.http.get("/services").await
    }

    /// `GET /inventory/parts`
    pub async fn parts(&self) -> ClientResult<Vec<CatalogPart>> {
        self.http.get("/inventory/parts").await
    }

    // ========== Orders ==========

    /// `POST /orders`
    pub async fn create_order(&self, request: &CreateOrderRequest) -> ClientResult<OrderSummary> {
        let created: OrderCreatedResponse = self.http.post("/orders", request).await?;
        if let Some(msg) = &created.msg {
            tracing::debug!(order_id = created.order.id, msg = %msg, "Order accepted");
        }
        Ok(created.order)
    }

    // ========== Payments ==========

    /// `POST /payments`
    pub async fn record_payment(
        &self,
        request: &RecordPaymentRequest,
    ) -> ClientResult<PaymentRecordedResponse> {
        self.http.post("/payments", request).await
    }

    /// `GET /payments/order/{id}/balance`
    pub async fn order_balance(&self, order_id: i64) -> ClientResult<OrderBalance> {
        self.http
            .get(&format!("/payments/order/{}/balance", order_id))
            .await
    }

    /// `GET /payments/history?fecha_inicio=&fecha_fin=&per_page=`, newest first
    pub async fn payment_history(
        &self,
        period: &PaymentPeriod,
        per_page: Option<u32>,
    ) -> ClientResult<Vec<PaymentHistoryEntry>> {
        let query = HistoryQuery { period, per_page };
        self.http
            .get(&with_query("/payments/history", &query)?)
            .await
    }

    /// `GET /payments/revenue?fecha_inicio=&fecha_fin=`
    pub async fn revenue(&self, period: &PaymentPeriod) -> ClientResult<RevenueSummary> {
        self.http
            .get(&with_query("/payments/revenue", period)?)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_query_strings() {
        assert_eq!(
            with_query("/clients", &ClientQuery::search("ana maría").page(2)).unwrap(),
            "/clients?search=ana+mar%C3%ADa&page=2&per_page=10"
        );
        assert_eq!(
            with_query("/payments/revenue", &PaymentPeriod::default()).unwrap(),
            "/payments/revenue"
        );

        let period = PaymentPeriod::between(
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
        );
        let query = HistoryQuery {
            period: &period,
            per_page: Some(50),
        };
        assert_eq!(
            with_query("/payments/history", &query).unwrap(),
            "/payments/history?fecha_inicio=2025-01-01&fecha_fin=2025-01-31&per_page=50"
        );
    }
}
