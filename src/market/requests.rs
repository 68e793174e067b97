use crate::core::ApiError;
use crate::market::client::{segment, ApiResponse, MarketClient};
use crate::market::types::{NewPurchaseRequest, PurchaseRequest, RejectReason};
use reqwest::Method;

/// Purchase requests.
///
/// Buyers go through `/api/buyer/requests`, sellers through
/// `/api/requests`; the gateway routes each to its own service.
pub struct RequestsApi<'a> {
    client: &'a MarketClient,
}

impl<'a> RequestsApi<'a> {
    pub(crate) fn new(client: &'a MarketClient) -> Self {
        Self { client }
    }

    pub async fn create(
        &self,
        request: &NewPurchaseRequest,
    ) -> Result<ApiResponse<PurchaseRequest>, ApiError> {
        self.client
            .send(Method::POST, "/api/buyer/requests", request)
            .await
    }

    pub async fn list_mine(&self) -> Result<ApiResponse<Vec<PurchaseRequest>>, ApiError> {
        self.client.get("/api/buyer/requests").await
    }

    pub async fn list_pending(&self) -> Result<ApiResponse<Vec<PurchaseRequest>>, ApiError> {
        self.client.get("/api/buyer/requests/pending").await
    }

    pub async fn list_approved(&self) -> Result<ApiResponse<Vec<PurchaseRequest>>, ApiError> {
        self.client.get("/api/buyer/requests/approved").await
    }

    pub async fn cancel(&self, id: &str) -> Result<ApiResponse<()>, ApiError> {
        self.client
            .send_empty(
                Method::POST,
                &format!("/api/buyer/requests/{}/cancel", segment(id)),
            )
            .await
    }

    pub async fn list_for_seller(&self) -> Result<ApiResponse<Vec<PurchaseRequest>>, ApiError> {
        self.client.get("/api/requests").await
    }

    pub async fn approve(&self, id: &str) -> Result<ApiResponse<PurchaseRequest>, ApiError> {
        self.client
            .send_empty(Method::POST, &format!("/api/requests/{}/approve", segment(id)))
            .await
    }

    pub async fn reject(
        &self,
        id: &str,
        reason: Option<&str>,
    ) -> Result<ApiResponse<PurchaseRequest>, ApiError> {
        self.client
            .send(
                Method::POST,
                &format!("/api/requests/{}/reject", segment(id)),
                &RejectReason { reason },
            )
            .await
    }
}
