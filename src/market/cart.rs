use crate::core::ApiError;
use crate::market::client::{segment, ApiResponse, MarketClient};
use crate::market::types::{ApprovedRequestItem, Cart};
use reqwest::Method;

pub struct CartApi<'a> {
    client: &'a MarketClient,
}

impl<'a> CartApi<'a> {
    pub(crate) fn new(client: &'a MarketClient) -> Self {
        Self { client }
    }

    pub async fn get(&self) -> Result<ApiResponse<Cart>, ApiError> {
        self.client.get("/api/cart").await
    }

    pub async fn add_approved_request(
        &self,
        item: &ApprovedRequestItem,
    ) -> Result<ApiResponse<Cart>, ApiError> {
        self.client
            .send(Method::POST, "/api/cart/approved-request", item)
            .await
    }

    /// `PUT /api/cart/items/:productId?quantity=N`, no body.
    pub async fn update_item(
        &self,
        product_id: &str,
        quantity: u32,
    ) -> Result<ApiResponse<Cart>, ApiError> {
        let req = self
            .client
            .request(
                Method::PUT,
                &format!("/api/cart/items/{}", segment(product_id)),
            )
            .query(&[("quantity", quantity)]);
        self.client.execute(req).await
    }

    pub async fn remove_item(&self, product_id: &str) -> Result<ApiResponse<Cart>, ApiError> {
        self.client
            .send_empty(
                Method::DELETE,
                &format!("/api/cart/items/{}", segment(product_id)),
            )
            .await
    }

    pub async fn clear(&self) -> Result<ApiResponse<()>, ApiError> {
        self.client.send_empty(Method::DELETE, "/api/cart").await
    }
}
