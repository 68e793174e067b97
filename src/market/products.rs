use crate::core::ApiError;
use crate::market::client::{segment, ApiResponse, MarketClient};
use crate::market::types::{Product, ProductInput};
use reqwest::Method;

pub struct ProductsApi<'a> {
    client: &'a MarketClient,
}

impl<'a> ProductsApi<'a> {
    pub(crate) fn new(client: &'a MarketClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<ApiResponse<Vec<Product>>, ApiError> {
        self.client.get("/api/products").await
    }

    /// `GET /api/products?themeId=...`
    pub async fn list_by_theme(&self, theme_id: &str) -> Result<ApiResponse<Vec<Product>>, ApiError> {
        let req = self
            .client
            .request(Method::GET, "/api/products")
            .query(&[("themeId", theme_id)]);
        self.client.execute(req).await
    }

    pub async fn get(&self, id: &str) -> Result<ApiResponse<Product>, ApiError> {
        self.client.get(&format!("/api/products/{}", segment(id))).await
    }

    pub async fn create(&self, product: &ProductInput) -> Result<ApiResponse<Product>, ApiError> {
        self.client.send(Method::POST, "/api/products", product).await
    }

    pub async fn update(
        &self,
        id: &str,
        product: &ProductInput,
    ) -> Result<ApiResponse<Product>, ApiError> {
        self.client
            .send(Method::PUT, &format!("/api/products/{}", segment(id)), product)
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<ApiResponse<()>, ApiError> {
        self.client
            .send_empty(Method::DELETE, &format!("/api/products/{}", segment(id)))
            .await
    }

    /// The body is the bare stock number, not an object.
    pub async fn update_stock(&self, id: &str, stock: i64) -> Result<ApiResponse<Product>, ApiError> {
        self.client
            .send(
                Method::PATCH,
                &format!("/api/products/{}/stock", segment(id)),
                &stock,
            )
            .await
    }
}
