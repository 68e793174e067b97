use crate::core::ApiError;
use crate::market::client::{segment, ApiResponse, MarketClient};
use crate::market::types::{Theme, ThemeInput};
use reqwest::Method;

pub struct ThemesApi<'a> {
    client: &'a MarketClient,
}

impl<'a> ThemesApi<'a> {
    pub(crate) fn new(client: &'a MarketClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<ApiResponse<Vec<Theme>>, ApiError> {
        self.client.get("/api/themes").await
    }

    pub async fn get(&self, id: &str) -> Result<ApiResponse<Theme>, ApiError> {
        self.client.get(&format!("/api/themes/{}", segment(id))).await
    }

    pub async fn create(&self, theme: &ThemeInput) -> Result<ApiResponse<Theme>, ApiError> {
        self.client.send(Method::POST, "/api/themes", theme).await
    }

    pub async fn update(&self, id: &str, theme: &ThemeInput) -> Result<ApiResponse<Theme>, ApiError> {
        self.client
            .send(Method::PUT, &format!("/api/themes/{}", segment(id)), theme)
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<ApiResponse<()>, ApiError> {
        self.client
            .send_empty(Method::DELETE, &format!("/api/themes/{}", segment(id)))
            .await
    }
}
