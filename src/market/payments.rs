use crate::core::ApiError;
use crate::market::client::{segment, ApiResponse, MarketClient};
use crate::market::types::{NewPayment, Payment, PaymentConfirmation};
use reqwest::Method;

pub struct PaymentsApi<'a> {
    client: &'a MarketClient,
}

impl<'a> PaymentsApi<'a> {
    pub(crate) fn new(client: &'a MarketClient) -> Self {
        Self { client }
    }

    /// Creates the payment and its provider order (`razorpayOrderId`).
    pub async fn create(&self, payment: &NewPayment) -> Result<ApiResponse<Payment>, ApiError> {
        self.client.send(Method::POST, "/api/payments", payment).await
    }

    pub async fn confirm(
        &self,
        payment_id: &str,
        razorpay_payment_id: &str,
    ) -> Result<ApiResponse<Payment>, ApiError> {
        self.client
            .send(
                Method::POST,
                &format!("/api/payments/{}/confirm", segment(payment_id)),
                &PaymentConfirmation {
                    razorpay_payment_id,
                },
            )
            .await
    }

    pub async fn list_mine(&self) -> Result<ApiResponse<Vec<Payment>>, ApiError> {
        self.client.get("/api/payments").await
    }

    pub async fn get(&self, id: &str) -> Result<ApiResponse<Payment>, ApiError> {
        self.client.get(&format!("/api/payments/{}", segment(id))).await
    }
}
