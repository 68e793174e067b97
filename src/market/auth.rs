use crate::core::ApiError;
use crate::market::client::{ApiResponse, MarketClient};
use crate::market::types::{AuthResponse, Credentials, Registration};
use crate::session::{Role, Session};
use reqwest::Method;
use tracing::{info, warn};

/// Login and registration against the buyer or seller service.
///
/// A successful call replaces the stored session with the one the backend
/// issued.
pub struct AuthApi<'a> {
    client: &'a MarketClient,
}

impl<'a> AuthApi<'a> {
    pub(crate) fn new(client: &'a MarketClient) -> Self {
        Self { client }
    }

    pub async fn login(
        &self,
        is_buyer: bool,
        email: &str,
        password: &str,
    ) -> Result<ApiResponse<Session>, ApiError> {
        let role = Role::from_is_buyer(is_buyer);
        let path = format!("/api/{}/auth/login", role.service());
        let resp: ApiResponse<AuthResponse> = self
            .client
            .send(Method::POST, &path, &Credentials { email, password })
            .await?;
        self.establish(role, resp)
    }

    pub async fn register(
        &self,
        is_buyer: bool,
        registration: &Registration,
    ) -> Result<ApiResponse<Session>, ApiError> {
        let role = Role::from_is_buyer(is_buyer);
        let path = format!("/api/{}/auth/register", role.service());
        let resp: ApiResponse<AuthResponse> =
            self.client.send(Method::POST, &path, registration).await?;
        self.establish(role, resp)
    }

    /// Drop the stored session. Safe to call when nobody is logged in.
    pub fn logout(&self) {
        if let Err(e) = self.client.session_store().clear() {
            warn!(error = %e, "failed to clear session on logout");
        }
    }

    pub fn current_session(&self) -> Option<Session> {
        self.client.session()
    }

    fn establish(
        &self,
        role: Role,
        resp: ApiResponse<AuthResponse>,
    ) -> Result<ApiResponse<Session>, ApiError> {
        let status = resp.status;
        let session = resp.data.into_session(role)?;
        if let Err(e) = self.client.session_store().set(session.clone()) {
            warn!(error = %e, "failed to persist session");
        }
        info!(role = %role, user_id = %session.user_id, "logged in");
        Ok(ApiResponse {
            data: session,
            status,
        })
    }
}
