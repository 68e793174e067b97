use crate::core::{ApiError, ClientConfig};
use crate::market::identity::identity_header;
use crate::market::normalize::{classify_failure, transport_failure};
use crate::market::{AuthApi, CartApi, PaymentsApi, ProductsApi, RequestsApi, ThemesApi};
use crate::session::{Session, SessionStore};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::borrow::Cow;
use std::sync::Arc;
use tracing::{debug, warn};

/// Reaction to losing authentication (any 401).
///
/// Runs after the session store has been cleared. A UI would navigate back
/// to its entry point here.
pub trait AuthExpiredHandler: Send + Sync {
    fn on_auth_expired(&self);
}

impl<F> AuthExpiredHandler for F
where
    F: Fn() + Send + Sync,
{
    fn on_auth_expired(&self) {
        self()
    }
}

struct LogAuthExpired;

impl AuthExpiredHandler for LogAuthExpired {
    fn on_auth_expired(&self) {
        warn!("authentication expired; session cleared");
    }
}

/// Decoded body plus the status it arrived with.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: StatusCode,
}

impl<T> ApiResponse<T> {
    pub fn into_data(self) -> T {
        self.data
    }
}

/// HTTP client for the marketplace gateway.
///
/// Every request is decorated from the current session (bearer token plus
/// one identity header) and every failure is normalized into [`ApiError`].
/// Calls are sent once; nothing is retried.
#[derive(Clone)]
pub struct MarketClient {
    http: reqwest::Client,
    base_url: Arc<str>,
    session: Arc<dyn SessionStore>,
    on_auth_expired: Arc<dyn AuthExpiredHandler>,
}

impl MarketClient {
    pub fn new(config: &ClientConfig, session: Arc<dyn SessionStore>) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(ApiError::Client)?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').into(),
            session,
            on_auth_expired: Arc::new(LogAuthExpired),
        })
    }

    pub fn with_auth_expired_handler(mut self, handler: impl AuthExpiredHandler + 'static) -> Self {
        self.on_auth_expired = Arc::new(handler);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> Option<Session> {
        self.session.get()
    }

    pub(crate) fn session_store(&self) -> &dyn SessionStore {
        self.session.as_ref()
    }

    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }

    pub fn themes(&self) -> ThemesApi<'_> {
        ThemesApi::new(self)
    }

    pub fn products(&self) -> ProductsApi<'_> {
        ProductsApi::new(self)
    }

    pub fn requests(&self) -> RequestsApi<'_> {
        RequestsApi::new(self)
    }

    pub fn cart(&self) -> CartApi<'_> {
        CartApi::new(self)
    }

    pub fn payments(&self) -> PaymentsApi<'_> {
        PaymentsApi::new(self)
    }

    /// Start a request to `path` with the session's headers attached.
    ///
    /// The session is read here, per request, so a teardown by a sibling
    /// call is visible to every request built after it.
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{path}", self.base_url);
        let mut req = self.http.request(method, url);

        if let Some(session) = self.session.get() {
            if !session.token.is_empty() {
                req = req.bearer_auth(&session.token);
            }
            if !session.user_id.is_empty() {
                if let Some(header) = identity_header(session.role, path) {
                    req = req.header(header.name(), session.user_id.as_str());
                }
            }
        }
        req
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<ApiResponse<T>, ApiError> {
        self.execute(self.request(Method::GET, path)).await
    }

    pub(crate) async fn send<B, T>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<ApiResponse<T>, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(self.request(method, path).json(body)).await
    }

    pub(crate) async fn send_empty<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
    ) -> Result<ApiResponse<T>, ApiError> {
        self.execute(self.request(method, path)).await
    }

    pub(crate) async fn execute<T: DeserializeOwned>(
        &self,
        req: RequestBuilder,
    ) -> Result<ApiResponse<T>, ApiError> {
        let request = req.build().map_err(ApiError::Client)?;
        let method = request.method().clone();
        let path = request.url().path().to_string();
        debug!(%method, path = %path, "api request");

        let resp = match self.http.execute(request).await {
            Ok(resp) => resp,
            Err(e) => {
                warn!(%method, path = %path, error = %e, "no response from api");
                return Err(transport_failure(e));
            }
        };

        let status = resp.status();
        let text = resp.text().await.map_err(transport_failure)?;
        debug!(%method, path = %path, status = status.as_u16(), "api response");

        if !status.is_success() {
            let err = classify_failure(status, &text);
            if err.is_auth_expired() {
                self.handle_auth_loss(&path);
            }
            return Err(err);
        }

        let data = if text.trim().is_empty() {
            serde_json::from_value(serde_json::Value::Null)?
        } else {
            serde_json::from_str(&text)?
        };
        Ok(ApiResponse { data, status })
    }

    fn handle_auth_loss(&self, path: &str) {
        warn!(path = path, "401 from api; clearing session");
        if let Err(e) = self.session.clear() {
            warn!(error = %e, "failed to clear session");
        }
        self.on_auth_expired.on_auth_expired();
    }
}

/// Percent-encode a caller-supplied id for use as one path segment.
pub(crate) fn segment(id: &str) -> Cow<'_, str> {
    urlencoding::encode(id)
}
