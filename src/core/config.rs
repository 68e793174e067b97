use super::error::AppError;
use std::path::PathBuf;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8089";
pub const DEFAULT_SESSION_FILE: &str = ".mystara/session.json";
pub const DEFAULT_CURRENCY: &str = "INR";

#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Gateway origin, without a trailing slash.
    pub base_url: String,
    pub session_file: PathBuf,
    /// ISO code sent with new payments.
    pub currency: String,
    pub log_json: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
            currency: DEFAULT_CURRENCY.to_string(),
            log_json: false,
        }
    }
}

impl ClientConfig {
    /// Env:
    /// - MYSTARA_API_BASE_URL (default http://localhost:8089)
    /// - MYSTARA_SESSION_FILE (default .mystara/session.json)
    /// - MYSTARA_CURRENCY (default INR)
    /// - LOG_FORMAT (`json` switches the log formatter)
    pub fn from_env() -> Result<Self, AppError> {
        let base_url = std::env::var("MYSTARA_API_BASE_URL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.into());
        let session_file = std::env::var("MYSTARA_SESSION_FILE")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_FILE));
        let currency = std::env::var("MYSTARA_CURRENCY")
            .ok()
            .map(|s| s.trim().to_ascii_uppercase())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_CURRENCY.into());
        let log_json = std::env::var("LOG_FORMAT")
            .map(|v| v.trim().eq_ignore_ascii_case("json"))
            .unwrap_or(false)
            || parse_bool_env("LOG_JSON").unwrap_or(false);

        Self {
            base_url,
            session_file,
            currency,
            log_json,
        }
        .validated()
    }

    /// Config pointing at `base_url` with every other field defaulted.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, AppError> {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
        .validated()
    }

    fn validated(mut self) -> Result<Self, AppError> {
        let url = Url::parse(self.base_url.trim())
            .map_err(|e| AppError::Config(format!("Invalid MYSTARA_API_BASE_URL: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(AppError::Config(format!(
                "MYSTARA_API_BASE_URL must be http(s), got {}",
                url.scheme()
            )));
        }
        if url.query().is_some() {
            return Err(AppError::Config(
                "MYSTARA_API_BASE_URL must not carry a query string".into(),
            ));
        }
        self.base_url = self.base_url.trim().trim_end_matches('/').to_string();
        Ok(self)
    }
}

fn parse_bool_env(key: &str) -> Option<bool> {
    let v = std::env::var(key).ok()?;
    let v = v.trim();
    if v.is_empty() {
        return None;
    }
    Some(matches!(v, "1" | "true" | "TRUE" | "yes" | "YES" | "on" | "ON"))
}
