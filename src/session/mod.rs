//! Client-held login state.
//!
//! A [`Session`] is created from a successful login or registration and
//! dropped on logout or on any 401 from the backend. Storage is abstracted
//! behind [`SessionStore`] so the API layer never touches a global.

pub mod file;
pub mod store;

pub use file::FileSessionStore;
pub use store::{MemorySessionStore, SessionStore};

use crate::core::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Buyer,
    Seller,
}

impl Role {
    pub fn from_is_buyer(is_buyer: bool) -> Self {
        if is_buyer {
            Role::Buyer
        } else {
            Role::Seller
        }
    }

    pub fn is_buyer(self) -> bool {
        self == Role::Buyer
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Buyer => "BUYER",
            Role::Seller => "SELLER",
        }
    }

    /// Path segment used by the auth endpoints (`/api/{service}/auth/...`).
    pub fn service(self) -> &'static str {
        match self {
            Role::Buyer => "buyer",
            Role::Seller => "seller",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "buyer" => Ok(Role::Buyer),
            "seller" => Ok(Role::Seller),
            other => Err(AppError::Config(format!(
                "Unknown role: {other} (expected buyer or seller)"
            ))),
        }
    }
}

/// Account summary returned by the auth endpoints.
///
/// Only `id` is required; anything else the backend sends is kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Persisted as `{token, user, role, userId}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    pub role: Role,
    #[serde(rename = "user")]
    pub profile: Profile,
}

impl Session {
    pub fn new(token: impl Into<String>, role: Role, profile: Profile) -> Self {
        Self {
            token: token.into(),
            user_id: profile.id.clone(),
            role,
            profile,
        }
    }
}
