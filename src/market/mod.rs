//! Typed access to the marketplace gateway, one group per resource.

pub mod auth;
pub mod cart;
pub mod client;
pub mod identity;
pub mod normalize;
pub mod payments;
pub mod products;
pub mod requests;
pub mod themes;
pub mod types;

pub use auth::AuthApi;
pub use cart::CartApi;
pub use client::{ApiResponse, AuthExpiredHandler, MarketClient};
pub use identity::{identity_header, is_buyer_scoped, IdentityHeader};
pub use normalize::classify_failure;
pub use payments::PaymentsApi;
pub use products::ProductsApi;
pub use requests::RequestsApi;
pub use themes::ThemesApi;
