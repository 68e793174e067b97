pub mod core;
pub mod market;
pub mod session;

pub use crate::core::{ApiError, AppError, ClientConfig};
pub use crate::market::{ApiResponse, MarketClient};
pub use crate::session::{FileSessionStore, MemorySessionStore, Role, Session, SessionStore};
