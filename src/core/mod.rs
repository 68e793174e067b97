pub mod config;
pub mod error;
pub mod state;

pub use config::ClientConfig;
pub use error::{ApiError, AppError};
pub use state::AppState;
