use super::config::ClientConfig;
use crate::market::MarketClient;
use std::sync::Arc;

/// What a command needs to run: its configuration and a ready client.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ClientConfig>,
    pub client: MarketClient,
}
