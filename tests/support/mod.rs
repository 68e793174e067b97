#![allow(dead_code)]

use mystara_client::session::Profile;
use mystara_client::{ClientConfig, MarketClient, MemorySessionStore, Role, Session};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub fn profile(id: &str) -> Profile {
    Profile {
        id: id.to_string(),
        email: Some(format!("{id}@example.com")),
        name: Some(id.to_uppercase()),
        extra: Default::default(),
    }
}

pub fn buyer_session() -> Session {
    Session::new("tok-buyer", Role::Buyer, profile("b1"))
}

pub fn seller_session() -> Session {
    Session::new("tok-seller", Role::Seller, profile("s1"))
}

pub fn store_with(session: Option<Session>) -> Arc<MemorySessionStore> {
    Arc::new(match session {
        Some(s) => MemorySessionStore::with_session(s),
        None => MemorySessionStore::new(),
    })
}

pub fn client(base_url: &str, store: Arc<MemorySessionStore>) -> MarketClient {
    let config = ClientConfig::with_base_url(base_url).expect("valid base url");
    MarketClient::new(&config, store).expect("build client")
}

/// Client whose auth-expired handler counts invocations.
pub fn counting_client(
    base_url: &str,
    store: Arc<MemorySessionStore>,
) -> (MarketClient, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let client = client(base_url, store).with_auth_expired_handler(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    (client, hits)
}

/// Nothing listens here, so every call fails before a response.
pub const UNREACHABLE: &str = "http://127.0.0.1:1";
