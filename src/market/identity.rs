use crate::session::Role;

/// Identity header carried alongside the bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityHeader {
    BuyerId,
    SellerId,
}

impl IdentityHeader {
    pub const fn name(self) -> &'static str {
        match self {
            IdentityHeader::BuyerId => "X-Buyer-Id",
            IdentityHeader::SellerId => "X-Seller-Id",
        }
    }
}

const BUYER_SCOPED_PREFIXES: [&str; 3] = ["/api/buyer/", "/api/cart", "/api/payments"];

/// Paths served on behalf of a buyer: buyer requests, cart and payments.
pub fn is_buyer_scoped(path: &str) -> bool {
    let path = strip_query(path);
    BUYER_SCOPED_PREFIXES.iter().any(|p| path.starts_with(p))
}

/// Which identity header, if any, a request to `path` gets for `role`.
///
/// The role picks the rule: a buyer only identifies itself on buyer-scoped
/// paths, a seller on every other `/api/` path. Never both.
pub fn identity_header(role: Role, path: &str) -> Option<IdentityHeader> {
    let path = strip_query(path);
    match role {
        Role::Buyer if is_buyer_scoped(path) => Some(IdentityHeader::BuyerId),
        Role::Seller if path.starts_with("/api/") && !is_buyer_scoped(path) => {
            Some(IdentityHeader::SellerId)
        }
        _ => None,
    }
}

fn strip_query(path: &str) -> &str {
    path.split_once('?').map_or(path, |(p, _)| p)
}
