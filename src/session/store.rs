use super::Session;
use crate::core::AppError;
use std::sync::RwLock;

/// Where the current session lives between requests.
///
/// Read before every request; cleared by whichever response reports a 401.
pub trait SessionStore: Send + Sync {
    fn get(&self) -> Option<Session>;

    /// Replace the stored session in one step.
    fn set(&self, session: Session) -> Result<(), AppError>;

    /// Remove every session field. Clearing an empty store succeeds.
    fn clear(&self) -> Result<(), AppError>;
}

#[derive(Debug, Default)]
pub struct MemorySessionStore {
    inner: RwLock<Option<Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        Self {
            inner: RwLock::new(Some(session)),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> Option<Session> {
        self.inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn set(&self, session: Session) -> Result<(), AppError> {
        *self.inner.write().unwrap_or_else(|e| e.into_inner()) = Some(session);
        Ok(())
    }

    fn clear(&self) -> Result<(), AppError> {
        *self.inner.write().unwrap_or_else(|e| e.into_inner()) = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Profile, Role};

    fn session() -> Session {
        Session::new(
            "tok",
            Role::Seller,
            Profile {
                id: "s1".into(),
                email: None,
                name: None,
                extra: Default::default(),
            },
        )
    }

    #[test]
    fn set_get_clear() {
        let store = MemorySessionStore::new();
        assert!(store.get().is_none());

        store.set(session()).unwrap();
        assert_eq!(store.get().unwrap().user_id, "s1");

        store.clear().unwrap();
        assert!(store.get().is_none());
        store.clear().unwrap();
    }
}
