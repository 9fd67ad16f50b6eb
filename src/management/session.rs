use std::fmt;

use dashmap::DashMap;

use crate::{types::Session, utils};

/// Opaque identifier of a browser session.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        SessionId(id.into())
    }

    /// Mints a fresh random identifier.
    pub fn generate() -> Self {
        SessionId(utils::generate_session_id())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How long a session that never completed a login is kept, in seconds.
pub const PENDING_SESSION_TTL_SECS: i64 = 600;

/// Server-side key-value store of sessions.
///
/// Implementations must be safe to call from concurrent requests; handlers do
/// not coordinate among themselves.
pub trait SessionStore: Send + Sync + fmt::Debug {
    fn get(&self, id: &SessionId) -> Option<Session>;
    fn set(&self, id: &SessionId, session: Session);
    fn remove(&self, id: &SessionId);
}

/// Process-local store.
///
/// Authenticated sessions live until the process exits. Pending sessions,
/// opened by `/login` but without a token, are dropped once they are older
/// than the pending TTL; the sweep runs on every write.
#[derive(Debug)]
pub struct MemoryStore {
    sessions: DashMap<SessionId, Session>,
    pending_ttl_secs: i64,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::with_pending_ttl(PENDING_SESSION_TTL_SECS)
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pending_ttl(pending_ttl_secs: i64) -> Self {
        MemoryStore {
            sessions: DashMap::new(),
            pending_ttl_secs,
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Drops pending sessions opened more than the pending TTL before `now`.
    /// Returns how many were dropped.
    pub fn purge_expired(&self, now: i64) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, session| {
            !session.is_pending() || now.saturating_sub(session.created_at) < self.pending_ttl_secs
        });
        let purged = before.saturating_sub(self.sessions.len());

        if purged > 0 {
            tracing::debug!(purged, "Dropped expired pending sessions");
        }
        purged
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, id: &SessionId) -> Option<Session> {
        self.sessions.get(id).map(|entry| entry.value().clone())
    }

    fn set(&self, id: &SessionId, session: Session) {
        self.purge_expired(utils::now_timestamp());
        self.sessions.insert(id.clone(), session);
    }

    fn remove(&self, id: &SessionId) {
        self.sessions.remove(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TokenBundle;

    fn token(created_at: i64) -> TokenBundle {
        TokenBundle {
            access_token: "access".to_string(),
            refresh_token: "refresh".to_string(),
            expires_in: Some(3600),
            created_at,
            scope: None,
        }
    }

    #[test]
    fn set_then_get() {
        let store = MemoryStore::new();
        let id = SessionId::new("abc");
        assert!(store.get(&id).is_none());

        let session = Session {
            oauth_state: Some("state".to_string()),
            ..Session::opened_at(utils::now_timestamp())
        };
        store.set(&id, session.clone());
        assert_eq!(store.get(&id), Some(session));
        assert_eq!(store.len(), 1);

        let replaced = Session::opened_at(utils::now_timestamp());
        store.set(&id, replaced.clone());
        assert_eq!(store.get(&id), Some(replaced));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn remove_forgets_the_session() {
        let store = MemoryStore::new();
        let kept = SessionId::new("kept");
        let gone = SessionId::new("gone");
        store.set(&kept, Session::opened_at(utils::now_timestamp()));
        store.set(&gone, Session::opened_at(utils::now_timestamp()));

        store.remove(&gone);
        assert!(store.get(&gone).is_none());
        assert!(store.get(&kept).is_some());
        assert_eq!(store.len(), 1);

        // unknown ids are ignored
        store.remove(&SessionId::new("never-stored"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn purge_drops_only_stale_pending_sessions() {
        let store = MemoryStore::with_pending_ttl(600);
        let now = 1_700_000_000;

        let stale = SessionId::new("stale");
        let fresh = SessionId::new("fresh");
        let authenticated = SessionId::new("authenticated");
        store.sessions.insert(stale.clone(), Session::opened_at(now - 600));
        store.sessions.insert(fresh.clone(), Session::opened_at(now - 599));
        store.sessions.insert(
            authenticated.clone(),
            Session {
                token: Some(token(now - 7200)),
                ..Session::opened_at(now - 7200)
            },
        );

        assert_eq!(store.purge_expired(now), 1);
        assert!(store.get(&stale).is_none());
        assert!(store.get(&fresh).is_some());
        assert!(store.get(&authenticated).is_some());
        assert_eq!(store.purge_expired(now), 0);
    }

    #[test]
    fn writes_sweep_stale_pending_sessions() {
        let store = MemoryStore::with_pending_ttl(0);
        for i in 0..50 {
            store.set(
                &SessionId::new(format!("anonymous-{i}")),
                Session::opened_at(utils::now_timestamp()),
            );
        }
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn generated_ids_differ() {
        assert_ne!(SessionId::generate(), SessionId::generate());
    }
}
