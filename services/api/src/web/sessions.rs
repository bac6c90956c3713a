//! services/api/src/web/sessions.rs
//!
//! The server-side session store for chat state.
//!
//! Each login session owns one `ChatState`, kept in process memory and keyed
//! by the auth session id. The outer map lock is held only to look up or
//! insert an entry; each session's state sits behind its own async lock, so
//! a slow generative-text round trip blocks that one session and nothing
//! else. Logout removes the entry, which is what destroys the chat threads
//! when the session ends.

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};

use fintrack_core::chat::ChatState;
use tokio::sync::Mutex;

/// Maps auth session ids to their chat state.
#[derive(Clone, Default)]
pub struct ChatSessionStore {
    inner: Arc<StdMutex<HashMap<String, Arc<Mutex<ChatState>>>>>,
}

impl ChatSessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the chat state for a session, creating an empty one on first
    /// access. The returned handle can be locked across await points.
    pub fn get_or_create(&self, session_id: &str) -> Arc<Mutex<ChatState>> {
        let mut map = self.inner.lock().expect("chat session store lock poisoned");
        map.entry(session_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(ChatState::new())))
            .clone()
    }

    /// Drops a session's chat state entirely (called on logout).
    pub fn remove(&self, session_id: &str) {
        let mut map = self.inner.lock().expect("chat session store lock poisoned");
        map.remove(session_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn same_session_gets_the_same_state() {
        let store = ChatSessionStore::new();

        {
            let state = store.get_or_create("sess-1");
            state.lock().await.new_chat();
        }

        let state = store.get_or_create("sess-1");
        assert_eq!(state.lock().await.threads.len(), 1);
    }

    #[tokio::test]
    async fn sessions_are_isolated_from_each_other() {
        let store = ChatSessionStore::new();

        store.get_or_create("sess-1").lock().await.new_chat();

        let other = store.get_or_create("sess-2");
        assert!(other.lock().await.threads.is_empty());
    }

    #[tokio::test]
    async fn remove_destroys_the_chat_threads() {
        let store = ChatSessionStore::new();

        store.get_or_create("sess-1").lock().await.new_chat();
        store.remove("sess-1");

        // A later access starts from scratch.
        let state = store.get_or_create("sess-1");
        assert!(state.lock().await.threads.is_empty());
        assert!(state.lock().await.active_id.is_none());
    }
}
