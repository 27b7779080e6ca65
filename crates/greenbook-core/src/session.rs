//! Session identity model and the session-scoped key-value storage seam.
//!
//! The browser original persisted identity in `sessionStorage`; here the
//! same contract is a small synchronous trait so hosts can plug in
//! whatever scoped storage they have. Writes and removals are synchronous
//! and must not be skipped on any mutation path.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;

/// Storage key for the user id.
pub const KEY_USER_ID: &str = "userID";
/// Storage key for the display name.
pub const KEY_USERNAME: &str = "username";
/// Storage key for the bearer token.
pub const KEY_ACCESS_TOKEN: &str = "accessToken";

/// The authenticated identity, owned exclusively by the session store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub user_id: Option<String>,
    pub username: String,
    pub access_token: Option<String>,
    pub is_authenticated: bool,
    pub email: String,
    pub avatar_url: String,
    pub organization_name: String,
    pub organization_role: String,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            user_id: None,
            username: String::new(),
            access_token: None,
            is_authenticated: false,
            email: String::new(),
            avatar_url: String::new(),
            organization_name: String::new(),
            organization_role: "member".to_string(),
        }
    }
}

/// Synchronous session-scoped key-value storage.
pub trait KeyValueStorage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// In-memory storage, the default stand-in for browser sessionStorage.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .expect("storage lock poisoned")
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .expect("storage lock poisoned")
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries
            .lock()
            .expect("storage lock poisoned")
            .remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove_round_trip() {
        let storage = MemoryStorage::new();
        storage.set(KEY_USER_ID, "u1");
        assert_eq!(storage.get(KEY_USER_ID).as_deref(), Some("u1"));

        storage.remove(KEY_USER_ID);
        assert_eq!(storage.get(KEY_USER_ID), None);
    }

    #[test]
    fn default_session_is_anonymous() {
        let session = Session::default();
        assert!(!session.is_authenticated);
        assert!(session.user_id.is_none());
        assert_eq!(session.organization_role, "member");
    }
}
