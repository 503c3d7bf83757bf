//! The bearer-token credential store.
//!
//! One [`CredentialStore`] is created per client session and shared (via
//! `Arc`) with everything that issues requests. State changes are written
//! through to a [`KeyValueStorage`]; storage failures are logged and never
//! surfaced, so the in-memory token is always authoritative.

use std::sync::RwLock;

use tracing::{debug, warn};

use bhasha_platform::storage::{KeyValueStorage, MemoryStorage};
use bhasha_types::config::TOKEN_STORAGE_KEY;
use bhasha_types::{ApiError, SecretString};

/// Message for a blank token passed to [`CredentialStore::set`].
pub const EMPTY_TOKEN: &str = "Authorization token must not be empty";

pub struct CredentialStore {
    storage: Box<dyn KeyValueStorage>,
    token: RwLock<SecretString>,
}

impl CredentialStore {
    /// Create a store and load any persisted token from `storage`.
    ///
    /// An unreadable store is treated like an empty one.
    pub fn load(storage: impl KeyValueStorage + 'static) -> Self {
        let initial = match storage.load(TOKEN_STORAGE_KEY) {
            Ok(Some(value)) => SecretString::new(value.trim()),
            Ok(None) => SecretString::default(),
            Err(e) => {
                warn!(error = %e, "failed to read persisted token, starting unset");
                SecretString::default()
            }
        };
        debug!(is_set = !initial.is_empty(), "credential store loaded");

        Self {
            storage: Box::new(storage),
            token: RwLock::new(initial),
        }
    }

    /// A store that persists nothing.
    pub fn in_memory() -> Self {
        Self::load(MemoryStorage::new())
    }

    /// Set the token. Input is trimmed; blank input is rejected and leaves
    /// the current state untouched.
    pub fn set(&self, token: &str) -> Result<(), ApiError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(ApiError::Validation(EMPTY_TOKEN.into()));
        }

        *self.write() = SecretString::new(token);

        if let Err(e) = self.storage.store(TOKEN_STORAGE_KEY, token) {
            warn!(error = %e, "failed to persist token, keeping it in memory only");
        }
        Ok(())
    }

    /// Forget the token and remove it from storage. Safe to call repeatedly.
    pub fn clear(&self) {
        *self.write() = SecretString::default();

        if let Err(e) = self.storage.remove(TOKEN_STORAGE_KEY) {
            warn!(error = %e, "failed to remove persisted token");
        }
    }

    /// Current token (empty if unset).
    pub fn token(&self) -> SecretString {
        self.read().clone()
    }

    pub fn is_set(&self) -> bool {
        !self.read().is_empty()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, SecretString> {
        self.token.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, SecretString> {
        self.token.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore")
            .field("token", &*self.read())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bhasha_platform::storage::FileStorage;

    #[test]
    fn starts_unset_without_persisted_value() {
        let store = CredentialStore::in_memory();
        assert!(!store.is_set());
        assert_eq!(store.token().expose(), "");
    }

    #[test]
    fn set_then_read_back() {
        let store = CredentialStore::in_memory();
        store.set("  abc.def-123  ").unwrap();
        assert!(store.is_set());
        assert_eq!(store.token().expose(), "abc.def-123");
    }

    #[test]
    fn blank_set_is_rejected_without_change() {
        let store = CredentialStore::in_memory();
        store.set("keep-me").unwrap();

        let err = store.set("   ").unwrap_err();
        assert!(err.is_validation());
        assert_eq!(store.token().expose(), "keep-me");
    }

    #[test]
    fn clear_is_idempotent() {
        let store = CredentialStore::in_memory();
        store.set("tok").unwrap();
        store.clear();
        store.clear();
        assert!(!store.is_set());
        assert_eq!(store.token().expose(), "");
    }

    #[test]
    fn persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();

        let first = CredentialStore::load(FileStorage::new(dir.path()));
        first.set("persisted-token").unwrap();

        let second = CredentialStore::load(FileStorage::new(dir.path()));
        assert!(second.is_set());
        assert_eq!(second.token().expose(), "persisted-token");

        second.clear();
        let third = CredentialStore::load(FileStorage::new(dir.path()));
        assert!(!third.is_set());
    }

    #[test]
    fn storage_failure_keeps_memory_state() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file-not-dir");
        std::fs::write(&blocker, "x").unwrap();

        let store = CredentialStore::load(FileStorage::new(&blocker));
        store.set("in-memory-only").unwrap();
        assert_eq!(store.token().expose(), "in-memory-only");

        store.clear();
        assert!(!store.is_set());
    }

    #[test]
    fn debug_does_not_leak_token() {
        let store = CredentialStore::in_memory();
        store.set("super-secret").unwrap();
        let dbg = format!("{store:?}");
        assert!(!dbg.contains("super-secret"));
        assert!(dbg.contains("[REDACTED]"));
    }
}
