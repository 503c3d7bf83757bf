//! Small persistent key/value storage for credentials.
//!
//! [`FileStorage`] keeps one file per key under a private directory
//! (`0700`), each written atomically via temp file + rename with `0600`
//! permissions. [`MemoryStorage`] is the non-persistent counterpart.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::debug;

/// Synchronous string storage keyed by name.
pub trait KeyValueStorage: Send + Sync {
    /// Value stored under `key`, or `None` if absent.
    fn load(&self, key: &str) -> io::Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn store(&self, key: &str, value: &str) -> io::Result<()>;

    /// Remove `key`. Returns whether anything was removed.
    fn remove(&self, key: &str) -> io::Result<bool>;
}

/// One file per key inside `base_dir`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    base_dir: PathBuf,
}

impl FileStorage {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn ensure_dir(&self) -> io::Result<()> {
        if self.base_dir.is_dir() {
            return Ok(());
        }
        fs::create_dir_all(&self.base_dir)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.base_dir, fs::Permissions::from_mode(0o700))?;
        }
        Ok(())
    }

    fn key_path(&self, key: &str) -> io::Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
            && !key.starts_with('.');
        if !valid {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid storage key '{key}'"),
            ));
        }
        Ok(self.base_dir.join(key))
    }
}

impl KeyValueStorage for FileStorage {
    fn load(&self, key: &str) -> io::Result<Option<String>> {
        let path = self.key_path(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => {
                debug!(key, path = %path.display(), "loaded stored value");
                Ok(Some(value))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn store(&self, key: &str, value: &str) -> io::Result<()> {
        let path = self.key_path(key)?;
        self.ensure_dir()?;

        let tmp = path.with_extension("tmp");
        fs::write(&tmp, value)?;
        set_private(&tmp)?;
        fs::rename(&tmp, &path)?;

        debug!(key, path = %path.display(), "stored value");
        Ok(())
    }

    fn remove(&self, key: &str) -> io::Result<bool> {
        let path = self.key_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!(key, "removed stored value");
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }
}

#[cfg(unix)]
fn set_private(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn set_private(_path: &Path) -> io::Result<()> {
    Ok(())
}

/// Process-local storage; nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> io::Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| io::Error::other("memory storage lock poisoned"))
    }
}

impl KeyValueStorage for MemoryStorage {
    fn load(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn store(&self, key: &str, value: &str) -> io::Result<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> io::Result<bool> {
        Ok(self.lock()?.remove(key).is_some())
    }
}
