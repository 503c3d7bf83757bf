//! Filesystem abstraction and native implementation.
//!
//! Used for config discovery and for moving audio between disk and the
//! pipeline (recordings in, synthesized WAV out).

use std::path::{Path, PathBuf};

use async_trait::async_trait;

/// Async filesystem operations.
#[async_trait]
pub trait FileSystem: Send + Sync {
    /// Read a file as UTF-8.
    async fn read_to_string(&self, path: &Path) -> std::io::Result<String>;

    /// Read a file's raw bytes.
    async fn read_bytes(&self, path: &Path) -> std::io::Result<Vec<u8>>;

    /// Write bytes, creating parent directories if needed. Overwrites.
    async fn write_bytes(&self, path: &Path, content: &[u8]) -> std::io::Result<()>;

    /// Whether a path exists (file or directory).
    async fn exists(&self, path: &Path) -> bool;

    /// The user's home directory.
    fn home_dir(&self) -> Option<PathBuf>;
}

/// [`FileSystem`] backed by [`tokio::fs`].
pub struct NativeFileSystem;

#[async_trait]
impl FileSystem for NativeFileSystem {
    async fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        tokio::fs::read_to_string(path).await
    }

    async fn read_bytes(&self, path: &Path) -> std::io::Result<Vec<u8>> {
        tokio::fs::read(path).await
    }

    async fn write_bytes(&self, path: &Path, content: &[u8]) -> std::io::Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, content).await
    }

    async fn exists(&self, path: &Path) -> bool {
        tokio::fs::try_exists(path).await.unwrap_or(false)
    }

    fn home_dir(&self) -> Option<PathBuf> {
        dirs::home_dir()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn write_creates_parents_and_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("speech.wav");
        let fs = NativeFileSystem;

        fs.write_bytes(&path, b"RIFF\x00\x00").await.unwrap();
        assert!(fs.exists(&path).await);
        assert_eq!(fs.read_bytes(&path).await.unwrap(), b"RIFF\x00\x00");
    }

    #[tokio::test]
    async fn read_to_string_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let fs = NativeFileSystem;

        fs.write_bytes(&path, "{\"a\":\"नमस्ते\"}".as_bytes())
            .await
            .unwrap();
        assert_eq!(fs.read_to_string(&path).await.unwrap(), "{\"a\":\"नमस्ते\"}");
    }

    #[tokio::test]
    async fn missing_path_does_not_exist() {
        let dir = tempfile::tempdir().unwrap();
        let fs = NativeFileSystem;
        assert!(!fs.exists(&dir.path().join("nope")).await);
        assert!(fs.read_bytes(&dir.path().join("nope")).await.is_err());
    }
}
