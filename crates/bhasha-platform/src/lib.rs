//! Platform abstraction layer for bhasha.
//!
//! Everything that touches the host (files, environment variables,
//! persisted credentials) sits behind a trait here so the client and CLI
//! can be exercised against in-memory or temp-dir implementations.
//!
//! # Architecture
//!
//! The [`Platform`] trait bundles the async capabilities
//! ([`fs::FileSystem`], [`env::Environment`]). Credential persistence is
//! synchronous and lives in [`storage`], since it is a handful of tiny
//! files touched at startup and on explicit token changes.

pub mod config_loader;
pub mod env;
pub mod fs;
pub mod storage;

/// Bundle of platform capabilities.
pub trait Platform: Send + Sync {
    /// Filesystem operations.
    fn fs(&self) -> &dyn fs::FileSystem;

    /// Environment variable access.
    fn env(&self) -> &dyn env::Environment;
}

/// Native platform backed by `tokio::fs` and `std::env`.
pub struct NativePlatform {
    fs: fs::NativeFileSystem,
    env: env::NativeEnvironment,
}

impl NativePlatform {
    pub fn new() -> Self {
        Self {
            fs: fs::NativeFileSystem,
            env: env::NativeEnvironment,
        }
    }
}

impl Default for NativePlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl Platform for NativePlatform {
    fn fs(&self) -> &dyn fs::FileSystem {
        &self.fs
    }

    fn env(&self) -> &dyn env::Environment {
        &self.env
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_platform_exposes_capabilities() {
        let platform = NativePlatform::new();
        assert!(platform.env().get_var("PATH").is_some());
        let _ = platform.fs().home_dir();
    }
}
