//! Environment variable access.

/// Read access to environment-style configuration.
///
/// Tests substitute an in-memory map so config discovery can be checked
/// without mutating the process environment.
pub trait Environment: Send + Sync {
    /// Get the value of a variable, or `None` if unset.
    fn get_var(&self, name: &str) -> Option<String>;
}

/// [`Environment`] backed by [`std::env`].
pub struct NativeEnvironment;

impl Environment for NativeEnvironment {
    fn get_var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}
