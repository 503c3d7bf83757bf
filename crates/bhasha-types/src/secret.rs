//! Secret string wrapper for bearer tokens and API keys.
//!
//! [`SecretString`] keeps credentials out of logs, Debug output and
//! serialized configuration dumps.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A credential value that never appears in logs or serialized output.
///
/// - `Debug` and `Display` print `[REDACTED]` (or nothing if empty)
/// - `Serialize` emits an empty string
/// - `Deserialize` accepts a plain string
/// - [`expose()`](SecretString::expose) returns the inner value for the
///   one place that needs it: the outgoing request header
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SecretString(String);

impl SecretString {
    /// Wrap a value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The actual secret value.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the wrapped value is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// A display hint showing only the last four characters, e.g. `****abcd`.
    ///
    /// Values of four characters or fewer are fully masked.
    pub fn masked(&self) -> String {
        let count = self.0.chars().count();
        if count == 0 {
            return String::new();
        }
        if count <= 4 {
            return "*".repeat(count);
        }
        let tail: String = self.0.chars().skip(count - 4).collect();
        format!("****{tail}")
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            write!(f, "\"\"")
        } else {
            write!(f, "\"[REDACTED]\"")
        }
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            Ok(())
        } else {
            write!(f, "[REDACTED]")
        }
    }
}

impl Serialize for SecretString {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str("")
    }
}

impl<'de> Deserialize<'de> for SecretString {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(SecretString)
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        SecretString(s)
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        SecretString(s.to_string())
    }
}
