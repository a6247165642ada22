//! Configuration key identifiers

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::{Error, Result};

/// A normalized, case-preserving configuration key.
///
/// Normalization trims surrounding whitespace. Case is kept exactly as
/// supplied and is significant: `Timeout` and `timeout` are different keys.
///
/// # Example
///
/// ```
/// use profile_core::ConfigKey;
///
/// let key = ConfigKey::new("  timeout ").unwrap();
/// assert_eq!(key.as_str(), "timeout");
/// assert_eq!(key, ConfigKey::new("timeout").unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ConfigKey {
    inner: String,
}

impl ConfigKey {
    /// Create a key from any string-like input.
    ///
    /// Fails with [`Error::InvalidKey`] when the key is empty after trimming
    /// or contains control characters.
    pub fn new(key: impl AsRef<str>) -> Result<Self> {
        let raw = key.as_ref();
        let normalized = Self::normalize(raw);

        if normalized.is_empty() {
            return Err(Error::InvalidKey {
                key: raw.to_string(),
                reason: "key is empty".to_string(),
            });
        }
        if normalized.chars().any(char::is_control) {
            return Err(Error::InvalidKey {
                key: raw.to_string(),
                reason: "key contains control characters".to_string(),
            });
        }

        Ok(Self {
            inner: normalized.to_string(),
        })
    }

    /// Normalized form used for equality and lookups.
    pub fn normalize(raw: &str) -> &str {
        raw.trim()
    }

    /// Get the normalized key string.
    pub fn as_str(&self) -> &str {
        &self.inner
    }
}

impl Borrow<str> for ConfigKey {
    fn borrow(&self) -> &str {
        &self.inner
    }
}

impl AsRef<str> for ConfigKey {
    fn as_ref(&self) -> &str {
        &self.inner
    }
}

impl FromStr for ConfigKey {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<&str> for ConfigKey {
    type Error = Error;

    fn try_from(value: &str) -> std::result::Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<String> for ConfigKey {
    type Error = Error;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner)
    }
}
