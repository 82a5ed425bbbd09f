//! Key namespacing.
//!
//! Every key handed to the facade is rewritten to `prefix:key` before it
//! reaches the store. The separator is added once, at construction, so a
//! prefix that already ends with `:` is used as is and an empty prefix
//! leaves keys untouched.

use std::fmt;

/// Separator placed between the namespace prefix and the caller's key.
pub const SEPARATOR: char = ':';

/// Resolved key namespace.
///
/// # Examples
///
/// ```
/// use nsredis_core::KeyPrefix;
///
/// let prefix = KeyPrefix::new("billing");
/// assert_eq!(prefix.apply("invoice:42"), "billing:invoice:42");
///
/// let prefix = KeyPrefix::new("billing:");
/// assert_eq!(prefix.apply("invoice:42"), "billing:invoice:42");
///
/// let prefix = KeyPrefix::new("");
/// assert_eq!(prefix.apply("invoice:42"), "invoice:42");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct KeyPrefix {
    resolved: String,
}

impl KeyPrefix {
    /// Resolve a configured prefix.
    pub fn new(prefix: impl Into<String>) -> Self {
        let mut resolved = prefix.into();
        if !resolved.is_empty() && !resolved.ends_with(SEPARATOR) {
            resolved.push(SEPARATOR);
        }
        Self { resolved }
    }

    /// Namespaced form of `key`.
    pub fn apply(&self, key: &str) -> String {
        let mut out = String::with_capacity(self.resolved.len() + key.len());
        out.push_str(&self.resolved);
        out.push_str(key);
        out
    }

    /// The prefix including its trailing separator (empty when unset).
    pub fn as_str(&self) -> &str {
        &self.resolved
    }

    /// True when no namespace is configured.
    pub fn is_empty(&self) -> bool {
        self.resolved.is_empty()
    }
}

impl fmt::Display for KeyPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.resolved)
    }
}
