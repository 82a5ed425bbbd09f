//! Connection and namespace configuration.
//!
//! ```json
//! {
//!   "addresses": ["10.0.0.1:6379"],
//!   "password": "secret",
//!   "database": 2,
//!   "prefix": "billing",
//!   "command_timeout_ms": 500,
//!   "ttl_refresh": "propagate"
//! }
//! ```
//!
//! Only `addresses` is required. `db` and `addrs` are accepted as
//! alternative spellings of `database` and `addresses`.

use crate::error::{Error, Result};
use crate::key::KeyPrefix;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Port used when an address omits one.
pub const DEFAULT_PORT: u16 = 6379;

/// What to do when the TTL refresh that follows a counter or hash write fails.
///
/// The write itself has already been applied by then, so neither choice can
/// undo it; the policy only decides whether the caller hears about the
/// missing expiration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TtlRefreshPolicy {
    /// Log at `warn` and report success.
    #[default]
    LogAndIgnore,
    /// Return the expiration failure to the caller.
    Propagate,
}

/// Facade configuration. Immutable once a facade is built from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Store endpoints as `host:port`. One entry selects a standalone
    /// server, several select cluster mode.
    #[serde(alias = "addrs")]
    pub addresses: Vec<String>,

    /// AUTH secret; empty disables authentication.
    #[serde(default)]
    pub password: String,

    /// Logical database index (standalone only).
    #[serde(default, rename = "database", alias = "db")]
    pub db: i64,

    /// Namespace prepended to every key.
    #[serde(default)]
    pub prefix: String,

    /// Upper bound on a single command round-trip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command_timeout_ms: Option<u64>,

    /// Handling of failed TTL refreshes in the `*_ex` counter/hash calls.
    #[serde(default)]
    pub ttl_refresh: TtlRefreshPolicy,
}

impl Config {
    /// Configuration for a single standalone server.
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            addresses: vec![address.into()],
            password: String::new(),
            db: 0,
            prefix: String::new(),
            command_timeout_ms: None,
            ttl_refresh: TtlRefreshPolicy::default(),
        }
    }

    /// Parse a JSON configuration document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))
    }

    /// Set the key namespace.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Set the AUTH secret.
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }

    /// Set the logical database index.
    pub fn with_db(mut self, db: i64) -> Self {
        self.db = db;
        self
    }

    /// Bound every command by `timeout`.
    ///
    /// Sub-millisecond timeouts round up to 1 ms. Zero is kept as is and
    /// rejected by [`Config::validate`].
    pub fn with_command_timeout(mut self, timeout: Duration) -> Self {
        let millis = if timeout.is_zero() {
            0
        } else {
            (timeout.as_millis() as u64).max(1)
        };
        self.command_timeout_ms = Some(millis);
        self
    }

    /// Choose how failed TTL refreshes are reported.
    pub fn with_ttl_refresh(mut self, policy: TtlRefreshPolicy) -> Self {
        self.ttl_refresh = policy;
        self
    }

    /// Resolved key namespace.
    pub fn key_prefix(&self) -> KeyPrefix {
        KeyPrefix::new(self.prefix.as_str())
    }

    /// Per-command deadline, if configured.
    pub fn command_timeout(&self) -> Option<Duration> {
        self.command_timeout_ms.map(Duration::from_millis)
    }

    /// More than one endpoint means cluster mode.
    pub fn is_cluster(&self) -> bool {
        self.addresses.len() > 1
    }

    /// Password as the client expects it (`None` when empty).
    pub fn password(&self) -> Option<String> {
        if self.password.is_empty() {
            None
        } else {
            Some(self.password.clone())
        }
    }

    /// Parsed endpoints, in configured order.
    pub fn endpoints(&self) -> Result<Vec<(String, u16)>> {
        self.addresses.iter().map(|a| parse_address(a)).collect()
    }

    /// Reject configurations that cannot produce a connection.
    pub fn validate(&self) -> Result<()> {
        if self.addresses.is_empty() {
            return Err(Error::Config("no store addresses configured".into()));
        }
        if self.db < 0 {
            return Err(Error::Config(format!("negative database index {}", self.db)));
        }
        if self.command_timeout_ms == Some(0) {
            return Err(Error::Config("command timeout must be positive".into()));
        }
        self.endpoints().map(|_| ())
    }
}

/// Split `host:port` (or `[v6]:port`, or a bare host) into its parts.
pub fn parse_address(address: &str) -> Result<(String, u16)> {
    let address = address.trim();
    if address.is_empty() {
        return Err(Error::Config("empty store address".into()));
    }

    // Bracketed IPv6: [::1]:6379
    if let Some(rest) = address.strip_prefix('[') {
        let (host, tail) = rest
            .split_once(']')
            .ok_or_else(|| Error::Config(format!("unterminated IPv6 address: {}", address)))?;
        let port = match tail.strip_prefix(':') {
            Some(p) => parse_port(address, p)?,
            None if tail.is_empty() => DEFAULT_PORT,
            None => return Err(Error::Config(format!("malformed address: {}", address))),
        };
        return Ok((host.to_string(), port));
    }

    match address.rsplit_once(':') {
        Some((host, port)) if !host.is_empty() && !host.contains(':') => {
            Ok((host.to_string(), parse_port(address, port)?))
        }
        Some(_) => Err(Error::Config(format!("malformed address: {}", address))),
        None => Ok((address.to_string(), DEFAULT_PORT)),
    }
}

fn parse_port(address: &str, port: &str) -> Result<u16> {
    port.parse::<u16>()
        .map_err(|_| Error::Config(format!("invalid port in address: {}", address)))
}
