//! Fluent construction of a [`StoreFacade`].

use crate::{Config, CommandExecutor, Result, StoreFacade, TtlRefreshPolicy};
use std::sync::Arc;
use std::time::Duration;

/// Builder for a connected facade.
///
/// # Example
///
/// ```ignore
/// // Standalone server, namespaced keys, bounded commands
/// let store = StoreBuilder::new()
///     .address("10.0.0.5:6379")
///     .password("secret")
///     .database(2)
///     .prefix("billing")
///     .command_timeout(Duration::from_millis(200))
///     .connect()
///     .await?;
///
/// // Cluster: list every seed node
/// let store = StoreBuilder::new()
///     .addresses(["10.0.0.1:7000", "10.0.0.2:7000", "10.0.0.3:7000"])
///     .connect()
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct StoreBuilder {
    config: Config,
}

impl StoreBuilder {
    /// Start with no addresses and default settings.
    pub fn new() -> Self {
        let mut config = Config::new("");
        config.addresses.clear();
        Self { config }
    }

    /// Start from an existing configuration.
    pub fn from_config(config: Config) -> Self {
        Self { config }
    }

    /// Append one `host:port` endpoint.
    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.config.addresses.push(address.into());
        self
    }

    /// Append several endpoints, keeping their order.
    pub fn addresses<I, S>(mut self, addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config
            .addresses
            .extend(addresses.into_iter().map(Into::into));
        self
    }

    /// AUTH secret.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.config.password = password.into();
        self
    }

    /// Logical database index (standalone only).
    pub fn database(mut self, db: i64) -> Self {
        self.config.db = db;
        self
    }

    /// Key namespace.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.prefix = prefix.into();
        self
    }

    /// Per-command deadline.
    pub fn command_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.with_command_timeout(timeout);
        self
    }

    /// Report failed TTL refreshes to the caller instead of logging them.
    pub fn propagate_ttl_errors(mut self) -> Self {
        self.config.ttl_refresh = TtlRefreshPolicy::Propagate;
        self
    }

    /// The configuration built so far.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Connect to Redis and verify it answers.
    pub async fn connect(self) -> Result<StoreFacade> {
        StoreFacade::connect(self.config).await
    }

    /// Build over a caller-supplied executor (the liveness ping still runs).
    pub async fn connect_with(self, executor: Arc<dyn CommandExecutor>) -> Result<StoreFacade> {
        StoreFacade::with_executor(executor, self.config).await
    }
}

impl Default for StoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Connect using `config`. Shorthand for [`StoreFacade::connect`].
pub async fn connect(config: Config) -> Result<StoreFacade> {
    StoreFacade::connect(config).await
}
