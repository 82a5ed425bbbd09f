//! Store Facade - namespaced, JSON-aware Redis operations
//!
//! [`StoreFacade`] rewrites every key to `prefix:key`, hands the command to
//! a [`CommandExecutor`] and maps the reply:
//!
//! | Reply | Result |
//! |-------|--------|
//! | nil on a read that expects a value | `Error::NotFound(prefixed key)` |
//! | client / server failure | `Error::Transport { op, .. }` |
//! | JSON or integer decode failure | `Error::Encoding { op, .. }` |
//!
//! Operations are grouped by family:
//!
//! | Module | Commands |
//! |--------|----------|
//! | `strings` | GET, SET (EX/PX, NX) |
//! | `keys` | EXPIRE/PEXPIRE, TTL, DEL |
//! | `sets` | SADD, SREM, SISMEMBER, SMEMBERS, SCARD |
//! | `counters` | INCR, DECR (+ EXPIRE) |
//! | `hashes` | HGET, HSET, HSETNX, HDEL, HKEYS, HEXISTS, HLEN, HINCRBY, HGETALL |
//! | `sorted_sets` | ZADD, ZRANGE WITHSCORES |
//! | `bloom` | BF.RESERVE, BF.ADD, BF.MADD, BF.EXISTS, BF.MEXISTS |

mod bloom;
mod counters;
mod hashes;
mod keys;
mod sets;
mod sorted_sets;
mod strings;

use nsredis_core::{Config, Error, KeyPrefix, Result, TtlRefreshPolicy};
use nsredis_executor::{execute_with_deadline, CommandExecutor, RedisExecutor};
use redis::{Cmd, FromRedisValue, Value};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// Prefixed store facade.
///
/// Cheap to clone; clones share the executor and configuration. Holds no
/// mutable state, so it can be used from any number of tasks at once.
///
/// # Example
///
/// ```ignore
/// let store = StoreFacade::connect(Config::new("127.0.0.1:6379").with_prefix("app")).await?;
///
/// store.set("user:1", &user, Some(Duration::from_secs(60))).await?;
/// let user: User = store.get("user:1").await?;      // reads app:user:1
///
/// let visits = store.incr_ex("visits", Duration::from_secs(3600)).await?;
/// ```
#[derive(Clone)]
pub struct StoreFacade {
    executor: Arc<dyn CommandExecutor>,
    config: Arc<Config>,
    prefix: KeyPrefix,
}

impl StoreFacade {
    /// Connect to the store described by `config` and verify it answers.
    pub async fn connect(config: Config) -> Result<Self> {
        let executor = RedisExecutor::connect(&config).await?;
        Self::with_executor(Arc::new(executor), config).await
    }

    /// Build a facade over an existing executor.
    ///
    /// Validates `config` and pings through `executor` first; an unusable
    /// configuration or unreachable store fails here rather than on first use.
    pub async fn with_executor(executor: Arc<dyn CommandExecutor>, config: Config) -> Result<Self> {
        config.validate()?;
        let facade = Self {
            prefix: config.key_prefix(),
            config: Arc::new(config),
            executor,
        };
        facade.ping().await?;
        Ok(facade)
    }

    /// Round-trip a PING.
    pub async fn ping(&self) -> Result<()> {
        let _reply: String = self.query("ping", &redis::cmd("PING")).await?;
        Ok(())
    }

    /// The underlying executor, for commands the facade does not wrap.
    ///
    /// Keys passed this way are not prefixed; use [`Self::prefixed_key`].
    pub fn executor(&self) -> &Arc<dyn CommandExecutor> {
        &self.executor
    }

    /// Configuration this facade was built from.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The resolved key namespace.
    pub fn prefix(&self) -> &KeyPrefix {
        &self.prefix
    }

    /// The key as the store sees it.
    pub fn prefixed_key(&self, key: &str) -> String {
        self.prefix.apply(key)
    }

    // =========================================================================
    // Command plumbing
    // =========================================================================

    /// `name <prefixed key>`, ready for further arguments.
    pub(crate) fn keyed(&self, name: &str, key: &str) -> Cmd {
        let mut cmd = redis::cmd(name);
        cmd.arg(self.prefix.apply(key));
        cmd
    }

    /// Execute and return the raw reply.
    pub(crate) async fn run(&self, op: &'static str, cmd: &Cmd) -> Result<Value> {
        execute_with_deadline(self.executor.as_ref(), cmd, self.config.command_timeout())
            .await
            .map_err(|e| Error::transport(op, e))
    }

    /// Execute and convert the reply.
    pub(crate) async fn query<T: FromRedisValue>(&self, op: &'static str, cmd: &Cmd) -> Result<T> {
        let reply = self.run(op, cmd).await?;
        T::from_redis_value(&reply).map_err(|e| Error::transport(op, e))
    }

    /// Set the TTL that follows a counter or hash write.
    ///
    /// A zero `ttl` skips the call. Failures obey the configured
    /// [`TtlRefreshPolicy`].
    pub(crate) async fn refresh_ttl(&self, op: &'static str, key: &str, ttl: Duration) -> Result<()> {
        if ttl.is_zero() {
            return Ok(());
        }
        let cmd = self.expire_cmd(key, ttl);
        match self.run(op, &cmd).await {
            Ok(_) => Ok(()),
            Err(e) => match self.config.ttl_refresh {
                TtlRefreshPolicy::LogAndIgnore => {
                    warn!(
                        "{}: ttl refresh failed for {}, value kept without expiry: {}",
                        op,
                        self.prefix.apply(key),
                        e
                    );
                    Ok(())
                }
                TtlRefreshPolicy::Propagate => Err(e),
            },
        }
    }

    pub(crate) fn expire_cmd(&self, key: &str, ttl: Duration) -> Cmd {
        if whole_seconds(ttl) {
            let mut cmd = self.keyed("EXPIRE", key);
            cmd.arg(ttl.as_secs());
            cmd
        } else {
            let mut cmd = self.keyed("PEXPIRE", key);
            cmd.arg(millis(ttl));
            cmd
        }
    }
}

impl fmt::Debug for StoreFacade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreFacade")
            .field("executor", &self.executor.describe())
            .field("prefix", &self.prefix.as_str())
            .finish()
    }
}

/// Append `EX secs` or `PX millis`; nothing for `None` or zero.
pub(crate) fn push_expiry(cmd: &mut Cmd, ttl: Option<Duration>) {
    match ttl {
        Some(ttl) if !ttl.is_zero() => {
            if whole_seconds(ttl) {
                cmd.arg("EX").arg(ttl.as_secs());
            } else {
                cmd.arg("PX").arg(millis(ttl));
            }
        }
        _ => {}
    }
}

/// Whether a SET-family reply means the value was written.
pub(crate) fn written(reply: &Value) -> bool {
    !matches!(reply, Value::Nil)
}

fn whole_seconds(ttl: Duration) -> bool {
    ttl.subsec_nanos() == 0
}

fn millis(ttl: Duration) -> u64 {
    (ttl.as_millis() as u64).max(1)
}
