//! # nsredis
//!
//! Namespaced, JSON-aware facade over a Redis-protocol client.
//!
//! Every key is rewritten to `prefix:key` before it reaches the store,
//! structured values travel as JSON, and "no such key" replies surface as
//! [`Error::NotFound`]. Connection management, protocol framing and cluster
//! routing are left to the `redis` crate.
//!
//! ## Quick Start
//!
//! ```ignore
//! use nsredis::prelude::*;
//!
//! let store = StoreBuilder::new()
//!     .address("127.0.0.1:6379")
//!     .prefix("app")
//!     .connect()
//!     .await?;
//!
//! // JSON objects
//! store.set("profile:1", &json!({"name": "Alice"}), None).await?;
//! let profile: serde_json::Value = store.get("profile:1").await?;
//!
//! // Counters with a rolling window
//! store.incr_ex("logins", Duration::from_secs(3600)).await?;
//!
//! // Sets, hashes, sorted sets, bloom filters
//! store.sadd("online", &NonEmpty::one("alice")).await?;
//! store.hset("user:1", "visits", 1).await?;
//! store.zadd_member("leaderboard", "alice", 42.0).await?;
//! store.bf_reserve("seen", 10_000, 0.01).await?;
//! ```
//!
//! ## Operation families
//!
//! | Family | Operations |
//! |--------|------------|
//! | Strings / JSON | `get`, `set`, `set_ex`, `set_nx`, `set_nx_ex`, `get_str`, `set_str`, `set_nx_str` |
//! | Keys | `expire`, `ttl`, `del` |
//! | Sets | `sadd`, `srem`, `sismember`, `smembers`, `scard` |
//! | Counters | `incr`, `decr`, `incr_ex`, `decr_ex` |
//! | Hashes | `hget`, `hget_i64`, `hset`, `hset_ex`, `hsetnx`, `hsetnx_ex`, `hdel`, `hkeys`, `hexists`, `hlen`, `hincrby`, `hgetall` |
//! | Sorted sets | `zadd_member`, `zrange_with_scores` |
//! | Bloom filters | `bf_reserve`, `bf_add`, `bf_madd`, `bf_exists`, `bf_mexists` |

#![warn(missing_docs)]

mod builder;

pub mod prelude;

// Re-export main entry points
pub use builder::{connect, StoreBuilder};
pub use nsredis_api::StoreFacade;

// Re-export errors and configuration
pub use nsredis_core::{Config, Error, KeyPrefix, Result, TtlRefreshPolicy};

// Re-export value types
pub use nsredis_core::{NonEmpty, ScoredMember, Ttl};

// Re-export the executor seam
pub use nsredis_executor::{CommandExecutor, ExecFuture, RedisExecutor};
