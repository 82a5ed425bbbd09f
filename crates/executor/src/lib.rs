//! Command execution layer for nsredis
//!
//! The facade never holds a connection. It builds commands and passes them
//! to a [`CommandExecutor`]:
//!
//! | Executor | Backing |
//! |----------|---------|
//! | [`RedisExecutor`] (one address) | `redis::aio::ConnectionManager` |
//! | [`RedisExecutor`] (several addresses) | `redis::cluster_async::ClusterConnection` |
//! | test doubles | anything implementing the trait |

#![warn(missing_docs)]
#![warn(clippy::all)]

mod executor;
mod redis_executor;

pub use executor::{execute_with_deadline, CommandExecutor, ExecFuture};
pub use redis_executor::RedisExecutor;
