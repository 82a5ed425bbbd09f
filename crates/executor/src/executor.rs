//! The seam between the facade and the store client.
//!
//! The facade builds `redis::Cmd` values and hands them to a
//! [`CommandExecutor`]; it never touches a connection directly. The
//! production implementation is [`RedisExecutor`](crate::RedisExecutor);
//! tests substitute in-process executors.

use redis::{Cmd, RedisError, RedisResult, Value};
use std::future::Future;
use std::io;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

/// Boxed reply future returned by [`CommandExecutor::execute`].
pub type ExecFuture<'a> = Pin<Box<dyn Future<Output = RedisResult<Value>> + Send + 'a>>;

/// Sends one command to the store and yields the raw reply.
///
/// Implementations must be safe to call from many tasks at once; the facade
/// adds no locking of its own.
pub trait CommandExecutor: Send + Sync {
    /// Execute `cmd` and return the server's reply.
    fn execute<'a>(&'a self, cmd: &'a Cmd) -> ExecFuture<'a>;

    /// Short human-readable description used in log lines.
    fn describe(&self) -> String {
        "executor".to_string()
    }
}

impl<E: CommandExecutor + ?Sized> CommandExecutor for Arc<E> {
    fn execute<'a>(&'a self, cmd: &'a Cmd) -> ExecFuture<'a> {
        (**self).execute(cmd)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// Run `cmd`, giving up after `deadline` if one is set.
///
/// An elapsed deadline surfaces as an I/O `TimedOut` client error, so
/// `RedisError::is_timeout` reports it like any other client timeout.
pub async fn execute_with_deadline(
    executor: &dyn CommandExecutor,
    cmd: &Cmd,
    deadline: Option<Duration>,
) -> RedisResult<Value> {
    match deadline {
        None => executor.execute(cmd).await,
        Some(limit) => match tokio::time::timeout(limit, executor.execute(cmd)).await {
            Ok(reply) => reply,
            Err(_) => Err(timeout_error(limit)),
        },
    }
}

pub(crate) fn timeout_error(limit: Duration) -> RedisError {
    RedisError::from(io::Error::new(
        io::ErrorKind::TimedOut,
        format!("no reply within {}ms", limit.as_millis()),
    ))
}
