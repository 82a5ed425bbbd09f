//! Redis-backed executor.
//!
//! One configured address connects to a standalone server through a
//! [`ConnectionManager`] (multiplexed, reconnects on its own). Several
//! addresses connect in cluster mode through an async
//! [`ClusterConnection`], which routes each command by key slot. Both
//! handles are cheap to clone, so every command runs on its own clone and
//! concurrent callers never wait on each other here.

use crate::executor::{timeout_error, CommandExecutor, ExecFuture};
use nsredis_core::{Config, Error, Result};
use redis::aio::ConnectionManager;
use redis::cluster::ClusterClientBuilder;
use redis::cluster_async::ClusterConnection;
use redis::{Cmd, ConnectionAddr, ConnectionInfo, RedisConnectionInfo, RedisResult, Value};
use std::future::Future;
use tracing::{debug, info, warn};

#[derive(Clone)]
enum Handle {
    Standalone(ConnectionManager),
    Cluster(ClusterConnection),
}

/// Executor talking to a real Redis deployment.
#[derive(Clone)]
pub struct RedisExecutor {
    handle: Handle,
    endpoints: Vec<String>,
}

impl RedisExecutor {
    /// Open a connection described by `config`.
    ///
    /// Only establishes the connection; liveness is checked by the facade.
    /// The configured command timeout also bounds the connect attempt.
    pub async fn connect(config: &Config) -> Result<Self> {
        config.validate()?;
        let endpoints = config.endpoints()?;

        let handle = if config.is_cluster() {
            bounded(config, connect_cluster(config, &endpoints)).await?
        } else {
            let (host, port) = endpoints[0].clone();
            bounded(config, connect_standalone(config, host, port)).await?
        };

        let executor = Self {
            handle,
            endpoints: config.addresses.clone(),
        };
        info!("Connected to {}", executor.describe());
        Ok(executor)
    }

    /// True when connected in cluster mode.
    pub fn is_cluster(&self) -> bool {
        matches!(self.handle, Handle::Cluster(_))
    }
}

impl CommandExecutor for RedisExecutor {
    fn execute<'a>(&'a self, cmd: &'a Cmd) -> ExecFuture<'a> {
        let handle = self.handle.clone();
        Box::pin(async move {
            let reply: RedisResult<Value> = match handle {
                Handle::Standalone(mut conn) => cmd.query_async(&mut conn).await,
                Handle::Cluster(mut conn) => cmd.query_async(&mut conn).await,
            };
            reply
        })
    }

    fn describe(&self) -> String {
        let mode = if self.is_cluster() { "cluster" } else { "standalone" };
        format!("redis {} [{}]", mode, self.endpoints.join(", "))
    }
}

async fn bounded<T>(config: &Config, connect: impl Future<Output = Result<T>>) -> Result<T> {
    match config.command_timeout() {
        None => connect.await,
        Some(limit) => match tokio::time::timeout(limit, connect).await {
            Ok(result) => result,
            Err(_) => Err(Error::transport("connect", timeout_error(limit))),
        },
    }
}

async fn connect_standalone(config: &Config, host: String, port: u16) -> Result<Handle> {
    debug!("Connecting to standalone redis at {}:{} db={}", host, port, config.db);
    let info = ConnectionInfo {
        addr: ConnectionAddr::Tcp(host, port),
        redis: RedisConnectionInfo {
            db: config.db,
            password: config.password(),
            ..Default::default()
        },
    };
    let client = redis::Client::open(info).map_err(|e| Error::transport("connect", e))?;
    let manager = ConnectionManager::new(client)
        .await
        .map_err(|e| Error::transport("connect", e))?;
    Ok(Handle::Standalone(manager))
}

async fn connect_cluster(config: &Config, endpoints: &[(String, u16)]) -> Result<Handle> {
    if config.db != 0 {
        warn!(
            "Cluster mode has no logical databases; ignoring database index {}",
            config.db
        );
    }
    let nodes: Vec<String> = endpoints
        .iter()
        .map(|(host, port)| node_url(host, *port))
        .collect();
    debug!("Connecting to redis cluster seeds {:?}", nodes);

    let mut builder = ClusterClientBuilder::new(nodes);
    if let Some(password) = config.password() {
        builder = builder.password(password);
    }
    let client = builder.build().map_err(|e| Error::transport("connect", e))?;
    let conn = client
        .get_async_connection()
        .await
        .map_err(|e| Error::transport("connect", e))?;
    Ok(Handle::Cluster(conn))
}

fn node_url(host: &str, port: u16) -> String {
    if host.contains(':') {
        format!("redis://[{}]:{}", host, port)
    } else {
        format!("redis://{}:{}", host, port)
    }
}
