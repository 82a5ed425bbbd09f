//! Unordered set operations.
//!
//! `smembers` and `scard` have no error channel: a failed call is logged
//! and reads as empty.

use super::StoreFacade;
use nsredis_core::{NonEmpty, Result};
use redis::ToRedisArgs;
use tracing::warn;

impl StoreFacade {
    /// Add members. Returns how many were not already present.
    pub async fn sadd<M: ToRedisArgs>(&self, key: &str, members: &NonEmpty<M>) -> Result<u64> {
        let mut cmd = self.keyed("SADD", key);
        for member in members {
            cmd.arg(member);
        }
        self.query("sadd", &cmd).await
    }

    /// Remove members. Returns how many were present.
    pub async fn srem<M: ToRedisArgs>(&self, key: &str, members: &NonEmpty<M>) -> Result<u64> {
        let mut cmd = self.keyed("SREM", key);
        for member in members {
            cmd.arg(member);
        }
        self.query("srem", &cmd).await
    }

    /// Membership test.
    pub async fn sismember<M: ToRedisArgs>(&self, key: &str, member: M) -> Result<bool> {
        let mut cmd = self.keyed("SISMEMBER", key);
        cmd.arg(member);
        self.query("sismember", &cmd).await
    }

    /// All members, in no particular order. Empty on failure.
    pub async fn smembers(&self, key: &str) -> Vec<String> {
        let cmd = self.keyed("SMEMBERS", key);
        match self.query("smembers", &cmd).await {
            Ok(members) => members,
            Err(e) => {
                warn!("{}", e);
                Vec::new()
            }
        }
    }

    /// Number of members. Zero on failure.
    pub async fn scard(&self, key: &str) -> u64 {
        let cmd = self.keyed("SCARD", key);
        match self.query("scard", &cmd).await {
            Ok(count) => count,
            Err(e) => {
                warn!("{}", e);
                0
            }
        }
    }
}
