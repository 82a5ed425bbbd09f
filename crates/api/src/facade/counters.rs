//! Atomic counters.
//!
//! The `*_ex` variants issue the adjustment and then an expiration as two
//! separate commands. The adjustment is never rolled back; a failed
//! expiration is handled by [`TtlRefreshPolicy`](nsredis_core::TtlRefreshPolicy).

use super::StoreFacade;
use nsredis_core::Result;
use std::time::Duration;

impl StoreFacade {
    /// Increment by one, creating the key at 0 first if needed.
    pub async fn incr(&self, key: &str) -> Result<i64> {
        self.adjust("incr", "INCR", key).await
    }

    /// Decrement by one, creating the key at 0 first if needed.
    pub async fn decr(&self, key: &str) -> Result<i64> {
        self.adjust("decr", "DECR", key).await
    }

    /// Increment, then set `ttl` on the counter (skipped when zero).
    pub async fn incr_ex(&self, key: &str, ttl: Duration) -> Result<i64> {
        let value = self.adjust("incr_ex", "INCR", key).await?;
        self.refresh_ttl("incr_ex", key, ttl).await?;
        Ok(value)
    }

    /// Decrement, then set `ttl` on the counter (skipped when zero).
    pub async fn decr_ex(&self, key: &str, ttl: Duration) -> Result<i64> {
        let value = self.adjust("decr_ex", "DECR", key).await?;
        self.refresh_ttl("decr_ex", key, ttl).await?;
        Ok(value)
    }

    async fn adjust(&self, op: &'static str, command: &str, key: &str) -> Result<i64> {
        let cmd = self.keyed(command, key);
        self.query(op, &cmd).await
    }
}
