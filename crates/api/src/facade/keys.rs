//! Key lifetime operations.

use super::StoreFacade;
use nsredis_core::{Error, Result, Ttl};
use std::time::Duration;

impl StoreFacade {
    /// Set or refresh the time-to-live of `key`.
    ///
    /// Returns `false` when the key does not exist. Sub-second durations use
    /// `PEXPIRE`.
    pub async fn expire(&self, key: &str, ttl: Duration) -> Result<bool> {
        let cmd = self.expire_cmd(key, ttl);
        self.query("expire", &cmd).await
    }

    /// Remaining time-to-live of `key`.
    pub async fn ttl(&self, key: &str) -> Result<Ttl> {
        let cmd = self.keyed("TTL", key);
        let seconds: i64 = self.query("ttl", &cmd).await?;
        Ttl::from_reply(seconds).ok_or_else(|| Error::NotFound(self.prefixed_key(key)))
    }

    /// Remove `key`. Returns whether anything was deleted; absence is not an error.
    pub async fn del(&self, key: &str) -> Result<bool> {
        let cmd = self.keyed("DEL", key);
        let removed: u64 = self.query("del", &cmd).await?;
        Ok(removed > 0)
    }
}
