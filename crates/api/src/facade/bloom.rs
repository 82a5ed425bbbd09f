//! Bloom filter operations (RedisBloom `BF.*` module commands).
//!
//! Membership answers never produce false negatives; false positives are
//! bounded by the error rate the filter was reserved with.

use super::StoreFacade;
use nsredis_core::{Error, NonEmpty, Result};
use redis::ToRedisArgs;

impl StoreFacade {
    /// Create a filter sized for `capacity` items at `error_rate`
    /// false-positive probability.
    ///
    /// Fails if the key already exists.
    pub async fn bf_reserve(&self, key: &str, capacity: u64, error_rate: f64) -> Result<()> {
        if capacity == 0 {
            return Err(Error::InvalidInput("bloom filter capacity must be positive".into()));
        }
        if !(error_rate > 0.0 && error_rate < 1.0) {
            return Err(Error::InvalidInput(format!(
                "bloom filter error rate must be in (0, 1), got {}",
                error_rate
            )));
        }
        let mut cmd = self.keyed("BF.RESERVE", key);
        cmd.arg(error_rate).arg(capacity);
        self.run("bf_reserve", &cmd).await?;
        Ok(())
    }

    /// Add one member. Returns `true` if it was not already (probably) present.
    pub async fn bf_add<M: ToRedisArgs>(&self, key: &str, member: M) -> Result<bool> {
        let mut cmd = self.keyed("BF.ADD", key);
        cmd.arg(member);
        self.query("bf_add", &cmd).await
    }

    /// Add several members; one flag per member, in order.
    pub async fn bf_madd<M: ToRedisArgs>(&self, key: &str, members: &NonEmpty<M>) -> Result<Vec<bool>> {
        let mut cmd = self.keyed("BF.MADD", key);
        for member in members {
            cmd.arg(member);
        }
        self.query("bf_madd", &cmd).await
    }

    /// Whether `member` may have been added.
    pub async fn bf_exists<M: ToRedisArgs>(&self, key: &str, member: M) -> Result<bool> {
        let mut cmd = self.keyed("BF.EXISTS", key);
        cmd.arg(member);
        self.query("bf_exists", &cmd).await
    }

    /// [`Self::bf_exists`] for several members; one flag per member, in order.
    pub async fn bf_mexists<M: ToRedisArgs>(
        &self,
        key: &str,
        members: &NonEmpty<M>,
    ) -> Result<Vec<bool>> {
        let mut cmd = self.keyed("BF.MEXISTS", key);
        for member in members {
            cmd.arg(member);
        }
        self.query("bf_mexists", &cmd).await
    }
}
