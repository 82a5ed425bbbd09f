//! Sorted-set operations.

use super::StoreFacade;
use nsredis_core::{Result, ScoredMember};
use redis::ToRedisArgs;

impl StoreFacade {
    /// Insert `member` with `score`, or update its score.
    ///
    /// Returns `true` when the member is new.
    pub async fn zadd_member<M: ToRedisArgs>(&self, key: &str, member: M, score: f64) -> Result<bool> {
        let mut cmd = self.keyed("ZADD", key);
        cmd.arg(score).arg(member);
        let added: u64 = self.query("zadd_member", &cmd).await?;
        Ok(added > 0)
    }

    /// Members ranked `start..=stop` by ascending score, with scores.
    ///
    /// Negative indices count from the end, so `(0, -1)` is the whole set.
    pub async fn zrange_with_scores(
        &self,
        key: &str,
        start: i64,
        stop: i64,
    ) -> Result<Vec<ScoredMember>> {
        let mut cmd = self.keyed("ZRANGE", key);
        cmd.arg(start).arg(stop).arg("WITHSCORES");
        let pairs: Vec<(String, f64)> = self.query("zrange_with_scores", &cmd).await?;
        Ok(pairs.into_iter().map(ScoredMember::from).collect())
    }
}
