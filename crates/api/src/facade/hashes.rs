//! Hash operations.
//!
//! `hset_ex` and `hsetnx_ex` set an expiration on the whole hash after the
//! field write; see [`TtlRefreshPolicy`](nsredis_core::TtlRefreshPolicy)
//! for how a failed expiration is reported. `hsetnx_ex` only touches the
//! TTL when the field was actually written.

use super::StoreFacade;
use nsredis_core::{Error, Result};
use redis::ToRedisArgs;
use std::collections::HashMap;
use std::time::Duration;

impl StoreFacade {
    /// Read one field. An absent hash or field yields `NotFound`.
    pub async fn hget(&self, key: &str, field: &str) -> Result<String> {
        let raw = self.field_bytes("hget", key, field).await?;
        String::from_utf8(raw).map_err(|e| Error::encoding("hget", e))
    }

    /// Read one field as a base-10 integer. Surrounding whitespace is rejected.
    pub async fn hget_i64(&self, key: &str, field: &str) -> Result<i64> {
        let raw = self.field_bytes("hget_i64", key, field).await?;
        let text = std::str::from_utf8(&raw).map_err(|e| Error::encoding("hget_i64", e))?;
        text.parse::<i64>()
            .map_err(|e| Error::encoding("hget_i64", format!("{:?}: {}", text, e)))
    }

    /// Write one field.
    pub async fn hset<V: ToRedisArgs>(&self, key: &str, field: &str, value: V) -> Result<()> {
        self.write_field("hset", key, field, value).await?;
        Ok(())
    }

    /// Write one field, then set `ttl` on the hash (skipped when zero).
    pub async fn hset_ex<V: ToRedisArgs>(
        &self,
        key: &str,
        field: &str,
        value: V,
        ttl: Duration,
    ) -> Result<()> {
        self.write_field("hset_ex", key, field, value).await?;
        self.refresh_ttl("hset_ex", key, ttl).await
    }

    /// Write one field only if it is absent. Returns whether it was written.
    pub async fn hsetnx<V: ToRedisArgs>(&self, key: &str, field: &str, value: V) -> Result<bool> {
        let mut cmd = self.keyed("HSETNX", key);
        cmd.arg(field).arg(value);
        self.query("hsetnx", &cmd).await
    }

    /// [`Self::hsetnx`], then set `ttl` on the hash if the field was written.
    pub async fn hsetnx_ex<V: ToRedisArgs>(
        &self,
        key: &str,
        field: &str,
        value: V,
        ttl: Duration,
    ) -> Result<bool> {
        let mut cmd = self.keyed("HSETNX", key);
        cmd.arg(field).arg(value);
        let created: bool = self.query("hsetnx_ex", &cmd).await?;
        if created {
            self.refresh_ttl("hsetnx_ex", key, ttl).await?;
        }
        Ok(created)
    }

    /// Remove one field. Returns whether it existed.
    pub async fn hdel(&self, key: &str, field: &str) -> Result<bool> {
        let mut cmd = self.keyed("HDEL", key);
        cmd.arg(field);
        let removed: u64 = self.query("hdel", &cmd).await?;
        Ok(removed > 0)
    }

    /// Field names. Empty for an absent hash.
    pub async fn hkeys(&self, key: &str) -> Result<Vec<String>> {
        let cmd = self.keyed("HKEYS", key);
        self.query("hkeys", &cmd).await
    }

    /// Whether `field` is present.
    pub async fn hexists(&self, key: &str, field: &str) -> Result<bool> {
        let mut cmd = self.keyed("HEXISTS", key);
        cmd.arg(field);
        self.query("hexists", &cmd).await
    }

    /// Number of fields.
    pub async fn hlen(&self, key: &str) -> Result<u64> {
        let cmd = self.keyed("HLEN", key);
        self.query("hlen", &cmd).await
    }

    /// Add `delta` to an integer field, creating it at 0 first if needed.
    pub async fn hincrby(&self, key: &str, field: &str, delta: i64) -> Result<i64> {
        let mut cmd = self.keyed("HINCRBY", key);
        cmd.arg(field).arg(delta);
        self.query("hincrby", &cmd).await
    }

    /// Every field and value. Empty for an absent hash.
    pub async fn hgetall(&self, key: &str) -> Result<HashMap<String, String>> {
        let cmd = self.keyed("HGETALL", key);
        self.query("hgetall", &cmd).await
    }

    async fn field_bytes(&self, op: &'static str, key: &str, field: &str) -> Result<Vec<u8>> {
        let mut cmd = self.keyed("HGET", key);
        cmd.arg(field);
        let value: Option<Vec<u8>> = self.query(op, &cmd).await?;
        value.ok_or_else(|| Error::NotFound(format!("{} {}", self.prefixed_key(key), field)))
    }

    async fn write_field<V: ToRedisArgs>(
        &self,
        op: &'static str,
        key: &str,
        field: &str,
        value: V,
    ) -> Result<u64> {
        let mut cmd = self.keyed("HSET", key);
        cmd.arg(field).arg(value);
        self.query(op, &cmd).await
    }
}
