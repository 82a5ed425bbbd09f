//! String and JSON object operations.
//!
//! | Facade | Command |
//! |--------|---------|
//! | `get(key)` | `GET p:key` + JSON decode |
//! | `set(key, v, ttl)` / `set_ex` | `SET p:key json [EX s]` |
//! | `set_nx(key, v, ttl)` / `set_nx_ex` | `SET p:key json NX [EX s]` |
//! | `get_str` / `set_str` / `set_nx_str` | same, value passed through |
//!
//! A `ttl` of `None` or zero stores the value without expiry.

use super::{push_expiry, written, StoreFacade};
use nsredis_core::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

impl StoreFacade {
    /// Fetch `key` and decode it as JSON.
    ///
    /// An absent key and an empty stored string both yield `NotFound`.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        let cmd = self.keyed("GET", key);
        let raw: Option<Vec<u8>> = self.query("get", &cmd).await?;
        match raw {
            Some(data) if !data.is_empty() => {
                serde_json::from_slice(&data).map_err(|e| Error::encoding("get", e))
            }
            _ => Err(Error::NotFound(self.prefixed_key(key))),
        }
    }

    /// Encode `value` as JSON and store it.
    pub async fn set<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
        ttl: Option<Duration>,
    ) -> Result<()> {
        self.set_ex(key, value, ttl).await.map(|_| ())
    }

    /// Like [`Self::set`], returning the JSON payload that was stored.
    pub async fn set_ex<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
        ttl: Option<Duration>,
    ) -> Result<String> {
        let payload = serde_json::to_string(value).map_err(|e| Error::encoding("set_ex", e))?;
        let mut cmd = self.keyed("SET", key);
        cmd.arg(&payload);
        push_expiry(&mut cmd, ttl);
        self.run("set_ex", &cmd).await?;
        Ok(payload)
    }

    /// Store `value` only if `key` is absent. Returns whether it was written.
    pub async fn set_nx<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
        ttl: Option<Duration>,
    ) -> Result<bool> {
        Ok(self.set_nx_ex(key, value, ttl).await?.is_some())
    }

    /// Like [`Self::set_nx`], returning the stored payload when the write
    /// happened and `None` when the key already existed.
    pub async fn set_nx_ex<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
        ttl: Option<Duration>,
    ) -> Result<Option<String>> {
        let payload =
            serde_json::to_string(value).map_err(|e| Error::encoding("set_nx_ex", e))?;
        let mut cmd = self.keyed("SET", key);
        cmd.arg(&payload).arg("NX");
        push_expiry(&mut cmd, ttl);
        let reply = self.run("set_nx_ex", &cmd).await?;
        Ok(if written(&reply) { Some(payload) } else { None })
    }

    /// Fetch `key` as a raw string.
    pub async fn get_str(&self, key: &str) -> Result<String> {
        let cmd = self.keyed("GET", key);
        let raw: Option<Vec<u8>> = self.query("get_str", &cmd).await?;
        let raw = raw.ok_or_else(|| Error::NotFound(self.prefixed_key(key)))?;
        String::from_utf8(raw).map_err(|e| Error::encoding("get_str", e))
    }

    /// Store a raw string.
    pub async fn set_str(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<()> {
        let mut cmd = self.keyed("SET", key);
        cmd.arg(value);
        push_expiry(&mut cmd, ttl);
        self.run("set_str", &cmd).await?;
        Ok(())
    }

    /// Store a raw string only if `key` is absent.
    pub async fn set_nx_str(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<bool> {
        let mut cmd = self.keyed("SET", key);
        cmd.arg(value).arg("NX");
        push_expiry(&mut cmd, ttl);
        let reply = self.run("set_nx_str", &cmd).await?;
        Ok(written(&reply))
    }
}
