//! Core types for nsredis
//!
//! Shared by the executor and facade crates:
//! - [`Error`] / [`Result`]: the unified error type
//! - [`Config`]: connection and namespace configuration
//! - [`KeyPrefix`]: resolved key namespace
//! - [`NonEmpty`], [`ScoredMember`], [`Ttl`]: facade value types

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod key;
pub mod types;

pub use config::{Config, TtlRefreshPolicy};
pub use error::{Error, Result};
pub use key::KeyPrefix;
pub use types::{NonEmpty, ScoredMember, Ttl};
