//! Prefixed store facade for nsredis
//!
//! [`StoreFacade`] wraps a Redis-protocol client with key namespacing, JSON
//! (de)serialization and uniform error mapping. See the [`facade`] module
//! for the command mapping of each operation family.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod facade;

pub use facade::StoreFacade;
