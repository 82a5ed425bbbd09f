//! Convenient imports for nsredis.
//!
//! ```ignore
//! use nsredis::prelude::*;
//!
//! let store = connect(Config::new("127.0.0.1:6379").with_prefix("app")).await?;
//! store.set_str("greeting", "hello", None).await?;
//! ```

// Main entry points
pub use crate::builder::{connect, StoreBuilder};
pub use nsredis_api::StoreFacade;

// Error handling
pub use nsredis_core::{Error, Result};

// Configuration
pub use nsredis_core::{Config, TtlRefreshPolicy};

// Value types
pub use nsredis_core::{NonEmpty, ScoredMember, Ttl};

// Durations for TTL arguments
pub use std::time::Duration;

// Re-export serde_json for convenience
pub use serde_json::json;
