//! Unified error type for nsredis.
//!
//! Every facade operation reports failures through [`Error`]. Transport and
//! encoding failures carry the name of the operation that produced them so
//! diagnostics survive propagation.
//!
//! | Variant | Meaning |
//! |---------|---------|
//! | NotFound | Key or hash field absent where a value was expected |
//! | Encoding | JSON (de)serialization or integer parsing failed |
//! | Transport | Anything the store client reported (I/O, protocol, server reply, timeout) |
//! | InvalidInput | Caller input rejected before reaching the store |
//! | Config | Configuration cannot be used to connect |

use thiserror::Error;

/// All nsredis errors.
#[derive(Debug, Error)]
pub enum Error {
    /// Key (or hash field) not found. Carries the prefixed key.
    #[error("not found: {0}")]
    NotFound(String),

    /// Value could not be encoded or decoded.
    #[error("{op}: encoding error: {message}")]
    Encoding {
        /// Operation name
        op: &'static str,
        /// Underlying codec message
        message: String,
    },

    /// Failure reported by the store client.
    #[error("{op}: {source}")]
    Transport {
        /// Operation name
        op: &'static str,
        /// Client error
        #[source]
        source: redis::RedisError,
    },

    /// Caller supplied an unusable argument.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Configuration cannot be used.
    #[error("invalid config: {0}")]
    Config(String),
}

/// Result type for nsredis operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Wrap a client error with the operation name.
    pub fn transport(op: &'static str, source: redis::RedisError) -> Self {
        Error::Transport { op, source }
    }

    /// Wrap a codec failure with the operation name.
    pub fn encoding(op: &'static str, message: impl ToString) -> Self {
        Error::Encoding {
            op,
            message: message.to_string(),
        }
    }

    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    /// Check if this error came from the store client.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport { .. })
    }

    /// Check if this error is an encoding failure.
    pub fn is_encoding(&self) -> bool {
        matches!(self, Error::Encoding { .. })
    }

    /// Check if the store client gave up waiting for a reply.
    pub fn is_timeout(&self) -> bool {
        match self {
            Error::Transport { source, .. } => source.is_timeout(),
            _ => false,
        }
    }

    /// Name of the operation that failed, when recorded.
    pub fn op(&self) -> Option<&'static str> {
        match self {
            Error::Encoding { op, .. } | Error::Transport { op, .. } => Some(op),
            _ => None,
        }
    }
}
