//! Presence error types
//!
//! Resolution itself never fails; these errors cover the boundary operations
//! around it (configuration, wire decoding and encoding, event publishing).

use thiserror::Error;

/// Result alias for presence operations.
pub type PresenceResult<T> = Result<T, PresenceError>;

/// Errors from presence boundary operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PresenceError {
    /// Configuration could not be loaded or failed validation.
    #[error("invalid presence configuration: {message}")]
    Config {
        /// What was wrong
        message: String,
    },

    /// Reading a configuration source failed.
    #[error("presence io error: {message}")]
    Io {
        /// Underlying io failure
        message: String,
    },

    /// Inbound bytes were not a decodable request.
    #[error("failed to decode presence request: {message}")]
    Decode {
        /// Decoder message
        message: String,
    },

    /// An outbound event could not be serialized.
    #[error("failed to encode presence event: {message}")]
    Encode {
        /// Encoder message
        message: String,
    },

    /// The event sink no longer accepts events.
    #[error("presence event sink closed")]
    SinkClosed,
}

impl PresenceError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an io error.
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Create a decode error.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create an encode error.
    pub fn encode(message: impl Into<String>) -> Self {
        Self::Encode {
            message: message.into(),
        }
    }

    /// Stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config { .. } => "presence.config",
            Self::Io { .. } => "presence.io",
            Self::Decode { .. } => "presence.decode",
            Self::Encode { .. } => "presence.encode",
            Self::SinkClosed => "presence.sink_closed",
        }
    }
}

impl From<std::io::Error> for PresenceError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string())
    }
}
