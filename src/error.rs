//! Error types for the transport, the encoding pipeline, the traversal
//! controller and the notification gateway.

use thiserror::Error;

/// Failures raised while talking to the remote server.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("connection to {addr} failed: {reason}")]
    Connect { addr: String, reason: String },

    #[error("authentication rejected for user {0}")]
    AuthRejected(String),

    #[error("host key of {0} rejected")]
    HostKeyRejected(String),

    #[error("{0} is not a directory")]
    NotADirectory(String),

    #[error("protocol error on {path}: {reason}")]
    Protocol { path: String, reason: String },

    #[error("{0} timed out")]
    Timeout(&'static str),

    #[error(transparent)]
    Ssh(#[from] russh::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Failures raised while turning a byte stream into its text payload.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("stream read failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("stream read timed out")]
    Timeout,
}

/// Outcome of a single request that did not complete.
#[derive(Debug, Error)]
pub enum ControllerError {
    /// Listing requested without a directory whitelist. Never resets.
    #[error("dirPathsAuthorized is not defined")]
    MissingAuthorization,

    #[error("required field {0} is missing")]
    MissingField(&'static str),

    #[error("cursor {cursor} points past {available} discovered directories")]
    StaleCursor { cursor: i64, available: usize },

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

impl ControllerError {
    /// Whether the traversal state must be discarded after this error.
    pub fn requires_reset(&self) -> bool {
        !matches!(self, Self::MissingAuthorization | Self::MissingField(_))
    }
}

/// Errors that stop the gateway loop.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("unknown notification {0}")]
    UnknownNotification(String),

    #[error("malformed envelope: {0}")]
    Envelope(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
