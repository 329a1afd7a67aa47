//! Client error types.
//!
//! The four failure categories a request can hit are kept distinct so
//! callers and tests can tell them apart: input acquisition, connection,
//! protocol, and decode.

use docwire_protocol::{DecodeError, ProtocolError};
use thiserror::Error;

/// Client errors.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("cannot read {path}: {source}")]
    Input {
        path: String,
        source: std::io::Error,
    },

    #[error("connection failed: {0}")]
    Connect(std::io::Error),

    #[error("operation timed out")]
    Timeout,

    #[error("connection closed by server")]
    ConnectionClosed,

    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
