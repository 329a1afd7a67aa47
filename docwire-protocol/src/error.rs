//! Protocol and text-decoding error types.

use thiserror::Error;

/// Errors that can occur while framing or de-framing messages.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("frame too large: {size} bytes (max {max})")]
    FrameTooLarge { size: usize, max: usize },

    #[error("truncated length prefix: connection closed after {received} of 4 bytes")]
    TruncatedPrefix { received: usize },

    #[error("truncated frame: {declared} payload bytes declared, {received} received")]
    TruncatedFrame { declared: usize, received: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors reported by the variable-width text decoder.
///
/// Offsets are byte positions into the input, so a malformed response can be
/// located in a hex dump.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("invalid lead byte {byte:#04x} at offset {offset}")]
    InvalidLeadByte { byte: u8, offset: usize },

    #[error("invalid continuation byte {byte:#04x} at offset {offset}")]
    InvalidContinuation { byte: u8, offset: usize },

    #[error("truncated sequence at offset {offset}: lead byte {lead:#04x} needs {needed} continuation bytes")]
    TruncatedSequence { offset: usize, lead: u8, needed: usize },
}
