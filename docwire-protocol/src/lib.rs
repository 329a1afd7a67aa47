//! # docwire-protocol
//!
//! Wire protocol implementation for docwire.
//!
//! This crate provides:
//! - Length-prefixed binary framing (4-byte big-endian length + payload)
//! - The variable-width text codec used for response payloads
//! - Protocol error types and constants

pub mod error;
pub mod frame;
pub mod text;

pub use error::{DecodeError, ProtocolError};
pub use frame::{Frame, LENGTH_PREFIX_SIZE};
pub use text::{decode, decode_to_string, encode, encode_units};

/// Default host for a docwire server.
pub const DEFAULT_HOST: &str = "localhost";

/// Default port for a docwire server.
pub const DEFAULT_PORT: u16 = 2019;

/// Maximum frame payload size (16 MiB).
///
/// A length prefix above this is treated as a protocol error rather than
/// an allocation request.
pub const MAX_FRAME_SIZE: u32 = 16 * 1024 * 1024;
