//! Binary frame format.
//!
//! Frame layout (4-byte length prefix + payload):
//!
//! ```text
//! +-------------+------------------+
//! | length      | payload          |
//! | 4 bytes, BE | length bytes     |
//! +-------------+------------------+
//! ```
//!
//! Requests and responses use the same shape. The payload is opaque to the
//! framing layer.

use crate::error::ProtocolError;
use crate::MAX_FRAME_SIZE;
use bytes::{Buf, BufMut, Bytes, BytesMut};

/// Size of the length prefix in bytes.
pub const LENGTH_PREFIX_SIZE: usize = 4;

/// A parsed frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Frame payload.
    pub payload: Bytes,
}

impl Frame {
    /// Creates a new frame with the given payload.
    pub fn new(payload: impl Into<Bytes>) -> Self {
        Self {
            payload: payload.into(),
        }
    }

    /// Encodes the frame into bytes.
    pub fn encode(&self) -> Result<BytesMut, ProtocolError> {
        if self.payload.len() > MAX_FRAME_SIZE as usize {
            return Err(ProtocolError::FrameTooLarge {
                size: self.payload.len(),
                max: MAX_FRAME_SIZE as usize,
            });
        }

        let mut buf = BytesMut::with_capacity(LENGTH_PREFIX_SIZE + self.payload.len());
        buf.put_u32(self.payload.len() as u32);
        buf.put_slice(&self.payload);
        Ok(buf)
    }

    /// Decodes a frame from bytes.
    ///
    /// Returns `Ok(Some(frame))` if a complete frame was decoded,
    /// `Ok(None)` if more data is needed, or `Err` on protocol errors.
    pub fn decode(buf: &mut BytesMut) -> Result<Option<Self>, ProtocolError> {
        if buf.len() < LENGTH_PREFIX_SIZE {
            return Ok(None);
        }

        // Peek at the prefix without consuming
        let payload_len = u32::from_be_bytes([buf[0], buf[1], buf[2], buf[3]]) as usize;
        if payload_len > MAX_FRAME_SIZE as usize {
            return Err(ProtocolError::FrameTooLarge {
                size: payload_len,
                max: MAX_FRAME_SIZE as usize,
            });
        }
        if buf.len() < LENGTH_PREFIX_SIZE + payload_len {
            return Ok(None);
        }

        buf.advance(LENGTH_PREFIX_SIZE);
        let payload = buf.split_to(payload_len).freeze();

        Ok(Some(Self { payload }))
    }
}
