//! High-level client API.

use crate::connection::{Connection, ConnectionConfig};
use crate::error::ClientError;
use bytes::Bytes;
use docwire_protocol::text;

/// High-level client for docwire.
///
/// Each call opens a fresh connection, performs exactly one request/response
/// cycle, and closes it. Nothing is shared across calls.
pub struct Client {
    config: ConnectionConfig,
}

impl Client {
    /// Creates a new client with the given configuration.
    pub fn new(config: ConnectionConfig) -> Self {
        Self { config }
    }

    /// Submits a command buffer and returns the decoded response text.
    pub async fn submit(&self, command: &[u8]) -> Result<String, ClientError> {
        let payload = self.submit_raw(command).await?;
        let text = text::decode_to_string(&payload)?;
        Ok(text)
    }

    /// Submits a command buffer and returns the raw response payload.
    pub async fn submit_raw(&self, command: &[u8]) -> Result<Bytes, ClientError> {
        let mut conn = Connection::connect(&self.config).await?;
        conn.send(command).await?;
        let payload = conn.receive().await?;
        conn.close().await;
        Ok(payload)
    }
}
