//! Connection management.

use crate::error::ClientError;
use bytes::{Bytes, BytesMut};
use docwire_protocol::frame::{Frame, LENGTH_PREFIX_SIZE};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

/// Default read buffer size (8 KiB).
pub const DEFAULT_READ_BUFFER_SIZE: usize = 8 * 1024;

/// Minimum read buffer size (1 KiB).
pub const MIN_READ_BUFFER_SIZE: usize = 1024;

/// Maximum read buffer size (1 MiB).
pub const MAX_READ_BUFFER_SIZE: usize = 1024 * 1024;

/// Connection configuration.
///
/// Both timeouts default to `None`: with nothing configured the client
/// blocks until the server answers or the connection drops, and a deadline
/// is opt-in.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Server host name or address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Connection timeout, if any.
    pub connect_timeout: Option<Duration>,
    /// Deadline for sending the request and receiving the response, if any.
    pub io_timeout: Option<Duration>,
    /// Read buffer size for socket reads.
    pub read_buffer_size: usize,
}

impl ConnectionConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            connect_timeout: None,
            io_timeout: None,
            read_buffer_size: DEFAULT_READ_BUFFER_SIZE,
        }
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    pub fn with_io_timeout(mut self, timeout: Duration) -> Self {
        self.io_timeout = Some(timeout);
        self
    }

    pub fn with_read_buffer_size(mut self, size: usize) -> Self {
        self.read_buffer_size = size.clamp(MIN_READ_BUFFER_SIZE, MAX_READ_BUFFER_SIZE);
        self
    }
}

/// A connection to a docwire server, good for one request/response cycle.
pub struct Connection {
    stream: TcpStream,
    read_buffer_size: usize,
    io_timeout: Option<Duration>,
    /// Buffered bytes not yet consumed by frame decoding.
    recv_buf: BytesMut,
}

impl Connection {
    /// Connects to the server named by `config`.
    pub async fn connect(config: &ConnectionConfig) -> Result<Self, ClientError> {
        tracing::debug!("Connecting to {}:{}...", config.host, config.port);

        let connect = TcpStream::connect((config.host.as_str(), config.port));
        let stream = match config.connect_timeout {
            Some(timeout) => tokio::time::timeout(timeout, connect)
                .await
                .map_err(|_| {
                    tracing::debug!("Connection timeout");
                    ClientError::Timeout
                })?
                .map_err(ClientError::Connect)?,
            None => connect.await.map_err(ClientError::Connect)?,
        };

        stream.set_nodelay(true).ok();
        tracing::debug!("TCP connected");

        Ok(Self {
            stream,
            read_buffer_size: config.read_buffer_size,
            io_timeout: config.io_timeout,
            recv_buf: BytesMut::with_capacity(config.read_buffer_size),
        })
    }

    /// Sends one length-prefixed request frame.
    pub async fn send(&mut self, payload: &[u8]) -> Result<(), ClientError> {
        let frame = Frame::new(Bytes::copy_from_slice(payload));
        let encoded = frame.encode()?;
        tracing::debug!("Sending request frame ({} payload bytes)", payload.len());

        let write = self.stream.write_all(&encoded);
        match self.io_timeout {
            Some(timeout) => tokio::time::timeout(timeout, write)
                .await
                .map_err(|_| ClientError::Timeout)??,
            None => write.await?,
        }
        Ok(())
    }

    /// Receives one length-prefixed response frame and returns its payload.
    ///
    /// The connection closing mid-frame is a protocol error, reported
    /// distinctly for a torn length prefix and a torn payload; closing
    /// before any byte arrives is [`ClientError::ConnectionClosed`].
    pub async fn receive(&mut self) -> Result<Bytes, ClientError> {
        match self.io_timeout {
            Some(timeout) => tokio::time::timeout(timeout, self.receive_inner())
                .await
                .map_err(|_| {
                    tracing::debug!("Receive timeout");
                    ClientError::Timeout
                })?,
            None => self.receive_inner().await,
        }
    }

    async fn receive_inner(&mut self) -> Result<Bytes, ClientError> {
        let mut buf = vec![0u8; self.read_buffer_size];

        loop {
            if let Some(frame) = Frame::decode(&mut self.recv_buf)? {
                tracing::debug!("Received response frame ({} bytes)", frame.payload.len());
                return Ok(frame.payload);
            }

            let n = self.stream.read(&mut buf).await?;
            tracing::debug!("Read {} bytes from socket", n);

            if n == 0 {
                return Err(self.eof_error());
            }
            self.recv_buf.extend_from_slice(&buf[..n]);
        }
    }

    /// Classifies an end-of-stream in the middle of a receive.
    fn eof_error(&self) -> ClientError {
        use docwire_protocol::ProtocolError;

        let buffered = self.recv_buf.len();
        if buffered == 0 {
            ClientError::ConnectionClosed
        } else if buffered < LENGTH_PREFIX_SIZE {
            ProtocolError::TruncatedPrefix { received: buffered }.into()
        } else {
            let declared = u32::from_be_bytes([
                self.recv_buf[0],
                self.recv_buf[1],
                self.recv_buf[2],
                self.recv_buf[3],
            ]) as usize;
            ProtocolError::TruncatedFrame {
                declared,
                received: buffered - LENGTH_PREFIX_SIZE,
            }
            .into()
        }
    }

    /// Shuts the connection down.
    ///
    /// Dropping a `Connection` also releases the socket; this is for callers
    /// that want the FIN sent before they move on.
    pub async fn close(mut self) {
        tracing::debug!("Closing connection");
        let _ = self.stream.shutdown().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ConnectionConfig::new("localhost", 2019);
        assert_eq!(config.read_buffer_size, DEFAULT_READ_BUFFER_SIZE);
        assert_eq!(config.connect_timeout, None);
        assert_eq!(config.io_timeout, None);
    }

    #[test]
    fn test_config_buffer_clamping() {
        let config = ConnectionConfig::new("localhost", 2019).with_read_buffer_size(100);
        assert_eq!(config.read_buffer_size, MIN_READ_BUFFER_SIZE);

        let config =
            ConnectionConfig::new("localhost", 2019).with_read_buffer_size(10 * 1024 * 1024);
        assert_eq!(config.read_buffer_size, MAX_READ_BUFFER_SIZE);
    }

    #[test]
    fn test_config_timeouts() {
        let config = ConnectionConfig::new("localhost", 2019)
            .with_connect_timeout(Duration::from_secs(5))
            .with_io_timeout(Duration::from_secs(30));
        assert_eq!(config.connect_timeout, Some(Duration::from_secs(5)));
        assert_eq!(config.io_timeout, Some(Duration::from_secs(30)));
    }
}
