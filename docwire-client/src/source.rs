//! Command sources and the read-to-EOF accumulator.

use crate::error::ClientError;
use std::path::PathBuf;
use tokio::io::{AsyncRead, AsyncReadExt};

/// Scratch buffer size for accumulator reads (8 KiB).
pub const READ_CHUNK_SIZE: usize = 8 * 1024;

/// Reads `reader` to end-of-stream and returns the complete byte content.
///
/// Data is pulled in chunks of up to [`READ_CHUNK_SIZE`] bytes and appended
/// to a growable buffer, so the result is identical however the stream
/// partitions its data. A read of 0 bytes signals end-of-stream. Any I/O
/// error aborts the whole operation; no partial result is returned.
///
/// The reader is consumed but not closed; dropping it is the caller's
/// concern.
pub async fn accumulate<R: AsyncRead + Unpin>(reader: &mut R) -> std::io::Result<Vec<u8>> {
    let mut bytes = Vec::new();
    let mut buf = [0u8; READ_CHUNK_SIZE];

    loop {
        let n = reader.read(&mut buf).await?;
        if n == 0 {
            return Ok(bytes);
        }
        bytes.extend_from_slice(&buf[..n]);
    }
}

/// Where the command buffer comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandSource {
    /// Read the named file.
    File(PathBuf),
    /// Read the process's standard input.
    Stdin,
}

impl CommandSource {
    /// Maps a command-line argument to a source.
    ///
    /// `None` and the conventional `"-"` sentinel both mean standard input.
    pub fn from_arg(arg: Option<&str>) -> Self {
        match arg {
            None | Some("-") => CommandSource::Stdin,
            Some(path) => CommandSource::File(PathBuf::from(path)),
        }
    }

    /// Reads the complete command buffer from this source.
    pub async fn read(&self) -> Result<Vec<u8>, ClientError> {
        match self {
            CommandSource::File(path) => {
                let display = path.display().to_string();
                let mut file =
                    tokio::fs::File::open(path)
                        .await
                        .map_err(|source| ClientError::Input {
                            path: display.clone(),
                            source,
                        })?;
                accumulate(&mut file)
                    .await
                    .map_err(|source| ClientError::Input {
                        path: display,
                        source,
                    })
            }
            CommandSource::Stdin => {
                let mut stdin = tokio::io::stdin();
                accumulate(&mut stdin)
                    .await
                    .map_err(|source| ClientError::Input {
                        path: "<stdin>".to_string(),
                        source,
                    })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_accumulate_empty_stream() {
        let mut reader = tokio_test::io::Builder::new().build();
        let bytes = accumulate(&mut reader).await.unwrap();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn test_accumulate_single_chunk() {
        let mut reader = tokio_test::io::Builder::new().read(b"hello world").build();
        let bytes = accumulate(&mut reader).await.unwrap();
        assert_eq!(bytes, b"hello world");
    }

    #[tokio::test]
    async fn test_accumulate_chunking_is_invisible() {
        let content: Vec<u8> = (0..=255u8).cycle().take(1000).collect();

        // Whole buffer at once
        let mut whole = tokio_test::io::Builder::new().read(&content).build();

        // One byte at a time
        let mut builder = tokio_test::io::Builder::new();
        for b in &content {
            builder.read(std::slice::from_ref(b));
        }
        let mut single = builder.build();

        // 17-byte chunks
        let mut builder = tokio_test::io::Builder::new();
        for chunk in content.chunks(17) {
            builder.read(chunk);
        }
        let mut odd = builder.build();

        let from_whole = accumulate(&mut whole).await.unwrap();
        let from_single = accumulate(&mut single).await.unwrap();
        let from_odd = accumulate(&mut odd).await.unwrap();

        assert_eq!(from_whole, content);
        assert_eq!(from_single, content);
        assert_eq!(from_odd, content);
    }

    #[tokio::test]
    async fn test_accumulate_surfaces_read_error() {
        let mut reader = tokio_test::io::Builder::new()
            .read(b"partial")
            .read_error(std::io::Error::new(std::io::ErrorKind::Other, "boom"))
            .build();
        let err = accumulate(&mut reader).await.unwrap_err();
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn test_from_arg_sentinel() {
        assert_eq!(CommandSource::from_arg(None), CommandSource::Stdin);
        assert_eq!(CommandSource::from_arg(Some("-")), CommandSource::Stdin);
        assert_eq!(
            CommandSource::from_arg(Some("commands.xml")),
            CommandSource::File(PathBuf::from("commands.xml"))
        );
    }

    #[tokio::test]
    async fn test_read_file_source() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(b"<CommandSet/>").unwrap();
        tmp.flush().unwrap();

        let source = CommandSource::File(tmp.path().to_path_buf());
        let bytes = source.read().await.unwrap();
        assert_eq!(bytes, b"<CommandSet/>");
    }

    #[tokio::test]
    async fn test_read_missing_file_is_input_error() {
        let source = CommandSource::File(PathBuf::from("/nonexistent/commands.xml"));
        let err = source.read().await.unwrap_err();
        assert!(matches!(err, ClientError::Input { .. }));
        assert!(err.to_string().contains("/nonexistent/commands.xml"));
    }
}
