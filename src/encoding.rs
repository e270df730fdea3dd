use std::io::Write;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::write::EncoderStringWriter;
use log::debug;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::error::PipelineError;

/// Reads `reader` to EOF and returns its standard base64 encoding.
///
/// Each read is bounded by `chunk_size` bytes and by `timeout`.
pub async fn encode_stream<R>(
    mut reader: R,
    chunk_size: usize,
    timeout: Duration,
) -> Result<String, PipelineError>
where
    R: AsyncRead + Unpin,
{
    let mut encoder = EncoderStringWriter::new(&STANDARD);
    let mut buffer = vec![0u8; chunk_size.max(1)];
    let mut total = 0usize;

    loop {
        let bytes_read = tokio::time::timeout(timeout, reader.read(&mut buffer))
            .await
            .map_err(|_| PipelineError::Timeout)??;
        if bytes_read == 0 {
            break;
        }
        encoder.write_all(&buffer[..bytes_read])?;
        total += bytes_read;
    }

    debug!("Encoded {} bytes from stream", total);
    Ok(encoder.into_inner())
}
