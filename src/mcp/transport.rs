//! Line-delimited stdio transport.
//!
//! One JSON request per input line, one JSON response per non-blank line,
//! written and flushed before the next line is read.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, trace};

use super::server::{encode_response, McpServer};
use super::types::{JsonRpcError, JsonRpcResponse};

/// Errors that end the transport loop.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("failed to read request: {0}")]
    Read(std::io::Error),
    #[error("failed to write response: {0}")]
    Write(std::io::Error),
}

/// Serve requests from `reader` until end of input.
///
/// Requests are handled strictly in order. Returns the number of responses
/// written.
pub async fn serve<R, W>(server: &McpServer, reader: R, mut writer: W) -> Result<u64, TransportError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut reader = reader;
    let mut buf = Vec::new();
    let mut written = 0;

    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .await
            .map_err(TransportError::Read)?;
        if read == 0 {
            debug!("input closed after {written} responses");
            return Ok(written);
        }

        let response = match std::str::from_utf8(&buf) {
            Ok(line) => server.handle_line(line).await,
            Err(e) => Some(JsonRpcResponse::error(
                None,
                JsonRpcError::parse_error(format!("input is not valid UTF-8: {e}")),
            )),
        };

        if let Some(response) = response {
            write_line(&mut writer, &encode_response(&response)).await?;
            written += 1;
        }
    }
}

async fn write_line<W: AsyncWrite + Unpin>(writer: &mut W, body: &str) -> Result<(), TransportError> {
    let framed = format!("{body}\n");
    writer
        .write_all(framed.as_bytes())
        .await
        .map_err(TransportError::Write)?;
    writer.flush().await.map_err(TransportError::Write)?;
    trace!("wrote response: {} bytes", framed.len());
    Ok(())
}

/// Serve on the process's stdin and stdout.
pub async fn run_stdio(server: &McpServer) -> Result<u64, TransportError> {
    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();
    serve(server, stdin, stdout).await
}
