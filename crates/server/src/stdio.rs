//! Line-delimited JSON RPC over a byte stream
//!
//! One request object per input line, one response object per output line.
//! Transport failures (unparsable or ill-shaped lines) are answered with
//! `{"error": ..., "id": null}` and the loop keeps reading. EOF ends it.

use cbproxy_core::{ClientFactory, RpcRequest, RpcSession};
use serde::Serialize;
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

/// Reply for a line that never reached the session
#[derive(Debug, Serialize)]
struct TransportError {
    error: String,
    id: Option<Value>,
}

impl TransportError {
    fn new(prefix: &str, err: impl std::fmt::Display) -> Self {
        TransportError {
            error: format!("{}: {}", prefix, err),
            id: None,
        }
    }
}

/// Serve requests from `reader` until EOF, flushing after every response
pub async fn run_rpc_loop<F, R, W>(
    session: &mut RpcSession<F>,
    mut reader: R,
    mut writer: W,
) -> std::io::Result<()>
where
    F: ClientFactory,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }
        // Lines are not guaranteed to be UTF-8
        let line = trim_line_ending(&buf);
        let mut encoded = handle_line(session, line).await;
        encoded.push(b'\n');
        writer.write_all(&encoded).await?;
        writer.flush().await?;
    }
    tracing::debug!("RPC input closed");
    Ok(())
}

fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

async fn handle_line<F: ClientFactory>(session: &mut RpcSession<F>, line: &[u8]) -> Vec<u8> {
    let value: Value = match serde_json::from_slice(line) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("Rejected RPC line: {}", e);
            return encode(&TransportError::new("Invalid JSON", e));
        }
    };

    if !value.is_object() {
        tracing::warn!("Rejected RPC request: not a JSON object");
        return encode(&TransportError::new(
            "Server error",
            "request must be a JSON object",
        ));
    }

    let request: RpcRequest = match serde_json::from_value(value) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!("Rejected RPC request: {}", e);
            return encode(&TransportError::new("Server error", e));
        }
    };

    let response = session.handle(request).await;
    encode(&response)
}

fn encode<T: Serialize>(value: &T) -> Vec<u8> {
    serde_json::to_vec(value).unwrap_or_else(|e| {
        tracing::error!("Failed to encode RPC response: {}", e);
        br#"{"error":"Server error: failed to encode response","id":null}"#.to_vec()
    })
}
