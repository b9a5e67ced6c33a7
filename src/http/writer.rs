use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::encoding;
use crate::http::response::Response;

const HTTP_VERSION: &str = "HTTP/1.1";

/// Serializes a response to its exact wire bytes.
///
/// Header order is fixed: `Content-Encoding`, `Content-Type`,
/// `Content-Length`, then `Connection: close` when `close` is set.
/// `Content-Length` is only sent for a non-empty body and always counts the
/// bytes actually sent, i.e. after compression.
pub fn serialize_response(resp: &Response, close: bool) -> Vec<u8> {
    let mut headers: Vec<String> = Vec::with_capacity(4);

    let mut compressed = None;
    if resp.gzip && !resp.body.is_empty() {
        match encoding::gzip(&resp.body) {
            Ok(bytes) => {
                compressed = Some(bytes);
                headers.push("Content-Encoding: gzip".to_string());
            }
            Err(e) => {
                tracing::warn!(error = %e, "gzip failed, sending uncompressed body");
            }
        }
    }
    let body = compressed.as_deref().unwrap_or(&resp.body);

    if let Some(content_type) = resp.content_type {
        headers.push(format!("Content-Type: {}", content_type.as_str()));
    }

    if !body.is_empty() {
        headers.push(format!("Content-Length: {}", body.len()));
    }

    if close {
        headers.push("Connection: close".to_string());
    }

    let mut buf = Vec::with_capacity(64 + body.len());

    // Status line
    let status_line = format!(
        "{} {} {}\r\n",
        HTTP_VERSION,
        resp.status.as_u16(),
        resp.status.reason_phrase()
    );
    buf.extend_from_slice(status_line.as_bytes());

    for header in &headers {
        buf.extend_from_slice(header.as_bytes());
        buf.extend_from_slice(b"\r\n");
    }

    // Header/body separator
    buf.extend_from_slice(b"\r\n");

    buf.extend_from_slice(body);

    buf
}

/// Holds one serialized response and tracks how much of it reached the peer.
#[derive(Debug)]
pub struct ResponseWriter {
    buffer: Vec<u8>,
    written: usize,
}

impl ResponseWriter {
    pub fn new(response: &Response, close: bool) -> Self {
        Self {
            buffer: serialize_response(response, close),
            written: 0,
        }
    }

    pub async fn write_to_stream<W>(&mut self, stream: &mut W) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        while self.written < self.buffer.len() {
            let n = stream.write(&self.buffer[self.written..]).await?;

            if n == 0 {
                return Err(anyhow::anyhow!("connection closed while writing"));
            }

            self.written += n;
        }

        stream.flush().await?;
        Ok(())
    }
}
