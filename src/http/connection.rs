use std::sync::Arc;

use bytes::{Buf, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite};

use crate::http::parser::{ParseError, leading_whitespace, parse_http_request};
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;
use crate::router::Router;

const READ_CHUNK: usize = 1024;

/// One accepted client socket and the request/response loop running on it.
///
/// The stream is owned by the connection and dropped (closed) exactly once,
/// when the connection itself is dropped, whichever way `run` returns.
pub struct Connection<S> {
    stream: S,
    buffer: BytesMut,
    state: ConnectionState,
    router: Arc<Router>,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(ResponseWriter, bool), // bool = close after write?
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, router: Arc<Router>) -> Self {
        Self {
            stream,
            buffer: BytesMut::with_capacity(4096),
            state: ConnectionState::Reading,
            router,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match &mut self.state {
                ConnectionState::Reading => {
                    self.state = match self.read_request().await? {
                        Ok(Some(req)) => ConnectionState::Processing(req),
                        Ok(None) => ConnectionState::Closed,
                        Err(e) => {
                            tracing::warn!(error = %e, "Rejecting malformed request");
                            let writer = ResponseWriter::new(&Response::bad_request(), true);
                            ConnectionState::Writing(writer, true)
                        }
                    };
                }

                ConnectionState::Processing(req) => {
                    let close = req.should_close();
                    let response = self.router.route(req).await;

                    tracing::info!(
                        method = req.method.as_str(),
                        path = %req.path,
                        status = response.status.as_u16(),
                        close,
                        "Request handled"
                    );

                    let writer = ResponseWriter::new(&response, close);
                    self.state = ConnectionState::Writing(writer, close);
                }

                ConnectionState::Writing(writer, close) => {
                    writer.write_to_stream(&mut self.stream).await?;

                    if *close {
                        self.state = ConnectionState::Closed;
                    } else {
                        self.state = ConnectionState::Reading; // go back for next request
                    }
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    /// Reads until a complete request is buffered.
    ///
    /// The outer `Result` carries transport failures, the inner one protocol
    /// failures. `Ok(Ok(None))` means the peer closed the connection.
    pub async fn read_request(&mut self) -> anyhow::Result<Result<Option<Request>, ParseError>> {
        loop {
            // Whitespace between requests is not a request.
            let skip = leading_whitespace(&self.buffer);
            self.buffer.advance(skip);

            if !self.buffer.is_empty() {
                match parse_http_request(&self.buffer) {
                    Ok((request, consumed)) => {
                        self.buffer.advance(consumed);
                        return Ok(Ok(Some(request)));
                    }

                    Err(ParseError::Incomplete) => {
                        // Need more data → fall through to read
                    }

                    Err(e) => return Ok(Err(e)),
                }
            }

            self.buffer.reserve(READ_CHUNK);
            let n = self.stream.read_buf(&mut self.buffer).await?;

            if n == 0 {
                if !self.buffer.is_empty() {
                    tracing::debug!(pending = self.buffer.len(), "Peer closed mid-request");
                }
                return Ok(Ok(None));
            }
        }
    }
}
