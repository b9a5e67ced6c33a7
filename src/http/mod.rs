//! HTTP protocol implementation.
//!
//! This module implements the HTTP/1.1 subset the server speaks, with
//! support for persistent (keep-alive) connections and gzip response bodies.
//!
//! # Architecture
//!
//! - **`connection`**: per-socket request/response state machine
//! - **`parser`**: turns buffered bytes into a [`Request`](request::Request)
//! - **`request`**: HTTP request representation and header helpers
//! - **`response`**: status table, content types and the response builder
//! - **`encoding`**: `Accept-Encoding` negotiation and gzip compression
//! - **`writer`**: serializes a response to its exact wire bytes
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Accumulate bytes until a full request is buffered
//!        └──────┬──────┘
//!               │ Request parsed
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Route to a handler
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response to client
//!        └──────┬───────────┘
//!               │ Response sent
//!               ├─ HTTP/1.1 default → Reading (same connection)
//!               └─ Connection: close / HTTP/1.0 → Closed
//! ```

pub mod connection;
pub mod encoding;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
