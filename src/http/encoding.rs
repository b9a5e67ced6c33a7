//! Content-encoding negotiation and gzip compression.
//!
//! Only gzip is supported. Any other token in `Accept-Encoding` is ignored.

use std::io::{self, Write};

use flate2::Compression;
use flate2::write::GzEncoder;

/// Returns true if the comma-separated `Accept-Encoding` value contains the
/// literal token `gzip`. Tokens are trimmed; quality parameters are not
/// interpreted, so `gzip;q=0.5` does not count.
pub fn accepts_gzip(accept_encoding: &str) -> bool {
    accept_encoding
        .split(',')
        .any(|token| token.trim() == "gzip")
}

/// Compresses `data` into a complete gzip member.
pub fn gzip(data: &[u8]) -> io::Result<Vec<u8>> {
    let buf = Vec::with_capacity(data.len() / 2 + 32);
    let mut encoder = GzEncoder::new(buf, Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}
