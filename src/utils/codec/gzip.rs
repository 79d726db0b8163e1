//! Gzip encoding of request and response bodies

use crate::utils::error::{MetricsError, Result};
use flate2::Compression;
use flate2::write::GzEncoder;
use std::io::Write;

/// Content coding token
pub const GZIP: &str = "gzip";

/// Gzip-compress a payload
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::with_capacity(data.len() / 2), Compression::default());
    encoder
        .write_all(data)
        .map_err(|e| MetricsError::internal(format!("gzip encode failed: {}", e)))?;
    encoder
        .finish()
        .map_err(|e| MetricsError::internal(format!("gzip finish failed: {}", e)))
}

/// Decompress a gzip payload
///
/// Request bodies are decoded by actix itself; this is for inspecting what
/// was sent.
#[cfg(test)]
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    use flate2::read::GzDecoder;
    use std::io::Read;

    let mut decoder = GzDecoder::new(data);
    let mut out = Vec::new();
    decoder
        .read_to_end(&mut out)
        .map_err(|e| MetricsError::bad_request(format!("invalid gzip body: {}", e)))?;
    Ok(out)
}
