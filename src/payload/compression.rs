//! Gzip compression for payloads.
//!
//! Payloads are compressed at maximum effort. Whether the result is kept is
//! decided by the preparer, not here.

use flate2::read::{GzDecoder, GzEncoder};
use flate2::Compression;
use std::io::Read;

use super::Compressor;
use crate::error::{Result, StegoError};

/// Gzip codec (`flate2`, best compression).
#[derive(Debug, Clone, Copy, Default)]
pub struct Gzip;

impl Compressor for Gzip {
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>> {
        compress(data)
    }

    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>> {
        decompress(data)
    }
}

/// Compresses data into a gzip stream.
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(data, Compression::best());
    let mut compressed = Vec::new();
    encoder.read_to_end(&mut compressed)?;
    Ok(compressed)
}

/// Decompresses a gzip stream produced by [`compress`].
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = GzDecoder::new(data);
    let mut decompressed = Vec::new();
    decoder
        .read_to_end(&mut decompressed)
        .map_err(|e| StegoError::CorruptPayload(format!("Decompression failed: {}", e)))?;
    Ok(decompressed)
}

/// Returns compression ratio (compressed_size / original_size).
/// Values < 1.0 mean compression helped.
pub fn compression_ratio(original_len: u64, compressed_len: u64) -> f64 {
    if original_len == 0 {
        return 1.0;
    }
    compressed_len as f64 / original_len as f64
}
