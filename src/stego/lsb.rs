//! Bit-channel codec.
//!
//! Operates on a flat, row-major RGB channel buffer (`R0 G0 B0 R1 G1 B1 ...`).
//! Frame bytes are written most-significant bit first, one bit into the LSB
//! of each consecutive channel. Channel `i` therefore carries bit `7 - i % 8`
//! of byte `i / 8`.
//!
//! Every 8 pixels hold exactly 3 bytes, so work is split into chunks of a
//! multiple of 8 pixels. With the `parallel` feature the chunks run on the
//! rayon pool; the output is identical either way.

use image::RgbImage;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::{Result, StegoError};
use crate::BITS_PER_PIXEL;

/// Pixels per work unit. Must stay a multiple of 8.
pub const CHUNK_PIXELS: usize = 8 * 8192;

const CHUNK_CHANNELS: usize = CHUNK_PIXELS * 3;
const CHUNK_BYTES: usize = CHUNK_CHANNELS / 8;

/// Capacity of a carrier in bits.
pub fn capacity_bits(carrier: &RgbImage) -> u64 {
    let (width, height) = carrier.dimensions();
    width as u64 * height as u64 * BITS_PER_PIXEL
}

/// Capacity of a carrier in whole bytes.
pub fn capacity_bytes(carrier: &RgbImage) -> u64 {
    capacity_bits(carrier) / 8
}

/// Returns a copy of `carrier` with `frame` hidden in its LSBs.
///
/// The capacity check runs before anything is copied or written, so the
/// carrier is untouched on failure.
pub fn embed(carrier: &RgbImage, frame: &[u8]) -> Result<RgbImage> {
    check_capacity(carrier.len(), frame.len())?;
    let mut stego = carrier.clone();
    embed_bits(&mut stego, frame)?;
    Ok(stego)
}

/// Reads every whole byte the carrier's LSBs hold.
///
/// Never fails: without a frame the result is noise, which the frame codec
/// rejects.
pub fn extract(carrier: &RgbImage) -> Vec<u8> {
    extract_bits(carrier)
}

/// Writes `data` into the LSBs of `channels`, in place.
pub fn embed_bits(channels: &mut [u8], data: &[u8]) -> Result<()> {
    check_capacity(channels.len(), data.len())?;
    let used = &mut channels[..data.len() * 8];

    #[cfg(feature = "parallel")]
    used.par_chunks_mut(CHUNK_CHANNELS)
        .zip(data.par_chunks(CHUNK_BYTES))
        .for_each(|(chunk, bytes)| write_chunk(chunk, bytes));

    #[cfg(not(feature = "parallel"))]
    used.chunks_mut(CHUNK_CHANNELS)
        .zip(data.chunks(CHUNK_BYTES))
        .for_each(|(chunk, bytes)| write_chunk(chunk, bytes));

    Ok(())
}

/// Collects the LSBs of `channels` into bytes. Trailing bits that do not
/// fill a byte are dropped.
pub fn extract_bits(channels: &[u8]) -> Vec<u8> {
    let byte_len = channels.len() / 8;
    let mut out = vec![0u8; byte_len];
    let used = &channels[..byte_len * 8];

    #[cfg(feature = "parallel")]
    out.par_chunks_mut(CHUNK_BYTES)
        .zip(used.par_chunks(CHUNK_CHANNELS))
        .for_each(|(bytes, chunk)| read_chunk(chunk, bytes));

    #[cfg(not(feature = "parallel"))]
    out.chunks_mut(CHUNK_BYTES)
        .zip(used.chunks(CHUNK_CHANNELS))
        .for_each(|(bytes, chunk)| read_chunk(chunk, bytes));

    out
}

fn check_capacity(channel_count: usize, frame_len: usize) -> Result<()> {
    let needed_bits = (frame_len as u64).saturating_mul(8);
    if needed_bits > channel_count as u64 {
        return Err(StegoError::capacity_exceeded(
            frame_len as u64,
            channel_count as u64 / 8,
        ));
    }
    Ok(())
}

fn write_chunk(channels: &mut [u8], bytes: &[u8]) {
    for (byte, group) in bytes.iter().zip(channels.chunks_exact_mut(8)) {
        for (i, channel) in group.iter_mut().enumerate() {
            let bit = (byte >> (7 - i)) & 1;
            *channel = (*channel & 0xFE) | bit;
        }
    }
}

fn read_chunk(channels: &[u8], bytes: &mut [u8]) {
    for (byte, group) in bytes.iter_mut().zip(channels.chunks_exact(8)) {
        *byte = group.iter().fold(0u8, |acc, channel| (acc << 1) | (channel & 1));
    }
}
