//! Embedding pipeline.
//!
//! 1. Prepare the input (read or archive, maybe compress)
//! 2. Encode metadata and payload into a frame
//! 3. Check the frame fits the carrier
//! 4. Hide the frame in a copy of the carrier
//! 5. Save the copy losslessly

use std::path::{Path, PathBuf};

use crate::error::{Result, StegoError};
use crate::frame::Frame;
use crate::metadata::{save_sidecar, Metadata};
use crate::payload::prepare;
use crate::stego::Carrier;

/// Options for embedding.
#[derive(Debug, Clone)]
pub struct EmbedConfig {
    /// Try to compress the payload.
    pub compress: bool,
    /// Write a `.meta` sidecar next to the output image.
    pub save_metadata: bool,
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            compress: true,
            save_metadata: false,
        }
    }
}

/// What an embed did.
#[derive(Debug, Clone)]
pub struct EmbedReport {
    pub metadata: Metadata,
    /// Bytes written into the carrier, header included.
    pub frame_len: usize,
    pub width: u32,
    pub height: u32,
    pub capacity_bytes: u64,
    /// Sidecar file, if one was written.
    pub sidecar: Option<PathBuf>,
}

impl EmbedReport {
    /// Share of the carrier's capacity used by the frame, in percent.
    pub fn usage_percent(&self) -> f64 {
        if self.capacity_bytes == 0 {
            return 100.0;
        }
        self.frame_len as f64 / self.capacity_bytes as f64 * 100.0
    }
}

/// Hides `input` in `carrier`, returning the new carrier.
///
/// The gate uses the exact frame length, so a carrier is only rejected when
/// the frame really does not fit.
pub fn embed_in_carrier(
    input: &Path,
    carrier: &Carrier,
    config: &EmbedConfig,
) -> Result<(Carrier, EmbedReport)> {
    let prepared = prepare(input, config.compress)?;
    log::info!(
        "Prepared {} ({}, {} bytes{})",
        prepared.metadata.original_name,
        prepared.metadata.kind,
        prepared.metadata.size,
        if prepared.metadata.compressed {
            ", compressed"
        } else {
            ""
        }
    );

    let frame = Frame::new(prepared.metadata, prepared.bytes)?;
    let encoded = frame.encode()?;
    let capacity_bytes = carrier.capacity_bytes();
    let (width, height) = carrier.dimensions();

    if encoded.len() as u64 > capacity_bytes {
        return Err(StegoError::capacity_exceeded(
            encoded.len() as u64,
            capacity_bytes,
        ));
    }

    log::debug!(
        "Embedding {} byte frame into {}x{} carrier ({} bytes capacity)",
        encoded.len(),
        width,
        height,
        capacity_bytes
    );
    let stego = carrier.hide(&encoded)?;

    let report = EmbedReport {
        metadata: frame.metadata,
        frame_len: encoded.len(),
        width,
        height,
        capacity_bytes,
        sidecar: None,
    };
    Ok((stego, report))
}

/// Hides `input` in the image at `carrier_path` and writes the result to
/// `output`. The carrier file itself is never modified.
pub fn embed_path(
    input: &Path,
    carrier_path: &Path,
    output: &Path,
    config: &EmbedConfig,
) -> Result<EmbedReport> {
    let carrier = Carrier::from_file(carrier_path)?;
    let (stego, mut report) = embed_in_carrier(input, &carrier, config)?;

    stego.save(output)?;
    log::info!("Wrote {}", output.display());

    if config.save_metadata {
        report.sidecar = Some(save_sidecar(&report.metadata, output)?);
    }
    Ok(report)
}
