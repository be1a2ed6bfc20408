//! Extraction pipeline.
//!
//! 1. Load the carrier and read every LSB
//! 2. Decode the frame (length prefix, metadata, payload)
//! 3. Restore the payload to disk

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::frame::{self, Frame};
use crate::metadata::{save_sidecar, Metadata};
use crate::payload::restore;
use crate::stego::Carrier;

/// Options for extraction.
#[derive(Debug, Clone, Default)]
pub struct ExtractConfig {
    /// Write a `.meta` sidecar next to the restored output.
    pub save_metadata: bool,
}

/// What an extraction did.
#[derive(Debug, Clone)]
pub struct ExtractReport {
    pub metadata: Metadata,
    /// Restored file, or the root of the restored directory.
    pub restored: PathBuf,
    pub sidecar: Option<PathBuf>,
}

/// Reads the frame hidden in `carrier`.
///
/// Fails with `MalformedFrame` if the carrier holds no valid frame.
pub fn read_frame(carrier: &Carrier) -> Result<Frame> {
    let frame = Frame::decode(&carrier.extract())?;
    log::debug!(
        "Found frame: {} ({}, {} bytes)",
        frame.metadata.original_name,
        frame.metadata.kind,
        frame.metadata.size
    );
    Ok(frame)
}

/// Extracts the payload hidden in the image at `image_path`.
///
/// `output` defaults to the original name for files and the current
/// directory for directories.
pub fn extract_path(
    image_path: &Path,
    output: Option<&Path>,
    config: &ExtractConfig,
) -> Result<ExtractReport> {
    let carrier = Carrier::from_file(image_path)?;
    let Frame { metadata, payload } = read_frame(&carrier)?;

    let restored = restore(&metadata, &payload, output)?;

    let sidecar = if config.save_metadata {
        Some(save_sidecar(&metadata, &restored)?)
    } else {
        None
    };

    Ok(ExtractReport {
        metadata,
        restored,
        sidecar,
    })
}

/// Returns the metadata hidden in the image without restoring anything.
pub fn inspect_path(image_path: &Path) -> Result<Metadata> {
    let carrier = Carrier::from_file(image_path)?;
    frame::decode_metadata(&carrier.extract())
}
