//! Embed command - hide a file or directory in a carrier image.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;

use pixhide::{embed_path, EmbedConfig, StegoError};

use super::CommandExecutor;

/// Output extensions whose encoders would destroy the hidden bits.
const LOSSY_EXTENSIONS: &[&str] = &["jpg", "jpeg", "webp", "avif", "gif"];

/// Output extensions known to preserve every channel bit.
const LOSSLESS_EXTENSIONS: &[&str] = &["png", "bmp", "tif", "tiff", "ppm", "pnm", "tga", "qoi"];

/// How many dimension suggestions to show when the carrier is too small.
const SHOWN_SUGGESTIONS: usize = 3;

/// Hide a file or directory in a carrier image.
///
/// Files over 1 KB are gzip-compressed when that saves more than 20%.
/// Directories are tar-archived (and gzip-compressed unless --no-compress).
/// The carrier file is never modified; the result goes to OUTPUT.
#[derive(Args, Debug)]
pub struct EmbedCommand {
    /// File or directory to hide
    pub input: PathBuf,

    /// Carrier image (any format the image library can decode)
    pub carrier: PathBuf,

    /// Output image (must be lossless: png, bmp, tiff, ...)
    pub output: PathBuf,

    /// Disable compression
    #[arg(long)]
    pub no_compress: bool,

    /// Also write the metadata record to OUTPUT.meta
    #[arg(long)]
    pub save_meta: bool,
}

impl CommandExecutor for EmbedCommand {
    fn execute(&self) -> Result<()> {
        check_output_format(&self.output)?;

        let config = EmbedConfig {
            compress: !self.no_compress,
            save_metadata: self.save_meta,
        };

        let report = match embed_path(&self.input, &self.carrier, &self.output, &config) {
            Ok(report) => report,
            Err(StegoError::CapacityExceeded {
                required_bytes,
                capacity_bytes,
                suggestions,
            }) => {
                eprintln!("Error: Image too small!");
                eprintln!("Image capacity: {} bytes", capacity_bytes);
                eprintln!("Required: {} bytes", required_bytes);
                eprintln!();
                eprintln!("Suggested image dimensions:");
                for s in suggestions.iter().take(SHOWN_SUGGESTIONS) {
                    eprintln!("  - {}: {}x{} pixels", s.aspect_ratio, s.width, s.height);
                }
                bail!("Carrier {} is too small", self.carrier.display());
            }
            Err(e) => {
                return Err(e).with_context(|| {
                    format!(
                        "Failed to embed {} into {}",
                        self.input.display(),
                        self.carrier.display()
                    )
                })
            }
        };

        let meta = &report.metadata;
        println!("Embedded {} into {}", meta.original_name, self.output.display());
        println!("  Type: {} ({})", meta.kind, meta.mime);
        if let Some(count) = meta.file_count {
            println!("  Files: {}", count);
        }
        println!("  Original size: {} bytes", meta.unpacked_size());
        if meta.compressed {
            println!("  Compressed size: {} bytes", meta.size);
            if let Some(ratio) = meta.compression_ratio {
                println!("  Compression ratio: {:.2}%", ratio * 100.0);
            }
        }
        println!("  Carrier: {}x{} pixels", report.width, report.height);
        println!("  Capacity: {} bytes", report.capacity_bytes);
        println!("  Usage: {:.1}%", report.usage_percent());
        if let Some(sidecar) = &report.sidecar {
            println!("  Metadata: {}", sidecar.display());
        }

        Ok(())
    }
}

/// Refuses lossy output formats and warns about unknown ones.
fn check_output_format(output: &Path) -> Result<()> {
    let ext = output
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    if LOSSY_EXTENSIONS.contains(&ext.as_str()) {
        bail!(
            "Output format .{} is lossy and would destroy the hidden data; use .png or .bmp",
            ext
        );
    }
    if !LOSSLESS_EXTENSIONS.contains(&ext.as_str()) {
        log::warn!(
            "Unrecognized output extension {:?}; the image will be written as PNG",
            ext
        );
    }
    Ok(())
}
