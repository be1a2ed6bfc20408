//! Capacity command - how big a carrier does a payload need?

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;

use pixhide::payload::archive::total_size;
use pixhide::{plan, Carrier};

use super::CommandExecutor;

const MIB: f64 = 1024.0 * 1024.0;

/// Calculate the carrier size needed for a file, directory or byte count.
///
/// SIZE may be a plain byte count or use a KB, MB or GB suffix (1024-based),
/// e.g. "500KB" or "1.5MB".
#[derive(Args, Debug)]
pub struct CapacityCommand {
    /// File or directory to check, or a size such as 1MB
    pub target: String,

    /// Also check whether it fits in this carrier image
    #[arg(short, long)]
    pub carrier: Option<PathBuf>,
}

impl CommandExecutor for CapacityCommand {
    fn execute(&self) -> Result<()> {
        let size = self.resolve_size()?;
        let info = plan(size);

        println!("File size: {} bytes ({:.2} MB)", size, size as f64 / MIB);
        println!("Required pixels: {}", info.required_pixels);
        println!();
        println!("Recommended image dimensions:");
        for s in &info.suggestions {
            println!(
                "  {:>5}: {:>5} x {:<5} (capacity: {:.2} MB)",
                s.aspect_ratio,
                s.width,
                s.height,
                s.capacity_bytes as f64 / MIB
            );
        }

        if let Some(carrier_path) = &self.carrier {
            let carrier = Carrier::from_file(carrier_path)
                .with_context(|| format!("Failed to load carrier {}", carrier_path.display()))?;
            let (width, height) = carrier.dimensions();

            println!();
            println!("Carrier: {} ({}x{})", carrier_path.display(), width, height);
            println!("  Capacity: {} bytes", carrier.capacity_bytes());
            println!(
                "  Status (estimate): {}",
                fit_status(width, height, info.required_pixels)
            );
        }

        Ok(())
    }
}

impl CapacityCommand {
    /// Size of the target path, or the parsed size string.
    fn resolve_size(&self) -> Result<u64> {
        let path = Path::new(&self.target);
        if path.is_dir() {
            return total_size(path)
                .with_context(|| format!("Failed to measure directory {}", path.display()));
        }
        if path.exists() {
            let meta = fs::metadata(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            return Ok(meta.len());
        }
        parse_size(&self.target)
    }
}

/// Fit verdict against the planner estimate.
///
/// The estimate allows 1024 bytes of metadata, while embed checks the exact
/// frame length, so a carrier reported here as too small may still work.
fn fit_status(width: u32, height: u32, required_pixels: u64) -> &'static str {
    if width as u64 * height as u64 >= required_pixels {
        "FITS"
    } else {
        "MAY BE TOO SMALL"
    }
}

/// Parses "1234", "500KB", "1.5MB" or "2GB" into bytes.
fn parse_size(input: &str) -> Result<u64> {
    let upper = input.trim().to_uppercase();
    let (number, multiplier) = if let Some(n) = upper.strip_suffix("GB") {
        (n, 1024.0 * 1024.0 * 1024.0)
    } else if let Some(n) = upper.strip_suffix("MB") {
        (n, MIB)
    } else if let Some(n) = upper.strip_suffix("KB") {
        (n, 1024.0)
    } else if let Some(n) = upper.strip_suffix('B') {
        (n, 1.0)
    } else {
        (upper.as_str(), 1.0)
    };

    let value: f64 = number
        .trim()
        .parse()
        .with_context(|| format!("Not a file or size: {}", input))?;
    if !value.is_finite() || value < 0.0 {
        bail!("Size must be a non-negative number: {}", input);
    }
    let bytes = value * multiplier;
    if bytes >= u64::MAX as f64 {
        bail!("Size is too large: {}", input);
    }
    Ok(bytes as u64)
}
