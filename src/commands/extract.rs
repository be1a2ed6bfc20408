//! Extract command - recover a hidden file or directory.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use pixhide::{extract_path, ExtractConfig};

use super::CommandExecutor;

/// Extract a hidden file or directory from an image.
///
/// Files are written to OUTPUT (default: their original name); if OUTPUT is
/// an existing directory the file is written inside it.
/// Directories are recreated inside OUTPUT (default: current directory).
#[derive(Args, Debug)]
pub struct ExtractCommand {
    /// Image containing hidden data
    pub image: PathBuf,

    /// Output path (optional)
    pub output: Option<PathBuf>,

    /// Also write the metadata record next to the restored output
    #[arg(long)]
    pub save_meta: bool,
}

impl CommandExecutor for ExtractCommand {
    fn execute(&self) -> Result<()> {
        let config = ExtractConfig {
            save_metadata: self.save_meta,
        };

        let report = extract_path(&self.image, self.output.as_deref(), &config)
            .with_context(|| format!("Failed to extract data from {}", self.image.display()))?;

        let meta = &report.metadata;
        println!("Extracted to: {}", report.restored.display());
        println!("  Original name: {}", meta.original_name);
        println!("  Type: {} ({})", meta.kind, meta.mime);
        if let Some(count) = meta.file_count {
            println!("  Files: {}", count);
        }
        println!("  Size: {} bytes", meta.unpacked_size());
        println!("  Compressed: {}", if meta.compressed { "yes" } else { "no" });
        if let Some(sidecar) = &report.sidecar {
            println!("  Metadata: {}", sidecar.display());
        }

        Ok(())
    }
}
