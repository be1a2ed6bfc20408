//! Inspect command - show what an image is hiding.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use pixhide::inspect_path;

use super::CommandExecutor;

/// Print the metadata hidden in an image without extracting anything.
#[derive(Args, Debug)]
pub struct InspectCommand {
    /// Image containing hidden data
    pub image: PathBuf,
}

impl CommandExecutor for InspectCommand {
    fn execute(&self) -> Result<()> {
        let metadata = inspect_path(&self.image)
            .with_context(|| format!("No readable frame in {}", self.image.display()))?;

        let json = serde_json::to_string_pretty(&metadata).context("Failed to format metadata")?;
        println!("{}", json);
        Ok(())
    }
}
