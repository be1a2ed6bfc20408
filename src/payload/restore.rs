//! Payload restoration: the inverse of [`super::prepare`].

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use super::{Archiver, Compressor, Gzip, Tar};
use crate::error::{Result, StegoError};
use crate::metadata::Metadata;

/// Restores payloads using a compressor and an archiver.
#[derive(Debug, Clone, Default)]
pub struct Restorer<C = Gzip, A = Tar> {
    compressor: C,
    archiver: A,
}

impl Restorer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: Compressor, A: Archiver> Restorer<C, A> {
    pub fn with_codecs(compressor: C, archiver: A) -> Self {
        Self {
            compressor,
            archiver,
        }
    }

    /// Writes the payload back to disk and returns where it went.
    ///
    /// Directories are unpacked into `output` (default: current directory).
    /// Files are written to `output` (default: the original name); if
    /// `output` is an existing directory the file goes inside it.
    pub fn restore(
        &self,
        metadata: &Metadata,
        payload: &[u8],
        output: Option<&Path>,
    ) -> Result<PathBuf> {
        if payload.len() as u64 != metadata.size {
            return Err(StegoError::CorruptPayload(format!(
                "Payload is {} bytes, metadata says {}",
                payload.len(),
                metadata.size
            )));
        }

        let data = self.unpack_bytes(metadata, payload)?;

        if metadata.is_directory() {
            let dest = output.unwrap_or_else(|| Path::new("."));
            let root = self.archiver.unarchive(&data, dest)?;
            log::info!("Restored directory {}", root.display());
            return Ok(root);
        }

        let target = file_target(metadata, output)?;
        if let Some(parent) = target.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&target, &data)?;
        log::info!("Restored {} ({} bytes)", target.display(), data.len());
        Ok(target)
    }

    /// Decompresses the payload if the metadata says it is compressed.
    fn unpack_bytes<'a>(&self, metadata: &Metadata, payload: &'a [u8]) -> Result<Cow<'a, [u8]>> {
        if !metadata.compressed {
            return Ok(Cow::Borrowed(payload));
        }

        let data = self.compressor.decompress(payload)?;
        if let Some(expected) = metadata.original_size {
            if data.len() as u64 != expected {
                return Err(StegoError::CorruptPayload(format!(
                    "Decompressed to {} bytes, expected {}",
                    data.len(),
                    expected
                )));
            }
        }
        Ok(Cow::Owned(data))
    }
}

/// Restores a payload with gzip and tar.
pub fn restore(metadata: &Metadata, payload: &[u8], output: Option<&Path>) -> Result<PathBuf> {
    Restorer::new().restore(metadata, payload, output)
}

/// Final component of the stored name. Never contains separators.
fn stored_file_name(metadata: &Metadata) -> Result<PathBuf> {
    Path::new(&metadata.original_name)
        .file_name()
        .map(PathBuf::from)
        .ok_or_else(|| {
            StegoError::CorruptPayload(format!(
                "Unusable original name: {:?}",
                metadata.original_name
            ))
        })
}

fn file_target(metadata: &Metadata, output: Option<&Path>) -> Result<PathBuf> {
    match output {
        Some(dir) if dir.is_dir() => Ok(dir.join(stored_file_name(metadata)?)),
        Some(path) => Ok(path.to_path_buf()),
        None => stored_file_name(metadata),
    }
}
