//! Payload preparation.
//!
//! Reads the input file or archives the input directory, optionally
//! compresses it, and builds the metadata record describing the result.
//! All intermediate buffers live in memory and are dropped on every exit
//! path.

use std::fs;
use std::path::Path;

use super::archive::base_name;
use super::classify::{classify, is_precompressed};
use super::{Archiver, Compressor, Gzip, Tar};
use crate::error::{Result, StegoError};
use crate::metadata::{Metadata, PayloadKind};

/// Files of this size or smaller are never compressed.
pub const COMPRESSION_THRESHOLD: u64 = 1024;

/// Compressed output is kept only if smaller than this fraction of the
/// original.
pub const COMPRESSION_ACCEPT_RATIO: f64 = 0.8;

/// MIME type recorded for directory payloads.
pub const DIRECTORY_MIME: &str = "application/x-tar";

/// Payload bytes ready to be framed, with their metadata.
#[derive(Debug, Clone)]
pub struct PreparedPayload {
    pub bytes: Vec<u8>,
    pub metadata: Metadata,
}

/// Prepares payloads using a compressor and an archiver.
#[derive(Debug, Clone, Default)]
pub struct Preparer<C = Gzip, A = Tar> {
    compressor: C,
    archiver: A,
}

impl Preparer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: Compressor, A: Archiver> Preparer<C, A> {
    pub fn with_codecs(compressor: C, archiver: A) -> Self {
        Self {
            compressor,
            archiver,
        }
    }

    /// Prepares a file or a directory, whichever `input` is.
    pub fn prepare(&self, input: &Path, want_compression: bool) -> Result<PreparedPayload> {
        if !input.exists() {
            return Err(StegoError::NotFound(input.to_path_buf()));
        }
        if input.is_dir() {
            self.prepare_directory(input, want_compression)
        } else {
            self.prepare_file(input, want_compression)
        }
    }

    /// Prepares a single file.
    ///
    /// Compression is attempted only for files over
    /// [`COMPRESSION_THRESHOLD`] bytes whose extension is not already
    /// compressed, and kept only if it saves more than 20%.
    pub fn prepare_file(&self, path: &Path, want_compression: bool) -> Result<PreparedPayload> {
        if !path.exists() {
            return Err(StegoError::NotFound(path.to_path_buf()));
        }
        if path.is_dir() {
            return Err(StegoError::InvalidInput(format!(
                "Expected a file, found a directory: {}",
                path.display()
            )));
        }

        let data = fs::read(path)?;
        let (kind, mime) = classify(path);
        let mut metadata = Metadata {
            original_name: base_name(path)?,
            original_path: absolute_path(path),
            size: data.len() as u64,
            original_size: None,
            kind,
            mime: mime.to_string(),
            compressed: false,
            compression_ratio: None,
            file_count: None,
        };

        let worth_trying = want_compression
            && metadata.size > COMPRESSION_THRESHOLD
            && !is_precompressed(path);

        if worth_trying {
            let compressed = self.compressor.compress(&data)?;
            if accepts_compression(compressed.len(), data.len()) {
                metadata.set_compressed(data.len() as u64, compressed.len() as u64);
                log::debug!(
                    "Compressed {} from {} to {} bytes",
                    metadata.original_name,
                    data.len(),
                    compressed.len()
                );
                return Ok(PreparedPayload {
                    bytes: compressed,
                    metadata,
                });
            }
            log::debug!(
                "Compression of {} saved too little ({} -> {} bytes), storing as is",
                metadata.original_name,
                data.len(),
                compressed.len()
            );
        }

        Ok(PreparedPayload {
            bytes: data,
            metadata,
        })
    }

    /// Archives a directory, compressing the archive when asked.
    ///
    /// The plain archive is kept if compression does not shrink it.
    pub fn prepare_directory(
        &self,
        path: &Path,
        want_compression: bool,
    ) -> Result<PreparedPayload> {
        if !path.exists() {
            return Err(StegoError::NotFound(path.to_path_buf()));
        }
        if !path.is_dir() {
            return Err(StegoError::InvalidInput(format!(
                "Not a directory: {}",
                path.display()
            )));
        }

        let archive = self.archiver.archive(path)?;
        let mut metadata = Metadata {
            original_name: base_name(path)?,
            original_path: absolute_path(path),
            size: archive.bytes.len() as u64,
            original_size: None,
            kind: PayloadKind::Directory,
            mime: DIRECTORY_MIME.to_string(),
            compressed: false,
            compression_ratio: None,
            file_count: Some(archive.file_count),
        };
        log::info!(
            "Archived {} ({} files, {} bytes)",
            metadata.original_name,
            archive.file_count,
            archive.bytes.len()
        );

        if !want_compression {
            return Ok(PreparedPayload {
                bytes: archive.bytes,
                metadata,
            });
        }

        let compressed = self.compressor.compress(&archive.bytes)?;
        if compressed.len() >= archive.bytes.len() {
            log::debug!(
                "Compression of {} did not help ({} -> {} bytes), storing the plain archive",
                metadata.original_name,
                archive.bytes.len(),
                compressed.len()
            );
            return Ok(PreparedPayload {
                bytes: archive.bytes,
                metadata,
            });
        }

        metadata.set_compressed(archive.bytes.len() as u64, compressed.len() as u64);
        Ok(PreparedPayload {
            bytes: compressed,
            metadata,
        })
    }
}

/// Prepares `input` with gzip and tar.
pub fn prepare(input: &Path, want_compression: bool) -> Result<PreparedPayload> {
    Preparer::new().prepare(input, want_compression)
}

fn accepts_compression(compressed_len: usize, original_len: usize) -> bool {
    (compressed_len as f64) < original_len as f64 * COMPRESSION_ACCEPT_RATIO
}

fn absolute_path(path: &Path) -> String {
    fs::canonicalize(path)
        .unwrap_or_else(|_| path.to_path_buf())
        .to_string_lossy()
        .into_owned()
}
