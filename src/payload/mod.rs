//! Turning files and directories into payload bytes and back.
//!
//! - [`prepare`]: file or directory -> (payload bytes, metadata)
//! - [`restore`]: (metadata, payload bytes) -> file or directory on disk
//! - [`classify`]: extension -> category and MIME type
//! - [`compression`] and [`archive`]: the gzip and tar codecs behind the
//!   [`Compressor`] and [`Archiver`] seams

pub mod archive;
pub mod classify;
pub mod compression;
pub mod prepare;
pub mod restore;

use std::path::{Path, PathBuf};

use crate::error::Result;

pub use archive::Tar;
pub use compression::Gzip;
pub use prepare::{prepare, PreparedPayload, Preparer};
pub use restore::{restore, Restorer};

/// Lossless byte-stream compression.
pub trait Compressor {
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>>;

    /// Fails with `CorruptPayload` on malformed input.
    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>>;
}

/// A directory packed into one byte stream.
#[derive(Debug, Clone)]
pub struct Archive {
    pub bytes: Vec<u8>,
    /// Regular files contained, counted recursively.
    pub file_count: u64,
}

/// Lossless directory archiving.
pub trait Archiver {
    fn archive(&self, dir: &Path) -> Result<Archive>;

    /// Unpacks into `dest` and returns the recreated directory.
    ///
    /// Fails with `CorruptPayload` on malformed input.
    fn unarchive(&self, bytes: &[u8], dest: &Path) -> Result<PathBuf>;
}
