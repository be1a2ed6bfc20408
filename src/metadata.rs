//! Metadata record describing a hidden payload.
//!
//! The record is serialized as JSON inside every frame, and can optionally be
//! written next to the output image as a `.meta` sidecar for debugging.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, StegoError};
use crate::payload::compression::compression_ratio;

/// Extension appended to sidecar metadata files.
pub const SIDECAR_EXTENSION: &str = "meta";

/// Broad category of a hidden payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayloadKind {
    Text,
    Document,
    Image,
    Archive,
    Media,
    Binary,
    Directory,
}

impl PayloadKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PayloadKind::Text => "text",
            PayloadKind::Document => "document",
            PayloadKind::Image => "image",
            PayloadKind::Archive => "archive",
            PayloadKind::Media => "media",
            PayloadKind::Binary => "binary",
            PayloadKind::Directory => "directory",
        }
    }
}

impl fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Describes the payload that follows it in a frame.
///
/// `size` is always the exact length of the stored payload bytes. The
/// optional fields are omitted from the JSON when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Base name of the hidden file or directory.
    pub original_name: String,
    /// Absolute source path at embed time. Informational only.
    pub original_path: String,
    /// Length of the payload as stored (after compression, if any).
    pub size: u64,
    /// Length before compression. Present only when `compressed`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_size: Option<u64>,
    #[serde(rename = "type")]
    pub kind: PayloadKind,
    pub mime: String,
    pub compressed: bool,
    /// `size / original_size`. Present only when `compressed`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compression_ratio: Option<f64>,
    /// Number of regular files archived. Present only for directories.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_count: Option<u64>,
}

impl Metadata {
    /// Size of the payload before compression.
    pub fn unpacked_size(&self) -> u64 {
        self.original_size.unwrap_or(self.size)
    }

    pub fn is_directory(&self) -> bool {
        self.kind == PayloadKind::Directory
    }

    /// Marks the payload as compressed from `original_size` down to `size`.
    pub(crate) fn set_compressed(&mut self, original_size: u64, size: u64) {
        self.compressed = true;
        self.size = size;
        self.original_size = Some(original_size);
        self.compression_ratio =
            (original_size != 0).then(|| compression_ratio(original_size, size));
    }

    /// Serializes to compact JSON bytes, as stored in a frame.
    pub fn to_json(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self)
            .map_err(|e| StegoError::InvalidInput(format!("Cannot serialize metadata: {}", e)))
    }

    /// Parses metadata JSON as stored in a frame.
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| StegoError::MalformedFrame(format!("Metadata is not UTF-8: {}", e)))?;
        serde_json::from_str(text)
            .map_err(|e| StegoError::MalformedFrame(format!("Invalid metadata JSON: {}", e)))
    }
}

/// Path of the sidecar file for `path` (`<path>.meta`).
pub fn sidecar_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".");
    name.push(SIDECAR_EXTENSION);
    PathBuf::from(name)
}

/// Writes `metadata` as pretty JSON to `<path>.meta`.
///
/// Returns the sidecar path.
pub fn save_sidecar(metadata: &Metadata, path: &Path) -> Result<PathBuf> {
    let meta_path = sidecar_path(path);
    let json = serde_json::to_string_pretty(metadata)
        .map_err(|e| StegoError::InvalidInput(format!("Cannot serialize metadata: {}", e)))?;
    fs::write(&meta_path, json)?;
    Ok(meta_path)
}

/// Reads a sidecar file written by [`save_sidecar`].
pub fn load_sidecar(meta_path: &Path) -> Result<Metadata> {
    if !meta_path.exists() {
        return Err(StegoError::NotFound(meta_path.to_path_buf()));
    }
    let bytes = fs::read(meta_path)?;
    Metadata::from_json(&bytes)
}
