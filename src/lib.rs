//! # Pixhide - Hide a file or directory in an image
//!
//! Pixhide stores an arbitrary file or directory in the least significant
//! bits of a carrier image's RGB channels, and recovers it exactly, with its
//! original name, type and compression state.
//!
//! ## Overview
//!
//! - The input is **prepared**: files are read (and gzip-compressed when it
//!   pays off), directories are tar-archived
//! - A **metadata** record describes the result
//! - Metadata and payload are packed into one length-prefixed **frame**
//! - The frame is written **MSB first**, one bit per channel LSB, R then G
//!   then B, pixels in row-major order
//! - The carrier must be saved losslessly (PNG, BMP, ...)
//!
//! ## Frame format
//!
//! ```text
//! [u32 big-endian: metadata length][metadata JSON][payload bytes]
//! ```
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use pixhide::{embed_path, extract_path, EmbedConfig, ExtractConfig};
//!
//! let report = embed_path(
//!     Path::new("secret.pdf"),
//!     Path::new("holiday.png"),
//!     Path::new("holiday-stego.png"),
//!     &EmbedConfig::default(),
//! ).unwrap();
//! println!("Used {:.1}% of the carrier", report.usage_percent());
//!
//! let restored = extract_path(
//!     Path::new("holiday-stego.png"),
//!     Some(Path::new("recovered.pdf")),
//!     &ExtractConfig::default(),
//! ).unwrap();
//! println!("Restored {}", restored.restored.display());
//! ```
//!
//! ## Modules
//!
//! - [`capacity`]: how many pixels a payload needs, and carrier size suggestions
//! - [`payload`]: preparing inputs and restoring outputs
//! - [`frame`]: the length-prefixed frame codec
//! - [`stego`]: the bit-channel codec and carrier images
//! - [`encoder`] / [`decoder`]: the full embed and extract pipelines

/// Length of the big-endian metadata length prefix.
pub const LENGTH_PREFIX_LEN: usize = 4;

/// Metadata size assumed by the capacity planner before the real record exists.
pub const METADATA_OVERHEAD: u64 = 1024;

/// Bits hidden per pixel (one per R, G and B channel).
pub const BITS_PER_PIXEL: u64 = 3;

pub mod capacity;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod frame;
pub mod metadata;
pub mod payload;
pub mod stego;

// Re-export commonly used types at the crate root
pub use capacity::{plan, CapacityPlan, DimensionSuggestion};
pub use decoder::{extract_path, inspect_path, read_frame, ExtractConfig, ExtractReport};
pub use encoder::{embed_in_carrier, embed_path, EmbedConfig, EmbedReport};
pub use error::{Result, StegoError};
pub use frame::Frame;
pub use metadata::{load_sidecar, save_sidecar, Metadata, PayloadKind};
pub use payload::{prepare, restore, PreparedPayload};
pub use stego::Carrier;
