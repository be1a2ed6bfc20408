//! Error types for embedding and extraction.

use std::path::PathBuf;

use thiserror::Error;

use crate::capacity::{plan, DimensionSuggestion};

/// Errors that can occur while hiding or recovering a payload.
#[derive(Error, Debug)]
pub enum StegoError {
    /// The input path does not exist.
    #[error("Input not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The input exists but is the wrong kind of thing.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The frame does not fit in the carrier.
    ///
    /// Carries everything a caller needs to pick a bigger carrier.
    #[error(
        "Carrier too small: need {required_bytes} bytes, carrier holds {capacity_bytes} bytes"
    )]
    CapacityExceeded {
        /// Bytes the frame needs.
        required_bytes: u64,
        /// Bytes the carrier can hold.
        capacity_bytes: u64,
        /// Carrier dimensions that would be large enough, smallest first.
        suggestions: Vec<DimensionSuggestion>,
    },

    /// The extracted bytes are not a valid frame.
    #[error("Malformed frame: {0}")]
    MalformedFrame(String),

    /// The frame parsed but its payload could not be restored.
    #[error("Corrupt payload: {0}")]
    CorruptPayload(String),

    /// Carrier image could not be decoded.
    #[error("Image load error: {0}")]
    ImageLoad(String),

    /// Carrier image could not be encoded or written.
    #[error("Image save error: {0}")]
    ImageSave(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StegoError {
    /// Builds a [`StegoError::CapacityExceeded`] with planner suggestions for
    /// a frame of `required_bytes`.
    pub fn capacity_exceeded(required_bytes: u64, capacity_bytes: u64) -> Self {
        let suggestions = plan(required_bytes).suggestions;
        StegoError::CapacityExceeded {
            required_bytes,
            capacity_bytes,
            suggestions,
        }
    }
}

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, StegoError>;
