//! Carrier capacity planning.
//!
//! Turns a byte count into the number of pixels needed to hold it under the
//! 3-bits-per-pixel scheme, and suggests carrier dimensions for a few common
//! aspect ratios.

use serde::Serialize;

use crate::{BITS_PER_PIXEL, LENGTH_PREFIX_LEN, METADATA_OVERHEAD};

/// Aspect ratios tried by [`plan`], in order.
pub const ASPECT_RATIOS: [(u64, u64); 4] = [(1, 1), (4, 3), (16, 9), (3, 2)];

/// A carrier size large enough for the planned payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DimensionSuggestion {
    pub width: u64,
    pub height: u64,
    pub pixel_count: u64,
    /// Ratio label such as `"16:9"`.
    pub aspect_ratio: String,
    /// Whole bytes the carrier can hold (`pixel_count * 3 / 8`).
    pub capacity_bytes: u64,
}

/// Result of [`plan`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapacityPlan {
    /// The byte count the plan was made for.
    pub payload_bytes: u64,
    pub required_pixels: u64,
    /// Sorted ascending by pixel count.
    pub suggestions: Vec<DimensionSuggestion>,
}

/// Number of pixels needed to embed `payload_bytes` plus framing overhead.
///
/// The overhead is the 4-byte length prefix plus a fixed metadata estimate,
/// so the result is conservative. Saturates at `u64::MAX`.
pub fn required_pixels(payload_bytes: u64) -> u64 {
    let total_bytes = payload_bytes as u128 + LENGTH_PREFIX_LEN as u128 + METADATA_OVERHEAD as u128;
    let total_bits = total_bytes * 8;
    saturate(total_bits.div_ceil(BITS_PER_PIXEL as u128))
}

/// Plans carrier dimensions for a payload of `payload_bytes`.
pub fn plan(payload_bytes: u64) -> CapacityPlan {
    let required = required_pixels(payload_bytes);

    let mut suggestions: Vec<DimensionSuggestion> = ASPECT_RATIOS
        .iter()
        .map(|&(w_ratio, h_ratio)| suggest(required, w_ratio, h_ratio))
        .collect();

    // Stable, so ties keep the ratio order above.
    suggestions.sort_by_key(|s| s.pixel_count);

    CapacityPlan {
        payload_bytes,
        required_pixels: required,
        suggestions,
    }
}

/// Smallest `width` for the ratio whose derived height covers `required`.
fn suggest(required: u64, w_ratio: u64, h_ratio: u64) -> DimensionSuggestion {
    let (required, w_ratio, h_ratio) = (required as u128, w_ratio as u128, h_ratio as u128);
    let mut width = ((required as f64) * w_ratio as f64 / h_ratio as f64).sqrt() as u128;
    let mut height = width * h_ratio / w_ratio;

    while width * height < required {
        width += 1;
        height = width * h_ratio / w_ratio;
    }

    let pixel_count = saturate(width * height);
    DimensionSuggestion {
        width: saturate(width),
        height: saturate(height),
        pixel_count,
        aspect_ratio: format!("{}:{}", w_ratio, h_ratio),
        capacity_bytes: capacity_bytes(pixel_count),
    }
}

/// Whole bytes that fit in `pixel_count` pixels.
pub fn capacity_bytes(pixel_count: u64) -> u64 {
    saturate(pixel_count as u128 * BITS_PER_PIXEL as u128 / 8)
}

fn saturate(value: u128) -> u64 {
    u64::try_from(value).unwrap_or(u64::MAX)
}
