//! Hiding frames in carrier images.
//!
//! - [`lsb`]: bit-channel codec over a flat RGB channel buffer
//! - [`image`]: carrier loading, RGB normalization and lossless saving

pub mod image;
pub mod lsb;

pub use self::image::Carrier;
