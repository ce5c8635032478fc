//! # Image Processing and Steganography
//!
//! This module hides text in images using the LSB (Least Significant Bit)
//! steganography technique and renders the visible copy of the message.

pub mod overlay;
pub mod steganography;

// Re-export main functions for convenience
pub use overlay::{FontSource, TextColor, TextOverlay};
pub use steganography::{decode, encode, EncodedImages, OverflowPolicy};
