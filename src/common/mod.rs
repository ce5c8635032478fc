//! # Common Components
//!
//! Shared utilities used by the steganography core and the command-line driver.
//!
//! ## Modules
//!
//! - [`config`]: Configuration parsing utilities
//! - [`error`]: Error taxonomy of the library
//! - [`image_io`]: Loading, saving and displaying images

pub mod config;
pub mod error;
pub mod image_io;
