//! # Error Types
//!
//! Failures that the library reports to its callers. The binary decides how
//! each one is shown to the user.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StegoError {
    #[error("Error: The file '{}' was not found.", .0.display())]
    FileNotFound(PathBuf),

    #[error("Error opening image: {0}")]
    Open(String),

    #[error("Error saving image '{}': {}", .path.display(), .message)]
    Save { path: PathBuf, message: String },

    #[error("Character {ch:?} at position {index} does not fit in a single byte")]
    UnencodableChar { ch: char, index: usize },

    #[error("Message too long for image: need {needed} bits, capacity is {capacity} bits")]
    MessageTooLong { needed: usize, capacity: usize },

    #[error("Input closed before an answer was given")]
    InputClosed,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
