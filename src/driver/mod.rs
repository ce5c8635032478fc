//! # Command-Line Driver
//!
//! The interactive front end: prompts in [`prompt`], the encode/decode
//! workflows in [`session`].

pub mod prompt;
pub mod session;

pub use prompt::{Mode, Prompter};
pub use session::{decode_file, encode_file, run_interactive};
