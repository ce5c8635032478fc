pub mod common;
pub mod driver;
pub mod processing;
pub mod utils;

pub use common::config::StegoConfig;
pub use common::error::StegoError;
pub use processing::{decode, encode, EncodedImages, OverflowPolicy, TextColor, TextOverlay};
