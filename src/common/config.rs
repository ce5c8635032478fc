//! # Configuration Utilities
//!
//! Settings for output naming, visible text placement and capacity handling.
//! Every field has a built-in default, so a configuration file only needs the
//! keys it wants to change.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::processing::overlay::{DEFAULT_BOTTOM_OFFSET, DEFAULT_FONT_SIZE, DEFAULT_MARGIN_LEFT};
use crate::processing::steganography::OverflowPolicy;

/// Load a TOML configuration file and deserialize it into the specified type.
///
/// # Arguments
/// - `path`: Path to the TOML configuration file
///
/// # Returns
/// - `Ok(T)`: Successfully loaded and parsed configuration
/// - `Err`: File I/O or parsing error
///
/// # Example
/// ```ignore
/// let config: StegoConfig = load_config("config/stego.toml")?;
/// ```
pub fn load_config<T>(path: &str) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    let content = fs::read_to_string(path)?;
    let config: T = toml::from_str(&content)?;
    Ok(config)
}

/// Top-level configuration of the tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StegoConfig {
    pub output: OutputConfig,
    pub overlay: OverlayConfig,
    pub capacity: CapacityConfig,
}

/// Where and how the two output images are written.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// File name of the image carrying only the hidden payload
    pub hidden_name: String,
    /// File name of the image with the payload and the visible text
    pub visible_name: String,
    /// Open both images in the default viewer after saving
    pub show: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            hidden_name: "encoded_output.png".to_string(),
            visible_name: "visible_message.png".to_string(),
            show: true,
        }
    }
}

/// Visible text rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Preferred TrueType fonts, tried in order
    pub font_paths: Vec<PathBuf>,
    /// Font size in pixels
    pub font_size: f32,
    /// Distance from the left edge (pixels)
    pub margin_left: i32,
    /// Distance between the top of the text and the bottom edge (pixels)
    pub bottom_offset: i32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            font_paths: vec![
                PathBuf::from("arial.ttf"),
                PathBuf::from("C:\\Windows\\Fonts\\arial.ttf"),
                PathBuf::from("/Library/Fonts/Arial.ttf"),
                PathBuf::from("/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf"),
            ],
            font_size: DEFAULT_FONT_SIZE,
            margin_left: DEFAULT_MARGIN_LEFT,
            bottom_offset: DEFAULT_BOTTOM_OFFSET,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CapacityConfig {
    pub policy: OverflowPolicy,
}

impl StegoConfig {
    pub fn from_file(path: &str) -> Result<Self> {
        load_config(path)
    }
}
