//! # Image Input and Output
//!
//! Loading a cover image as RGB, naming and writing the two PNG outputs, and
//! handing them to the platform viewer.

use image::io::Reader;
use image::{GenericImageView, ImageFormat, RgbImage};
use log::{debug, warn};
use std::io;
use std::path::{Path, PathBuf};

use super::config::OutputConfig;
use super::error::StegoError;

/// Paths of the two images written by an encode run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub hidden: PathBuf,
    pub visible: PathBuf,
}

/// Open an image file and normalize it to 8-bit RGB.
///
/// # Errors
/// - [`StegoError::FileNotFound`] if the path does not exist
/// - [`StegoError::Open`] for any other read or decode failure
pub fn load_rgb(path: &Path) -> Result<RgbImage, StegoError> {
    let not_found_or_open = |e: io::Error| {
        if e.kind() == io::ErrorKind::NotFound {
            StegoError::FileNotFound(path.to_path_buf())
        } else {
            StegoError::Open(e.to_string())
        }
    };

    // Sniff the format from the file contents; the extension may be missing or wrong
    let img = Reader::open(path)
        .map_err(not_found_or_open)?
        .with_guessed_format()
        .map_err(not_found_or_open)?
        .decode()
        .map_err(|e| StegoError::Open(e.to_string()))?;

    let (width, height) = img.dimensions();
    debug!(
        "Loaded {} ({}x{}, {:?})",
        path.display(),
        width,
        height,
        img.color()
    );

    Ok(img.to_rgb8())
}

/// Output locations for an input image: same directory, fixed file names.
pub fn output_paths(input: &Path, config: &OutputConfig) -> OutputPaths {
    let dir = input.parent().unwrap_or_else(|| Path::new(""));
    OutputPaths {
        hidden: dir.join(&config.hidden_name),
        visible: dir.join(&config.visible_name),
    }
}

/// Write `image` as PNG, replacing any existing file.
pub fn save_png(image: &RgbImage, path: &Path) -> Result<(), StegoError> {
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|e| StegoError::Save {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

/// Open `path` with the platform's default image viewer.
///
/// A missing viewer is not an error for the caller; it is only logged.
pub fn show(path: &Path) {
    if let Err(e) = opener::open(path) {
        warn!("Could not open {} in a viewer: {}", path.display(), e);
    }
}
