//! # Encode and Decode Sessions
//!
//! Ties the pieces together: load the cover image, run the transformation,
//! persist the results. Nothing is written unless the image loaded and the
//! message was encoded successfully.

use log::{debug, info};
use std::io::{BufRead, Write};
use std::path::Path;

use super::prompt::{Mode, Prompter};
use crate::common::config::StegoConfig;
use crate::common::error::StegoError;
use crate::common::image_io::{self, OutputPaths};
use crate::processing::overlay::{FontSource, TextColor, TextOverlay};
use crate::processing::steganography;

/// Build the visible-text renderer described by the configuration.
pub fn build_overlay(config: &StegoConfig, color: TextColor) -> TextOverlay {
    let font = FontSource::acquire(&config.overlay.font_paths, config.overlay.font_size);
    TextOverlay::new(font, color)
        .with_placement(config.overlay.margin_left, config.overlay.bottom_offset)
}

/// Hide `message` in the image at `image_path` and write both output images
/// next to it.
///
/// # Returns
/// - `Ok(OutputPaths)`: where the hidden-only and the visible image were saved
/// - `Err`: load failure, unencodable message, or save failure
pub fn encode_file(
    image_path: &Path,
    message: &str,
    color: TextColor,
    config: &StegoConfig,
) -> Result<OutputPaths, StegoError> {
    let source = image_io::load_rgb(image_path)?;
    let overlay = build_overlay(config, color);
    debug!("Visible text colour: {}", overlay.color());
    let encoded = steganography::encode(&source, message, &overlay, config.capacity.policy)?;

    let paths = image_io::output_paths(image_path, &config.output);
    image_io::save_png(&encoded.hidden, &paths.hidden)?;
    image_io::save_png(&encoded.visible, &paths.visible)?;
    info!(
        "Saved {} and {}",
        paths.hidden.display(),
        paths.visible.display()
    );

    if config.output.show {
        image_io::show(&paths.hidden);
        image_io::show(&paths.visible);
    }

    Ok(paths)
}

/// Recover the message hidden in the image at `image_path`.
pub fn decode_file(image_path: &Path) -> Result<String, StegoError> {
    let image = image_io::load_rgb(image_path)?;
    let message = steganography::decode(&image);
    info!("Decoded {} characters from {}", message.chars().count(), image_path.display());
    Ok(message)
}

/// Run the interactive dialogue once.
///
/// Failures of the chosen operation are reported to the user and end the
/// session normally. Only a failure of the prompt channel itself is
/// returned.
pub fn run_interactive<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    config: &StegoConfig,
) -> Result<(), StegoError> {
    prompter.say("📦 Steganography Tool - Hide messages in images")?;
    prompter.say(&"=".repeat(50))?;

    match prompter.choose_mode()? {
        Some(Mode::Encode) => {
            let message = prompter.read_message()?;
            let path = prompter.read_existing_path("Enter the path to the image: ")?;
            let color = prompter.read_color()?;

            match encode_file(&path, &message, color, config) {
                Ok(paths) => {
                    prompter.say(&format!(
                        "\n✅ Hidden message saved as '{}'",
                        paths.hidden.display()
                    ))?;
                    prompter.say(&format!(
                        "✅ Visible message saved as '{}'",
                        paths.visible.display()
                    ))?;
                }
                Err(e) => prompter.say(&format!("❌ {}", e))?,
            }
        }
        Some(Mode::Decode) => {
            let path = prompter.read_existing_path("Enter the path to the image to decode: ")?;
            match decode_file(&path) {
                Ok(message) => prompter.say(&format!("\n🔍 Decoded message: {}", message))?,
                Err(e) => prompter.say(&format!("❌ {}", e))?,
            }
        }
        None => {
            prompter.say("❌ Invalid choice. Please enter 'e' to encode or 'd' to decode.")?;
        }
    }

    Ok(())
}
