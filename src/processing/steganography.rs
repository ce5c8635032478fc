//! # LSB Steganography Implementation
//!
//! Hides a text message in the least significant bits of an RGB image and
//! recovers it again.
//!
//! ## Algorithm
//!
//! ### Encoding Process
//! 1. Map every character of the message to one 8-bit symbol and append the
//!    sentinel symbol (`0`)
//! 2. Flatten the symbols into bits, most significant bit first
//! 3. Walk the pixels row by row. For each channel (R → G → B → next pixel):
//!    - Clear the LSB of the channel
//!    - Set the LSB to the next payload bit
//! 4. Stop as soon as the payload is exhausted; later pixels keep their values
//!
//! ### Decoding Process
//! 1. Read the LSB of every channel of every pixel (always the full image)
//! 2. Group the bits into 8-bit symbols, dropping a short trailing group
//! 3. Return the symbols preceding the first sentinel, or all of them if the
//!    sentinel is missing (the message did not fit during encoding)
//!
//! ### Capacity
//! An image holds `width * height * 3` bits. Nothing stops a longer message
//! from being written: by default the tail is silently dropped, including the
//! sentinel. [`OverflowPolicy::Reject`] turns that case into an error instead.

use image::{Rgb, RgbImage};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use super::overlay::TextOverlay;
use crate::common::error::StegoError;

/// Number of bits used to store one character of the message.
pub const BITS_PER_SYMBOL: usize = 8;

/// Symbol appended to every message to mark its end.
pub const SENTINEL: u8 = 0;

/// Colour channels carrying payload bits in each pixel.
pub const CHANNELS: usize = 3;

/// What to do when the payload does not fit into the cover image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverflowPolicy {
    /// Write as many bits as fit and drop the rest, sentinel included.
    #[default]
    Truncate,
    /// Refuse to encode and report [`StegoError::MessageTooLong`].
    Reject,
}

/// The two images produced by [`encode`].
///
/// Both buffers are owned and independent: `visible` starts as a copy of
/// `hidden` and only then receives the rendered text.
#[derive(Debug, Clone)]
pub struct EncodedImages {
    /// Cover image with only the hidden payload.
    pub hidden: RgbImage,
    /// Same payload plus the message drawn as visible text.
    pub visible: RgbImage,
    /// How many payload bits were actually written.
    pub bits_written: usize,
    /// How many payload bits were requested (message + sentinel).
    pub bits_requested: usize,
}

impl EncodedImages {
    /// Returns true if the payload did not fit and was cut short.
    pub fn is_truncated(&self) -> bool {
        self.bits_written < self.bits_requested
    }
}

/// Total number of payload bits the image can hold.
pub fn capacity_bits(image: &RgbImage) -> usize {
    let (width, height) = image.dimensions();
    width as usize * height as usize * CHANNELS
}

/// Convert a message into its payload bits (one `0`/`1` per element).
///
/// Every character must fit in a single byte (`U+0000..=U+00FF`). The
/// sentinel is appended after the last character.
pub fn message_to_bits(message: &str) -> Result<Vec<u8>, StegoError> {
    let mut symbols = Vec::with_capacity(message.len() + 1);
    for (index, ch) in message.chars().enumerate() {
        let code = u32::from(ch);
        let symbol = u8::try_from(code).map_err(|_| StegoError::UnencodableChar { ch, index })?;
        symbols.push(symbol);
    }
    symbols.push(SENTINEL);

    let mut bits = Vec::with_capacity(symbols.len() * BITS_PER_SYMBOL);
    for symbol in symbols {
        for shift in (0..BITS_PER_SYMBOL).rev() {
            bits.push((symbol >> shift) & 1);
        }
    }
    Ok(bits)
}

/// Write `bits` into the channel LSBs of `image`, in row-major order.
///
/// Returns the number of bits written, which is smaller than `bits.len()`
/// when the image runs out of channels.
pub fn embed_bits(image: &mut RgbImage, bits: &[u8]) -> usize {
    let (width, height) = image.dimensions();
    let mut bit_index = 0;

    'outer: for y in 0..height {
        for x in 0..width {
            if bit_index >= bits.len() {
                break 'outer;
            }

            let pixel = *image.get_pixel(x, y);
            let mut new_pixel = pixel;

            for channel in 0..CHANNELS {
                if bit_index >= bits.len() {
                    break;
                }

                // Clear LSB and set it to the payload bit
                new_pixel[channel] = (pixel[channel] & 0xFE) | (bits[bit_index] & 1);
                bit_index += 1;
            }

            image.put_pixel(x, y, new_pixel);
        }
    }

    bit_index
}

/// Hide `message` in a copy of `source`, producing the hidden-only and the
/// visible variant.
///
/// # Errors
/// - [`StegoError::UnencodableChar`] if a character does not fit in one byte
/// - [`StegoError::MessageTooLong`] if `policy` is [`OverflowPolicy::Reject`]
///   and the payload exceeds the image capacity
pub fn encode(
    source: &RgbImage,
    message: &str,
    overlay: &TextOverlay,
    policy: OverflowPolicy,
) -> Result<EncodedImages, StegoError> {
    let bits = message_to_bits(message)?;
    let capacity = capacity_bits(source);

    debug!(
        "Payload: {} symbols, {} bits; capacity: {} bits",
        bits.len() / BITS_PER_SYMBOL,
        bits.len(),
        capacity
    );

    if bits.len() > capacity && policy == OverflowPolicy::Reject {
        return Err(StegoError::MessageTooLong {
            needed: bits.len(),
            capacity,
        });
    }

    let mut hidden = source.clone();
    let bits_written = embed_bits(&mut hidden, &bits);

    if bits_written < bits.len() {
        warn!(
            "Message too long for image: wrote {} of {} bits, the end-of-message marker was dropped",
            bits_written,
            bits.len()
        );
    } else {
        info!("Embedded {} bits ({} available)", bits_written, capacity);
    }

    let mut visible = hidden.clone();
    overlay.render(&mut visible, message);

    Ok(EncodedImages {
        hidden,
        visible,
        bits_written,
        bits_requested: bits.len(),
    })
}

/// Read the LSB of every channel of every pixel, in row-major order.
pub fn extract_bits(image: &RgbImage) -> Vec<u8> {
    let mut bits = Vec::with_capacity(capacity_bits(image));
    for Rgb(channels) in image.pixels() {
        for value in channels.iter().take(CHANNELS) {
            bits.push(value & 1);
        }
    }
    bits
}

/// Pack bits into symbols, MSB first. A trailing group shorter than
/// [`BITS_PER_SYMBOL`] is dropped.
pub fn bits_to_symbols(bits: &[u8]) -> Vec<u8> {
    bits.chunks_exact(BITS_PER_SYMBOL)
        .map(|group| group.iter().fold(0u8, |acc, bit| (acc << 1) | (bit & 1)))
        .collect()
}

/// Recover the message hidden in `image`.
///
/// Returns the characters before the first sentinel. If no sentinel is
/// present the whole decoded stream is returned.
pub fn decode(image: &RgbImage) -> String {
    let symbols = bits_to_symbols(&extract_bits(image));
    let end = symbols
        .iter()
        .position(|&symbol| symbol == SENTINEL)
        .unwrap_or(symbols.len());

    if end == symbols.len() {
        debug!("No end-of-message marker found, returning all {} symbols", end);
    }

    symbols[..end].iter().map(|&symbol| char::from(symbol)).collect()
}
