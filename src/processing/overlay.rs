//! # Visible Text Overlay
//!
//! Draws the hidden message as plain text on the "visible" output.
//!
//! A TrueType font is preferred. When none of the configured font files can
//! be read, the built-in 8x8 bitmap font is used instead, so rendering never
//! fails. Glyphs falling outside the image are clipped.

use ab_glyph::{point, Font, FontVec, PxScale, ScaleFont};
use font8x8::{UnicodeFonts, BASIC_FONTS, LATIN_FONTS};
use image::{Rgb, RgbImage};
use log::{debug, info};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Default distance from the left edge of the image, in pixels.
pub const DEFAULT_MARGIN_LEFT: i32 = 10;

/// Default distance between the top of the text and the bottom of the image.
pub const DEFAULT_BOTTOM_OFFSET: i32 = 30;

/// Default font size in pixels.
pub const DEFAULT_FONT_SIZE: f32 = 20.0;

/// Side length of a glyph in the built-in bitmap font.
const BITMAP_GLYPH_SIZE: u32 = 8;

/// Fill colour of the visible text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextColor {
    #[default]
    Red,
    White,
}

impl TextColor {
    pub fn rgb(self) -> Rgb<u8> {
        match self {
            TextColor::Red => Rgb([255, 0, 0]),
            TextColor::White => Rgb([255, 255, 255]),
        }
    }
}

impl FromStr for TextColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "red" => Ok(TextColor::Red),
            "white" => Ok(TextColor::White),
            other => Err(format!("unknown text color '{}', expected 'red' or 'white'", other)),
        }
    }
}

impl fmt::Display for TextColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextColor::Red => write!(f, "red"),
            TextColor::White => write!(f, "white"),
        }
    }
}

/// A text-rendering resource.
pub enum FontSource {
    /// Outline font loaded from disk.
    TrueType { font: FontVec, size: f32, path: PathBuf },
    /// Built-in bitmap font, always available.
    Builtin { scale: u32 },
}

impl fmt::Debug for FontSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontSource::TrueType { size, path, .. } => f
                .debug_struct("TrueType")
                .field("path", path)
                .field("size", size)
                .finish(),
            FontSource::Builtin { scale } => f.debug_struct("Builtin").field("scale", scale).finish(),
        }
    }
}

impl FontSource {
    /// Try each candidate font file in order and fall back to the built-in
    /// bitmap font if none of them is usable.
    pub fn acquire<P: AsRef<Path>>(candidates: &[P], size: f32) -> Self {
        for candidate in candidates {
            let path = candidate.as_ref();
            match Self::load_truetype(path, size) {
                Some(font) => {
                    info!("Using font {}", path.display());
                    return font;
                }
                None => debug!("Font {} not available", path.display()),
            }
        }

        info!("No preferred font available, using built-in bitmap font");
        Self::builtin(size)
    }

    /// The built-in bitmap font, scaled to roughly match `size`.
    pub fn builtin(size: f32) -> Self {
        let scale = (size / 10.0).round().max(1.0) as u32;
        FontSource::Builtin { scale }
    }

    fn load_truetype(path: &Path, size: f32) -> Option<Self> {
        let bytes = std::fs::read(path).ok()?;
        let font = FontVec::try_from_vec(bytes).ok()?;
        Some(FontSource::TrueType {
            font,
            size,
            path: path.to_path_buf(),
        })
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, FontSource::Builtin { .. })
    }
}

/// Renders text onto an image at a fixed spot near the bottom-left corner.
#[derive(Debug)]
pub struct TextOverlay {
    font: FontSource,
    color: TextColor,
    margin_left: i32,
    bottom_offset: i32,
}

impl TextOverlay {
    pub fn new(font: FontSource, color: TextColor) -> Self {
        Self {
            font,
            color,
            margin_left: DEFAULT_MARGIN_LEFT,
            bottom_offset: DEFAULT_BOTTOM_OFFSET,
        }
    }

    pub fn with_placement(mut self, margin_left: i32, bottom_offset: i32) -> Self {
        self.margin_left = margin_left;
        self.bottom_offset = bottom_offset;
        self
    }

    pub fn color(&self) -> TextColor {
        self.color
    }

    /// Top-left corner of the text for an image of the given height.
    ///
    /// Not clamped: on small images the position may lie outside the image.
    pub fn position(&self, height: u32) -> (i32, i32) {
        (self.margin_left, height as i32 - self.bottom_offset)
    }

    /// Draw `text` onto `image`.
    pub fn render(&self, image: &mut RgbImage, text: &str) {
        if text.is_empty() {
            return;
        }

        let (x, y) = self.position(image.height());
        let fill = self.color.rgb();

        match &self.font {
            FontSource::TrueType { font, size, .. } => {
                draw_outline_text(image, font, *size, x, y, fill, text)
            }
            FontSource::Builtin { scale } => draw_bitmap_text(image, *scale, x, y, fill, text),
        }
    }
}

fn draw_outline_text(
    image: &mut RgbImage,
    font: &FontVec,
    size: f32,
    x: i32,
    y: i32,
    fill: Rgb<u8>,
    text: &str,
) {
    let scale = PxScale::from(size);
    let scaled = font.as_scaled(scale);
    let mut caret = point(x as f32, y as f32 + scaled.ascent());
    let mut previous = None;

    for ch in text.chars() {
        let id = font.glyph_id(ch);
        if let Some(prev) = previous {
            caret.x += scaled.kern(prev, id);
        }
        let glyph = id.with_scale_and_position(scale, caret);
        caret.x += scaled.h_advance(id);
        previous = Some(id);

        if let Some(outlined) = font.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                let px = bounds.min.x as i32 + gx as i32;
                let py = bounds.min.y as i32 + gy as i32;
                blend_pixel(image, px, py, fill, coverage);
            });
        }
    }
}

fn draw_bitmap_text(image: &mut RgbImage, scale: u32, x: i32, y: i32, fill: Rgb<u8>, text: &str) {
    let advance = (BITMAP_GLYPH_SIZE * scale) as i32;
    let mut caret_x = x;

    for ch in text.chars() {
        let rows = BASIC_FONTS.get(ch).or_else(|| LATIN_FONTS.get(ch));
        if let Some(rows) = rows {
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..BITMAP_GLYPH_SIZE {
                    // Bit 0 is the leftmost pixel of the row
                    if bits & (1 << col) == 0 {
                        continue;
                    }
                    for dy in 0..scale {
                        for dx in 0..scale {
                            let px = caret_x + (col * scale + dx) as i32;
                            let py = y + (row as u32 * scale + dy) as i32;
                            blend_pixel(image, px, py, fill, 1.0);
                        }
                    }
                }
            }
        }
        caret_x += advance;
    }
}

fn blend_pixel(image: &mut RgbImage, x: i32, y: i32, fill: Rgb<u8>, coverage: f32) {
    if x < 0 || y < 0 || x as u32 >= image.width() || y as u32 >= image.height() {
        return;
    }
    let coverage = coverage.clamp(0.0, 1.0);
    if coverage == 0.0 {
        return;
    }

    let pixel = image.get_pixel_mut(x as u32, y as u32);
    for channel in 0..3 {
        let bg = pixel[channel] as f32;
        let fg = fill[channel] as f32;
        pixel[channel] = (bg + (fg - bg) * coverage).round() as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_parsing() {
        assert_eq!("RED".parse::<TextColor>(), Ok(TextColor::Red));
        assert_eq!(" White ".parse::<TextColor>(), Ok(TextColor::White));
        assert!("blue".parse::<TextColor>().is_err());
        assert_eq!(TextColor::Red.rgb(), Rgb([255, 0, 0]));
        assert_eq!(TextColor::White.rgb(), Rgb([255, 255, 255]));
    }

    #[test]
    fn test_missing_font_falls_back_to_builtin() {
        let font = FontSource::acquire(&["/nonexistent/arial.ttf", "also-missing.ttf"], 20.0);
        assert!(font.is_builtin());
    }

    #[test]
    fn test_invalid_font_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.ttf");
        std::fs::write(&path, b"not a font").unwrap();
        assert!(FontSource::acquire(&[path], 20.0).is_builtin());
    }

    const FIXTURE_FONT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/DejaVuSansMono.ttf");

    #[test]
    fn test_truetype_font_is_preferred() {
        let font = FontSource::acquire(&["/nonexistent/arial.ttf", FIXTURE_FONT], 20.0);
        assert!(!font.is_builtin());
    }

    #[test]
    fn test_truetype_render_near_bottom_left() {
        let mut image = RgbImage::new(100, 100);
        let overlay = TextOverlay::new(FontSource::acquire(&[FIXTURE_FONT], 20.0), TextColor::Red);
        overlay.render(&mut image, "Hi");

        let mut painted = 0;
        for (x, y, pixel) in image.enumerate_pixels() {
            if *pixel == Rgb([0, 0, 0]) {
                continue;
            }
            painted += 1;
            // Anti-aliased red over black: only the red channel changes
            assert_eq!((pixel[1], pixel[2]), (0, 0));
            // Two 20px glyphs whose box starts at (10, 70)
            assert!((8..50).contains(&x), "x = {}", x);
            assert!((66..100).contains(&y), "y = {}", y);
        }
        assert!(painted > 0);
        assert!(image.pixels().any(|p| p[0] >= 250));
    }

    #[test]
    fn test_truetype_render_on_tiny_image_is_clipped() {
        let mut image = RgbImage::from_pixel(3, 3, Rgb([9, 9, 9]));
        let overlay = TextOverlay::new(FontSource::acquire(&[FIXTURE_FONT], 20.0), TextColor::White);
        overlay.render(&mut image, "clipped");
        assert!(image.pixels().all(|p| *p == Rgb([9, 9, 9])));
    }

    #[test]
    fn test_color_display() {
        assert_eq!(TextColor::Red.to_string(), "red");
        assert_eq!(TextColor::White.to_string(), "white");
    }

    #[test]
    fn test_position_near_bottom_left() {
        let overlay = TextOverlay::new(FontSource::builtin(20.0), TextColor::Red);
        assert_eq!(overlay.position(100), (10, 70));
        assert_eq!(overlay.position(10), (10, -20));
    }

    #[test]
    fn test_builtin_render_stays_in_text_box() {
        let mut image = RgbImage::new(100, 100);
        let overlay = TextOverlay::new(FontSource::builtin(20.0), TextColor::Red);
        overlay.render(&mut image, "Hi");

        let mut painted = 0;
        for (x, y, pixel) in image.enumerate_pixels() {
            if *pixel == Rgb([255, 0, 0]) {
                painted += 1;
                // scale 2: two 16x16 glyphs starting at (10, 70)
                assert!((10..42).contains(&x), "x = {}", x);
                assert!((70..86).contains(&y), "y = {}", y);
            } else {
                assert_eq!(*pixel, Rgb([0, 0, 0]));
            }
        }
        assert!(painted > 0);
    }

    #[test]
    fn test_render_on_tiny_image_is_clipped() {
        let mut image = RgbImage::from_pixel(2, 2, Rgb([1, 2, 3]));
        let overlay = TextOverlay::new(FontSource::builtin(20.0), TextColor::White);
        overlay.render(&mut image, "clipped");
        assert!(image.pixels().all(|p| *p == Rgb([1, 2, 3])));
    }

    #[test]
    fn test_empty_text_draws_nothing() {
        let mut image = RgbImage::new(50, 50);
        let overlay = TextOverlay::new(FontSource::builtin(20.0), TextColor::White);
        overlay.render(&mut image, "");
        assert!(image.pixels().all(|p| *p == Rgb([0, 0, 0])));
    }
}
