//! Text-art rendering of tile images.
//!
//! Maps a PNG tile onto a fixed-size character grid, one cell per
//! character, darker pixels getting denser glyphs. The default grid is
//! 100x100 cells.

use image::imageops::FilterType;
use thiserror::Error;

/// Default text-art grid width in cells.
pub const DEFAULT_COLUMNS: u32 = 100;
/// Default text-art grid height in cells.
pub const DEFAULT_ROWS: u32 = 100;

/// Luminance ramp from dark to light.
const LUMA_RAMP: &[u8] = b"@%#*+=-:. ";

/// Errors from text-art conversion.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The tile bytes could not be decoded as an image.
    #[error("failed to decode tile image: {0}")]
    Decode(#[from] image::ImageError),
}

/// Renders image bytes as text art.
pub trait Converter: Send + Sync {
    /// Render the image to a newline-separated character grid.
    fn render(&self, image_bytes: &[u8]) -> Result<String, RenderError>;
}

/// Luminance-ramp ASCII renderer.
pub struct AsciiRenderer {
    columns: u32,
    rows: u32,
}

impl AsciiRenderer {
    /// Create a renderer with a custom grid size.
    pub fn new(columns: u32, rows: u32) -> Self {
        Self { columns, rows }
    }
}

impl Default for AsciiRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_COLUMNS, DEFAULT_ROWS)
    }
}

impl Converter for AsciiRenderer {
    fn render(&self, image_bytes: &[u8]) -> Result<String, RenderError> {
        let image = image::load_from_memory(image_bytes)?
            .resize_exact(self.columns, self.rows, FilterType::Triangle)
            .to_luma8();

        // rows * (columns + newline)
        let mut out = String::with_capacity((self.columns as usize + 1) * self.rows as usize);
        for row in image.rows() {
            for pixel in row {
                let luma = pixel.0[0] as usize;
                let idx = luma * LUMA_RAMP.len() / 256;
                out.push(LUMA_RAMP[idx] as char);
            }
            out.push('\n');
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Luma};
    use std::io::Cursor;

    /// Encode a uniform gray PNG for testing.
    fn gray_png(size: u32, luma: u8) -> Vec<u8> {
        let img = image::ImageBuffer::from_pixel(size, size, Luma([luma]));
        let mut bytes = Cursor::new(Vec::new());
        image::DynamicImage::ImageLuma8(img)
            .write_to(&mut bytes, ImageFormat::Png)
            .unwrap();
        bytes.into_inner()
    }

    #[test]
    fn test_render_grid_dimensions() {
        let renderer = AsciiRenderer::default();
        let art = renderer.render(&gray_png(256, 128)).unwrap();

        let lines: Vec<&str> = art.lines().collect();
        assert_eq!(lines.len(), 100);
        assert!(lines.iter().all(|l| l.chars().count() == 100));
    }

    #[test]
    fn test_render_black_uses_densest_glyph() {
        let renderer = AsciiRenderer::new(4, 4);
        let art = renderer.render(&gray_png(8, 0)).unwrap();
        assert!(art.lines().all(|l| l == "@@@@"));
    }

    #[test]
    fn test_render_white_uses_lightest_glyph() {
        let renderer = AsciiRenderer::new(4, 4);
        let art = renderer.render(&gray_png(8, 255)).unwrap();
        assert!(art.lines().all(|l| l == "    "));
    }

    #[test]
    fn test_render_rejects_non_image_bytes() {
        let renderer = AsciiRenderer::default();
        let result = renderer.render(b"definitely not a png");
        assert!(matches!(result, Err(RenderError::Decode(_))));
    }

    #[test]
    fn test_custom_grid_size() {
        let renderer = AsciiRenderer::new(10, 5);
        let art = renderer.render(&gray_png(64, 40)).unwrap();

        let lines: Vec<&str> = art.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines.iter().all(|l| l.chars().count() == 10));
    }
}
