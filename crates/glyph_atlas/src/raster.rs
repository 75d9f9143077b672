//! Font rasterizer boundary and the fontdue-backed implementation.

use crate::font_atlas::AtlasError;
use nalgebra::Vector2;
use std::sync::Arc;

/// A glyph bitmap plus the pixel metrics needed to place it.
#[derive(Debug, Clone)]
pub struct RasterizedGlyph {
    /// Bitmap width in pixels.
    pub width: u32,
    /// Bitmap height in pixels.
    pub height: u32,
    /// Row-major coverage bitmap, 1 byte per pixel, `width * height` bytes.
    pub bitmap: Vec<u8>,
    /// Pen displacement in pixels applied after drawing this glyph.
    pub advance: Vector2<f32>,
    /// Offset in pixels from the pen origin to the bitmap's top-left corner.
    pub bearing: Vector2<f32>,
}

/// Rasterizing one character code failed.
///
/// Per-glyph failures are recoverable: the atlas build logs them, leaves the
/// glyph's metrics zeroed, and continues.
#[derive(Debug, Clone, thiserror::Error)]
#[error("failed to rasterize {code:?}: {reason}")]
pub struct RasterizeError {
    /// The character code that failed.
    pub code: char,
    /// Rasterizer-specific description of the failure.
    pub reason: String,
}

/// Produces glyph bitmaps for an atlas build.
pub trait GlyphRasterizer {
    /// Configures the pixel height used by subsequent [`rasterize`] calls.
    ///
    /// Called once at the start of every atlas build with the configured
    /// height, so one rasterizer can feed atlases of several sizes.
    ///
    /// [`rasterize`]: GlyphRasterizer::rasterize
    fn set_pixel_height(&mut self, pixel_height: f32);

    /// Rasterizes one character code at the configured pixel height.
    fn rasterize(&mut self, code: char) -> Result<RasterizedGlyph, RasterizeError>;
}

/// [`GlyphRasterizer`] backed by a [fontdue](https://docs.rs/fontdue) font.
pub struct FontdueRasterizer {
    font: Arc<fontdue::Font>,
    pixel_height: f32,
}

impl FontdueRasterizer {
    /// Wraps an already loaded font, initially rasterizing at
    /// `pixel_height`.
    pub fn new(font: Arc<fontdue::Font>, pixel_height: f32) -> Self {
        Self { font, pixel_height }
    }

    /// Loads a TrueType/OpenType font from raw bytes.
    pub fn from_bytes(font_data: &[u8], pixel_height: f32) -> Result<Self, AtlasError> {
        let font = fontdue::Font::from_bytes(font_data, fontdue::FontSettings::default())
            .map_err(|e| AtlasError::FontLoad(e.to_string()))?;
        Ok(Self::new(Arc::new(font), pixel_height))
    }

    /// The pixel height glyphs are currently rasterized at.
    pub fn pixel_height(&self) -> f32 {
        self.pixel_height
    }
}

impl GlyphRasterizer for FontdueRasterizer {
    fn set_pixel_height(&mut self, pixel_height: f32) {
        self.pixel_height = pixel_height;
    }

    fn rasterize(&mut self, code: char) -> Result<RasterizedGlyph, RasterizeError> {
        // Index 0 is .notdef; rasterizing it would silently substitute a
        // placeholder box, so report the miss instead.
        if self.font.lookup_glyph_index(code) == 0 {
            return Err(RasterizeError {
                code,
                reason: "font has no glyph for this code".into(),
            });
        }

        let (metrics, bitmap) = self.font.rasterize(code, self.pixel_height);

        // fontdue reports ymin, the bitmap's bottom edge relative to the
        // baseline; the table stores the top-left bearing, so the top edge
        // is ymin + height.
        Ok(RasterizedGlyph {
            width: metrics.width as u32,
            height: metrics.height as u32,
            bitmap,
            advance: Vector2::new(metrics.advance_width, metrics.advance_height),
            bearing: Vector2::new(
                metrics.xmin as f32,
                (metrics.ymin + metrics.height as i32) as f32,
            ),
        })
    }
}
