//! Pixel-size-keyed cache of built atlases over one font.
//!
//! An atlas is fixed at one pixel size; rendering the same font at several
//! sizes means several atlases. The cache owns them all, building each on
//! first request and handing out shared references afterwards.

use crate::backend::AtlasBackend;
use crate::font_atlas::{AtlasConfig, AtlasResult, FontAtlas};
use crate::raster::{FontdueRasterizer, GlyphRasterizer};
use std::collections::HashMap;
use std::sync::Arc;

/// Owns every atlas built from one font, keyed by pixel height.
pub struct AtlasCache<R: GlyphRasterizer> {
    rasterizer: R,
    max_row_width: u32,
    atlases: HashMap<u32, Arc<FontAtlas>>,
}

impl<R: GlyphRasterizer> AtlasCache<R> {
    /// Creates an empty cache over one rasterizer (one font face).
    pub fn new(rasterizer: R, max_row_width: u32) -> Self {
        Self {
            rasterizer,
            max_row_width,
            atlases: HashMap::new(),
        }
    }

    /// Returns the atlas for `pixel_height`, building it on first request.
    ///
    /// # Errors
    ///
    /// Propagates allocation failures from the build; nothing is cached in
    /// that case, so a later request retries the build.
    pub fn get_or_build<B: AtlasBackend>(
        &mut self,
        backend: &mut B,
        pixel_height: u32,
    ) -> AtlasResult<Arc<FontAtlas>> {
        if let Some(atlas) = self.atlases.get(&pixel_height) {
            return Ok(Arc::clone(atlas));
        }

        let config = AtlasConfig {
            pixel_height: pixel_height as f32,
            max_row_width: self.max_row_width,
        };
        let atlas = Arc::new(FontAtlas::build(&mut self.rasterizer, backend, &config)?);
        self.atlases.insert(pixel_height, Arc::clone(&atlas));
        Ok(atlas)
    }

    /// Number of atlases currently built.
    pub fn len(&self) -> usize {
        self.atlases.len()
    }

    /// True if no atlas has been built yet.
    pub fn is_empty(&self) -> bool {
        self.atlases.is_empty()
    }
}

impl AtlasCache<FontdueRasterizer> {
    /// Creates a cache over a loaded fontdue font.
    pub fn from_font(font: Arc<fontdue::Font>, max_row_width: u32) -> Self {
        // The build reconfigures the pixel height per request.
        Self::new(FontdueRasterizer::new(font, 0.0), max_row_width)
    }
}
