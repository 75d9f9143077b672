//! Atlas construction and ownership.
//!
//! [`FontAtlas::build`] drives the whole pipeline: rasterize every supported
//! code once, plan the packing, allocate one single-channel texture, upload
//! each bitmap at its planned offset, and record normalized metrics. The
//! resulting atlas owns its texture handle and metrics table for one
//! (font, pixel size) pair.

use crate::atlas_layout::AtlasLayout;
use crate::backend::{AllocationError, AtlasBackend, TextureHandle};
use crate::glyph_metrics::{supported_codes, GlyphMetrics, GlyphMetricsTable, GLYPH_COUNT};
use crate::raster::{GlyphRasterizer, RasterizedGlyph};
use crate::text_batch::{TextBatch, TextBatchComposer, Viewport};
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Result type for atlas construction.
pub type AtlasResult<T> = Result<T, AtlasError>;

/// Fatal errors during atlas construction.
///
/// Per-glyph rasterization failures are not represented here: they are
/// logged, the glyph's metrics stay zeroed, and the build continues.
#[derive(Debug, thiserror::Error)]
pub enum AtlasError {
    /// Failed to load font data.
    #[error("failed to load font: {0}")]
    FontLoad(String),

    /// Failed to allocate the atlas texture. No partial atlas is left
    /// usable.
    #[error(transparent)]
    Allocation(#[from] AllocationError),
}

/// Build parameters for a font atlas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AtlasConfig {
    /// Pixel height glyphs are rasterized at.
    pub pixel_height: f32,
    /// Hard width constraint for atlas rows, in pixels.
    pub max_row_width: u32,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            pixel_height: 48.0,
            max_row_width: 1024,
        }
    }
}

/// A packed glyph atlas for one (font, pixel size) pair.
///
/// Exclusively owns the backend texture and the [`GlyphMetricsTable`]; both
/// are populated once by [`FontAtlas::build`] and immutable afterwards, so
/// concurrent reads during rendering are safe. Rebuilding concurrently is
/// not supported and must be serialized by the caller.
pub struct FontAtlas {
    texture: TextureHandle,
    metrics: GlyphMetricsTable,
    width: u32,
    height: u32,
}

impl FontAtlas {
    /// Builds an atlas by rasterizing every supported character code and
    /// packing the bitmaps into one backend texture.
    ///
    /// Codes that fail to rasterize are logged and skipped; their metrics
    /// stay zeroed and composing them later yields zero-area quads. The
    /// build is deterministic: identical inputs produce an identical
    /// metrics table.
    ///
    /// # Errors
    ///
    /// Returns [`AtlasError::Allocation`] if the backend cannot allocate
    /// the texture; nothing is uploaded in that case.
    pub fn build<R, B>(rasterizer: &mut R, backend: &mut B, config: &AtlasConfig) -> AtlasResult<Self>
    where
        R: GlyphRasterizer,
        B: AtlasBackend,
    {
        rasterizer.set_pixel_height(config.pixel_height);

        let mut rasterized: Vec<(char, RasterizedGlyph)> = Vec::with_capacity(GLYPH_COUNT);
        for code in supported_codes() {
            match rasterizer.rasterize(code) {
                Ok(glyph) => rasterized.push((code, glyph)),
                Err(err) => log::warn!("skipping glyph: {err}"),
            }
        }

        let layout = AtlasLayout::plan(
            rasterized.iter().map(|(code, g)| (*code, g.width, g.height)),
            config.max_row_width,
        );
        log::info!(
            "planned {}x{} atlas for {} glyphs at {}px",
            layout.width,
            layout.height,
            layout.placements.len(),
            config.pixel_height
        );

        let texture = backend.allocate_texture(layout.width, layout.height)?;

        let mut metrics = GlyphMetricsTable::default();
        let atlas_width = layout.width.max(1) as f32;
        let atlas_height = layout.height.max(1) as f32;

        debug_assert_eq!(rasterized.len(), layout.placements.len());
        for ((code, glyph), placement) in rasterized.iter().zip(&layout.placements) {
            // Blank glyphs (space) have a 0x0 bitmap; they only contribute
            // an advance.
            if glyph.width > 0 && glyph.height > 0 {
                backend.upload_subregion(
                    texture,
                    placement.offset_x,
                    placement.offset_y,
                    glyph.width,
                    glyph.height,
                    &glyph.bitmap,
                );
            }

            metrics.set(
                *code,
                GlyphMetrics {
                    advance: glyph.advance,
                    bearing: glyph.bearing,
                    bitmap_size: Vector2::new(glyph.width as f32, glyph.height as f32),
                    atlas_origin: Vector2::new(
                        placement.offset_x as f32 / atlas_width,
                        placement.offset_y as f32 / atlas_height,
                    ),
                    atlas_extent: Vector2::new(
                        glyph.width as f32 / atlas_width,
                        glyph.height as f32 / atlas_height,
                    ),
                },
            );
        }

        log::info!("atlas built: {} glyphs packed", layout.placements.len());

        Ok(Self {
            texture,
            metrics,
            width: layout.width,
            height: layout.height,
        })
    }

    /// Composes a batch of screen-space quads for `text`.
    ///
    /// Never fails; unmapped code points produce zero-area quads. See
    /// [`TextBatchComposer::compose`] for the coordinate conventions.
    pub fn compose_text(
        &self,
        text: &str,
        pen: Vector2<f32>,
        scale: Vector2<f32>,
        viewport: Viewport,
    ) -> TextBatch {
        TextBatchComposer::new(&self.metrics).compose(text, pen, scale, viewport)
    }

    /// Composes `text` and hands the batch to the backend in one call.
    pub fn draw_text<B: AtlasBackend>(
        &self,
        backend: &mut B,
        text: &str,
        pen: Vector2<f32>,
        scale: Vector2<f32>,
        viewport: Viewport,
    ) {
        let batch = self.compose_text(text, pen, scale, viewport);
        backend.submit_vertices(&batch);
    }

    /// The backend texture holding the packed glyphs.
    pub fn texture(&self) -> TextureHandle {
        self.texture
    }

    /// Read-only access to the per-glyph metrics.
    pub fn metrics(&self) -> &GlyphMetricsTable {
        &self.metrics
    }

    /// Atlas pixel dimensions.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}
