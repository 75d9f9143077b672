//! # Glyph Atlas
//!
//! Packs variably-sized glyph bitmaps into a single texture atlas and turns
//! strings into batched screen-space quads ready for one draw call.
//!
//! The crate is backend-agnostic: glyph bitmaps come from a
//! [`GlyphRasterizer`] (a [fontdue](https://docs.rs/fontdue) adapter is
//! provided) and GPU resources are managed through an injected
//! [`AtlasBackend`]. The core computes *what* to allocate, upload, and draw;
//! the actual graphics calls stay on the caller's side of the trait.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use glyph_atlas::{
//!     AllocationError, AtlasBackend, AtlasConfig, FontAtlas, FontdueRasterizer,
//!     TextBatch, TextureHandle, Viewport,
//! };
//! use nalgebra::Vector2;
//!
//! struct NullBackend;
//!
//! impl AtlasBackend for NullBackend {
//!     fn allocate_texture(
//!         &mut self,
//!         _width: u32,
//!         _height: u32,
//!     ) -> Result<TextureHandle, AllocationError> {
//!         Ok(TextureHandle(0))
//!     }
//!
//!     fn upload_subregion(
//!         &mut self,
//!         _texture: TextureHandle,
//!         _x: u32,
//!         _y: u32,
//!         _width: u32,
//!         _height: u32,
//!         _texels: &[u8],
//!     ) {
//!     }
//!
//!     fn submit_vertices(&mut self, _batch: &TextBatch) {}
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let font_bytes = std::fs::read("resources/fonts/default.ttf")?;
//!     let mut rasterizer = FontdueRasterizer::from_bytes(&font_bytes, 48.0)?;
//!     let mut backend = NullBackend;
//!
//!     let atlas = FontAtlas::build(&mut rasterizer, &mut backend, &AtlasConfig::default())?;
//!     let batch = atlas.compose_text(
//!         "Hello",
//!         Vector2::new(-0.9, 0.0),
//!         Vector2::new(1.0, 1.0),
//!         Viewport::new(1280, 720),
//!     );
//!     backend.submit_vertices(&batch);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

pub mod atlas_cache;
pub mod atlas_layout;
pub mod backend;
pub mod font_atlas;
pub mod glyph_metrics;
pub mod raster;
pub mod text_batch;

pub use atlas_cache::AtlasCache;
pub use atlas_layout::{AtlasLayout, GlyphPlacement, GUTTER};
pub use backend::{AllocationError, AtlasBackend, TextureHandle};
pub use font_atlas::{AtlasConfig, AtlasError, AtlasResult, FontAtlas};
pub use glyph_metrics::{
    supported_codes, GlyphMetrics, GlyphMetricsTable, CODE_LIMIT, FIRST_CODE, GLYPH_COUNT,
};
pub use raster::{FontdueRasterizer, GlyphRasterizer, RasterizeError, RasterizedGlyph};
pub use text_batch::{TextBatch, TextBatchComposer, TextVertex, Viewport};

#[cfg(test)]
pub(crate) mod test_util;
