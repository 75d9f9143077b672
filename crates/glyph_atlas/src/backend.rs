//! Graphics backend boundary.
//!
//! The core computes what to allocate, upload, and draw; an injected
//! [`AtlasBackend`] performs the actual graphics calls. There is no ambient
//! registry to configure - every resource the atlas touches arrives through
//! this trait.

use crate::text_batch::TextBatch;

/// Opaque identifier for a backend texture resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// Texture or buffer creation failed.
///
/// Fatal to atlas construction: the build aborts and no partial atlas is
/// left usable.
#[derive(Debug, Clone, thiserror::Error)]
#[error("allocation failed: {0}")]
pub struct AllocationError(pub String);

/// GPU-facing operations the atlas core depends on.
///
/// Glyph texels are single-channel coverage values, 1 byte per pixel, so
/// `allocate_texture` is expected to pick a single-channel (grayscale or
/// alpha) texel format.
pub trait AtlasBackend {
    /// Allocates texture storage of the given pixel dimensions.
    fn allocate_texture(&mut self, width: u32, height: u32)
        -> Result<TextureHandle, AllocationError>;

    /// Uploads a row-major single-channel bitmap into a texture subregion.
    ///
    /// `texels` holds `width * height` bytes; `(x, y)` is the subregion's
    /// top-left corner in texture pixels.
    fn upload_subregion(
        &mut self,
        texture: TextureHandle,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        texels: &[u8],
    );

    /// Hands a composed vertex batch to the backend for drawing.
    fn submit_vertices(&mut self, batch: &TextBatch);
}
