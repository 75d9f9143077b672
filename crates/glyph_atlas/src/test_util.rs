//! Shared fakes for unit tests: a scripted rasterizer and a recording
//! backend.

use crate::backend::{AllocationError, AtlasBackend, TextureHandle};
use crate::raster::{GlyphRasterizer, RasterizeError, RasterizedGlyph};
use crate::text_batch::TextBatch;
use nalgebra::Vector2;

/// Deterministic stand-in for a font rasterizer.
pub struct ScriptedRasterizer {
    default_size: (u32, u32),
    varied: bool,
    failing: Vec<char>,
    blank: Vec<char>,
    pub advance: Vector2<f32>,
    pub pixel_heights: Vec<f32>,
}

impl ScriptedRasterizer {
    /// Every glyph gets the same bitmap size.
    pub fn uniform(width: u32, height: u32) -> Self {
        Self {
            default_size: (width, height),
            varied: false,
            failing: Vec::new(),
            blank: Vec::new(),
            advance: Vector2::new(10.0, 0.0),
            pixel_heights: Vec::new(),
        }
    }

    /// Glyph sizes vary deterministically per character code.
    pub fn varied() -> Self {
        Self {
            varied: true,
            ..Self::uniform(8, 12)
        }
    }

    /// The listed codes report a rasterization failure.
    pub fn failing_on(mut self, codes: &str) -> Self {
        self.failing.extend(codes.chars());
        self
    }

    /// The listed codes rasterize to an empty (0x0) bitmap, keeping their
    /// advance.
    pub fn blank_on(mut self, codes: &str) -> Self {
        self.blank.extend(codes.chars());
        self
    }

    /// The bitmap size `rasterize` would report for `code`.
    pub fn size_of(&self, code: char) -> (u32, u32) {
        if self.blank.contains(&code) {
            (0, 0)
        } else if self.varied {
            let code = code as u32;
            (4 + code % 17, 6 + code % 11)
        } else {
            self.default_size
        }
    }
}

impl GlyphRasterizer for ScriptedRasterizer {
    fn set_pixel_height(&mut self, pixel_height: f32) {
        self.pixel_heights.push(pixel_height);
    }

    fn rasterize(&mut self, code: char) -> Result<RasterizedGlyph, RasterizeError> {
        if self.failing.contains(&code) {
            return Err(RasterizeError {
                code,
                reason: "scripted failure".into(),
            });
        }

        let (width, height) = self.size_of(code);
        Ok(RasterizedGlyph {
            width,
            height,
            bitmap: vec![0xff; (width * height) as usize],
            advance: self.advance,
            bearing: Vector2::new(1.0, height as f32),
        })
    }
}

/// One recorded `upload_subregion` call.
pub struct Upload {
    pub texture: TextureHandle,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub texel_count: usize,
}

/// Backend fake that records every call instead of touching a GPU.
#[derive(Default)]
pub struct RecordingBackend {
    fail_allocation: bool,
    next_handle: u32,
    pub allocations: Vec<(u32, u32)>,
    pub uploads: Vec<Upload>,
    pub submitted: Vec<TextBatch>,
}

impl RecordingBackend {
    /// A backend whose allocations always fail.
    pub fn failing_allocation() -> Self {
        Self {
            fail_allocation: true,
            ..Self::default()
        }
    }
}

impl AtlasBackend for RecordingBackend {
    fn allocate_texture(
        &mut self,
        width: u32,
        height: u32,
    ) -> Result<TextureHandle, AllocationError> {
        if self.fail_allocation {
            return Err(AllocationError("scripted allocation failure".into()));
        }
        self.allocations.push((width, height));
        let handle = TextureHandle(self.next_handle);
        self.next_handle += 1;
        Ok(handle)
    }

    fn upload_subregion(
        &mut self,
        texture: TextureHandle,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        texels: &[u8],
    ) {
        self.uploads.push(Upload {
            texture,
            x,
            y,
            width,
            height,
            texel_count: texels.len(),
        });
    }

    fn submit_vertices(&mut self, batch: &TextBatch) {
        self.submitted.push(batch.clone());
    }
}
