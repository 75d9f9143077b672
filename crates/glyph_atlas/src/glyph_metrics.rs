//! Per-glyph metric storage.
//!
//! One [`GlyphMetricsTable`] belongs to one built atlas. It is populated
//! exactly once during construction and read-only afterwards, so sharing it
//! across render calls needs no synchronization.

use nalgebra::Vector2;

/// First character code covered by an atlas (space; earlier codes are
/// non-printable).
pub const FIRST_CODE: u32 = 32;

/// One past the last character code covered by an atlas.
pub const CODE_LIMIT: u32 = 128;

/// Number of entries in a [`GlyphMetricsTable`].
pub const GLYPH_COUNT: usize = (CODE_LIMIT - FIRST_CODE) as usize;

/// Returns every character code an atlas covers, in ascending order.
pub fn supported_codes() -> impl Iterator<Item = char> {
    (FIRST_CODE..CODE_LIMIT).map(|code| code as u8 as char)
}

/// Geometry and texture metadata for one character code.
///
/// All pixel-space fields are measured at the atlas' pixel height;
/// `atlas_origin` and `atlas_extent` are normalized to [0, 1] by the atlas
/// dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphMetrics {
    /// Pen displacement in pixels applied after drawing this glyph
    /// (`x` for horizontal text flows, `y` for vertical ones).
    pub advance: Vector2<f32>,

    /// Offset in pixels from the pen origin to the bitmap's top-left corner.
    pub bearing: Vector2<f32>,

    /// Bitmap width and height in pixels.
    pub bitmap_size: Vector2<f32>,

    /// Normalized texture-space coordinate of the glyph's top-left corner.
    pub atlas_origin: Vector2<f32>,

    /// Normalized texture-space width and height of the glyph's region.
    pub atlas_extent: Vector2<f32>,
}

impl Default for GlyphMetrics {
    fn default() -> Self {
        Self {
            advance: Vector2::zeros(),
            bearing: Vector2::zeros(),
            bitmap_size: Vector2::zeros(),
            atlas_origin: Vector2::zeros(),
            atlas_extent: Vector2::zeros(),
        }
    }
}

/// Fixed-size lookup table, one entry per supported character code.
#[derive(Debug, Clone)]
pub struct GlyphMetricsTable {
    entries: [GlyphMetrics; GLYPH_COUNT],
}

impl Default for GlyphMetricsTable {
    fn default() -> Self {
        Self {
            entries: [GlyphMetrics::default(); GLYPH_COUNT],
        }
    }
}

impl GlyphMetricsTable {
    fn index(code: char) -> Option<usize> {
        let code = code as u32;
        if (FIRST_CODE..CODE_LIMIT).contains(&code) {
            Some((code - FIRST_CODE) as usize)
        } else {
            None
        }
    }

    /// Looks up the metrics for a character code.
    ///
    /// Codes outside [`FIRST_CODE`]..[`CODE_LIMIT`], and codes whose
    /// rasterization failed during the build, return the zero entry.
    /// Composing the zero entry yields a zero-area quad, so unmapped codes
    /// render as degenerate geometry rather than crashing.
    pub fn get(&self, code: char) -> GlyphMetrics {
        Self::index(code).map_or_else(GlyphMetrics::default, |i| self.entries[i])
    }

    /// True if `code` is in range and has a non-zero entry.
    pub fn is_loaded(&self, code: char) -> bool {
        Self::index(code).is_some_and(|i| self.entries[i] != GlyphMetrics::default())
    }

    /// Records the metrics for `code`. Out-of-range codes are ignored.
    pub(crate) fn set(&mut self, code: char, metrics: GlyphMetrics) {
        if let Some(i) = Self::index(code) {
            self.entries[i] = metrics;
        }
    }
}
