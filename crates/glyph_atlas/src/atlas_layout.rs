//! Row-based bin packing for the atlas texture.
//!
//! Glyphs fill rows greedily from left to right under a hard width
//! constraint. The packing wastes the space above short glyphs in a tall
//! row; that is accepted in exchange for a single linear pass.

/// Pixels of padding after each glyph so texture-coordinate rounding at
/// render time cannot bleed into the neighboring glyph.
pub const GUTTER: u32 = 1;

/// Placement of one glyph within the atlas, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphPlacement {
    /// Character code this placement belongs to.
    pub code: char,
    /// Horizontal offset of the glyph's top-left corner.
    pub offset_x: u32,
    /// Vertical offset of the glyph's top-left corner.
    pub offset_y: u32,
    /// Bitmap width.
    pub width: u32,
    /// Bitmap height.
    pub height: u32,
}

/// Atlas dimensions plus the placement of every packed glyph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AtlasLayout {
    /// Total atlas width in pixels (the widest committed row).
    pub width: u32,
    /// Total atlas height in pixels (the sum of all row heights).
    pub height: u32,
    /// One placement per supplied glyph, in supply order.
    pub placements: Vec<GlyphPlacement>,
}

impl AtlasLayout {
    /// Packs `glyphs` (code, bitmap width, bitmap height) into rows no wider
    /// than `max_row_width` pixels.
    ///
    /// Each glyph is followed by a [`GUTTER`]. A new row starts exactly when
    /// the next glyph plus its gutter would reach `max_row_width`; the row
    /// height is the tallest glyph in it.
    ///
    /// The accumulated height is not checked against any backend texture
    /// limit. A very large pixel size can therefore plan a texture taller
    /// than the backend accepts, which surfaces later as an allocation
    /// failure rather than being split across multiple textures here.
    pub fn plan<I>(glyphs: I, max_row_width: u32) -> Self
    where
        I: IntoIterator<Item = (char, u32, u32)>,
    {
        let mut layout = Self::default();
        let mut cursor_x = 0u32;
        let mut cursor_y = 0u32;
        let mut row_height = 0u32;

        for (code, width, height) in glyphs {
            if cursor_x + width + GUTTER >= max_row_width {
                // Commit the current row and start a new one below it.
                layout.width = layout.width.max(cursor_x);
                layout.height += row_height;
                cursor_y += row_height;
                cursor_x = 0;
                row_height = 0;
            }

            layout.placements.push(GlyphPlacement {
                code,
                offset_x: cursor_x,
                offset_y: cursor_y,
                width,
                height,
            });

            cursor_x += width + GUTTER;
            row_height = row_height.max(height);
        }

        // The loop leaves the last row uncommitted.
        layout.width = layout.width.max(cursor_x);
        layout.height += row_height;
        layout
    }
}
