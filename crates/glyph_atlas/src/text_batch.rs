//! Conversion from strings to batched screen-space quads.
//!
//! Compose once per rendered string per frame: string content varies, so
//! nothing is cached between calls.

use crate::glyph_metrics::GlyphMetricsTable;
use bytemuck::{Pod, Zeroable};
use nalgebra::Vector2;

/// One text vertex: screen position plus atlas texture coordinate.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct TextVertex {
    /// Normalized device coordinates, [-1, +1] on both axes, Y up.
    pub position: [f32; 2],
    /// Normalized atlas texture coordinates.
    pub tex_coord: [f32; 2],
}

/// Pixel dimensions of the render target, used to convert pixel metrics
/// into normalized screen deltas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Viewport {
    /// Creates a viewport from pixel dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// An ordered vertex sequence ready for a single draw call.
///
/// Each character contributes 4 vertices in the fixed order bottom-left,
/// bottom-right, top-left, top-right, plus 6 indices forming two
/// counter-clockwise triangles. Drawing the indexed triangle list keeps
/// adjacent glyphs disconnected; submitting the vertex sequence as one
/// triangle strip instead would bridge neighboring quads with stray
/// triangles.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextBatch {
    /// 4 vertices per composed character.
    pub vertices: Vec<TextVertex>,
    /// 6 indices per composed character.
    pub indices: Vec<u32>,
}

impl TextBatch {
    /// Number of characters composed into this batch.
    pub fn glyph_count(&self) -> usize {
        self.vertices.len() / 4
    }

    /// True if nothing was composed.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// Converts strings into [`TextBatch`]es using a built metrics table.
pub struct TextBatchComposer<'a> {
    metrics: &'a GlyphMetricsTable,
}

impl<'a> TextBatchComposer<'a> {
    /// Creates a composer over a built metrics table.
    pub fn new(metrics: &'a GlyphMetricsTable) -> Self {
        Self { metrics }
    }

    /// Lays out `text` starting at `pen`, in normalized device coordinates.
    ///
    /// `scale` multiplies glyph geometry per axis. The pen advance is not
    /// scaled: advances come straight from the font's pixel metrics, so two
    /// strings drawn at different scales from the same pen stay aligned.
    ///
    /// Texture coordinates are vertically flipped relative to screen
    /// coordinates: the screen-bottom vertices carry the larger T value,
    /// because the bitmap's top-left row sits at the glyph's atlas origin
    /// while the backend's texture origin is bottom-left.
    ///
    /// Unmapped code points compose as zero-area quads (all four corners at
    /// the pen position) and advance nothing.
    pub fn compose(
        &self,
        text: &str,
        pen: Vector2<f32>,
        scale: Vector2<f32>,
        viewport: Viewport,
    ) -> TextBatch {
        let unit_x = 2.0 / viewport.width as f32;
        let unit_y = 2.0 / viewport.height as f32;

        let mut pen_x = pen.x;
        let mut pen_y = pen.y;

        let mut batch = TextBatch {
            vertices: Vec::with_capacity(text.len() * 4),
            indices: Vec::with_capacity(text.len() * 6),
        };

        for code in text.chars() {
            let m = self.metrics.get(code);

            let left = pen_x - m.bearing.x * unit_x * scale.x;
            let width = m.bitmap_size.x * unit_x * scale.x;
            let top = pen_y + m.bearing.y * unit_y * scale.y;
            let height = m.bitmap_size.y * unit_y * scale.y;

            let s_left = m.atlas_origin.x;
            let s_right = m.atlas_origin.x + m.atlas_extent.x;
            let t_top = m.atlas_origin.y;
            let t_bottom = m.atlas_origin.y + m.atlas_extent.y;

            let base = batch.vertices.len() as u32;
            batch.vertices.extend_from_slice(&[
                // bottom-left
                TextVertex {
                    position: [left, top - height],
                    tex_coord: [s_left, t_bottom],
                },
                // bottom-right
                TextVertex {
                    position: [left + width, top - height],
                    tex_coord: [s_right, t_bottom],
                },
                // top-left
                TextVertex {
                    position: [left, top],
                    tex_coord: [s_left, t_top],
                },
                // top-right
                TextVertex {
                    position: [left + width, top],
                    tex_coord: [s_right, t_top],
                },
            ]);
            batch.indices.extend_from_slice(&[
                base,
                base + 1,
                base + 2,
                base + 2,
                base + 1,
                base + 3,
            ]);

            pen_x += m.advance.x * unit_x;
            pen_y += m.advance.y * unit_y;
        }

        batch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyph_metrics::{GlyphMetrics, GlyphMetricsTable};
    use approx::assert_relative_eq;

    fn table_with(entries: &[(char, GlyphMetrics)]) -> GlyphMetricsTable {
        let mut table = GlyphMetricsTable::default();
        for (code, metrics) in entries {
            table.set(*code, *metrics);
        }
        table
    }

    fn glyph(advance_x: f32, bearing: (f32, f32), size: (f32, f32)) -> GlyphMetrics {
        GlyphMetrics {
            advance: Vector2::new(advance_x, 0.0),
            bearing: Vector2::new(bearing.0, bearing.1),
            bitmap_size: Vector2::new(size.0, size.1),
            atlas_origin: Vector2::new(0.25, 0.5),
            atlas_extent: Vector2::new(0.1, 0.2),
        }
    }

    fn unit() -> Vector2<f32> {
        Vector2::new(1.0, 1.0)
    }

    #[test]
    fn empty_string_composes_nothing() {
        let table = GlyphMetricsTable::default();
        let composer = TextBatchComposer::new(&table);

        let batch = composer.compose("", Vector2::zeros(), unit(), Viewport::new(500, 500));

        assert!(batch.is_empty());
        assert!(batch.indices.is_empty());
    }

    #[test]
    fn four_vertices_per_character_in_corner_order() {
        let table = table_with(&[('A', glyph(10.0, (0.0, 20.0), (10.0, 20.0)))]);
        let composer = TextBatchComposer::new(&table);

        let batch = composer.compose("AAA", Vector2::zeros(), unit(), Viewport::new(500, 500));

        assert_eq!(batch.vertices.len(), 12);
        assert_eq!(batch.indices.len(), 18);
        assert_eq!(batch.glyph_count(), 3);

        // First glyph at pen (0, 0), viewport units 2/500 = 0.004.
        let v = &batch.vertices[0..4];
        let width = 10.0 * 0.004;
        let top = 20.0 * 0.004;
        assert_relative_eq!(v[0].position[0], 0.0); // bottom-left
        assert_relative_eq!(v[0].position[1], 0.0);
        assert_relative_eq!(v[1].position[0], width); // bottom-right
        assert_relative_eq!(v[1].position[1], 0.0);
        assert_relative_eq!(v[2].position[0], 0.0); // top-left
        assert_relative_eq!(v[2].position[1], top);
        assert_relative_eq!(v[3].position[0], width); // top-right
        assert_relative_eq!(v[3].position[1], top);
    }

    #[test]
    fn screen_bottom_carries_the_larger_t() {
        let table = table_with(&[('A', glyph(10.0, (0.0, 20.0), (10.0, 20.0)))]);
        let composer = TextBatchComposer::new(&table);

        let batch = composer.compose("A", Vector2::zeros(), unit(), Viewport::new(500, 500));

        let v = &batch.vertices;
        // Bottom-left and bottom-right sample origin + extent.
        assert_relative_eq!(v[0].tex_coord[1], 0.7, epsilon = 1e-6);
        assert_relative_eq!(v[1].tex_coord[1], 0.7, epsilon = 1e-6);
        // Top-left and top-right sample the origin row.
        assert_relative_eq!(v[2].tex_coord[1], 0.5);
        assert_relative_eq!(v[3].tex_coord[1], 0.5);
        // S spans origin..origin + extent left to right.
        assert_relative_eq!(v[0].tex_coord[0], 0.25);
        assert_relative_eq!(v[1].tex_coord[0], 0.35, epsilon = 1e-6);
    }

    #[test]
    fn pen_advances_by_unscaled_pixel_advance() {
        let table = table_with(&[
            ('A', glyph(10.0, (0.0, 20.0), (10.0, 20.0))),
            ('B', glyph(12.0, (0.0, 20.0), (10.0, 20.0))),
        ]);
        let composer = TextBatchComposer::new(&table);
        let pen = Vector2::new(-0.5, 0.1);

        // advance 10px at a 500px viewport: unit_x = 0.004, delta = 0.04,
        // independent of the 3x user scale.
        let batch = composer.compose("AB", pen, Vector2::new(3.0, 3.0), Viewport::new(500, 500));

        let b_left = batch.vertices[4].position[0];
        assert_relative_eq!(b_left, pen.x + 0.04, epsilon = 1e-6);
    }

    #[test]
    fn unmapped_code_composes_a_zero_area_quad() {
        let table = table_with(&[('A', glyph(10.0, (0.0, 20.0), (10.0, 20.0)))]);
        let composer = TextBatchComposer::new(&table);
        let pen = Vector2::new(0.25, -0.25);

        let batch = composer.compose("é", pen, unit(), Viewport::new(500, 500));

        assert_eq!(batch.vertices.len(), 4);
        for v in &batch.vertices {
            assert_relative_eq!(v.position[0], pen.x);
            assert_relative_eq!(v.position[1], pen.y);
        }
    }

    #[test]
    fn failed_code_between_glyphs_does_not_move_the_pen() {
        let table = table_with(&[('A', glyph(10.0, (0.0, 20.0), (10.0, 20.0)))]);
        let composer = TextBatchComposer::new(&table);

        let batch = composer.compose("A\u{7e}A", Vector2::zeros(), unit(), Viewport::new(500, 500));

        // '~' was never loaded: zero advance, so the third glyph sits one
        // advance after the first.
        let third_left = batch.vertices[8].position[0];
        assert_relative_eq!(third_left, 0.04, epsilon = 1e-6);
    }

    #[test]
    fn bearing_shifts_the_quad_left_edge() {
        let table = table_with(&[('A', glyph(10.0, (2.0, 20.0), (10.0, 20.0)))]);
        let composer = TextBatchComposer::new(&table);

        let batch = composer.compose("A", Vector2::zeros(), unit(), Viewport::new(500, 500));

        // left = pen_x - bearing.x * unit_x * scale.x
        assert_relative_eq!(batch.vertices[0].position[0], -2.0 * 0.004);
    }

    #[test]
    fn indices_stay_within_their_glyph() {
        let table = table_with(&[('A', glyph(10.0, (0.0, 20.0), (10.0, 20.0)))]);
        let composer = TextBatchComposer::new(&table);

        let batch = composer.compose("AA", Vector2::zeros(), unit(), Viewport::new(500, 500));

        assert_eq!(batch.indices[0..6], [0, 1, 2, 2, 1, 3]);
        assert_eq!(batch.indices[6..12], [4, 5, 6, 6, 5, 7]);
    }
}
