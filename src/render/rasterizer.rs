//! Scanline triangle filling.
//!
//! Each triangle is clipped to the frame buffer, split into horizontal spans
//! and every span is filled with the triangle's shaded color:
//!
//! ```text
//!          p1
//!          /\          rows p1.y..p2.y: edges (1→2) and (1→3)
//!         /  \
//!     p2 /----\        rows p2.y..p3.y: edges (2→3) and (1→3)
//!        \     \
//!          \    \
//!            \___\ p3
//! ```
//!
//! Spans are half-open: a row covers `x_left..x_right`, and the last row
//! (`y = p3.y`) is not drawn. Triangles sharing an edge therefore never write
//! the same pixel twice.

use super::framebuffer::FrameBuffer;
use super::triangle::Triangle;
use crate::colors;

/// Fills triangles into a pixel buffer.
pub trait Rasterizer {
    /// Fill a triangle into the frame buffer. Returns the number of pixels written.
    fn fill_triangle(&self, triangle: &Triangle, buffer: &mut FrameBuffer<'_>) -> usize;

    /// Fill a frame's triangles in order; later triangles paint over earlier ones.
    fn draw_frame(&self, triangles: &[Triangle], buffer: &mut FrameBuffer<'_>) -> usize {
        triangles
            .iter()
            .map(|triangle| self.fill_triangle(triangle, buffer))
            .sum()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ScanlineRasterizer;

impl ScanlineRasterizer {
    pub fn new() -> Self {
        Self
    }
}

impl Rasterizer for ScanlineRasterizer {
    fn fill_triangle(&self, triangle: &Triangle, buffer: &mut FrameBuffer<'_>) -> usize {
        let color = colors::pack_rgb(triangle.pixel_color());
        let pieces = triangle.clip_to_viewport(buffer.width(), buffer.height());
        if pieces.is_empty() {
            if triangle.is_degenerate() {
                log::debug!("culled triangle {triangle}: zero area");
            } else {
                log::debug!("culled triangle {triangle}: outside the viewport");
            }
            return 0;
        }

        let mut written = 0;
        for piece in &pieces {
            for span in piece.spans() {
                written += buffer.fill_span(span.y, span.x_left, span.x_right, color);
            }
        }
        written
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: u32 = 10;
    const H: u32 = 10;

    fn tri(a: (i32, i32), b: (i32, i32), c: (i32, i32), light: f32) -> Triangle {
        Triangle::from_coords(a, b, c, light, [0, 0, 255])
    }

    #[test]
    fn outside_triangle_writes_nothing() {
        let mut buffer = vec![0u32; (W * H) as usize];
        let mut fb = FrameBuffer::new(&mut buffer, W, H);

        let written = ScanlineRasterizer.fill_triangle(&tri((20, 20), (30, 20), (25, 30), 1.0), &mut fb);

        assert_eq!(written, 0);
        assert!(buffer.iter().all(|&c| c == 0));
    }

    #[test]
    fn degenerate_triangles_write_nothing() {
        let mut buffer = vec![0u32; (W * H) as usize];
        let mut fb = FrameBuffer::new(&mut buffer, W, H);
        let coincident = tri((20, 20), (20, 20), (20, 20), 1.0);
        let collinear = tri((20, 20), (30, 30), (40, 40), 1.0);

        assert_eq!(ScanlineRasterizer.fill_triangle(&coincident, &mut fb), 0);
        assert_eq!(ScanlineRasterizer.fill_triangle(&collinear, &mut fb), 0);
        assert!(buffer.iter().all(|&c| c == 0));
    }

    #[test]
    fn extreme_coordinates_fill_the_clipped_region() {
        let mut buffer = vec![0u32; (W * H) as usize];
        let mut fb = FrameBuffer::new(&mut buffer, W, H);
        let huge = tri((i32::MIN, i32::MIN), (i32::MAX, i32::MAX), (i32::MIN, i32::MAX), 1.0);

        // Clips to (0,0)-(10,10)-(0,10): row y covers [0, y).
        let written = ScanlineRasterizer.fill_triangle(&huge, &mut fb);

        assert_eq!(written, 45);
        assert_eq!(fb.get_pixel(1, 8), Some(colors::pack_rgb([0, 0, 255])));
        assert_eq!(fb.get_pixel(8, 1), Some(0));
    }

    #[test]
    fn covering_triangle_fills_every_pixel_once() {
        let mut buffer = vec![0u32; (W * H) as usize];
        let mut fb = FrameBuffer::new(&mut buffer, W, H);

        let written =
            ScanlineRasterizer.fill_triangle(&tri((-50, -50), (100, -50), (-50, 100), 1.0), &mut fb);

        assert_eq!(written, (W * H) as usize);
        assert!(buffer.iter().all(|&c| c == colors::pack_rgb([0, 0, 255])));
    }

    #[test]
    fn fill_uses_shaded_color() {
        let mut buffer = vec![0u32; (W * H) as usize];
        let mut fb = FrameBuffer::new(&mut buffer, W, H);

        ScanlineRasterizer.fill_triangle(&tri((0, 0), (10, 0), (5, 10), 0.5), &mut fb);

        assert_eq!(fb.get_pixel(5, 5), Some(colors::pack_rgb([0, 0, 127])));
        assert_eq!(fb.get_pixel(0, 9), Some(0));
    }

    #[test]
    fn later_triangles_paint_over_earlier_ones() {
        let mut buffer = vec![0u32; (W * H) as usize];
        let mut fb = FrameBuffer::new(&mut buffer, W, H);
        let back = Triangle::from_coords((0, 0), (10, 0), (0, 10), 1.0, [255, 0, 0]);
        let front = Triangle::from_coords((0, 0), (10, 0), (0, 10), 1.0, [0, 255, 0]);

        ScanlineRasterizer.draw_frame(&[back, front], &mut fb);

        assert_eq!(fb.get_pixel(1, 1), Some(colors::pack_rgb([0, 255, 0])));
    }
}
