//! Clipping triangles against the raster viewport `[0, W] x [0, H]`.
//!
//! The clipped region of a triangle is bounded by three kinds of points:
//! viewport corners that fall inside the triangle, crossings of triangle
//! edges with viewport edges, and triangle vertices already inside the
//! viewport. The first two form the boundary set; an empty boundary set
//! means the triangle and the viewport do not meet (unless the triangle is
//! entirely inside, which is checked first).

use super::triangle::Triangle;
use crate::math::ScreenPoint;

/// Viewport corners in boundary order: (0,0), (0,H), (W,H), (W,0).
fn viewport_corners(width: i32, height: i32) -> [ScreenPoint; 4] {
    [
        ScreenPoint::new(0, 0),
        ScreenPoint::new(0, height),
        ScreenPoint::new(width, height),
        ScreenPoint::new(width, 0),
    ]
}

/// 2D cross product of (a - b) and (p - b), sign tells the side of edge b→a.
///
/// Differences of two `i32`s need 33 bits, so the products need `i128`.
fn side(p: ScreenPoint, a: ScreenPoint, b: ScreenPoint) -> i128 {
    (p.x as i128 - b.x as i128) * (a.y as i128 - b.y as i128)
        - (a.x as i128 - b.x as i128) * (p.y as i128 - b.y as i128)
}

/// True when `p` is on the same side of all three edges. Points on an edge
/// count as inside. A zero-area triangle contains nothing.
pub(crate) fn point_in_triangle(
    p: ScreenPoint,
    a: ScreenPoint,
    b: ScreenPoint,
    c: ScreenPoint,
) -> bool {
    let d1 = side(p, a, b);
    let d2 = side(p, b, c);
    let d3 = side(p, c, a);

    if d1 == 0 && d2 == 0 && d3 == 0 {
        return false;
    }
    let has_negative = d1 < 0 || d2 < 0 || d3 < 0;
    let has_positive = d1 > 0 || d2 > 0 || d3 > 0;
    !(has_negative && has_positive)
}

/// Intersection of segments p1-p2 and p3-p4, truncated to integers.
///
/// Parallel segments (zero determinant) and crossings outside either
/// segment's bounding box give `None`.
pub(crate) fn segment_intersection(
    p1: ScreenPoint,
    p2: ScreenPoint,
    p3: ScreenPoint,
    p4: ScreenPoint,
) -> Option<ScreenPoint> {
    let (x1, y1) = (p1.x as f64, p1.y as f64);
    let (x2, y2) = (p2.x as f64, p2.y as f64);
    let (x3, y3) = (p3.x as f64, p3.y as f64);
    let (x4, y4) = (p4.x as f64, p4.y as f64);

    let d = (x1 - x2) * (y3 - y4) - (y1 - y2) * (x3 - x4);
    if d == 0.0 {
        return None;
    }

    let a = x1 * y2 - y1 * x2;
    let b = x3 * y4 - y3 * x4;
    let xi = ((x3 - x4) * a - (x1 - x2) * b) / d;
    let yi = ((y3 - y4) * a - (y1 - y2) * b) / d;

    let within = |v: f64, lo: f64, hi: f64| v >= lo.min(hi) && v <= lo.max(hi);
    if !(within(xi, x1, x2) && within(xi, x3, x4) && within(yi, y1, y2) && within(yi, y3, y4)) {
        return None;
    }
    Some(ScreenPoint::new(xi as i32, yi as i32))
}

fn inside_viewport(p: ScreenPoint, width: i32, height: i32) -> bool {
    (0..=width).contains(&p.x) && (0..=height).contains(&p.y)
}

/// Sorts the points of a convex polygon by angle around their centroid.
fn order_around_centroid(points: &mut [ScreenPoint]) {
    let n = points.len() as f64;
    let cx = points.iter().map(|p| p.x as f64).sum::<f64>() / n;
    let cy = points.iter().map(|p| p.y as f64).sum::<f64>() / n;
    points.sort_by(|a, b| {
        let angle_a = (a.y as f64 - cy).atan2(a.x as f64 - cx);
        let angle_b = (b.y as f64 - cy).atan2(b.x as f64 - cx);
        angle_a.total_cmp(&angle_b)
    });
}

impl Triangle {
    /// True when the vertices are coincident or collinear.
    pub fn is_degenerate(&self) -> bool {
        let [a, b, c] = self.points();
        side(c, a, b) == 0
    }

    /// Contained viewport corners followed by edge/viewport crossings.
    ///
    /// A crossing that lands exactly on a corner already counted as
    /// contained is not added again.
    pub fn viewport_boundary(&self, width: u32, height: u32) -> Vec<ScreenPoint> {
        let corners = viewport_corners(width as i32, height as i32);
        let [a, b, c] = self.points();

        let contained: Vec<ScreenPoint> = corners
            .iter()
            .copied()
            .filter(|&corner| point_in_triangle(corner, a, b, c))
            .collect();

        let mut boundary = contained.clone();
        let edges = [a, b, c];
        for i in 0..3 {
            for j in 0..4 {
                let hit = segment_intersection(
                    edges[i],
                    edges[(i + 1) % 3],
                    corners[j],
                    corners[(j + 1) % 4],
                );
                if let Some(point) = hit {
                    if !contained.contains(&point) {
                        boundary.push(point);
                    }
                }
            }
        }
        boundary
    }

    /// The part of this triangle inside the viewport, as triangles that keep
    /// this one's color and light coefficient. Degenerate triangles cover no
    /// pixels and clip to nothing.
    pub fn clip_to_viewport(&self, width: u32, height: u32) -> Vec<Triangle> {
        if self.is_degenerate() {
            return Vec::new();
        }
        let (w, h) = (width as i32, height as i32);
        let vertices = self.points();
        if vertices.iter().all(|&p| inside_viewport(p, w, h)) {
            return vec![*self];
        }

        let boundary = self.viewport_boundary(width, height);
        if boundary.is_empty() {
            return Vec::new();
        }

        let mut polygon: Vec<ScreenPoint> = vertices
            .iter()
            .copied()
            .filter(|&p| inside_viewport(p, w, h))
            .collect();
        for point in boundary {
            if !polygon.contains(&point) {
                polygon.push(point);
            }
        }
        if polygon.len() < 3 {
            return Vec::new();
        }

        order_around_centroid(&mut polygon);
        (1..polygon.len() - 1)
            .map(|i| self.with_points([polygon[0], polygon[i], polygon[i + 1]]))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i32, y: i32) -> ScreenPoint {
        ScreenPoint::new(x, y)
    }

    fn tri(a: (i32, i32), b: (i32, i32), c: (i32, i32)) -> Triangle {
        Triangle::from_coords(a, b, c, 1.0, [255, 255, 255])
    }

    #[test]
    fn crossing_segments_meet() {
        let hit = segment_intersection(p(0, 0), p(10, 10), p(0, 10), p(10, 0));
        assert_eq!(hit, Some(p(5, 5)));
    }

    #[test]
    fn parallel_segments_do_not_meet() {
        assert_eq!(segment_intersection(p(0, 0), p(10, 0), p(0, 5), p(10, 5)), None);
        // Collinear is parallel too.
        assert_eq!(segment_intersection(p(0, 0), p(10, 0), p(5, 0), p(20, 0)), None);
    }

    #[test]
    fn crossing_beyond_a_segment_is_rejected() {
        assert_eq!(segment_intersection(p(0, 0), p(2, 2), p(0, 10), p(10, 0)), None);
    }

    #[test]
    fn intersection_truncates_toward_zero() {
        let hit = segment_intersection(p(0, 0), p(3, 1), p(1, -5), p(1, 5));
        // Exact crossing is (1, 0.333..).
        assert_eq!(hit, Some(p(1, 0)));
    }

    #[test]
    fn point_in_triangle_is_winding_independent() {
        let (a, b, c) = (p(0, 0), p(10, 0), p(0, 10));
        assert!(point_in_triangle(p(2, 2), a, b, c));
        assert!(point_in_triangle(p(2, 2), a, c, b));
        assert!(!point_in_triangle(p(8, 8), a, b, c));
        // On an edge.
        assert!(point_in_triangle(p(5, 0), a, b, c));
    }

    #[test]
    fn fully_outside_has_empty_boundary() {
        let t = tri((20, 20), (30, 20), (25, 30));
        assert!(t.viewport_boundary(10, 10).is_empty());
        assert!(t.clip_to_viewport(10, 10).is_empty());
    }

    #[test]
    fn coincident_vertices_contain_no_corner() {
        let t = tri((20, 20), (20, 20), (20, 20));
        assert!(t.is_degenerate());
        assert!(!point_in_triangle(p(0, 0), p(20, 20), p(20, 20), p(20, 20)));
        assert!(t.viewport_boundary(10, 10).is_empty());
        assert!(t.clip_to_viewport(10, 10).is_empty());
    }

    #[test]
    fn collinear_triangle_on_a_corner_diagonal_is_outside() {
        // The line y = x runs through corners (0,0) and (10,10).
        let t = tri((20, 20), (30, 30), (40, 40));
        assert!(t.is_degenerate());
        assert!(t.viewport_boundary(10, 10).is_empty());
        assert!(t.clip_to_viewport(10, 10).is_empty());
    }

    #[test]
    fn degenerate_triangle_inside_the_viewport_clips_to_nothing() {
        assert!(tri((1, 1), (5, 5), (9, 9)).clip_to_viewport(10, 10).is_empty());
    }

    #[test]
    fn extreme_coordinates_do_not_overflow() {
        let t = tri((i32::MIN, i32::MIN), (i32::MAX, i32::MAX), (i32::MIN, i32::MAX));
        assert!(!t.is_degenerate());

        let boundary = t.viewport_boundary(10, 10);
        assert_eq!(boundary, vec![p(0, 0), p(0, 10), p(10, 10)]);
    }

    #[test]
    fn fully_inside_is_kept_whole() {
        let t = tri((1, 1), (8, 2), (4, 9));
        assert_eq!(t.clip_to_viewport(10, 10), vec![t]);
    }

    #[test]
    fn contained_corner_is_not_counted_again_as_a_crossing() {
        // Edge (-10,-10)→(20,20) runs through corners (0,0) and (10,10).
        let t = tri((-10, -10), (20, 20), (20, -10));
        let boundary = t.viewport_boundary(10, 10);

        assert_eq!(boundary, vec![p(0, 0), p(10, 10), p(10, 0)]);
    }

    #[test]
    fn covering_triangle_clips_to_the_viewport_rectangle() {
        let t = tri((-50, -50), (100, -50), (-50, 100));
        let pieces = t.clip_to_viewport(10, 10);

        assert_eq!(pieces.len(), 2);
        for piece in &pieces {
            assert!(piece
                .points()
                .iter()
                .all(|&v| inside_viewport(v, 10, 10)));
            assert_eq!(piece.base_color(), t.base_color());
        }
    }

    #[test]
    fn partially_visible_triangle_keeps_its_inside_vertex() {
        let t = tri((5, 5), (20, 5), (5, 20));
        let pieces = t.clip_to_viewport(10, 10);

        assert!(!pieces.is_empty());
        assert!(pieces.iter().any(|piece| piece.points().contains(&p(5, 5))));
        assert!(pieces
            .iter()
            .flat_map(|piece| piece.points())
            .all(|v| inside_viewport(v, 10, 10)));
    }
}
