//! Screen-space triangles and their scanline spans.

use std::fmt;

use crate::math::ScreenPoint;

/// One row of a rasterized triangle: pixels `x_left..x_right` on row `y`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span {
    pub x_left: i32,
    pub x_right: i32,
    pub y: i32,
}

/// A flat-shaded triangle with integer raster vertices.
///
/// The light coefficient is expected in [0, 1] but is not enforced here.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    points: [ScreenPoint; 3],
    light_coefficient: f32,
    color: [u8; 3],
}

impl Triangle {
    pub fn new(points: [ScreenPoint; 3], light_coefficient: f32, color: [u8; 3]) -> Self {
        Self {
            points,
            light_coefficient,
            color,
        }
    }

    pub fn from_coords(
        (x1, y1): (i32, i32),
        (x2, y2): (i32, i32),
        (x3, y3): (i32, i32),
        light_coefficient: f32,
        color: [u8; 3],
    ) -> Self {
        Self::new(
            [
                ScreenPoint::new(x1, y1),
                ScreenPoint::new(x2, y2),
                ScreenPoint::new(x3, y3),
            ],
            light_coefficient,
            color,
        )
    }

    pub fn points(&self) -> [ScreenPoint; 3] {
        self.points
    }

    pub fn light_coefficient(&self) -> f32 {
        self.light_coefficient
    }

    pub fn set_light_coefficient(&mut self, light_coefficient: f32) {
        self.light_coefficient = light_coefficient;
    }

    /// Unshaded base color.
    pub fn base_color(&self) -> [u8; 3] {
        self.color
    }

    /// Same shading, different vertices.
    pub(crate) fn with_points(&self, points: [ScreenPoint; 3]) -> Self {
        Self { points, ..*self }
    }

    /// Reorders the vertices so that `y1 <= y2 <= y3`.
    ///
    /// Compare-and-swap (1,2), then (1,3), then (2,3); a swap happens only
    /// when the first `y` is strictly greater, so ties keep their order.
    pub fn normalize(&mut self) {
        let p = &mut self.points;
        if p[0].y > p[1].y {
            p.swap(0, 1);
        }
        if p[0].y > p[2].y {
            p.swap(0, 2);
        }
        if p[1].y > p[2].y {
            p.swap(1, 2);
        }
    }

    pub fn is_normalized(&self) -> bool {
        let [a, b, c] = self.points;
        a.y <= b.y && b.y <= c.y
    }

    /// Left/right bounds for every row from `y1` up to, not including, `y3`.
    ///
    /// Rows above the middle vertex interpolate along edges (1→2) and (1→3),
    /// the rest along (2→3) and (1→3), using integer similar-triangle ratios.
    /// Works on a normalized copy; `self` is left as it is.
    pub fn spans(&self) -> Vec<Span> {
        let mut sorted = *self;
        sorted.normalize();
        let [p1, p2, p3] = sorted.points;

        let rows = (p3.y as i64 - p1.y as i64).max(0) as usize;
        let mut spans = Vec::with_capacity(rows);

        for y in p1.y..p2.y {
            if let Some(span) = span_between(p1, p2, p1, p3, y) {
                spans.push(span);
            }
        }
        for y in p2.y..p3.y {
            if let Some(span) = span_between(p2, p3, p1, p3, y) {
                spans.push(span);
            }
        }
        spans
    }

    /// Shaded channels before conversion to bytes: base × light coefficient.
    pub fn shade(&self) -> [f32; 3] {
        self.color.map(|c| c as f32 * self.light_coefficient)
    }

    /// Shaded RGB bytes, truncated toward zero.
    ///
    /// Channels are not re-clamped: a coefficient outside [0, 1] produces
    /// out-of-range values, which the float-to-byte conversion saturates.
    pub fn pixel_color(&self) -> [u8; 3] {
        self.shade().map(|c| c as u8)
    }
}

/// x where edge `a→b` crosses row `y`; `None` for a horizontal edge.
fn edge_x(a: ScreenPoint, b: ScreenPoint, y: i32) -> Option<i32> {
    let dy = b.y as i128 - a.y as i128;
    if dy == 0 {
        return None;
    }
    let x = a.x as i128 + (b.x as i128 - a.x as i128) * (y as i128 - a.y as i128) / dy;
    Some(x as i32)
}

fn span_between(
    a1: ScreenPoint,
    b1: ScreenPoint,
    a2: ScreenPoint,
    b2: ScreenPoint,
    y: i32,
) -> Option<Span> {
    let x1 = edge_x(a1, b1, y)?;
    let x2 = edge_x(a2, b2, y)?;
    Some(Span {
        x_left: x1.min(x2),
        x_right: x1.max(x2),
        y,
    })
}

impl fmt::Display for Triangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = self.points;
        write!(f, "{a}, {b}, {c}")
    }
}
