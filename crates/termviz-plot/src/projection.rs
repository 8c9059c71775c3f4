//! 3D wireframes on a character grid.
//!
//! The pipeline is the classic one, done per vertex:
//!
//! ```text
//! Vec3 ──rotate(axis, degrees)──▶ Vec3 ──Projection::project──▶ Point2
//!                                                                  │
//!                          clip to interior, Bresenham ◀───────────┘
//! ```
//!
//! Projection maps a rotated point to continuous screen coordinates:
//!
//! ```text
//! screen = (p · focal_length / (p.z + distance_offset)) · scale + center
//! ```
//!
//! Points on or behind the camera plane (`p.z + distance_offset ≤ ε`) have no
//! image; [`Projection::project`] returns `None` for them and wireframe edges
//! touching such a point are skipped. Lines are clipped to the interior
//! before rasterizing, so the cost of a line never exceeds the window size
//! however far off-screen its endpoints land.

use termviz_term::color::Color;
use termviz_term::window::Window;
use termviz_term::{Error, Result};

/// Smallest `z + distance_offset` that still projects.
pub const NEAR_EPSILON: f64 = 1e-6;

// ─── Vec3 ────────────────────────────────────────────────────────────────────

/// Rotation axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// A point in model space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Rotate about `axis` by `degrees` (right-handed, counter-clockwise when
    /// looking down the axis toward the origin).
    #[must_use]
    pub fn rotate(self, axis: Axis, degrees: f64) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        let Self { x, y, z } = self;
        match axis {
            Axis::X => Self::new(x, y * cos - z * sin, y * sin + z * cos),
            Axis::Y => Self::new(x * cos + z * sin, y, -x * sin + z * cos),
            Axis::Z => Self::new(x * cos - y * sin, x * sin + y * cos, z),
        }
    }

    /// Apply several rotations in order.
    #[must_use]
    pub fn rotate_all(self, rotations: &[(Axis, f64)]) -> Self {
        rotations
            .iter()
            .fold(self, |v, &(axis, degrees)| v.rotate(axis, degrees))
    }
}

// ─── Projection ──────────────────────────────────────────────────────────────

/// A point in continuous interior coordinates: `x` is the column, `y` the
/// row, both 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Perspective projection parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Distance from the eye to the image plane.
    pub focal_length: f64,
    /// How far in front of the eye the model's origin sits.
    pub distance_offset: f64,
    /// Per-axis scale from projected units to cells. Terminal cells are
    /// roughly twice as tall as wide, so `x` usually gets about twice `y`.
    pub scale: (f64, f64),
    /// Interior position of the projected origin.
    pub center: (f64, f64),
}

impl Projection {
    /// Camera centered on a window's interior, with the scale chosen so a
    /// unit-radius model at the origin fills most of the shorter side.
    #[must_use]
    pub fn fit(win: &Window, focal_length: f64, distance_offset: f64) -> Self {
        let cols = win.cols() as f64;
        let rows = win.rows() as f64;
        let half = (rows / 2.0).min(cols / 4.0) * 0.8;
        // A unit offset at z = 0 projects to focal / distance units.
        let unit = focal_length / distance_offset;
        let scale_y = if unit.abs() > NEAR_EPSILON { half / unit } else { 1.0 };
        Self {
            focal_length,
            distance_offset,
            scale: (scale_y * 2.0, scale_y),
            center: ((cols - 1.0) / 2.0, (rows - 1.0) / 2.0),
        }
    }

    /// Project a (rotated) point. `None` if it lies on or behind the
    /// camera plane.
    #[must_use]
    pub fn project(&self, p: Vec3) -> Option<Point2> {
        let depth = p.z + self.distance_offset;
        if depth <= NEAR_EPSILON || !depth.is_finite() {
            return None;
        }
        let k = self.focal_length / depth;
        Some(Point2::new(
            p.x * k * self.scale.0 + self.center.0,
            p.y * k * self.scale.1 + self.center.1,
        ))
    }
}

// ─── Lines ───────────────────────────────────────────────────────────────────

/// Draw a line from `a` to `b` with Bresenham's algorithm, clipped to the
/// interior. Returns the number of cells written (zero when the segment
/// misses the interior entirely).
///
/// # Errors
///
/// Returns [`Error::Output`] if a naive-mode write fails.
pub fn draw_line(win: &mut Window, a: Point2, b: Point2, ch: char, color: Color) -> Result<usize> {
    let max_x = win.cols() as f64 - 1.0;
    let max_y = win.rows() as f64 - 1.0;
    let Some((a, b)) = clip(a, b, max_x, max_y) else {
        return Ok(0);
    };

    let (x1, y1) = (a.x.round() as i64, a.y.round() as i64);
    let (x2, y2) = (b.x.round() as i64, b.y.round() as i64);

    let dx = (x2 - x1).abs();
    let dy = -(y2 - y1).abs();
    let sx = if x1 < x2 { 1 } else { -1 };
    let sy = if y1 < y2 { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = (x1, y1);

    let mut written = 0;
    loop {
        win.set(y as usize, x as usize, ch, color)?;
        written += 1;

        if x == x2 && y == y2 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
    Ok(written)
}

/// Edge of the clip box that cut a segment end.
#[derive(Debug, Clone, Copy)]
enum Edge {
    X(f64),
    Y(f64),
}

/// Liang–Barsky clip of segment `a → b` to `[0, max_x] × [0, max_y]`.
///
/// Deltas come from halved coordinates, so they stay finite for any finite
/// endpoints. A clipped end is pinned exactly onto the edge that cut it and
/// only its other coordinate is interpolated.
fn clip(a: Point2, b: Point2, max_x: f64, max_y: f64) -> Option<(Point2, Point2)> {
    if ![a.x, a.y, b.x, b.y].iter().all(|v| v.is_finite()) {
        return None;
    }

    let hx = b.x.mul_add(0.5, -(a.x * 0.5));
    let hy = b.y.mul_add(0.5, -(a.y * 0.5));
    let mut enter: (f64, Option<Edge>) = (0.0, None);
    let mut leave: (f64, Option<Edge>) = (1.0, None);

    let bounds = [
        (-hx, a.x * 0.5, Edge::X(0.0)),
        (hx, max_x.mul_add(0.5, -(a.x * 0.5)), Edge::X(max_x)),
        (-hy, a.y * 0.5, Edge::Y(0.0)),
        (hy, max_y.mul_add(0.5, -(a.y * 0.5)), Edge::Y(max_y)),
    ];
    for (p, q, edge) in bounds {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            if t > enter.0 {
                enter = (t, Some(edge));
            }
        } else if t < leave.0 {
            leave = (t, Some(edge));
        }
    }
    if enter.0 > leave.0 {
        return None;
    }

    // `a + 2t·h`, added in two steps so no intermediate overflows.
    let at = |(t, edge): (f64, Option<Edge>), end: Point2| {
        let p = match edge {
            None => end,
            Some(Edge::X(x)) => Point2::new(x, t.mul_add(hy, t.mul_add(hy, a.y))),
            Some(Edge::Y(y)) => Point2::new(t.mul_add(hx, t.mul_add(hx, a.x)), y),
        };
        Point2::new(p.x.clamp(0.0, max_x), p.y.clamp(0.0, max_y))
    };
    Some((at(enter, a), at(leave, b)))
}

// ─── Wireframe ───────────────────────────────────────────────────────────────

/// Vertices plus the edges joining them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Wireframe {
    pub vertices: Vec<Vec3>,
    pub edges: Vec<(usize, usize)>,
}

impl Wireframe {
    /// A cube of side `2 · half` centered on the origin.
    #[must_use]
    pub fn cube(half: f64) -> Self {
        let vertices = (0..8)
            .map(|i| {
                let pick = |bit: u32| if i & (1 << bit) == 0 { -half } else { half };
                Vec3::new(pick(0), pick(1), pick(2))
            })
            .collect();

        // Vertices differing in exactly one coordinate bit.
        let mut edges = Vec::with_capacity(12);
        for a in 0..8_usize {
            for bit in 0..3 {
                let b = a ^ (1 << bit);
                if a < b {
                    edges.push((a, b));
                }
            }
        }
        Self { vertices, edges }
    }

    /// Rotate every vertex, project, and draw each edge whose endpoints both
    /// project. Returns the number of cells written.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidArgument`] if an edge names a missing vertex.
    ///   Nothing is drawn.
    /// - [`Error::Output`] if a naive-mode write fails.
    pub fn draw(
        &self,
        win: &mut Window,
        projection: &Projection,
        rotations: &[(Axis, f64)],
        ch: char,
        color: Color,
    ) -> Result<usize> {
        if let Some(&(a, b)) = self
            .edges
            .iter()
            .find(|&&(a, b)| a >= self.vertices.len() || b >= self.vertices.len())
        {
            return Err(Error::InvalidArgument(format!(
                "edge ({a}, {b}) with only {} vertices",
                self.vertices.len()
            )));
        }

        let projected: Vec<Option<Point2>> = self
            .vertices
            .iter()
            .map(|v| projection.project(v.rotate_all(rotations)))
            .collect();

        let mut written = 0;
        let mut skipped = 0;
        for &(a, b) in &self.edges {
            match (projected[a], projected[b]) {
                (Some(pa), Some(pb)) => written += draw_line(win, pa, pb, ch, color)?,
                _ => skipped += 1,
            }
        }
        if skipped > 0 {
            tracing::trace!(skipped, "edges behind the camera");
        }
        Ok(written)
    }
}
