//! Drawing operations and the coverage rasterizer
//!
//! Strokes are lowered to a small set of drawing operations which a single
//! rasterizer turns into per-pixel coverage. Surfaces decide what coverage
//! means for them (blend a highlight, or threshold to a binary mask).

use tracing::debug;

use crate::constants::{CURVE_STEP_LENGTH, MAX_CURVE_STEPS};

/// A drawing primitive in target-surface pixels
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Filled disc
    Disc { center: [f32; 2], radius: f32 },
    /// Round-capped, round-joined polyline of the given half width
    Polyline { points: Vec<[f32; 2]>, radius: f32 },
}

impl DrawOp {
    pub fn radius(&self) -> f32 {
        match self {
            DrawOp::Disc { radius, .. } | DrawOp::Polyline { radius, .. } => *radius,
        }
    }

    /// Same primitive with a different radius
    pub fn with_radius(&self, radius: f32) -> DrawOp {
        match self {
            DrawOp::Disc { center, .. } => DrawOp::Disc {
                center: *center,
                radius,
            },
            DrawOp::Polyline { points, .. } => DrawOp::Polyline {
                points: points.clone(),
                radius,
            },
        }
    }

    fn bounds(&self) -> Option<[f32; 4]> {
        let radius = self.radius();
        let points: &[[f32; 2]] = match self {
            DrawOp::Disc { center, .. } => std::slice::from_ref(center),
            DrawOp::Polyline { points, .. } => points,
        };
        let mut bounds = [f32::MAX, f32::MAX, f32::MIN, f32::MIN];
        for p in points {
            bounds[0] = bounds[0].min(p[0]);
            bounds[1] = bounds[1].min(p[1]);
            bounds[2] = bounds[2].max(p[0]);
            bounds[3] = bounds[3].max(p[1]);
        }
        if bounds[0] > bounds[2] {
            return None;
        }
        Some([
            bounds[0] - radius,
            bounds[1] - radius,
            bounds[2] + radius,
            bounds[3] + radius,
        ])
    }
}

/// Per-pixel coverage of one drawing operation, clipped to its target
#[derive(Debug, Clone)]
pub struct Coverage {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    values: Vec<f32>,
}

impl Coverage {
    /// Coverage at absolute pixel coordinates (0 outside the region)
    pub fn get(&self, x: u32, y: u32) -> f32 {
        if x < self.x || y < self.y || x >= self.x + self.width || y >= self.y + self.height {
            return 0.0;
        }
        self.values[((y - self.y) * self.width + (x - self.x)) as usize]
    }

    /// Covered pixels as `(x, y, coverage)` in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32, f32)> + '_ {
        self.values.iter().enumerate().filter_map(move |(index, &value)| {
            if value <= 0.0 {
                return None;
            }
            let index = index as u32;
            Some((self.x + index % self.width, self.y + index / self.width, value))
        })
    }

    fn set_max(&mut self, x: u32, y: u32, value: f32) {
        let index = ((y - self.y) * self.width + (x - self.x)) as usize;
        if value > self.values[index] {
            self.values[index] = value;
        }
    }
}

/// Rasterize an operation onto a `width` x `height` target.
///
/// Coverage is measured at pixel centers: a pixel whose center lies exactly
/// on the outline gets 0.5, with a one-pixel linear ramp across the edge.
/// Returns `None` when nothing lands on the target.
pub fn rasterize(op: &DrawOp, width: u32, height: u32) -> Option<Coverage> {
    let radius = op.radius();
    if !(radius > 0.0) || width == 0 || height == 0 {
        return None;
    }
    let [min_x, min_y, max_x, max_y] = op.bounds()?;

    // Include the antialiasing ramp
    let x0 = ((min_x - 1.0).floor().max(0.0) as u32).min(width);
    let y0 = ((min_y - 1.0).floor().max(0.0) as u32).min(height);
    let x1 = ((max_x + 1.0).ceil().max(0.0) as u32).min(width);
    let y1 = ((max_y + 1.0).ceil().max(0.0) as u32).min(height);
    if x0 >= x1 || y0 >= y1 {
        return None;
    }

    let mut coverage = Coverage {
        x: x0,
        y: y0,
        width: x1 - x0,
        height: y1 - y0,
        values: vec![0.0; ((x1 - x0) * (y1 - y0)) as usize],
    };

    match op {
        DrawOp::Disc { center, radius } => {
            cover_segment(&mut coverage, *center, *center, *radius);
        }
        DrawOp::Polyline { points, radius } => {
            if points.len() == 1 {
                cover_segment(&mut coverage, points[0], points[0], *radius);
            }
            for pair in points.windows(2) {
                cover_segment(&mut coverage, pair[0], pair[1], *radius);
            }
        }
    }

    debug!(
        "rasterize: r={:.1} -> region ({}, {}) {}x{}",
        radius, coverage.x, coverage.y, coverage.width, coverage.height
    );
    Some(coverage)
}

/// Union a round-capped segment into `coverage`
fn cover_segment(coverage: &mut Coverage, a: [f32; 2], b: [f32; 2], radius: f32) {
    let reach = radius + 1.0;
    let x_lo = (a[0].min(b[0]) - reach).floor().max(coverage.x as f32) as u32;
    let y_lo = (a[1].min(b[1]) - reach).floor().max(coverage.y as f32) as u32;
    let x_hi = ((a[0].max(b[0]) + reach).ceil().max(0.0) as u32).min(coverage.x + coverage.width);
    let y_hi = ((a[1].max(b[1]) + reach).ceil().max(0.0) as u32).min(coverage.y + coverage.height);

    for py in y_lo..y_hi {
        for px in x_lo..x_hi {
            let d = distance_to_segment([px as f32 + 0.5, py as f32 + 0.5], a, b);
            let value = (radius - d + 0.5).clamp(0.0, 1.0);
            if value > 0.0 {
                coverage.set_max(px, py, value);
            }
        }
    }
}

fn distance_to_segment(p: [f32; 2], a: [f32; 2], b: [f32; 2]) -> f32 {
    let ab = [b[0] - a[0], b[1] - a[1]];
    let ap = [p[0] - a[0], p[1] - a[1]];
    let len_sq = ab[0] * ab[0] + ab[1] * ab[1];
    let t = if len_sq > 0.0 {
        ((ap[0] * ab[0] + ap[1] * ab[1]) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let dx = ap[0] - ab[0] * t;
    let dy = ap[1] - ab[1] * t;
    (dx * dx + dy * dy).sqrt()
}

/// Smooth a sampled path with quadratic curves through segment midpoints
/// and flatten it back to a polyline.
///
/// Each interior sample acts as the control point of a quadratic ending at
/// the midpoint to the next sample; the path closes with a straight segment
/// to the last sample. Paths of fewer than three points are returned as is.
pub fn smooth_path(points: &[[f32; 2]]) -> Vec<[f32; 2]> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let mut out = Vec::with_capacity(points.len() * 4);
    let mut start = points[0];
    out.push(start);

    for i in 1..points.len() - 1 {
        let control = points[i];
        let end = midpoint(points[i], points[i + 1]);
        let length = distance(start, control) + distance(control, end);
        let steps = ((length / CURVE_STEP_LENGTH).ceil() as u32).clamp(1, MAX_CURVE_STEPS);
        for step in 1..=steps {
            let t = step as f32 / steps as f32;
            out.push(quadratic(start, control, end, t));
        }
        start = end;
    }

    out.push(points[points.len() - 1]);
    out
}

fn quadratic(p0: [f32; 2], p1: [f32; 2], p2: [f32; 2], t: f32) -> [f32; 2] {
    let u = 1.0 - t;
    [
        u * u * p0[0] + 2.0 * u * t * p1[0] + t * t * p2[0],
        u * u * p0[1] + 2.0 * u * t * p1[1] + t * t * p2[1],
    ]
}

fn midpoint(a: [f32; 2], b: [f32; 2]) -> [f32; 2] {
    [(a[0] + b[0]) / 2.0, (a[1] + b[1]) / 2.0]
}

fn distance(a: [f32; 2], b: [f32; 2]) -> f32 {
    let dx = b[0] - a[0];
    let dy = b[1] - a[1];
    (dx * dx + dy * dy).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disc_coverage() {
        let op = DrawOp::Disc {
            center: [50.0, 50.0],
            radius: 10.0,
        };
        let coverage = rasterize(&op, 100, 100).unwrap();

        assert_eq!(coverage.get(50, 50), 1.0);
        assert_eq!(coverage.get(50, 39), 0.0);
        assert_eq!(coverage.get(10, 10), 0.0);
        assert!(coverage.get(50, 40) >= 0.5);
    }

    #[test]
    fn test_disc_clipped_to_surface() {
        let op = DrawOp::Disc {
            center: [0.0, 0.0],
            radius: 5.0,
        };
        let coverage = rasterize(&op, 20, 20).unwrap();
        assert_eq!(coverage.x, 0);
        assert_eq!(coverage.y, 0);
        assert!(coverage.width <= 7);
        assert_eq!(coverage.get(0, 0), 1.0);
    }

    #[test]
    fn test_offscreen_op_is_none() {
        let op = DrawOp::Disc {
            center: [-50.0, -50.0],
            radius: 5.0,
        };
        assert!(rasterize(&op, 20, 20).is_none());

        let op = DrawOp::Disc {
            center: [5.0, 5.0],
            radius: 0.0,
        };
        assert!(rasterize(&op, 20, 20).is_none());
    }

    #[test]
    fn test_polyline_round_caps() {
        let op = DrawOp::Polyline {
            points: vec![[10.0, 20.0], [40.0, 20.0]],
            radius: 4.0,
        };
        let coverage = rasterize(&op, 64, 64).unwrap();

        // Along the segment
        assert_eq!(coverage.get(25, 19), 1.0);
        // Cap extends past the end point by the radius
        assert!(coverage.get(42, 19) > 0.5);
        assert_eq!(coverage.get(46, 19), 0.0);
        // Outside the stroke width
        assert_eq!(coverage.get(25, 26), 0.0);
    }

    #[test]
    fn test_overlapping_segments_do_not_accumulate() {
        let op = DrawOp::Polyline {
            points: vec![[10.0, 10.0], [30.0, 10.0], [10.0, 10.0]],
            radius: 3.0,
        };
        let coverage = rasterize(&op, 40, 40).unwrap();
        assert!(coverage.iter().all(|(_, _, value)| value <= 1.0));
    }

    #[test]
    fn test_smooth_path_endpoints() {
        let points = [[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [20.0, 10.0]];
        let smoothed = smooth_path(&points);

        assert_eq!(smoothed.first(), Some(&[0.0, 0.0]));
        assert_eq!(smoothed.last(), Some(&[20.0, 10.0]));
        assert!(smoothed.len() > points.len());
    }

    #[test]
    fn test_smooth_path_short_input_unchanged() {
        let points = [[1.0, 2.0], [3.0, 4.0]];
        assert_eq!(smooth_path(&points), points.to_vec());
    }
}
