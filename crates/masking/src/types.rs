use serde::{Deserialize, Serialize};

/// A sampled pointer position in display-space pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
    /// Pen/touch pressure in `[0, 1]`, when the device reports one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure: Option<f32>,
}

impl Point {
    pub const ORIGIN: Point = Point {
        x: 0.0,
        y: 0.0,
        pressure: None,
    };

    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            pressure: None,
        }
    }

    pub fn with_pressure(x: f32, y: f32, pressure: Option<f32>) -> Self {
        Self {
            x,
            y,
            pressure: pressure
                .filter(|p| p.is_finite())
                .map(|p| p.clamp(0.0, 1.0)),
        }
    }

    /// Both coordinates are finite
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn as_array(&self) -> [f32; 2] {
        [self.x, self.y]
    }
}

/// Pixel dimensions of a surface or image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Zero area (not laid out yet)
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn aspect_ratio(&self) -> f32 {
        if self.height == 0 {
            return 0.0;
        }
        self.width as f32 / self.height as f32
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// One continuous brush drag.
///
/// A stroke always holds at least one point. Points stay in the display
/// space the stroke was captured in (`space`); renderers derive their own
/// scale from that space to the target surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stroke {
    points: Vec<Point>,
    brush_size: f32,
    space: SurfaceSize,
}

impl Stroke {
    /// Start a stroke at `first`
    pub fn new(first: Point, brush_size: f32, space: SurfaceSize) -> Self {
        Self {
            points: vec![first],
            brush_size,
            space,
        }
    }

    /// Build a finalized stroke from a point list; `None` when empty
    pub fn from_points(points: Vec<Point>, brush_size: f32, space: SurfaceSize) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        Some(Self {
            points,
            brush_size,
            space,
        })
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Brush diameter in display-space pixels
    pub fn brush_size(&self) -> f32 {
        self.brush_size
    }

    /// Display-surface size the points were captured in
    pub fn space(&self) -> SurfaceSize {
        self.space
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_single_point(&self) -> bool {
        self.points.len() == 1
    }

    pub(crate) fn push(&mut self, point: Point) {
        self.points.push(point);
    }
}

/// Ordered list of finalized strokes; the complete mask state
pub type StrokeList = Vec<Stroke>;
