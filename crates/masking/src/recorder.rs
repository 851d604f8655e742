//! In-progress stroke capture

use tracing::debug;

use crate::types::{Point, Stroke, SurfaceSize};

/// Accumulates sampled points into a stroke between pointer-down and
/// pointer-up.
///
/// Gating on tool and processing state happens in the session; the
/// recorder only tracks whether a stroke is open.
#[derive(Debug, Default)]
pub struct StrokeRecorder {
    /// Open stroke (None if not capturing)
    current: Option<Stroke>,
}

impl StrokeRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_recording(&self) -> bool {
        self.current.is_some()
    }

    pub fn current(&self) -> Option<&Stroke> {
        self.current.as_ref()
    }

    /// Open a stroke at `point`. An already open stroke is discarded.
    ///
    /// Returns false for non-finite points.
    pub fn begin(&mut self, point: Point, brush_size: f32, space: SurfaceSize) -> bool {
        if !point.is_finite() {
            debug!("begin: ignoring non-finite point");
            return false;
        }
        if self.current.is_some() {
            debug!("begin: discarding unfinished stroke");
        }
        self.current = Some(Stroke::new(point, brush_size, space));
        true
    }

    /// Append a point to the open stroke. No-op without an open stroke.
    pub fn extend(&mut self, point: Point) -> bool {
        let Some(stroke) = self.current.as_mut() else {
            return false;
        };
        if !point.is_finite() {
            return false;
        }
        stroke.push(point);
        true
    }

    /// Close and return the open stroke
    pub fn finish(&mut self) -> Option<Stroke> {
        self.current.take()
    }

    /// Drop the open stroke without returning it
    pub fn cancel(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPACE: SurfaceSize = SurfaceSize {
        width: 100,
        height: 100,
    };

    #[test]
    fn test_begin_extend_finish() {
        let mut recorder = StrokeRecorder::new();
        assert!(recorder.begin(Point::new(1.0, 1.0), 24.0, SPACE));
        assert!(recorder.extend(Point::new(2.0, 2.0)));
        assert!(recorder.extend(Point::new(3.0, 3.0)));

        let stroke = recorder.finish().unwrap();
        assert_eq!(stroke.len(), 3);
        assert_eq!(stroke.brush_size(), 24.0);
        assert_eq!(stroke.space(), SPACE);
        assert!(!recorder.is_recording());
    }

    #[test]
    fn test_extend_without_stroke() {
        let mut recorder = StrokeRecorder::new();
        assert!(!recorder.extend(Point::new(2.0, 2.0)));
        assert!(recorder.finish().is_none());
    }

    #[test]
    fn test_non_finite_points_ignored() {
        let mut recorder = StrokeRecorder::new();
        assert!(!recorder.begin(Point::new(f32::NAN, 1.0), 24.0, SPACE));
        assert!(recorder.begin(Point::new(1.0, 1.0), 24.0, SPACE));
        assert!(!recorder.extend(Point::new(1.0, f32::INFINITY)));
        assert_eq!(recorder.finish().unwrap().len(), 1);
    }

    #[test]
    fn test_cancel() {
        let mut recorder = StrokeRecorder::new();
        recorder.begin(Point::new(1.0, 1.0), 24.0, SPACE);
        recorder.cancel();
        assert!(recorder.current().is_none());
    }
}
