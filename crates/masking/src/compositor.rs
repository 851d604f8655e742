//! Mask compositor - renders stroke lists onto preview and mask surfaces
//!
//! Both surfaces consume the same drawing operations, so the submitted mask
//! covers exactly the smoothed path the user saw in the preview.

use cleanup_ipc::ProcessingState;
use tracing::debug;

use crate::constants::GLOW_EXTRA_WIDTH;
use crate::coords::ScaleFactors;
use crate::mask::MaskRaster;
use crate::raster::{rasterize, smooth_path, DrawOp};
use crate::surface::PreviewSurface;
use crate::types::{Stroke, SurfaceSize};
use crate::RenderError;

/// Highlight colors for the live preview
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewStyle {
    /// Stroke color while idle/selecting
    pub selecting: [f32; 4],
    /// Stroke color while a submission is in flight
    pub processing: [f32; 4],
    /// Extra diameter of the processing glow
    pub glow_extra: f32,
}

impl Default for PreviewStyle {
    fn default() -> Self {
        Self {
            selecting: [1.0, 1.0, 1.0, 0.9],
            processing: [0.0, 122.0 / 255.0, 1.0, 0.8],
            glow_extra: GLOW_EXTRA_WIDTH,
        }
    }
}

impl PreviewStyle {
    pub fn stroke_color(&self, state: ProcessingState) -> [f32; 4] {
        match state {
            ProcessingState::Processing => self.processing,
            _ => self.selecting,
        }
    }

    /// Glow color for `state` at `clock_ms`, if the state glows
    pub fn glow_color(&self, state: ProcessingState, clock_ms: f64) -> Option<[f32; 4]> {
        if state != ProcessingState::Processing {
            return None;
        }
        let alpha = 0.4 + 0.3 * (clock_ms * 0.005).sin() as f32;
        let [r, g, b, _] = self.processing;
        Some([r, g, b, alpha])
    }
}

/// Lower a stroke to a drawing operation on a target surface.
///
/// `scale` maps the stroke's capture space onto the target; the brush
/// scales by the larger axis.
pub fn stroke_op(stroke: &Stroke, scale: &ScaleFactors) -> Option<DrawOp> {
    let radius = stroke.brush_size() * scale.brush() / 2.0;
    if !(radius > 0.0) {
        return None;
    }

    let points: Vec<[f32; 2]> = stroke
        .points()
        .iter()
        .filter(|p| p.is_finite())
        .map(|p| scale.apply(p))
        .collect();

    match points.len() {
        0 => None,
        1 => Some(DrawOp::Disc {
            center: points[0],
            radius,
        }),
        _ => Some(DrawOp::Polyline {
            points: smooth_path(&points),
            radius,
        }),
    }
}

/// Factors for a stroke rendered onto `target`.
///
/// `scale` is used for strokes captured in the display space it was derived
/// from; strokes captured before a resize get factors from their own space.
fn stroke_scale(stroke: &Stroke, scale: &ScaleFactors, target: SurfaceSize) -> Option<ScaleFactors> {
    if stroke.space() == scale.display() {
        Some(*scale)
    } else {
        ScaleFactors::between(stroke.space(), target)
    }
}

/// Render strokes into an image-space binary mask.
///
/// Background is black, strokes are white, later strokes overwrite earlier
/// ones. Deterministic for identical inputs.
pub fn render_full_resolution_mask(
    strokes: &[Stroke],
    image_width: u32,
    image_height: u32,
    scale: ScaleFactors,
) -> Result<MaskRaster, RenderError> {
    if image_width == 0 || image_height == 0 {
        return Err(RenderError::SurfaceUnavailable {
            width: image_width,
            height: image_height,
        });
    }

    let target = SurfaceSize::new(image_width, image_height);
    let mut mask = MaskRaster::new(image_width, image_height);

    for stroke in strokes {
        let Some(factors) = stroke_scale(stroke, &scale, target) else {
            continue;
        };
        let Some(op) = stroke_op(stroke, &factors) else {
            continue;
        };
        if let Some(coverage) = rasterize(&op, image_width, image_height) {
            mask.stamp(&coverage);
        }
    }

    debug!(
        "render_full_resolution_mask: {} strokes -> {}x{}, {} selected",
        strokes.len(),
        image_width,
        image_height,
        mask.selected_count()
    );
    Ok(mask)
}

/// Redraw the preview surface from the finalized strokes plus the
/// in-progress stroke.
pub fn render_preview(
    surface: &mut PreviewSurface,
    strokes: &[Stroke],
    current: Option<&Stroke>,
    state: ProcessingState,
    style: &PreviewStyle,
    clock_ms: f64,
) -> Result<(), RenderError> {
    let target = surface.size();
    if target.is_empty() {
        return Err(RenderError::SurfaceUnavailable {
            width: target.width,
            height: target.height,
        });
    }

    surface.clear([0.0, 0.0, 0.0, 0.0]);
    let color = style.stroke_color(state);
    let glow = style.glow_color(state, clock_ms);
    let identity = ScaleFactors::identity(target);

    for stroke in strokes.iter().chain(current) {
        let Some(factors) = stroke_scale(stroke, &identity, target) else {
            continue;
        };
        let Some(op) = stroke_op(stroke, &factors) else {
            continue;
        };
        if let Some(coverage) = rasterize(&op, target.width, target.height) {
            surface.blend_coverage(&coverage, color);
        }
        if let Some(glow_color) = glow {
            let ring = op.with_radius(op.radius() + style.glow_extra / 2.0);
            if let Some(coverage) = rasterize(&ring, target.width, target.height) {
                surface.blend_coverage(&coverage, glow_color);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Point;

    fn unit_scale(size: SurfaceSize) -> ScaleFactors {
        ScaleFactors::between(size, size).unwrap()
    }

    #[test]
    fn test_single_point_disc() {
        let display = SurfaceSize::new(100, 100);
        let stroke = Stroke::new(Point::new(50.0, 50.0), 20.0, display);

        let mask = render_full_resolution_mask(&[stroke], 100, 100, unit_scale(display)).unwrap();

        assert!(mask.is_selected(50, 50));
        assert!(!mask.is_selected(50, 39));
        assert!(!mask.is_selected(0, 0));
    }

    #[test]
    fn test_mask_has_image_dimensions() {
        let display = SurfaceSize::new(200, 100);
        let scale = ScaleFactors::between(display, SurfaceSize::new(640, 480)).unwrap();
        let strokes = vec![
            Stroke::new(Point::new(10.0, 10.0), 24.0, display),
            Stroke::from_points(
                vec![
                    Point::new(20.0, 20.0),
                    Point::new(60.0, 40.0),
                    Point::new(120.0, 30.0),
                ],
                24.0,
                display,
            )
            .unwrap(),
        ];

        let mask = render_full_resolution_mask(&strokes, 640, 480, scale).unwrap();
        assert_eq!(mask.size(), SurfaceSize::new(640, 480));
        assert!(mask.selected_count() > 0);
    }

    #[test]
    fn test_empty_stroke_list_is_black() {
        let display = SurfaceSize::new(10, 10);
        let mask = render_full_resolution_mask(&[], 30, 20, unit_scale(display)).unwrap();
        assert_eq!(mask.size(), SurfaceSize::new(30, 20));
        assert_eq!(mask.selected_count(), 0);
    }

    #[test]
    fn test_zero_sized_mask_is_error() {
        let display = SurfaceSize::new(10, 10);
        let result = render_full_resolution_mask(&[], 0, 20, unit_scale(display));
        assert!(matches!(result, Err(RenderError::SurfaceUnavailable { .. })));
    }

    #[test]
    fn test_non_uniform_scale_maps_points_and_brush() {
        // Display 200x100 on a 400x100 image: x doubles, brush uses max(2, 1)
        let display = SurfaceSize::new(200, 100);
        let scale = ScaleFactors::between(display, SurfaceSize::new(400, 100)).unwrap();
        let stroke = Stroke::new(Point::new(10.0, 10.0), 4.0, display);

        let mask = render_full_resolution_mask(&[stroke], 400, 100, scale).unwrap();

        assert!(mask.is_selected(20, 10));
        // Radius is 4 in image space on both axes
        assert!(mask.is_selected(20, 13));
        assert!(!mask.is_selected(20, 15));
        assert!(!mask.is_selected(10, 10));
    }

    #[test]
    fn test_stroke_from_previous_display_space() {
        // Captured at 100x100, current display is 50x50, image 200x200
        let old_space = SurfaceSize::new(100, 100);
        let current = SurfaceSize::new(50, 50);
        let image = SurfaceSize::new(200, 200);
        let stroke = Stroke::new(Point::new(50.0, 50.0), 10.0, old_space);

        let scale = ScaleFactors::between(current, image).unwrap();
        let mask = render_full_resolution_mask(&[stroke], 200, 200, scale).unwrap();

        // Point maps through its own space: (50, 50) * 2 = (100, 100)
        assert!(mask.is_selected(100, 100));
        assert!(!mask.is_selected(50, 50));
        assert!(!mask.is_selected(199, 199));
    }

    #[test]
    fn test_render_is_deterministic() {
        let display = SurfaceSize::new(100, 80);
        let scale = ScaleFactors::between(display, SurfaceSize::new(333, 250)).unwrap();
        let strokes = vec![Stroke::from_points(
            vec![Point::new(5.0, 5.0), Point::new(50.0, 70.0), Point::new(90.0, 10.0)],
            12.0,
            display,
        )
        .unwrap()];

        let first = render_full_resolution_mask(&strokes, 333, 250, scale).unwrap();
        let second = render_full_resolution_mask(&strokes, 333, 250, scale).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_preview_draws_current_stroke() {
        let display = SurfaceSize::new(64, 64);
        let mut surface = PreviewSurface::new(64, 64);
        let current = Stroke::new(Point::new(32.0, 32.0), 10.0, display);

        render_preview(
            &mut surface,
            &[],
            Some(&current),
            ProcessingState::Selecting,
            &PreviewStyle::default(),
            0.0,
        )
        .unwrap();

        let pixel = surface.get_pixel(32, 32).unwrap();
        assert!((pixel[3] - 0.9).abs() < 1e-4);
        assert_eq!(surface.get_pixel(0, 0).unwrap()[3], 0.0);
    }

    #[test]
    fn test_preview_processing_uses_highlight_and_glow() {
        let display = SurfaceSize::new(64, 64);
        let mut surface = PreviewSurface::new(64, 64);
        let stroke = Stroke::new(Point::new(32.0, 32.0), 10.0, display);

        render_preview(
            &mut surface,
            std::slice::from_ref(&stroke),
            None,
            ProcessingState::Selecting,
            &PreviewStyle::default(),
            0.0,
        )
        .unwrap();
        let idle_painted = surface.painted_count();

        render_preview(
            &mut surface,
            &[stroke],
            None,
            ProcessingState::Processing,
            &PreviewStyle::default(),
            0.0,
        )
        .unwrap();

        // Glow ring widens the painted area and tints it blue
        assert!(surface.painted_count() > idle_painted);
        let pixel = surface.get_pixel(32, 32).unwrap();
        assert!(pixel[2] > pixel[0]);
    }

    #[test]
    fn test_preview_requires_surface() {
        let mut surface = PreviewSurface::new(0, 0);
        let result = render_preview(
            &mut surface,
            &[],
            None,
            ProcessingState::Idle,
            &PreviewStyle::default(),
            0.0,
        );
        assert!(matches!(result, Err(RenderError::SurfaceUnavailable { .. })));
    }
}
