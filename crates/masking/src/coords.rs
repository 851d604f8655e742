//! Coordinate mapping between client, display and image space
//!
//! - Client space: pointer positions as the windowing layer reports them
//! - Display space: pixels of the on-screen preview surface
//! - Image space: pixels of the source image at native resolution

use cleanup_ipc::ClientRect;

use crate::types::{Point, SurfaceSize};

/// Map a client-space pointer position onto the display surface.
///
/// Returns the origin when the surface has not been laid out yet.
pub fn client_to_display(
    client_x: f32,
    client_y: f32,
    rect: &ClientRect,
    surface: SurfaceSize,
) -> Point {
    if !rect.is_laid_out() || surface.is_empty() {
        return Point::ORIGIN;
    }
    Point::new(
        (client_x - rect.left) / rect.width * surface.width as f32,
        (client_y - rect.top) / rect.height * surface.height as f32,
    )
}

/// Per-axis factors from a display space to a target space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleFactors {
    pub x: f32,
    pub y: f32,
    /// Display space these factors map from
    display: SurfaceSize,
}

impl ScaleFactors {
    /// Factors mapping `display` onto `target`; `None` while `display` is empty
    pub fn between(display: SurfaceSize, target: SurfaceSize) -> Option<Self> {
        if display.is_empty() {
            return None;
        }
        Some(Self {
            x: target.width as f32 / display.width as f32,
            y: target.height as f32 / display.height as f32,
            display,
        })
    }

    /// Identity factors for `display`
    pub fn identity(display: SurfaceSize) -> Self {
        Self {
            x: 1.0,
            y: 1.0,
            display,
        }
    }

    pub fn display(&self) -> SurfaceSize {
        self.display
    }

    /// Brush scale: the larger axis, so the target covers at least what
    /// was visibly selected under non-uniform scaling
    pub fn brush(&self) -> f32 {
        self.x.max(self.y)
    }

    pub fn apply(&self, point: &Point) -> [f32; 2] {
        [point.x * self.x, point.y * self.y]
    }
}

/// Map a display-space point into image space
pub fn display_to_image(point: &Point, scale: &ScaleFactors) -> [f32; 2] {
    scale.apply(point)
}

/// Fit an image into a container preserving its aspect ratio.
///
/// Wider-than-container images are width constrained (letterbox), the rest
/// height constrained (pillarbox). Returns an empty size when either input
/// has no area.
pub fn fit_to_container(image: SurfaceSize, container_width: f32, container_height: f32) -> SurfaceSize {
    if image.is_empty()
        || !(container_width > 0.0)
        || !(container_height > 0.0)
        || !container_width.is_finite()
        || !container_height.is_finite()
    {
        return SurfaceSize::default();
    }

    let image_aspect = image.aspect_ratio();
    let container_aspect = container_width / container_height;

    let (width, height) = if image_aspect > container_aspect {
        (container_width, container_width / image_aspect)
    } else {
        (container_height * image_aspect, container_height)
    };

    SurfaceSize::new(width.round() as u32, height.round() as u32)
}

/// The source image and the display surface it is shown on
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub image: SurfaceSize,
    pub display: SurfaceSize,
}

impl Viewport {
    pub fn new(image: SurfaceSize, display: SurfaceSize) -> Self {
        Self { image, display }
    }

    /// Display-to-image factors, recomputed on every call
    pub fn scale(&self) -> Option<ScaleFactors> {
        if self.image.is_empty() {
            return None;
        }
        ScaleFactors::between(self.display, self.image)
    }

    /// Refit the display surface into a container
    pub fn fit(&mut self, container_width: f32, container_height: f32) -> SurfaceSize {
        self.display = fit_to_container(self.image, container_width, container_height);
        self.display
    }

    pub fn is_ready(&self) -> bool {
        !self.image.is_empty() && !self.display.is_empty()
    }
}
