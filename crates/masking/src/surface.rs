//! Display-space preview surface

use crate::raster::Coverage;
use crate::types::SurfaceSize;

/// RGBA preview surface drawn over the displayed image.
/// Stores pixels as straight-alpha [f32; 4], cleared to transparent.
pub struct PreviewSurface {
    pub width: u32,
    pub height: u32,
    /// Pixel data in row-major order
    pixels: Vec<[f32; 4]>,
}

impl PreviewSurface {
    /// Create a transparent surface with the given dimensions
    pub fn new(width: u32, height: u32) -> Self {
        let pixel_count = (width as usize) * (height as usize);
        Self {
            width,
            height,
            pixels: vec![[0.0, 0.0, 0.0, 0.0]; pixel_count],
        }
    }

    pub fn size(&self) -> SurfaceSize {
        SurfaceSize::new(self.width, self.height)
    }

    /// Resize the surface and its coordinate system together.
    /// Contents are discarded; callers redraw.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels
            .resize((width as usize) * (height as usize), [0.0, 0.0, 0.0, 0.0]);
    }

    /// Clear the surface to a solid color
    pub fn clear(&mut self, color: [f32; 4]) {
        self.pixels.fill(color);
    }

    /// Get a pixel at the given coordinates
    /// Returns None if coordinates are out of bounds
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[f32; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let index = (y as usize) * (self.width as usize) + (x as usize);
        Some(self.pixels[index])
    }

    /// Source-over blend a color onto an existing pixel
    #[inline]
    pub fn blend_pixel(&mut self, x: u32, y: u32, color: [f32; 4], opacity: f32) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = (y as usize) * (self.width as usize) + (x as usize);
        let dst = self.pixels[index];

        let src_alpha = color[3] * opacity;
        let out_alpha = src_alpha + dst[3] * (1.0 - src_alpha);
        if out_alpha <= 0.0 {
            self.pixels[index] = [0.0, 0.0, 0.0, 0.0];
            return;
        }

        // Straight alpha, so un-premultiply the result
        let dst_weight = dst[3] * (1.0 - src_alpha);
        self.pixels[index] = [
            (color[0] * src_alpha + dst[0] * dst_weight) / out_alpha,
            (color[1] * src_alpha + dst[1] * dst_weight) / out_alpha,
            (color[2] * src_alpha + dst[2] * dst_weight) / out_alpha,
            out_alpha,
        ];
    }

    /// Blend `color` wherever `coverage` is non-zero
    pub fn blend_coverage(&mut self, coverage: &Coverage, color: [f32; 4]) {
        for (x, y, value) in coverage.iter() {
            self.blend_pixel(x, y, color, value);
        }
    }

    /// Raw pixel data as bytes for upload to a presenting layer
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Pixels with any coverage
    pub fn painted_count(&self) -> usize {
        self.pixels.iter().filter(|p| p[3] > 0.0).count()
    }

    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    #[inline]
    pub fn pixels(&self) -> &[[f32; 4]] {
        &self.pixels
    }
}
