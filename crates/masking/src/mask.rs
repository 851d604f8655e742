//! Full-resolution binary mask

use std::io::Cursor;

use image::{GrayImage, ImageFormat, Luma};

use crate::constants::{MASK_PRESERVED, MASK_SELECTED, MASK_THRESHOLD};
use crate::raster::Coverage;
use crate::types::SurfaceSize;
use crate::RenderError;

/// Image-space mask: selected pixels are white, preserved pixels black.
///
/// Coverage is thresholded when it is written, so every pixel is exactly
/// [`MASK_SELECTED`] or [`MASK_PRESERVED`].
#[derive(Debug, Clone, PartialEq)]
pub struct MaskRaster {
    image: GrayImage,
}

impl MaskRaster {
    /// All-black mask
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: GrayImage::from_pixel(width, height, Luma([MASK_PRESERVED])),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn size(&self) -> SurfaceSize {
        SurfaceSize::new(self.width(), self.height())
    }

    /// Whether the pixel is marked for removal; false out of bounds
    pub fn is_selected(&self, x: u32, y: u32) -> bool {
        self.image
            .get_pixel_checked(x, y)
            .is_some_and(|p| p[0] == MASK_SELECTED)
    }

    pub fn selected_count(&self) -> usize {
        self.image.pixels().filter(|p| p[0] == MASK_SELECTED).count()
    }

    /// Overwrite covered pixels with white
    pub fn stamp(&mut self, coverage: &Coverage) {
        for (x, y, value) in coverage.iter() {
            if value >= MASK_THRESHOLD {
                self.image.put_pixel(x, y, Luma([MASK_SELECTED]));
            }
        }
    }

    /// Lossless PNG encoding for submission
    pub fn encode_png(&self) -> Result<Vec<u8>, RenderError> {
        let mut buf = Cursor::new(Vec::new());
        self.image.write_to(&mut buf, ImageFormat::Png)?;
        Ok(buf.into_inner())
    }

    pub fn as_gray(&self) -> &GrayImage {
        &self.image
    }

    pub fn into_inner(self) -> GrayImage {
        self.image
    }
}
