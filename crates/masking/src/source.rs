//! Source image loading and encoding

use std::io::Cursor;

use image::{DynamicImage, GenericImageView, ImageFormat};
use thiserror::Error;

use crate::types::SurfaceSize;
use crate::RenderError;

#[derive(Debug, Error)]
pub enum ImageLoadError {
    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Image has no pixels ({width}x{height})")]
    Empty { width: u32, height: u32 },
}

/// The image being edited, decoded once when the session loads it
#[derive(Debug, Clone)]
pub struct SourceImage {
    image: DynamicImage,
}

impl SourceImage {
    /// Decode an in-memory image blob
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ImageLoadError> {
        let image = image::load_from_memory(bytes)?;
        Self::from_image(image)
    }

    pub fn from_image(image: DynamicImage) -> Result<Self, ImageLoadError> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(ImageLoadError::Empty { width, height });
        }
        Ok(Self { image })
    }

    /// Native resolution
    pub fn size(&self) -> SurfaceSize {
        let (width, height) = self.image.dimensions();
        SurfaceSize::new(width, height)
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    /// Lossless PNG encoding at native resolution
    pub fn encode_png(&self) -> Result<Vec<u8>, RenderError> {
        let mut buf = Cursor::new(Vec::new());
        self.image.write_to(&mut buf, ImageFormat::Png)?;
        Ok(buf.into_inner())
    }
}
