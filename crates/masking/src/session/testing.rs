//! Shared fixtures for session tests

use std::io::Cursor;

use cleanup_config::EditorConfig;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};

use super::EditorSession;
use crate::types::{Point, SurfaceSize};

/// A solid-color PNG of the given size
pub(crate) fn png(width: u32, height: u32) -> Vec<u8> {
    let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
        width,
        height,
        Rgba([40, 80, 120, 255]),
    ));
    let mut buf = Cursor::new(Vec::new());
    image.write_to(&mut buf, ImageFormat::Png).unwrap();
    buf.into_inner()
}

/// 400x100 image shown on a 200x100 display surface
pub(crate) fn ready_session() -> EditorSession {
    let mut session = EditorSession::with_image(EditorConfig::default(), &png(400, 100)).unwrap();
    session.set_display_size(SurfaceSize::new(200, 100));
    session
}

/// Draw one finalized stroke through the given display-space points
pub(crate) fn draw(session: &mut EditorSession, points: &[(f32, f32)]) {
    let mut iter = points.iter();
    if let Some(&(x, y)) = iter.next() {
        assert!(session.begin(Point::new(x, y)));
    }
    for &(x, y) in iter {
        session.extend(Point::new(x, y));
    }
    session.finish();
}
