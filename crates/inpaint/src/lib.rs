//! Inpainting backends for the cleanup editor
//!
//! The editor session produces a [`SubmissionTicket`]; a backend turns it
//! into an edited image. [`submit`] runs one submission end to end.

mod remote;

pub use remote::RemoteInpaint;

use masking::{EditResult, EditorSession, SubmissionOutcome, SubmissionTicket, SubmitError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InpaintError {
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Service returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Failed to build request: {0}")]
    Encode(String),
}

/// Image and mask for one inpainting call
#[derive(Debug, Clone)]
pub struct InpaintRequest {
    pub image_png: Vec<u8>,
    pub mask_png: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl From<SubmissionTicket> for InpaintRequest {
    fn from(ticket: SubmissionTicket) -> Self {
        Self {
            image_png: ticket.image_png,
            mask_png: ticket.mask_png,
            width: ticket.width,
            height: ticket.height,
        }
    }
}

/// Trait for inpainting backends
///
/// Calls are not cancelled; a response that arrives after the session was
/// reset is dropped by [`EditorSession::complete_submission`].
#[allow(async_fn_in_trait)]
pub trait InpaintBackend {
    /// Fill the masked region of the image
    async fn inpaint(&mut self, request: InpaintRequest) -> Result<EditResult, InpaintError>;
}

/// Run one submission: validate and encode in the session, call the
/// backend, then apply the outcome.
///
/// Rejections (no strokes, already processing) return `Err` before the
/// backend is called. Remote failures are applied to the session and come
/// back as [`SubmissionOutcome::Failed`].
pub async fn submit<B: InpaintBackend>(
    session: &mut EditorSession,
    backend: &mut B,
) -> Result<SubmissionOutcome, SubmitError> {
    let ticket = session.begin_submission()?;
    let generation = ticket.generation;
    let result = backend.inpaint(ticket.into()).await;
    Ok(session.complete_submission(generation, result))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use cleanup_config::EditorConfig;
    use image::{DynamicImage, ImageFormat, RgbaImage};
    use masking::{Point, ProcessingState, SurfaceSize};

    use super::*;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(RgbaImage::new(width, height))
            .write_to(&mut buf, ImageFormat::Png)
            .unwrap();
        buf.into_inner()
    }

    fn session() -> EditorSession {
        let mut session = EditorSession::with_image(EditorConfig::default(), &png(64, 32)).unwrap();
        session.set_display_size(SurfaceSize::new(64, 32));
        session
    }

    fn draw(session: &mut EditorSession) {
        assert!(session.begin(Point::new(10.0, 10.0)));
        session.extend(Point::new(20.0, 12.0));
        session.finish();
    }

    /// Records calls and answers with a fixed result
    #[derive(Default)]
    struct MockBackend {
        calls: usize,
        last_request: Option<InpaintRequest>,
        fail_with: Option<String>,
    }

    impl InpaintBackend for MockBackend {
        async fn inpaint(&mut self, request: InpaintRequest) -> Result<EditResult, InpaintError> {
            self.calls += 1;
            let (width, height) = (request.width, request.height);
            self.last_request = Some(request);
            match &self.fail_with {
                Some(message) => Err(InpaintError::Connection(message.clone())),
                None => Ok(EditResult {
                    image: png(width, height),
                    width,
                    height,
                }),
            }
        }
    }

    #[tokio::test]
    async fn test_empty_submit_makes_no_call() {
        let mut session = session();
        let mut backend = MockBackend::default();

        let result = submit(&mut session, &mut backend).await;
        assert!(matches!(result, Err(SubmitError::NoStrokes)));
        assert_eq!(backend.calls, 0);
        assert_eq!(session.state(), ProcessingState::Idle);
    }

    #[tokio::test]
    async fn test_successful_submit_completes() {
        let mut session = session();
        draw(&mut session);
        let mut backend = MockBackend::default();

        let outcome = submit(&mut session, &mut backend).await.unwrap();
        assert_eq!(outcome, SubmissionOutcome::Completed);
        assert_eq!(backend.calls, 1);
        assert_eq!(session.state(), ProcessingState::Completed);

        let request = backend.last_request.unwrap();
        assert_eq!((request.width, request.height), (64, 32));
        let mask = image::load_from_memory(&request.mask_png).unwrap();
        assert_eq!((mask.width(), mask.height()), (64, 32));
    }

    #[tokio::test]
    async fn test_failed_submit_keeps_strokes() {
        let mut session = session();
        draw(&mut session);
        let before = session.strokes().to_vec();
        let mut backend = MockBackend {
            fail_with: Some("network unreachable".into()),
            ..Default::default()
        };

        let outcome = submit(&mut session, &mut backend).await.unwrap();
        assert!(matches!(outcome, SubmissionOutcome::Failed(ref m) if m.contains("network unreachable")));
        assert_eq!(session.state(), ProcessingState::Idle);
        assert_eq!(session.strokes(), before.as_slice());
    }

    #[tokio::test]
    async fn test_response_after_reset_is_discarded() {
        let mut session = session();
        draw(&mut session);
        let mut backend = MockBackend::default();

        let ticket = session.begin_submission().unwrap();
        let generation = ticket.generation;
        session.reset();
        let result = backend.inpaint(ticket.into()).await;

        assert_eq!(backend.calls, 1);
        assert_eq!(
            session.complete_submission(generation, result),
            SubmissionOutcome::Stale
        );
        assert_eq!(session.state(), ProcessingState::Idle);
        assert!(session.result().is_none());
    }
}
