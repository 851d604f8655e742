//! Synchronous halves of a submission
//!
//! [`EditorSession::begin_submission`] renders and encodes the payload and
//! moves the session to `processing`; the caller performs the remote call
//! and hands the outcome to [`EditorSession::complete_submission`].

use std::fmt::Display;

use cleanup_ipc::{EditorEvent, ProcessingState};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::compositor::render_full_resolution_mask;
use crate::mask::MaskRaster;
use crate::RenderError;

use super::EditorSession;

/// Reasons a submission is rejected before any remote call
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("A submission is already in progress")]
    AlreadyProcessing,

    #[error("Cannot submit while {0:?}")]
    NotIdle(ProcessingState),

    #[error("Nothing is selected")]
    NoStrokes,

    #[error("No image is loaded")]
    NoImage,

    #[error("Failed to render mask: {0}")]
    Render(#[from] RenderError),
}

impl SubmitError {
    /// Stable code reported in [`EditorEvent::Error`]
    pub fn code(&self) -> &'static str {
        match self {
            SubmitError::AlreadyProcessing => "already_processing",
            SubmitError::NotIdle(_) => "not_idle",
            SubmitError::NoStrokes => "no_strokes",
            SubmitError::NoImage => "no_image",
            SubmitError::Render(_) => "render_failed",
        }
    }
}

/// Payload for one inpainting request
#[derive(Debug, Clone)]
pub struct SubmissionTicket {
    pub generation: u64,
    /// Source image as PNG at native resolution
    pub image_png: Vec<u8>,
    /// Binary mask as PNG, same dimensions as the image
    pub mask_png: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// The edited image returned by the inpainting service
#[derive(Debug, Clone, PartialEq)]
pub struct EditResult {
    /// Encoded image bytes as returned by the service
    pub image: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// What [`EditorSession::complete_submission`] did with a response
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    Completed,
    Failed(String),
    /// The session was reset or resubmitted; the response was discarded
    Stale,
}

impl EditorSession {
    /// Render the mask, encode the payload and enter `processing`.
    ///
    /// Rejected without side effects unless the session is idle with at
    /// least one finalized stroke and a loaded image.
    pub fn begin_submission(&mut self) -> Result<SubmissionTicket, SubmitError> {
        match self.state {
            ProcessingState::Idle => {}
            ProcessingState::Processing => return Err(SubmitError::AlreadyProcessing),
            other => return Err(SubmitError::NotIdle(other)),
        }
        if self.strokes.is_empty() {
            return Err(SubmitError::NoStrokes);
        }
        let (Some(source), Some(scale)) = (self.source.as_ref(), self.viewport.scale()) else {
            return Err(SubmitError::NoImage);
        };

        let size = source.size();
        let mask = render_full_resolution_mask(&self.strokes, size.width, size.height, scale)?;
        let mask_png = mask.encode_png()?;
        let image_png = source.encode_png()?;

        self.generation += 1;
        let generation = self.generation;
        self.in_flight = Some(generation);
        self.last_mask = Some(mask);

        info!(
            "Submission {generation}: {} strokes, {}x{} mask",
            self.strokes.len(),
            size.width,
            size.height
        );
        self.set_state(ProcessingState::Processing);
        self.events.push(EditorEvent::SubmissionStarted { generation });
        self.redraw();

        Ok(SubmissionTicket {
            generation,
            image_png,
            mask_png,
            width: size.width,
            height: size.height,
        })
    }

    /// Apply the outcome of the remote call for `generation`.
    ///
    /// Success moves to `completed` and stores the result. Failure returns
    /// to `idle` with the stroke list untouched. Responses for anything but
    /// the in-flight generation are discarded.
    pub fn complete_submission<E: Display>(
        &mut self,
        generation: u64,
        outcome: Result<EditResult, E>,
    ) -> SubmissionOutcome {
        if self.in_flight != Some(generation) || self.state != ProcessingState::Processing {
            debug!("Discarding stale response for submission {generation}");
            return SubmissionOutcome::Stale;
        }
        self.in_flight = None;

        match outcome {
            Ok(result) => {
                info!(
                    "Submission {generation} completed: {}x{}",
                    result.width, result.height
                );
                self.events.push(EditorEvent::SubmissionCompleted {
                    generation,
                    width: result.width,
                    height: result.height,
                });
                self.result = Some(result);
                self.set_state(ProcessingState::Completed);
                self.redraw();
                SubmissionOutcome::Completed
            }
            Err(e) => {
                let message = e.to_string();
                warn!("Submission {generation} failed: {message}");
                self.events.push(EditorEvent::SubmissionFailed {
                    generation,
                    message: message.clone(),
                });
                self.set_state(ProcessingState::Idle);
                self.redraw();
                SubmissionOutcome::Failed(message)
            }
        }
    }

    pub fn result(&self) -> Option<&EditResult> {
        self.result.as_ref()
    }

    /// Hand the edited image to the caller
    pub fn take_result(&mut self) -> Option<EditResult> {
        self.result.take()
    }

    /// Mask sent with the most recent submission
    pub fn last_mask(&self) -> Option<&MaskRaster> {
        self.last_mask.as_ref()
    }

    /// Generation of the submission in flight, if any
    pub fn in_flight(&self) -> Option<u64> {
        self.in_flight
    }

    /// Render the current strokes to an image-space mask without submitting
    pub fn render_mask(&self) -> Result<MaskRaster, SubmitError> {
        let (Some(source), Some(scale)) = (self.source.as_ref(), self.viewport.scale()) else {
            return Err(SubmitError::NoImage);
        };
        let size = source.size();
        Ok(render_full_resolution_mask(
            &self.strokes,
            size.width,
            size.height,
            scale,
        )?)
    }
}
