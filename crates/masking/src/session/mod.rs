//! Editing session
//!
//! This module owns every piece of per-session editor state:
//! - The source image and the display surface it is fitted into
//! - The finalized stroke list, the in-progress stroke and undo history
//! - The processing state and the submission generation counter
//! - An outbox of [`EditorEvent`]s for the UI shell
//!
//! Nothing here performs I/O; the inpainting call runs outside the session
//! and reports back through [`EditorSession::complete_submission`].

mod commands;
mod edit;
mod stroke;
mod submission;

#[cfg(test)]
pub(crate) mod testing;

use cleanup_config::EditorConfig;
use cleanup_ipc::{EditingTool, EditorEvent, ProcessingState};
use tracing::{debug, info};

use crate::compositor::{render_preview, PreviewStyle};
use crate::coords::{ScaleFactors, Viewport};
use crate::history::History;
use crate::mask::MaskRaster;
use crate::recorder::StrokeRecorder;
use crate::source::{ImageLoadError, SourceImage};
use crate::surface::PreviewSurface;
use crate::types::{StrokeList, SurfaceSize};

pub use submission::{EditResult, SubmissionOutcome, SubmissionTicket, SubmitError};

/// A single image-editing session
pub struct EditorSession {
    pub(crate) config: EditorConfig,
    pub(crate) source: Option<SourceImage>,
    pub(crate) viewport: Viewport,
    /// Last container size, reused when a new image is loaded
    pub(crate) container: Option<(f32, f32)>,
    pub(crate) preview: PreviewSurface,
    pub(crate) style: PreviewStyle,
    pub(crate) tool: EditingTool,
    pub(crate) brush_size: f32,
    pub(crate) state: ProcessingState,
    pub(crate) strokes: StrokeList,
    pub(crate) recorder: StrokeRecorder,
    pub(crate) history: History,
    /// Advanced on every submission and reset
    pub(crate) generation: u64,
    /// Generation of the submission currently in flight
    pub(crate) in_flight: Option<u64>,
    pub(crate) result: Option<EditResult>,
    /// Mask sent with the most recent submission
    pub(crate) last_mask: Option<MaskRaster>,
    /// Animation clock for the processing glow (milliseconds)
    pub(crate) clock_ms: f64,
    pub(crate) events: Vec<EditorEvent>,
}

impl EditorSession {
    pub fn new(config: EditorConfig) -> Self {
        let brush_size = config.clamp_brush_size(config.default_brush_size);
        let history = History::new(config.max_history);
        Self {
            config,
            source: None,
            viewport: Viewport::default(),
            container: None,
            preview: PreviewSurface::new(0, 0),
            style: PreviewStyle::default(),
            tool: EditingTool::default(),
            brush_size,
            state: ProcessingState::Idle,
            strokes: StrokeList::new(),
            recorder: StrokeRecorder::new(),
            history,
            generation: 0,
            in_flight: None,
            result: None,
            last_mask: None,
            clock_ms: 0.0,
            events: Vec::new(),
        }
    }

    /// Create a session and load `bytes` as its source image
    pub fn with_image(config: EditorConfig, bytes: &[u8]) -> Result<Self, ImageLoadError> {
        let mut session = Self::new(config);
        session.load_image(bytes)?;
        Ok(session)
    }

    /// Decode and load a new source image.
    ///
    /// All mask state from the previous image is discarded. The display
    /// surface is refit into the last known container, or left empty until
    /// the next resize when none is known.
    pub fn load_image(&mut self, bytes: &[u8]) -> Result<SurfaceSize, ImageLoadError> {
        let source = SourceImage::from_bytes(bytes)?;
        Ok(self.set_source(source))
    }

    pub fn set_source(&mut self, source: SourceImage) -> SurfaceSize {
        let size = source.size();
        info!("Loaded source image {}x{}", size.width, size.height);

        self.reset();
        self.source = Some(source);
        self.viewport.image = size;
        match self.container {
            Some((width, height)) => {
                self.resize(width, height);
            }
            None => self.set_display_size(SurfaceSize::default()),
        }
        size
    }

    /// Fit the display surface into a container of the given size.
    ///
    /// Stored points are not touched; strokes keep rendering from the space
    /// they were captured in.
    pub fn resize(&mut self, container_width: f32, container_height: f32) -> SurfaceSize {
        self.container = Some((container_width, container_height));
        let display =
            crate::coords::fit_to_container(self.viewport.image, container_width, container_height);
        self.set_display_size(display);
        display
    }

    /// Set the display surface size directly.
    ///
    /// A stroke still being drawn is finished first so all of its points
    /// share the old display space.
    pub fn set_display_size(&mut self, size: SurfaceSize) {
        if size == self.viewport.display && size == self.preview.size() {
            return;
        }
        if self.recorder.is_recording() {
            debug!("Resize during a stroke, finishing it first");
            self.finish();
        }
        debug!("Display surface {}x{}", size.width, size.height);
        self.viewport.display = size;
        self.preview.resize(size.width, size.height);
        self.events.push(EditorEvent::SurfaceResized {
            width: size.width,
            height: size.height,
        });
        self.redraw();
    }

    /// Switch tool. Leaving the cleanup tool drops an unfinished stroke.
    pub fn set_tool(&mut self, tool: EditingTool) {
        if tool == self.tool {
            return;
        }
        debug!("Tool: {}", tool.label());
        self.tool = tool;
        if !tool.captures_strokes() {
            self.cancel_stroke();
        }
    }

    /// Set the brush diameter for subsequent strokes, clamped to the
    /// configured range. Returns the applied size.
    pub fn set_brush_size(&mut self, size: f32) -> f32 {
        self.brush_size = self.config.clamp_brush_size(size);
        self.brush_size
    }

    /// Advance the animation clock; redraws while the glow is visible
    pub fn set_clock(&mut self, clock_ms: f64) {
        self.clock_ms = clock_ms;
        if self.state == ProcessingState::Processing {
            self.redraw();
        }
    }

    pub fn state(&self) -> ProcessingState {
        self.state
    }

    pub fn tool(&self) -> EditingTool {
        self.tool
    }

    pub fn brush_size(&self) -> f32 {
        self.brush_size
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn strokes(&self) -> &[crate::types::Stroke] {
        &self.strokes
    }

    pub fn is_recording(&self) -> bool {
        self.recorder.is_recording()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn has_image(&self) -> bool {
        self.source.is_some()
    }

    pub fn image_size(&self) -> SurfaceSize {
        self.viewport.image
    }

    pub fn display_size(&self) -> SurfaceSize {
        self.viewport.display
    }

    /// Current display-to-image factors
    pub fn scale(&self) -> Option<ScaleFactors> {
        self.viewport.scale()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn preview(&self) -> &PreviewSurface {
        &self.preview
    }

    pub fn set_preview_style(&mut self, style: PreviewStyle) {
        self.style = style;
        self.redraw();
    }

    /// Take all events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<EditorEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn set_state(&mut self, state: ProcessingState) {
        if state == self.state {
            return;
        }
        debug!("State: {:?} -> {:?}", self.state, state);
        self.state = state;
        self.events.push(EditorEvent::StateChanged { state });
    }

    pub(crate) fn notify_history(&mut self) {
        self.events.push(EditorEvent::HistoryChanged {
            can_undo: self.history.can_undo(),
            can_redo: self.history.can_redo(),
        });
    }

    /// Redraw the preview from the current strokes.
    ///
    /// A missing surface aborts the pass without affecting the session.
    pub(crate) fn redraw(&mut self) {
        match render_preview(
            &mut self.preview,
            &self.strokes,
            self.recorder.current(),
            self.state,
            &self.style,
            self.clock_ms,
        ) {
            Ok(()) => self.events.push(EditorEvent::PreviewUpdated),
            Err(e) => debug!("Preview redraw skipped: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{png, ready_session};
    use super::*;

    #[test]
    fn test_new_session_defaults() {
        let session = EditorSession::new(EditorConfig::default());
        assert_eq!(session.state(), ProcessingState::Idle);
        assert_eq!(session.tool(), EditingTool::Cleanup);
        assert_eq!(session.brush_size(), 24.0);
        assert!(!session.has_image());
        assert!(session.scale().is_none());
    }

    #[test]
    fn test_resize_fits_and_keeps_points() {
        let mut session = ready_session();
        session.begin(crate::types::Point::new(10.0, 10.0));
        session.finish();

        // 400x100 image into 1000x1000 is width constrained
        let display = session.resize(1000.0, 1000.0);
        assert_eq!(display, SurfaceSize::new(1000, 250));
        assert_eq!(session.preview().size(), display);

        let stroke = &session.strokes()[0];
        assert_eq!(stroke.points()[0].x, 10.0);
        assert_eq!(stroke.space(), SurfaceSize::new(200, 100));
    }

    #[test]
    fn test_load_image_discards_mask_state() {
        let mut session = ready_session();
        session.begin(crate::types::Point::new(10.0, 10.0));
        session.finish();
        let generation = session.generation();

        session.load_image(&png(50, 50)).unwrap();
        assert!(session.strokes().is_empty());
        assert!(!session.can_undo());
        assert!(session.generation() > generation);
        assert_eq!(session.image_size(), SurfaceSize::new(50, 50));
    }

    #[test]
    fn test_load_image_without_container_clears_display() {
        let mut session = ready_session();
        assert_eq!(session.display_size(), SurfaceSize::new(200, 100));

        session.load_image(&png(50, 50)).unwrap();
        assert!(session.display_size().is_empty());
        assert!(session.preview().size().is_empty());
        assert!(session.scale().is_none());
        assert!(!session.begin(crate::types::Point::new(10.0, 10.0)));

        assert_eq!(session.resize(100.0, 100.0), SurfaceSize::new(100, 100));
        let scale = session.scale().unwrap();
        assert_eq!(scale.x, scale.y);
    }

    #[test]
    fn test_resize_during_stroke_finishes_it() {
        let mut session = ready_session();
        assert!(session.begin(crate::types::Point::new(10.0, 10.0)));

        session.resize(1000.0, 1000.0);
        assert!(!session.is_recording());
        assert_eq!(session.state(), ProcessingState::Idle);
        assert!(session.can_undo());

        // Later moves of the same drag are not appended
        assert!(!session.extend(crate::types::Point::new(500.0, 125.0)));
        assert!(!session.finish());

        assert_eq!(session.strokes().len(), 1);
        let stroke = &session.strokes()[0];
        assert_eq!(stroke.len(), 1);
        assert_eq!(stroke.space(), SurfaceSize::new(200, 100));

        let mask = session.render_mask().unwrap();
        assert!(mask.is_selected(20, 10));
        assert!(!mask.is_selected(350, 50));
    }

    #[test]
    fn test_load_image_refits_last_container() {
        let mut session = EditorSession::new(EditorConfig::default());
        session.resize(300.0, 300.0);
        assert!(session.display_size().is_empty());

        session.load_image(&png(200, 100)).unwrap();
        assert_eq!(session.display_size(), SurfaceSize::new(300, 150));
    }

    #[test]
    fn test_brush_size_clamped() {
        let mut session = EditorSession::new(EditorConfig::default());
        assert_eq!(session.set_brush_size(500.0), 50.0);
        assert_eq!(session.set_brush_size(1.0), 5.0);
        assert_eq!(session.set_brush_size(30.0), 30.0);
    }

    #[test]
    fn test_inverted_brush_range_does_not_panic() {
        let config = EditorConfig {
            min_brush_size: 60.0,
            max_brush_size: 50.0,
            ..EditorConfig::default()
        };
        let mut session = EditorSession::new(config);
        assert_eq!(session.brush_size(), cleanup_config::DEFAULT_BRUSH_SIZE);
        assert_eq!(session.set_brush_size(55.0), cleanup_config::DEFAULT_BRUSH_SIZE);
    }

    #[test]
    fn test_events_drained() {
        let mut session = ready_session();
        assert!(!session.drain_events().is_empty());
        assert!(session.drain_events().is_empty());
    }
}
