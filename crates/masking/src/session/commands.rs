//! Dispatch of UI shell messages onto the session

use cleanup_ipc::{ClientRect, EditorCommand, EditorEvent, PointerEvent};
use tracing::debug;

use crate::coords::client_to_display;
use crate::types::Point;

use super::{EditorSession, SubmissionTicket};

impl EditorSession {
    /// Map a pointer event from client space and drive stroke capture.
    ///
    /// Release and leave both finalize the stroke.
    pub fn handle_pointer(&mut self, event: PointerEvent, rect: &ClientRect) {
        match event {
            PointerEvent::Down { x, y, pressure } => {
                let point = self.to_display(x, y, pressure, rect);
                self.begin(point);
            }
            PointerEvent::Move { x, y, pressure } => {
                if !self.recorder.is_recording() {
                    return;
                }
                let point = self.to_display(x, y, pressure, rect);
                self.extend(point);
            }
            PointerEvent::Up | PointerEvent::Leave => {
                self.finish();
            }
        }
    }

    /// Apply one command. A `Submit` that is accepted yields the ticket for
    /// the remote call; a rejected one queues an [`EditorEvent::Error`].
    pub fn handle_command(&mut self, command: EditorCommand) -> Option<SubmissionTicket> {
        debug!("Command: {:?}", command);
        match command {
            EditorCommand::Pointer { event, rect } => self.handle_pointer(event, &rect),
            EditorCommand::Resize {
                container_width,
                container_height,
            } => {
                self.resize(container_width, container_height);
            }
            EditorCommand::SetTool { tool } => self.set_tool(tool),
            EditorCommand::SetBrushSize { size } => {
                self.set_brush_size(size);
            }
            EditorCommand::Undo => {
                self.undo();
            }
            EditorCommand::Redo => {
                self.redo();
            }
            EditorCommand::Clear => {
                self.clear();
            }
            EditorCommand::Reset => self.reset(),
            EditorCommand::Submit => match self.begin_submission() {
                Ok(ticket) => return Some(ticket),
                Err(e) => {
                    debug!("Submit rejected: {e}");
                    self.events.push(EditorEvent::Error {
                        code: e.code().to_string(),
                        message: e.to_string(),
                    });
                }
            },
        }
        None
    }

    fn to_display(&self, x: f32, y: f32, pressure: Option<f32>, rect: &ClientRect) -> Point {
        let p = client_to_display(x, y, rect, self.viewport.display);
        Point::with_pressure(p.x, p.y, pressure)
    }
}
