//! Headless session driver
//!
//! Replays a command script through an [`EditorSession`] the way a UI shell
//! would forward pointer and toolbar input, then renders or submits.

use std::path::{Path, PathBuf};

use cleanup_config::CleanupConfig;
use cleanup_inpaint::{submit, InpaintError, RemoteInpaint};
use cleanup_ipc::{parse_commands, EditorCommand, EditorEvent, IpcError};
use masking::{EditorSession, ImageLoadError, RenderError, SubmissionOutcome, SubmitError};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::cli::CliArgs;

const DEFAULT_OUTPUT: &str = "cleaned.png";
const DEFAULT_MASK_OUTPUT: &str = "mask.png";

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to load image: {0}")]
    Load(#[from] ImageLoadError),

    #[error("Invalid command script: {0}")]
    Script(#[from] IpcError),

    #[error("Submission rejected: {0}")]
    Submit(#[from] SubmitError),

    #[error("Failed to encode mask: {0}")]
    Render(#[from] RenderError),

    #[error("Inpainting backend unavailable: {0}")]
    Backend(#[from] InpaintError),

    #[error("Inpainting failed: {0}")]
    Failed(String),
}

async fn read(path: &Path) -> Result<Vec<u8>, DriverError> {
    tokio::fs::read(path).await.map_err(|source| DriverError::Io {
        path: path.to_path_buf(),
        source,
    })
}

async fn write(path: &Path, bytes: &[u8]) -> Result<(), DriverError> {
    tokio::fs::write(path, bytes)
        .await
        .map_err(|source| DriverError::Io {
            path: path.to_path_buf(),
            source,
        })
}

/// Forward every command except `Submit` to the session.
///
/// Returns the number of commands applied.
pub fn replay(session: &mut EditorSession, commands: Vec<EditorCommand>) -> usize {
    let mut applied = 0;
    for command in commands {
        if command == EditorCommand::Submit {
            debug!("Submit in script deferred until replay finishes");
            continue;
        }
        if let Some(ticket) = session.handle_command(command) {
            // Only Submit yields tickets
            warn!("Unexpected submission {} during replay", ticket.generation);
        }
        applied += 1;
        log_events(session);
    }
    applied
}

fn log_events(session: &mut EditorSession) {
    for event in session.drain_events() {
        match event {
            EditorEvent::Error { code, message } => warn!("{code}: {message}"),
            EditorEvent::PreviewUpdated => {}
            other => debug!("{other:?}"),
        }
    }
}

/// Run the whole pipeline. Returns a one-line summary.
pub async fn run(args: &CliArgs, config: CleanupConfig) -> Result<String, DriverError> {
    let image = read(&args.image).await?;
    let mut session = EditorSession::with_image(config.editor.clone(), &image)?;
    let display_size = session.resize(args.container.width, args.container.height);
    info!(
        "Image {}x{} shown at {}x{}",
        session.image_size().width,
        session.image_size().height,
        display_size.width,
        display_size.height
    );

    let script = read(&args.script).await?;
    let commands = parse_commands(&String::from_utf8_lossy(&script))?;
    let applied = replay(&mut session, commands);
    info!(
        "Replayed {applied} commands: {} strokes",
        session.strokes().len()
    );

    if args.dry_run {
        let path = args
            .mask_out
            .clone()
            .or_else(|| args.output.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MASK_OUTPUT));
        let mask = session.render_mask()?;
        write(&path, &mask.encode_png()?).await?;
        return Ok(format!(
            "Wrote {}x{} mask ({} pixels selected) to {}",
            mask.width(),
            mask.height(),
            mask.selected_count(),
            path.display()
        ));
    }

    let mut backend = RemoteInpaint::new(config.inpaint)?;
    let outcome = submit(&mut session, &mut backend).await?;
    log_events(&mut session);

    if let (Some(path), Some(mask)) = (&args.mask_out, session.last_mask()) {
        write(path, &mask.encode_png()?).await?;
    }

    match outcome {
        SubmissionOutcome::Completed => {}
        SubmissionOutcome::Failed(message) => return Err(DriverError::Failed(message)),
        SubmissionOutcome::Stale => {
            return Err(DriverError::Failed("response was discarded".into()));
        }
    }

    let Some(result) = session.take_result() else {
        return Err(DriverError::Failed("no result returned".into()));
    };
    let path = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
    write(&path, &result.image).await?;
    Ok(format!(
        "Wrote {}x{} result to {}",
        result.width,
        result.height,
        path.display()
    ))
}
