//! Command-line arguments

use std::path::PathBuf;

use clap::Parser;

/// Headless object removal.
///
/// Loads an image, replays a recorded list of editor commands (pointer
/// strokes, undo, brush changes) and sends the image with the resulting
/// mask to the inpainting endpoint.
#[derive(Parser, Debug)]
#[command(
    name = "cleanup",
    about = "Replay editor strokes over an image and remove the selected objects",
    long_about = "Replay a JSON list of editor commands over an image, render the\n\
                  full-resolution mask and submit both to an inpainting endpoint.\n\n\
                  Example:\n  \
                  cleanup --image photo.jpg --script strokes.json --output cleaned.png\n  \
                  cleanup -i photo.jpg -s strokes.json --dry-run --mask-out mask.png"
)]
pub struct CliArgs {
    /// Source image.
    #[arg(short, long, value_name = "FILE")]
    pub image: PathBuf,

    /// JSON array of editor commands to replay.
    #[arg(short, long, value_name = "COMMANDS.json")]
    pub script: PathBuf,

    /// Container the display surface is fitted into, as WIDTHxHEIGHT.
    /// Pointer coordinates in the script are relative to this layout.
    #[arg(long, default_value = "1024x768", value_parser = parse_container, value_name = "WxH")]
    pub container: ContainerSize,

    /// JSON config file (editor and inpaint sections).
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override the inpainting endpoint URL.
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Where to write the edited image (default: cleaned.png).
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Also write the submitted mask here.
    #[arg(long, value_name = "FILE")]
    pub mask_out: Option<PathBuf>,

    /// Render and write the mask only; no network call.
    #[arg(long)]
    pub dry_run: bool,

    /// Log at debug level unless RUST_LOG is set.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Container size in client units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerSize {
    pub width: f32,
    pub height: f32,
}

fn parse_container(value: &str) -> Result<ContainerSize, String> {
    let (w, h) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {value:?}"))?;
    let width: f32 = w
        .trim()
        .parse()
        .map_err(|_| format!("invalid width {w:?}"))?;
    let height: f32 = h
        .trim()
        .parse()
        .map_err(|_| format!("invalid height {h:?}"))?;
    if !(width > 0.0 && height > 0.0) {
        return Err(format!("container must have a positive area, got {value:?}"));
    }
    Ok(ContainerSize { width, height })
}
