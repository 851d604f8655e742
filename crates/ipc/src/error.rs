//! Errors from decoding command scripts and encoding editor events

#[derive(Debug, thiserror::Error)]
pub enum IpcError {
    /// Not JSON, or JSON that does not match a message shape
    #[error("Malformed editor message: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Command script must be a JSON array, found {found}")]
    NotACommandList { found: &'static str },

    /// Position is zero-based within the script array
    #[error("Command {index} is not a valid editor command: {source}")]
    InvalidCommand {
        index: usize,
        source: serde_json::Error,
    },
}
