//! Shared configuration for the cleanup editor
//!
//! This crate provides the single source of truth for brush defaults,
//! history limits, and the inpainting endpoint shared by the editor core,
//! the inpainting client and the headless driver.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Default brush diameter in display-space pixels
pub const DEFAULT_BRUSH_SIZE: f32 = 24.0;

/// Smallest brush the size control allows
pub const MIN_BRUSH_SIZE: f32 = 5.0;

/// Largest brush the size control allows
pub const MAX_BRUSH_SIZE: f32 = 50.0;

/// Default number of undo snapshots kept per session
pub const DEFAULT_MAX_HISTORY: usize = 100;

/// Default inpainting endpoint (the local broker that attaches API keys)
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/api/cleanup";

/// Default request timeout for the inpainting call
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Brush and history settings for an editing session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Brush diameter used when a session starts
    pub default_brush_size: f32,
    /// Lower bound for brush diameter
    pub min_brush_size: f32,
    /// Upper bound for brush diameter
    pub max_brush_size: f32,
    /// Maximum undo snapshots (oldest are dropped first)
    pub max_history: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_brush_size: DEFAULT_BRUSH_SIZE,
            min_brush_size: MIN_BRUSH_SIZE,
            max_brush_size: MAX_BRUSH_SIZE,
            max_history: DEFAULT_MAX_HISTORY,
        }
    }
}

impl EditorConfig {
    /// Clamp a requested brush diameter into the configured range
    ///
    /// An inverted or NaN range clamps nothing and yields the start size.
    pub fn clamp_brush_size(&self, size: f32) -> f32 {
        if !(self.min_brush_size <= self.max_brush_size) {
            warn!(
                "Brush size range {}..{} is invalid, using {}",
                self.min_brush_size,
                self.max_brush_size,
                self.start_brush_size()
            );
            return self.start_brush_size();
        }
        let size = if size.is_finite() {
            size
        } else {
            self.start_brush_size()
        };
        size.clamp(self.min_brush_size, self.max_brush_size)
    }

    fn start_brush_size(&self) -> f32 {
        if self.default_brush_size.is_finite() && self.default_brush_size > 0.0 {
            self.default_brush_size
        } else {
            DEFAULT_BRUSH_SIZE
        }
    }
}

/// Settings for the remote inpainting call
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InpaintConfig {
    /// URL receiving the multipart POST
    pub endpoint: String,
    /// Multipart field carrying the source image
    pub image_field: String,
    /// Multipart field carrying the mask
    pub mask_field: String,
    /// Additional text fields sent with every request (e.g. `mode=quality`)
    pub extra_fields: Vec<(String, String)>,
    /// API key attached as `api_key_header`; `None` when a broker adds it
    pub api_key: Option<String>,
    /// Header name used for `api_key`
    pub api_key_header: String,
    /// Whole-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for InpaintConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            image_field: "image".to_string(),
            mask_field: "mask".to_string(),
            extra_fields: Vec::new(),
            api_key: None,
            api_key_header: "x-api-key".to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanupConfig {
    pub editor: EditorConfig,
    pub inpaint: InpaintConfig,
}

impl CleanupConfig {
    /// Load configuration from a JSON file. Missing keys fall back to defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        debug!("Loaded config from {}", path.display());
        config.validate()?;
        Ok(config)
    }

    /// Overlay values from `CLEANUP_ENDPOINT`, `CLEANUP_API_KEY` and
    /// `CLEANUP_TIMEOUT_SECS`
    pub fn apply_env(mut self) -> Self {
        if let Ok(endpoint) = std::env::var("CLEANUP_ENDPOINT") {
            if !endpoint.is_empty() {
                self.inpaint.endpoint = endpoint;
            }
        }
        if let Ok(key) = std::env::var("CLEANUP_API_KEY") {
            if !key.is_empty() {
                self.inpaint.api_key = Some(key);
            }
        }
        if let Ok(secs) = std::env::var("CLEANUP_TIMEOUT_SECS") {
            match secs.parse() {
                Ok(secs) => self.inpaint.timeout_secs = secs,
                Err(_) => tracing::warn!("Ignoring CLEANUP_TIMEOUT_SECS={secs:?}: not a number"),
            }
        }
        self
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        let editor = &self.editor;
        if !(editor.min_brush_size > 0.0 && editor.min_brush_size <= editor.max_brush_size) {
            return Err(ConfigError::Invalid(format!(
                "brush range {}..{} is empty or non-positive",
                editor.min_brush_size, editor.max_brush_size
            )));
        }
        if !(editor.min_brush_size <= editor.default_brush_size
            && editor.default_brush_size <= editor.max_brush_size)
        {
            return Err(ConfigError::Invalid(format!(
                "default brush size {} outside {}..{}",
                editor.default_brush_size, editor.min_brush_size, editor.max_brush_size
            )));
        }

        let inpaint = &self.inpaint;
        if inpaint.endpoint.trim().is_empty() {
            return Err(ConfigError::Invalid("endpoint is empty".into()));
        }
        if inpaint.image_field.is_empty() || inpaint.mask_field.is_empty() {
            return Err(ConfigError::Invalid("multipart field names must be set".into()));
        }
        if inpaint.image_field == inpaint.mask_field {
            return Err(ConfigError::Invalid(
                "image and mask must use different multipart fields".into(),
            ));
        }
        if inpaint.timeout_secs == 0 {
            return Err(ConfigError::Invalid("timeout must be at least one second".into()));
        }
        Ok(())
    }
}
