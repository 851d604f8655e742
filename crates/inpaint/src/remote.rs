//! Remote inpainting service client

use std::time::Duration;

use cleanup_config::InpaintConfig;
use image::GenericImageView;
use masking::EditResult;
use reqwest::multipart::{Form, Part};
use tracing::{debug, info};

use crate::{InpaintBackend, InpaintError, InpaintRequest};

/// Client that POSTs image + mask as multipart form data
pub struct RemoteInpaint {
    config: InpaintConfig,
    client: reqwest::Client,
}

impl RemoteInpaint {
    pub fn new(config: InpaintConfig) -> Result<Self, InpaintError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| InpaintError::Connection(e.to_string()))?;
        Ok(Self { config, client })
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }
}

impl InpaintBackend for RemoteInpaint {
    async fn inpaint(&mut self, request: InpaintRequest) -> Result<EditResult, InpaintError> {
        let form = self.build_form(request)?;

        let mut builder = self.client.post(&self.config.endpoint).multipart(form);
        if let Some(key) = &self.config.api_key {
            builder = builder.header(self.config.api_key_header.as_str(), key.as_str());
        }

        info!("POST {}", self.config.endpoint);
        let response = builder
            .send()
            .await
            .map_err(|e| InpaintError::Connection(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error body".to_string());
            return Err(InpaintError::Status {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| InpaintError::Connection(e.to_string()))?;

        let decoded = image::load_from_memory(&bytes)
            .map_err(|e| InpaintError::InvalidResponse(format!("Failed to decode image: {e}")))?;
        let (width, height) = decoded.dimensions();
        debug!("Received {} bytes, {}x{}", bytes.len(), width, height);

        Ok(EditResult {
            image: bytes.to_vec(),
            width,
            height,
        })
    }
}

impl RemoteInpaint {
    fn build_form(&self, request: InpaintRequest) -> Result<Form, InpaintError> {
        let image = Part::bytes(request.image_png)
            .file_name("image.png")
            .mime_str("image/png")
            .map_err(|e| InpaintError::Encode(e.to_string()))?;
        let mask = Part::bytes(request.mask_png)
            .file_name("mask.png")
            .mime_str("image/png")
            .map_err(|e| InpaintError::Encode(e.to_string()))?;

        let mut form = Form::new()
            .part(self.config.image_field.clone(), image)
            .part(self.config.mask_field.clone(), mask);
        for (name, value) in &self.config.extra_fields {
            form = form.text(name.clone(), value.clone());
        }
        Ok(form)
    }
}

#[derive(serde::Deserialize)]
struct ErrorBody {
    message: String,
}

/// The `message` of a JSON error body, or the body itself
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.message,
        Err(_) if body.trim().is_empty() => "empty response body".to_string(),
        Err(_) => body.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_from_json() {
        assert_eq!(
            error_message(r#"{"message":"Invalid API key"}"#),
            "Invalid API key"
        );
    }

    #[test]
    fn test_error_message_plain_text() {
        assert_eq!(error_message(" Bad Gateway \n"), "Bad Gateway");
        assert_eq!(error_message(""), "empty response body");
    }

    #[test]
    fn test_new_client_uses_configured_endpoint() {
        let backend = RemoteInpaint::new(InpaintConfig::default()).unwrap();
        assert_eq!(backend.endpoint(), cleanup_config::DEFAULT_ENDPOINT);
    }
}
