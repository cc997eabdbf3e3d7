use super::client::{parse_envelope, RunOutput, WorkersAiHttpClient};
use super::types::{ImageRequest, ImageResult};
use crate::ai::ImageGenerationService;
use crate::models::Config;
use crate::{Error, Result};
use async_trait::async_trait;

pub struct WorkersAiImageClient {
    http: WorkersAiHttpClient,
    model: String,
}

impl WorkersAiImageClient {
    pub fn new(config: &Config) -> Self {
        Self::new_with_client(config, reqwest::Client::new())
    }

    pub fn new_with_client(config: &Config, client: reqwest::Client) -> Self {
        Self {
            http: WorkersAiHttpClient::new_with_client(
                config.inference_api_key.clone(),
                config.inference_account_id.clone(),
                config.inference_base_url.clone(),
                config.timeout,
                client,
            ),
            model: config.image_model.clone(),
        }
    }

    fn decode_json_image(body: &str) -> Result<Vec<u8>> {
        let result: ImageResult = parse_envelope(body)?;
        let encoded = result
            .image
            .ok_or_else(|| Error::AiProvider("No image data in Workers AI response".to_string()))?;

        use base64::Engine as _;
        base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .map_err(|e| Error::AiProvider(format!("Failed to decode base64 image: {}", e)))
    }
}

#[async_trait]
impl ImageGenerationService for WorkersAiImageClient {
    async fn generate_image(&self, prompt: &str) -> Result<Vec<u8>> {
        let request = ImageRequest {
            prompt: prompt.to_string(),
        };

        let image_bytes = match self.http.run_binary(&self.model, &request).await? {
            RunOutput::Binary(bytes) => bytes,
            RunOutput::Json(body) => Self::decode_json_image(&body)?,
        };

        if image_bytes.is_empty() {
            return Err(Error::AiProvider(
                "Workers AI returned an empty image".to_string(),
            ));
        }

        tracing::debug!("Received {} image bytes from {}", image_bytes.len(), self.model);
        Ok(image_bytes)
    }
}
