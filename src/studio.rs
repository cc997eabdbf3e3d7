//! Client object that owns the configured services and runs the two public
//! operations.

use crate::ai::mime::{detect_image_mime, to_data_url};
use crate::ai::{ChatService, ImageGenerationService, WorkersAiChatClient, WorkersAiImageClient};
use crate::media::{select_media_service, MediaService, RuntimeCapability};
use crate::models::{Config, GeneratePhotoResult, OptimizeTextResult};
use crate::Result;
use tracing::{error, info};

/// Generates photos and optimizes text against the configured services.
///
/// Every public operation is total: failures come back as a result value with
/// `success: false`, never as an `Err` or a panic.
pub struct Studio {
    image_gen: Box<dyn ImageGenerationService>,
    chat: Box<dyn ChatService>,
    media: Box<dyn MediaService>,
}

/// Injectable service bundle used to construct [`Studio`] in tests/harnesses.
pub struct StudioServices {
    pub image_gen: Box<dyn ImageGenerationService>,
    pub chat: Box<dyn ChatService>,
    pub media: Box<dyn MediaService>,
}

impl Studio {
    /// Build a studio from `config`, detecting upload support for this runtime.
    pub fn new(config: Config) -> Result<Self> {
        Self::with_capability(config, RuntimeCapability::detect())
    }

    /// Build a studio from `config` for a runtime with the given capability.
    ///
    /// Media credentials on a restricted runtime are ignored with a warning.
    pub fn with_capability(config: Config, capability: RuntimeCapability) -> Result<Self> {
        config.validate()?;

        // Reuse one HTTP connection pool across service clients.
        let http_client = reqwest::Client::new();

        info!(
            "Image model: {}, chat model: {}",
            config.image_model, config.chat_model
        );

        Ok(Self::with_services(StudioServices {
            image_gen: Box::new(WorkersAiImageClient::new_with_client(
                &config,
                http_client.clone(),
            )),
            chat: Box::new(WorkersAiChatClient::new_with_client(
                &config,
                http_client.clone(),
            )),
            media: select_media_service(&config, capability, http_client),
        }))
    }

    /// Build a studio from concrete service dependencies.
    pub fn with_services(services: StudioServices) -> Self {
        Self {
            image_gen: services.image_gen,
            chat: services.chat,
            media: services.media,
        }
    }

    /// Render an image for `prompt` and return a hosted or inline URL.
    pub async fn generate_photo(&self, prompt: &str) -> GeneratePhotoResult {
        let result = self.try_generate_photo(prompt).await;
        if let Err(e) = &result {
            error!("Photo generation failed: {}", e);
        }
        result.into()
    }

    async fn try_generate_photo(&self, prompt: &str) -> Result<String> {
        let image_bytes = self.image_gen.generate_image(prompt).await?;
        let mime = detect_image_mime(&image_bytes);

        match self.media.upload_image(&image_bytes, mime).await? {
            Some(url) => Ok(url),
            None => {
                info!("Returning {} image inline", mime);
                Ok(to_data_url(&image_bytes, mime))
            }
        }
    }

    /// Rewrite `prompt` into clearer, more engaging text.
    pub async fn optimize_text(&self, prompt: &str) -> OptimizeTextResult {
        let result = self.chat.optimize_text(prompt).await;
        if let Err(e) = &result {
            error!("Text optimization failed: {}", e);
        }
        result.into()
    }
}
