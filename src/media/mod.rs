//! Media hosting integration for generated images
//!
//! Uploads image bytes to Cloudinary and returns the hosted URL. The uploader
//! is chosen once, when the client is built: either a functioning uploader or
//! an inline one that declines to host and lets the caller embed the bytes.

pub mod cloudinary;
pub mod mock;

pub use cloudinary::CloudinaryClient;
pub use mock::MockMediaClient;

use crate::models::Config;
use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait MediaService: Send + Sync {
    /// Uploads `data` and returns its public URL, or `None` when this
    /// uploader does not host media.
    async fn upload_image(&self, data: &[u8], content_type: &str) -> Result<Option<String>>;
}

/// Whether the current runtime can perform native multipart uploads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeCapability {
    Capable,
    Restricted,
}

impl RuntimeCapability {
    pub fn detect() -> Self {
        if cfg!(target_family = "wasm") {
            RuntimeCapability::Restricted
        } else {
            RuntimeCapability::Capable
        }
    }
}

/// Uploader for runtimes or configurations without media hosting.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineMediaClient;

#[async_trait]
impl MediaService for InlineMediaClient {
    async fn upload_image(&self, _data: &[u8], _content_type: &str) -> Result<Option<String>> {
        Ok(None)
    }
}

/// Picks the uploader for `config` on a runtime with `capability`.
pub fn select_media_service(
    config: &Config,
    capability: RuntimeCapability,
    http_client: reqwest::Client,
) -> Box<dyn MediaService> {
    match (&config.media, capability) {
        (Some(media), RuntimeCapability::Capable) => {
            tracing::info!("Media uploads enabled (cloud: {})", media.cloud_name);
            Box::new(CloudinaryClient::new_with_client(
                media.clone(),
                config.media_base_url.clone(),
                config.timeout,
                http_client,
            ))
        }
        (Some(_), RuntimeCapability::Restricted) => {
            tracing::warn!(
                "Media config ignored: uploads are not supported in this runtime; images will be returned inline"
            );
            Box::new(InlineMediaClient)
        }
        (None, _) => Box::new(InlineMediaClient),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MediaConfig;

    fn media_config() -> Config {
        Config::new("k".to_string(), "a".to_string()).with_media(MediaConfig::new(
            "cloud".to_string(),
            "key".to_string(),
            "secret".to_string(),
        ))
    }

    #[tokio::test]
    async fn test_inline_client_declines_upload() {
        let url = InlineMediaClient
            .upload_image(b"bytes", "image/png")
            .await
            .unwrap();
        assert!(url.is_none());
    }

    #[tokio::test]
    async fn test_restricted_runtime_ignores_media_config() {
        let service = select_media_service(
            &media_config(),
            RuntimeCapability::Restricted,
            reqwest::Client::new(),
        );
        let url = service.upload_image(b"bytes", "image/png").await.unwrap();
        assert!(url.is_none());
    }

    #[tokio::test]
    async fn test_missing_media_config_selects_inline() {
        let config = Config::new("k".to_string(), "a".to_string());
        let service =
            select_media_service(&config, RuntimeCapability::Capable, reqwest::Client::new());
        let url = service.upload_image(b"bytes", "image/png").await.unwrap();
        assert!(url.is_none());
    }

    #[test]
    fn test_detect_on_native_target_is_capable() {
        if !cfg!(target_family = "wasm") {
            assert_eq!(RuntimeCapability::detect(), RuntimeCapability::Capable);
        }
    }
}
