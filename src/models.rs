//! Data models and structures
//!
//! Defines the client configuration and the result shapes returned by the
//! photo generation and text optimization operations.

use crate::error::{Error, ErrorKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

pub const DEFAULT_IMAGE_MODEL: &str = "@cf/stabilityai/stable-diffusion-xl-base-1.0";
pub const DEFAULT_CHAT_MODEL: &str = "@cf/meta/llama-3-8b-instruct";
pub const DEFAULT_INFERENCE_BASE_URL: &str = "https://api.cloudflare.com";
pub const DEFAULT_MEDIA_BASE_URL: &str = "https://api.cloudinary.com";

const UNKNOWN_ERROR: &str = "Unknown error occurred";

/// Credentials for the media host that receives generated images.
#[derive(Clone, PartialEq, Eq)]
pub struct MediaConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
}

impl MediaConfig {
    pub fn new(cloud_name: String, api_key: String, api_secret: String) -> Self {
        Self {
            cloud_name,
            api_key,
            api_secret,
        }
    }
}

impl fmt::Debug for MediaConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediaConfig")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &"<redacted>")
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

// Configuration
#[derive(Clone, PartialEq)]
pub struct Config {
    pub inference_api_key: String,
    pub inference_account_id: String,
    pub media: Option<MediaConfig>,
    pub image_model: String,
    pub chat_model: String,
    pub inference_base_url: String,
    pub media_base_url: String,
    /// Per-request timeout. `None` leaves the transport defaults in place.
    pub timeout: Option<Duration>,
}

impl Config {
    pub fn new(inference_api_key: String, inference_account_id: String) -> Self {
        Self {
            inference_api_key,
            inference_account_id,
            media: None,
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            inference_base_url: DEFAULT_INFERENCE_BASE_URL.to_string(),
            media_base_url: DEFAULT_MEDIA_BASE_URL.to_string(),
            timeout: None,
        }
    }

    pub fn with_media(mut self, media: MediaConfig) -> Self {
        self.media = Some(media);
        self
    }

    pub fn with_image_model(mut self, model: String) -> Self {
        self.image_model = model;
        self
    }

    pub fn with_chat_model(mut self, model: String) -> Self {
        self.chat_model = model;
        self
    }

    pub fn with_inference_base_url(mut self, base_url: String) -> Self {
        self.inference_base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_media_base_url(mut self, base_url: String) -> Self {
        self.media_base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Rejects blank credentials before any client is built.
    pub fn validate(&self) -> crate::Result<()> {
        if self.inference_api_key.trim().is_empty() {
            return Err(Error::Config("inference API key is empty".to_string()));
        }
        if self.inference_account_id.trim().is_empty() {
            return Err(Error::Config("inference account ID is empty".to_string()));
        }
        if let Some(media) = &self.media {
            if media.cloud_name.trim().is_empty()
                || media.api_key.trim().is_empty()
                || media.api_secret.trim().is_empty()
            {
                return Err(Error::Config(
                    "media config requires cloud name, API key and API secret".to_string(),
                ));
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("inference_api_key", &"<redacted>")
            .field("inference_account_id", &self.inference_account_id)
            .field("media", &self.media)
            .field("image_model", &self.image_model)
            .field("chat_model", &self.chat_model)
            .field("inference_base_url", &self.inference_base_url)
            .field("media_base_url", &self.media_base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn error_message(err: &Error) -> String {
    let message = err.to_string();
    if message.trim().is_empty() {
        UNKNOWN_ERROR.to_string()
    } else {
        message
    }
}

/// Outcome of a photo generation call.
///
/// `image_url` is either a hosted URL or an inline `data:` URL when
/// `success` is true, and empty otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratePhotoResult {
    pub image_url: String,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
}

impl GeneratePhotoResult {
    pub fn succeeded(image_url: String) -> Self {
        Self {
            image_url,
            success: true,
            error: None,
            error_kind: None,
        }
    }

    pub fn failed(err: &Error) -> Self {
        Self {
            image_url: String::new(),
            success: false,
            error: Some(error_message(err)),
            error_kind: Some(err.kind()),
        }
    }
}

impl From<crate::Result<String>> for GeneratePhotoResult {
    fn from(result: crate::Result<String>) -> Self {
        match result {
            Ok(url) => Self::succeeded(url),
            Err(e) => Self::failed(&e),
        }
    }
}

/// Outcome of a text optimization call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizeTextResult {
    pub enhanced: String,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
}

impl OptimizeTextResult {
    pub fn succeeded(enhanced: String) -> Self {
        Self {
            enhanced,
            success: true,
            error: None,
            error_kind: None,
        }
    }

    pub fn failed(err: &Error) -> Self {
        Self {
            enhanced: String::new(),
            success: false,
            error: Some(error_message(err)),
            error_kind: Some(err.kind()),
        }
    }
}

impl From<crate::Result<String>> for OptimizeTextResult {
    fn from(result: crate::Result<String>) -> Self {
        match result {
            Ok(text) => Self::succeeded(text),
            Err(e) => Self::failed(&e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_config_defaults() {
        let config = Config::new("k".to_string(), "a".to_string());
        assert_eq!(config.image_model, DEFAULT_IMAGE_MODEL);
        assert_eq!(config.chat_model, DEFAULT_CHAT_MODEL);
        assert!(config.media.is_none());
        assert!(config.timeout.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_rejects_blank_credentials() {
        let err = Config::new(" ".to_string(), "a".to_string())
            .validate()
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = Config::new("k".to_string(), String::new())
            .validate()
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = Config::new("k".to_string(), "a".to_string())
            .with_media(MediaConfig::new(
                "cloud".to_string(),
                String::new(),
                "secret".to_string(),
            ))
            .validate()
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let config = Config::new("k".to_string(), "a".to_string())
            .with_inference_base_url("http://localhost:8080/".to_string());
        assert_eq!(config.inference_base_url, "http://localhost:8080");
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = Config::new("super-secret-key".to_string(), "acct".to_string()).with_media(
            MediaConfig::new(
                "cloud".to_string(),
                "media-key".to_string(),
                "media-secret".to_string(),
            ),
        );
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret-key"));
        assert!(!debug.contains("media-key"));
        assert!(!debug.contains("media-secret"));
        assert!(debug.contains("acct"));
    }

    #[test]
    fn test_failed_photo_result_shape() {
        let result = GeneratePhotoResult::failed(&Error::Uninitialized);
        assert!(!result.success);
        assert!(result.image_url.is_empty());
        assert_eq!(result.error_kind, Some(ErrorKind::Uninitialized));
        assert!(!result.error.unwrap().is_empty());
    }

    #[test]
    fn test_success_result_omits_error_fields() {
        let result = OptimizeTextResult::succeeded("Hello there!".to_string());
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "enhanced": "Hello there!", "success": true })
        );
    }

    #[test]
    fn test_from_result_conversion() {
        let ok: GeneratePhotoResult = Ok("https://cdn.example.com/a.png".to_string()).into();
        assert_eq!(
            ok,
            GeneratePhotoResult::succeeded("https://cdn.example.com/a.png".to_string())
        );

        let err: OptimizeTextResult = Err(Error::AiProvider("boom".to_string())).into();
        assert!(!err.success);
        assert_eq!(err.error_kind, Some(ErrorKind::Remote));
        assert!(err.error.unwrap().contains("boom"));
    }
}
