use super::MediaService;
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct MockMediaClient {
    uploads: Arc<Mutex<Vec<(Vec<u8>, String)>>>,
    base_url: String,
    failure: Option<String>,
}

impl MockMediaClient {
    pub fn new() -> Self {
        Self {
            uploads: Arc::new(Mutex::new(Vec::new())),
            base_url: "https://mock-media.example.com".to_string(),
            failure: None,
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Makes every upload fail with `message`.
    pub fn with_failure(mut self, message: String) -> Self {
        self.failure = Some(message);
        self
    }

    pub fn get_upload_count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }

    /// Uploaded payloads with their content types, in call order.
    pub fn get_uploads(&self) -> Vec<(Vec<u8>, String)> {
        self.uploads.lock().unwrap().clone()
    }
}

impl Default for MockMediaClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MediaService for MockMediaClient {
    async fn upload_image(&self, data: &[u8], content_type: &str) -> Result<Option<String>> {
        let index = {
            let mut uploads = self.uploads.lock().unwrap();
            uploads.push((data.to_vec(), content_type.to_string()));
            uploads.len()
        };

        if let Some(message) = &self.failure {
            return Err(Error::Upload(message.clone()));
        }

        Ok(Some(format!("{}/image-{}", self.base_url, index)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_media_records_uploads() {
        let client = MockMediaClient::new();

        let url = client
            .upload_image(b"data", "image/png")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(url, "https://mock-media.example.com/image-1");
        assert_eq!(client.get_upload_count(), 1);
        assert_eq!(
            client.get_uploads(),
            vec![(b"data".to_vec(), "image/png".to_string())]
        );
    }

    #[tokio::test]
    async fn test_mock_media_with_custom_base_url() {
        let client = MockMediaClient::new().with_base_url("https://custom.example".to_string());
        let url = client.upload_image(b"x", "image/jpeg").await.unwrap();
        assert_eq!(url.as_deref(), Some("https://custom.example/image-1"));
    }

    #[tokio::test]
    async fn test_mock_media_failure() {
        let client = MockMediaClient::new().with_failure("quota exceeded".to_string());
        let err = client.upload_image(b"x", "image/png").await.unwrap_err();
        assert!(matches!(err, Error::Upload(_)));
        assert!(err.to_string().contains("quota exceeded"));
    }
}
