use super::MediaService;
use crate::models::MediaConfig;
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use sha1::{Digest, Sha1};
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UploadErrorResponse {
    error: UploadErrorDetail,
}

#[derive(Debug, Deserialize)]
struct UploadErrorDetail {
    message: String,
}

/// Signs upload parameters: sorted `key=value` pairs joined by `&`, followed
/// by the API secret, hashed with SHA-1 and hex encoded.
pub fn sign_params(params: &[(&str, &str)], api_secret: &str) -> String {
    let mut sorted: Vec<_> = params.iter().filter(|(_, v)| !v.is_empty()).collect();
    sorted.sort_by_key(|(key, _)| *key);

    let to_sign = sorted
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha1::new();
    hasher.update(to_sign.as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}

fn file_name_for(content_type: &str) -> String {
    let extension = content_type
        .strip_prefix("image/")
        .filter(|ext| !ext.is_empty())
        .unwrap_or("png");
    format!("image.{}", extension)
}

pub struct CloudinaryClient {
    client: Client,
    credentials: MediaConfig,
    base_url: String,
    timeout: Option<Duration>,
}

impl CloudinaryClient {
    pub fn new(credentials: MediaConfig, base_url: String) -> Self {
        Self::new_with_client(credentials, base_url, None, Client::new())
    }

    pub fn new_with_client(
        credentials: MediaConfig,
        base_url: String,
        timeout: Option<Duration>,
        client: Client,
    ) -> Self {
        Self {
            client,
            credentials,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    fn upload_url(&self) -> String {
        format!(
            "{}/v1_1/{}/image/upload",
            self.base_url, self.credentials.cloud_name
        )
    }

    fn build_form(&self, data: &[u8], content_type: &str, timestamp: i64) -> Result<Form> {
        let timestamp = timestamp.to_string();
        let signature = sign_params(
            &[("timestamp", timestamp.as_str())],
            &self.credentials.api_secret,
        );

        let file = Part::bytes(data.to_vec())
            .file_name(file_name_for(content_type))
            .mime_str(content_type)
            .map_err(|e| Error::Upload(format!("Invalid content type {}: {}", content_type, e)))?;

        Ok(Form::new()
            .text("api_key", self.credentials.api_key.clone())
            .text("timestamp", timestamp)
            .text("signature", signature)
            .part("file", file))
    }
}

#[async_trait]
impl MediaService for CloudinaryClient {
    async fn upload_image(&self, data: &[u8], content_type: &str) -> Result<Option<String>> {
        let form = self.build_form(data, content_type, chrono::Utc::now().timestamp())?;

        tracing::debug!("Uploading {} bytes to Cloudinary", data.len());

        let mut builder = self.client.post(self.upload_url()).multipart(form);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await.map_err(|e| {
            tracing::error!("Failed to send upload to Cloudinary: {}", e);
            Error::Upload(format!("Failed to upload image: {}", e))
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Upload(format!("Failed to read upload response: {}", e)))?;

        if !status.is_success() {
            let message = serde_json::from_str::<UploadErrorResponse>(&body)
                .map(|r| r.error.message)
                .unwrap_or(body);
            tracing::error!("Cloudinary upload error (status {}): {}", status, message);
            return Err(Error::Upload(format!(
                "Cloudinary error (status {}): {}",
                status, message
            )));
        }

        let parsed: UploadResponse = serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Failed to parse Cloudinary response: {}\nBody: {}", e, body);
            Error::Upload(format!("Failed to parse Cloudinary response: {}", e))
        })?;

        let url = parsed
            .secure_url
            .filter(|url| !url.is_empty())
            .ok_or_else(|| Error::Upload("No secure_url in Cloudinary response".to_string()))?;

        tracing::info!("Uploaded image to {}", url);
        Ok(Some(url))
    }
}
