use super::types::RunEnvelope;
use crate::{Error, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// Body returned by a model run: raw media bytes or a JSON document.
#[derive(Debug)]
pub enum RunOutput {
    Binary(Vec<u8>),
    Json(String),
}

/// Lightweight Workers AI REST client shared by the image and chat modules.
pub struct WorkersAiHttpClient {
    client: Client,
    api_key: String,
    account_id: String,
    base_url: String,
    timeout: Option<Duration>,
}

impl WorkersAiHttpClient {
    pub fn new_with_client(
        api_key: String,
        account_id: String,
        base_url: String,
        timeout: Option<Duration>,
        client: Client,
    ) -> Self {
        Self {
            client,
            api_key,
            account_id,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    /// Full run URL for `model`; the account ID is part of the path.
    pub fn run_url(&self, model: &str) -> String {
        format!(
            "{}/client/v4/accounts/{}/ai/run/{}",
            self.base_url, self.account_id, model
        )
    }

    async fn send<Req: Serialize>(&self, model: &str, request: &Req) -> Result<Response> {
        let url = self.run_url(model);
        tracing::debug!("Sending Workers AI request for model {}", model);

        let mut builder = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(request);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await.map_err(|e| {
            tracing::error!("Failed to send request to Workers AI: {}", e);
            e
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.map_err(|e| {
                Error::AiProvider(format!(
                    "Workers AI error (status {}): failed to read body: {}",
                    status, e
                ))
            })?;
            tracing::error!("Workers AI error (status {}): {}", status, error_text);
            return Err(Error::AiProvider(format!(
                "Workers AI error (status {}): {}",
                status, error_text
            )));
        }

        Ok(response)
    }

    /// Runs a model whose successful response is normally raw bytes.
    ///
    /// Some models answer with a JSON envelope instead; that case is reported
    /// as [`RunOutput::Json`] so the caller can decode it.
    pub async fn run_binary<Req: Serialize>(
        &self,
        model: &str,
        request: &Req,
    ) -> Result<RunOutput> {
        let response = self.send(model, request).await?;

        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("application/json"));

        if is_json {
            Ok(RunOutput::Json(response.text().await?))
        } else {
            Ok(RunOutput::Binary(response.bytes().await?.to_vec()))
        }
    }

    /// Runs a model that answers with a `{ result, success, errors }` envelope
    /// and returns the unwrapped `result`.
    pub async fn run_json<Req: Serialize, Resp: DeserializeOwned>(
        &self,
        model: &str,
        request: &Req,
    ) -> Result<Resp> {
        let body = self.send(model, request).await?.text().await?;
        parse_envelope(&body)
    }
}

/// Parses a Workers AI envelope, rejecting `success: false` and missing results.
pub fn parse_envelope<Resp: DeserializeOwned>(body: &str) -> Result<Resp> {
    let envelope: RunEnvelope<Resp> = serde_json::from_str(body).map_err(|e| {
        tracing::error!("Failed to parse Workers AI response: {}\nBody: {}", e, body);
        Error::AiProvider(format!("Failed to parse Workers AI response: {}", e))
    })?;

    if !envelope.success {
        let messages = envelope.error_messages();
        tracing::error!("Workers AI reported failure: {}", messages);
        return Err(Error::AiProvider(format!(
            "Workers AI reported failure: {}",
            messages
        )));
    }

    envelope
        .result
        .ok_or_else(|| Error::AiProvider("No result in Workers AI response".to_string()))
}
