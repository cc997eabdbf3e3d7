//! Workers AI request/response payloads shared by the image and chat modules.

use serde::{Deserialize, Serialize};

/// Request body for text-to-image models.
#[derive(Debug, Serialize)]
pub struct ImageRequest {
    pub prompt: String,
}

/// Chat message object.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Request body for chat/completion models.
#[derive(Debug, Serialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
}

/// Top-level `{ result, success, errors }` envelope.
#[derive(Debug, Deserialize)]
pub struct RunEnvelope<T> {
    pub result: Option<T>,
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default)]
    pub errors: Vec<ApiMessage>,
}

fn default_success() -> bool {
    true
}

impl<T> RunEnvelope<T> {
    pub fn error_messages(&self) -> String {
        if self.errors.is_empty() {
            return "no error details".to_string();
        }
        self.errors
            .iter()
            .map(|e| match e.code {
                Some(code) => format!("{} (code {})", e.message, code),
                None => e.message.clone(),
            })
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Deserialize)]
pub struct ApiMessage {
    pub code: Option<i64>,
    pub message: String,
}

/// `result` payload of chat models.
#[derive(Debug, Deserialize)]
pub struct TextResult {
    pub response: Option<String>,
}

/// `result` payload of image models that answer in JSON.
#[derive(Debug, Deserialize)]
pub struct ImageResult {
    pub image: Option<String>,
}
