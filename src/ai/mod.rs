//! AI service integration for image generation and text optimization
//!
//! Provides interfaces to Workers AI text-to-image and chat models, plus
//! in-memory mocks for tests.

pub mod mime;
pub mod mock;
pub mod workers;

pub use mock::{MockChatClient, MockImageGenerationClient};
pub use workers::{WorkersAiChatClient, WorkersAiImageClient};

use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait ImageGenerationService: Send + Sync {
    /// Returns the raw bytes of an image rendered from `prompt`.
    async fn generate_image(&self, prompt: &str) -> Result<Vec<u8>>;
}

#[async_trait]
pub trait ChatService: Send + Sync {
    /// Returns an optimized rewrite of `prompt`.
    async fn optimize_text(&self, prompt: &str) -> Result<String>;
}
