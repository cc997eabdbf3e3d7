use super::client::WorkersAiHttpClient;
use super::types::{ChatMessage, ChatRequest, TextResult};
use crate::ai::ChatService;
use crate::models::Config;
use crate::{prompts, Error, Result};
use async_trait::async_trait;

pub struct WorkersAiChatClient {
    http: WorkersAiHttpClient,
    model: String,
}

impl WorkersAiChatClient {
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
            model: config.chat_model.clone(),
        }
    }

    fn build_request(prompt: &str) -> ChatRequest {
        ChatRequest {
            messages: vec![
                ChatMessage::system(prompts::OPTIMIZE_SYSTEM),
                ChatMessage::user(prompts::render(
                    prompts::OPTIMIZE_USER,
                    &[("prompt", prompt)],
                )),
            ],
        }
    }
}

#[async_trait]
impl ChatService for WorkersAiChatClient {
    async fn optimize_text(&self, prompt: &str) -> Result<String> {
        let request = Self::build_request(prompt);

        let result: TextResult = self.http.run_json(&self.model, &request).await?;

        result
            .response
            .ok_or_else(|| Error::AiProvider("No text in Workers AI chat response".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const CHAT_PATH: &str = "/client/v4/accounts/acct/ai/run/@cf/meta/llama-3-8b-instruct";

    fn make_client(server: &MockServer) -> WorkersAiChatClient {
        let config = Config::new("test-key".to_string(), "acct".to_string())
            .with_inference_base_url(server.uri());
        WorkersAiChatClient::new(&config)
    }

    #[test]
    fn test_build_request_wraps_prompt_verbatim() {
        let request = WorkersAiChatClient::build_request("make {this} \"better\"");
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, "system");
        assert_eq!(request.messages[0].content, prompts::OPTIMIZE_SYSTEM);
        assert_eq!(request.messages[1].role, "user");
        assert_eq!(
            request.messages[1].content,
            "Please optimize and enhance the following text: make {this} \"better\""
        );
    }

    #[tokio::test]
    async fn test_optimize_text_parses_response() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(CHAT_PATH))
            .and(header("Authorization", "Bearer test-key"))
            .and(body_json(serde_json::json!({
                "messages": [
                    { "role": "system", "content": prompts::OPTIMIZE_SYSTEM },
                    { "role": "user", "content": "Please optimize and enhance the following text: hi" }
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "result": { "response": "Hello there!" },
                "success": true,
                "errors": [],
                "messages": []
            })))
            .expect(1)
            .mount(&server)
            .await;

        let text = make_client(&server).optimize_text("hi").await.unwrap();
        assert_eq!(text, "Hello there!");
    }

    #[tokio::test]
    async fn test_optimize_text_rejects_missing_response() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "result": {}, "success": true })),
            )
            .mount(&server)
            .await;

        let err = make_client(&server).optimize_text("hi").await.unwrap_err();
        assert!(matches!(err, Error::AiProvider(_)));
    }

    #[tokio::test]
    async fn test_optimize_text_rejects_malformed_json() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = make_client(&server).optimize_text("hi").await.unwrap_err();
        assert!(matches!(err, Error::AiProvider(_)));
    }

    #[tokio::test]
    async fn test_api_error_returns_ai_provider_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
            .mount(&server)
            .await;

        let err = make_client(&server).optimize_text("hi").await.unwrap_err();
        assert!(matches!(err, Error::AiProvider(_)));
    }
}
