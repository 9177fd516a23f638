//! OpenRouter chat-completions client for vision-based styling suggestions.

use crate::config::OpenRouterConfig;
use crate::dtos::Language;
use crate::services::image::EncodedImage;
use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fixed system instruction describing the two-part output.
const SYSTEM_PROMPT: &str = "You are a friendly fashion assistant. Based on the outfit in the image:
1. First, provide an objective description with bullet points (item type, colors, patterns, style elements)
2. Then give 2-3 short, positive styling suggestions
Be encouraging and constructive. Keep each suggestion to 1-2 sentences.";

/// Bounded output length.
const MAX_TOKENS: u32 = 500;
/// Near-deterministic sampling, favors consistency over creativity.
const TEMPERATURE: f64 = 0.1;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("OpenRouter API error: {0}")]
    Api(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("No suggestions received from the model")]
    Empty,
}

#[async_trait]
pub trait SuggestionProvider: Send + Sync {
    /// Generate styling suggestions for an outfit image in the given
    /// language. An empty model answer is an error, never a success.
    async fn suggest(
        &self,
        image: &EncodedImage,
        language: Language,
    ) -> Result<String, ProviderError>;
}

/// OpenRouter client for interacting with the chat-completions API.
#[derive(Clone)]
pub struct OpenRouterClient {
    client: Client,
    config: OpenRouterConfig,
}

impl OpenRouterClient {
    pub fn new(config: OpenRouterConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn build_request(&self, image: &EncodedImage, language: Language) -> ChatRequest {
        ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                Message {
                    role: "system".to_string(),
                    content: MessageContent::Text(SYSTEM_PROMPT.to_string()),
                },
                Message {
                    role: "user".to_string(),
                    content: MessageContent::Parts(vec![
                        ContentPart::Text {
                            text: language.instruction().to_string(),
                        },
                        ContentPart::ImageUrl {
                            image_url: ImageUrl {
                                url: image.data_url(),
                            },
                        },
                    ]),
                },
            ],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        }
    }
}

#[async_trait]
impl SuggestionProvider for OpenRouterClient {
    async fn suggest(
        &self,
        image: &EncodedImage,
        language: Language,
    ) -> Result<String, ProviderError> {
        let request = self.build_request(image, language);
        let url = format!("{}/chat/completions", self.config.api_base_url);

        tracing::debug!(
            model = %self.config.model,
            language = ?language,
            image_len = image.base64().len(),
            "Sending request to OpenRouter"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.config.api_key.expose_secret())
            .header("HTTP-Referer", &self.config.referer)
            .header("X-Title", "EveryWear AI Suggestions")
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %error_text, "OpenRouter API error");
            return Err(ProviderError::Api(error_text));
        }

        let api_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Api(format!("failed to parse response: {}", e)))?;

        let suggestions = api_response
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .unwrap_or_default();

        if suggestions.is_empty() {
            return Err(ProviderError::Empty);
        }

        Ok(suggestions)
    }
}

// ============================================================================
// OpenRouter API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    max_tokens: u32,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: MessageContent,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::Secret;

    fn test_client() -> OpenRouterClient {
        OpenRouterClient::new(OpenRouterConfig {
            api_key: Secret::new("sk-test".to_string()),
            api_base_url: "https://openrouter.ai/api/v1".to_string(),
            model: "google/gemini-2.5-flash-lite".to_string(),
            referer: "https://everywear.app".to_string(),
        })
    }

    #[test]
    fn request_carries_fixed_generation_parameters() {
        let image = EncodedImage::from_bytes(b"img");
        let request = test_client().build_request(&image, Language::EN);
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(body["model"], "google/gemini-2.5-flash-lite");
        assert_eq!(body["max_tokens"], 500);
        assert_eq!(body["temperature"], 0.1);
    }

    #[test]
    fn user_turn_combines_instruction_and_inline_image() {
        let image = EncodedImage::from_bytes(b"img");
        let request = test_client().build_request(&image, Language::FR);
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["role"], "user");

        let parts = body["messages"][1]["content"].as_array().unwrap();
        assert_eq!(parts[0]["type"], "text");
        assert_eq!(parts[0]["text"], Language::FR.instruction());
        assert_eq!(parts[1]["type"], "image_url");
        assert_eq!(
            parts[1]["image_url"]["url"].as_str().unwrap(),
            image.data_url()
        );
    }
}
