//! OpenAI-compatible HTTP client for chat completions and image generation

use std::time::Duration;

use reqwest::blocking::{Client, Response};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::stage::StageError;
use super::{ImageModel, TextModel};

/// Token budget for a lore reply
const MAX_COMPLETION_TOKENS: u32 = 1000;

/// Requested image size; the art is always square
pub const IMAGE_SIZE: &str = "1024x1024";

/// Blocking client for the hosted text and image models
pub struct OpenAiClient {
    http: Client,
    base_url: String,
    api_key: String,
    text_model: String,
    image_model: String,
}

impl OpenAiClient {
    /// Build a client from configuration; fails without an API key
    pub fn from_config(config: &Config) -> Result<Self, StageError> {
        let api_key = config.api_key.clone().ok_or(StageError::MissingCredentials)?;

        // Calls wait as long as the service takes
        let http = Client::builder().timeout(None::<Duration>).build()?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            api_key,
            text_model: config.text_model.clone(),
            image_model: config.image_model.clone(),
        })
    }

    fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response, StageError> {
        let url = format!("{}/{}", self.base_url, path);
        log::debug!("POST {}", url);

        let response = self
            .http
            .post(url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().unwrap_or_default();
            return Err(StageError::Api {
                status,
                message: api_error_message(&body),
            });
        }

        Ok(response)
    }
}

impl TextModel for OpenAiClient {
    fn name(&self) -> &str {
        &self.text_model
    }

    fn complete_json(&self, system: &str, user: &str) -> Result<String, StageError> {
        let request = ChatRequest {
            model: &self.text_model,
            messages: vec![
                ChatMessage { role: "system", content: system },
                ChatMessage { role: "user", content: user },
            ],
            response_format: ResponseFormat { kind: "json_object" },
            max_completion_tokens: MAX_COMPLETION_TOKENS,
        };

        let reply: ChatResponse = self.post("chat/completions", &request)?.json()?;
        reply
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| StageError::Malformed("reply has no message content".into()))
    }
}

impl ImageModel for OpenAiClient {
    fn name(&self) -> &str {
        &self.image_model
    }

    fn generate_image(&self, prompt: &str) -> Result<String, StageError> {
        let request = ImageRequest {
            model: &self.image_model,
            prompt,
            size: IMAGE_SIZE,
            n: 1,
        };

        let reply: ImageResponse = self.post("images/generations", &request)?.json()?;
        reply
            .data
            .into_iter()
            .next()
            .and_then(|image| image.b64_json)
            .ok_or_else(|| StageError::Malformed("reply has no b64_json image".into()))
    }
}

/// Pull `error.message` out of an API error body, else return the body
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.trim().to_string())
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    response_format: ResponseFormat,
    max_completion_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: Option<String>,
}

#[derive(Debug, Serialize)]
struct ImageRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    size: &'static str,
    n: u8,
}

#[derive(Debug, Deserialize)]
struct ImageResponse {
    data: Vec<ImageData>,
}

#[derive(Debug, Deserialize)]
struct ImageData {
    b64_json: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}
