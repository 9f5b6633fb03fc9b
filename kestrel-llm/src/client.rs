use std::env;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
const DEFAULT_CHAT_MODEL: &str = "deepseek/deepseek-chat";
const DEFAULT_IMAGE_MODEL: &str = "openai/dall-e-3";
const MAX_RESPONSE_TOKENS: u32 = 500;

/// Client for the OpenRouter chat-completion and image-generation endpoints.
#[derive(Clone, Debug)]
pub struct OpenRouterService {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    chat_model: String,
    image_model: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatRequestMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatRequestMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: String,
}

#[derive(Serialize)]
struct ImageRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    size: &'a str,
    quality: &'a str,
    n: u8,
}

#[derive(Deserialize)]
struct ImageResponse {
    data: Vec<ImageDatum>,
}

#[derive(Deserialize)]
struct ImageDatum {
    url: String,
}

impl OpenRouterService {
    /// Build from env, returning `None` when the integration is disabled or
    /// no API key is configured.
    pub fn from_env_optional() -> anyhow::Result<Option<Self>> {
        let enabled = env::var("OPENROUTER_ENABLED")
            .ok()
            .map(|value| {
                matches!(
                    value.trim().to_ascii_lowercase().as_str(),
                    "1" | "true" | "yes" | "on"
                )
            })
            .unwrap_or(true);

        if !enabled {
            return Ok(None);
        }

        let api_key = env::var("OPENROUTER_API_KEY")
            .ok()
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty());

        let Some(api_key) = api_key else {
            return Ok(None);
        };

        let base_url = env::var("OPENROUTER_BASE_URL")
            .ok()
            .map(|value| value.trim().trim_end_matches('/').to_owned())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
        let chat_model = env::var("OPENROUTER_CHAT_MODEL")
            .ok()
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_owned());
        let image_model = env::var("OPENROUTER_IMAGE_MODEL")
            .ok()
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_IMAGE_MODEL.to_owned());

        Ok(Some(Self {
            client: reqwest::Client::new(),
            api_key,
            base_url,
            chat_model,
            image_model,
        }))
    }

    pub fn chat_model(&self) -> &str {
        &self.chat_model
    }

    pub fn image_model(&self) -> &str {
        &self.image_model
    }

    /// One-shot chat completion; returns the assistant's reply text.
    pub async fn chat(&self, system_prompt: &str, question: &str) -> anyhow::Result<String> {
        let request = ChatRequest {
            model: &self.chat_model,
            messages: vec![
                ChatRequestMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatRequestMessage {
                    role: "user",
                    content: question,
                },
            ],
            max_tokens: MAX_RESPONSE_TOKENS,
            temperature: 0.7,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .context("openrouter chat request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("openrouter chat returned {status}: {body}");
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .context("failed to parse openrouter chat response")?;

        let answer = parsed
            .choices
            .into_iter()
            .next()
            .context("openrouter chat response had no choices")?
            .message
            .content;

        Ok(answer.trim().to_owned())
    }

    /// Generate one image and return its URL.
    pub async fn generate_image(&self, prompt: &str) -> anyhow::Result<String> {
        let request = ImageRequest {
            model: &self.image_model,
            prompt,
            size: "1024x1024",
            quality: "standard",
            n: 1,
        };

        let response = self
            .client
            .post(format!("{}/images/generations", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .context("openrouter image request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("openrouter image generation returned {status}: {body}");
        }

        let parsed: ImageResponse = response
            .json()
            .await
            .context("failed to parse openrouter image response")?;

        let url = parsed
            .data
            .into_iter()
            .next()
            .context("openrouter image response had no data")?
            .url;

        Ok(url)
    }
}
