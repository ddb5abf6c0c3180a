//! # fl-generate-openai
//!
//! `FlameGenerator` implementation that asks the OpenAI chat-completions
//! API for one original line in the requested mode. Failures surface as
//! descriptive `UpstreamGenerationFailure` messages and are never retried
//! here.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use fl_core::error::{AppError, Result};
use fl_core::models::Mode;
use fl_core::traits::FlameGenerator;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o";

pub struct OpenAiGenerator {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
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
    content: Option<String>,
}

/// The persona prompt for each generatable mode.
fn system_prompt(mode: Mode) -> &'static str {
    match mode {
        Mode::Flirty => {
            "You are a charismatic conversationalist who creates smooth, charming, and \
             playful flirty lines. Keep them clever, respectful, and fun - the kind that \
             would make someone smile and feel special. Avoid anything crude or inappropriate."
        }
        Mode::Roast => {
            "You are a master of comedic roasting, creating clever burns and witty comebacks. \
             Make them sharp and funny but not mean-spirited or personally attacking. Focus on \
             universal, relatable situations that are humorous rather than hurtful."
        }
        Mode::Compliment => {
            "You are an expert at creating genuine, creative compliments that make people feel \
             valued and special. Craft unique, thoughtful compliments that go beyond the \
             ordinary and make someone's day brighter."
        }
        Mode::Joke => {
            "You are a comedian specializing in clever one-liners, puns, and witty observations. \
             Create original jokes that are smart, clean, and genuinely funny. Focus on \
             wordplay, unexpected twists, and relatable humor."
        }
        // Bar is also the fallback persona for anything unexpected
        Mode::Bar | Mode::Community => {
            "You are a creative rap and hip-hop lyricist specializing in clever bars and \
             wordplay. Create original, witty rap lines that are clever, confident, and \
             creative. Focus on wordplay, metaphors, and punchlines that would impress in a \
             cypher or freestyle battle."
        }
    }
}

fn user_prompt(mode: Mode, input: Option<&str>) -> String {
    let mut prompt = format!("Create one original {mode} line.");
    if let Some(input) = input {
        let trimmed = input.trim();
        if !trimmed.is_empty() {
            prompt.push_str(&format!(" Context or theme: \"{trimmed}\""));
        }
    }
    prompt.push_str(" Respond with just the line, no extra text or quotes.");
    prompt
}

/// Turns an upstream HTTP status into the message shown to the user.
fn upstream_error(status: reqwest::StatusCode, body: &str) -> AppError {
    let message = if status == reqwest::StatusCode::UNAUTHORIZED {
        "OpenAI API key is missing or invalid. Please check your configuration.".to_string()
    } else if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        if body.contains("insufficient_quota") {
            "OpenAI API quota exceeded. Please try again later.".to_string()
        } else {
            "Too many requests. Please wait a moment and try again.".to_string()
        }
    } else {
        format!("Failed to generate content (upstream status {status}). Please try again.")
    };
    AppError::UpstreamGenerationFailure(message)
}

impl OpenAiGenerator {
    pub fn new(api_key: String, model: Option<String>, base_url: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }
}

#[async_trait]
impl FlameGenerator for OpenAiGenerator {
    async fn generate(&self, mode: Mode, input: Option<&str>) -> Result<String> {
        let user_content = user_prompt(mode, input);
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt(mode),
                },
                ChatMessage {
                    role: "user",
                    content: &user_content,
                },
            ],
            max_tokens: 100,
            temperature: 0.8,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::Internal(format!("openai transport error: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, "openai generation failed");
            return Err(upstream_error(status, &body));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| AppError::Internal(format!("openai response decode error: {e}")))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .ok_or_else(|| {
                AppError::UpstreamGenerationFailure("No content generated".to_string())
            })?;

        Ok(content)
    }
}
