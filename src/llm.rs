//! Word and hint generation through a text-generation endpoint.
//!
//! The game only ever needs two one-shot completions, so the client is a
//! plain blocking request/response wrapper. [`TextProvider`] is the seam
//! the game loop depends on; tests substitute scripted implementations.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Config;

const WORD_PROMPT: &str =
    "Generate exactly ONE random English word between 5 and 15 letters. Only output the word.";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// How much of an API error body to keep in the error message.
const ERROR_BODY_LIMIT: usize = 200;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("no API key configured (set OPENAI_API_KEY)")]
    MissingApiKey,
    #[error("model API returned status {status}: {message}")]
    Api { status: u16, message: String },
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("model returned no usable text")]
    EmptyResponse,
}

/// Source of generated words and hints.
pub trait TextProvider {
    /// A lowercase alphabetic word, fetched once per round.
    fn fetch_word(&self) -> Result<String, ProviderError>;

    /// A short hint for `word`. Asking the model not to reveal the word is
    /// best effort; the response is not checked against it.
    fn fetch_hint(&self, word: &str) -> Result<String, ProviderError>;
}

/// Blocking client for the OpenAI responses endpoint.
pub struct OpenAiClient {
    config: Config,
    http: reqwest::blocking::Client,
}

impl OpenAiClient {
    pub fn new(config: Config) -> Result<Self, ProviderError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { config, http })
    }

    fn generate(&self, input: &str, temperature: f32) -> Result<String, ProviderError> {
        let key = self
            .config
            .api_key
            .as_deref()
            .ok_or(ProviderError::MissingApiKey)?;

        let url = format!("{}/responses", self.config.base_url.trim_end_matches('/'));
        let body = GenerateRequest {
            model: &self.config.model,
            input,
            max_output_tokens: self.config.max_output_tokens,
            temperature,
        };

        log::debug!("POST {url} (model: {})", self.config.model);
        let response = self.http.post(&url).bearer_auth(key).json(&body).send()?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().unwrap_or_default();
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message: excerpt(&message),
            });
        }

        let parsed: GenerateResponse = response.json()?;
        let text = parsed.output_text();
        if text.trim().is_empty() {
            return Err(ProviderError::EmptyResponse);
        }
        Ok(text)
    }
}

impl TextProvider for OpenAiClient {
    fn fetch_word(&self) -> Result<String, ProviderError> {
        let raw = self.generate(WORD_PROMPT, self.config.word_temperature)?;
        let word = sanitize_word(&raw);
        if word.is_empty() {
            return Err(ProviderError::EmptyResponse);
        }
        log::debug!("model produced a {}-letter word", word.len());
        Ok(word)
    }

    fn fetch_hint(&self, word: &str) -> Result<String, ProviderError> {
        let prompt = hint_prompt(word);
        let hint = self.generate(&prompt, self.config.hint_temperature)?;
        Ok(hint.trim().to_string())
    }
}

fn hint_prompt(word: &str) -> String {
    format!("Give a short hint for the English word '{word}'. Do not reveal the word.")
}

/// Lowercase the raw completion and drop everything that is not a letter.
/// Word length is whatever the model gave us; the 5-15 range lives in the
/// prompt, not in local validation.
pub fn sanitize_word(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .chars()
        .filter(char::is_ascii_alphabetic)
        .collect()
}

fn excerpt(message: &str) -> String {
    let trimmed = message.trim();
    if trimmed.len() <= ERROR_BODY_LIMIT {
        trimmed.to_string()
    } else {
        let mut cut = ERROR_BODY_LIMIT;
        while !trimmed.is_char_boundary(cut) {
            cut -= 1;
        }
        format!("{}...", &trimmed[..cut])
    }
}

// Wire types for the responses endpoint. Only the fields the game reads are
// modeled; unknown fields are ignored.

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    input: &'a str,
    max_output_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    output: Vec<OutputItem>,
}

#[derive(Deserialize)]
struct OutputItem {
    #[serde(default)]
    content: Vec<ContentPart>,
}

#[derive(Deserialize)]
struct ContentPart {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    text: String,
}

impl GenerateResponse {
    fn output_text(&self) -> String {
        self.output
            .iter()
            .flat_map(|item| &item.content)
            .filter(|part| part.kind == "output_text")
            .map(|part| part.text.as_str())
            .collect()
    }
}
