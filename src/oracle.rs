//! Oracle narrative client
//!
//! Forwards a prompt to a hosted chat-completion API with a fixed system
//! prompt and returns the reply text. Responses are advisory flavor text
//! only: any transport failure degrades to a fixed fallback string, so a
//! consultation can never fail into the tick loop.

use std::time::Duration;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::time::timeout;

/// Shown when the service is unreachable or answers with an error
pub const FALLBACK_TEXT: &str =
    "The oracle rests... seek wisdom again soon, brave adventurer!";

/// Shown when the service answers but the completion carries no text
pub const EMPTY_COMPLETION_TEXT: &str = "The mystical energies are unclear...";

const SYSTEM_PROMPT: &str = "You are a mystical AI guide in a dungeon exploration game. \
     Keep responses under 50 words, be encouraging, mysterious, and helpful. \
     Use fantasy language but stay concise.";

/// Chat-completion service configuration
#[derive(Debug, Clone)]
pub struct OracleConfig {
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout_secs: u64,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.together.xyz/v1/chat/completions".to_string(),
            api_key: String::new(),
            model: "meta-llama/Llama-3.3-70B-Instruct-Turbo-Free".to_string(),
            max_tokens: 100,
            temperature: 0.7,
            timeout_secs: 10,
        }
    }
}

impl OracleConfig {
    /// Build from the environment: `TOGETHER_API_KEY` plus optional
    /// `ORACLE_ENDPOINT` / `ORACLE_MODEL` overrides
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(key) = std::env::var("TOGETHER_API_KEY") {
            config.api_key = key;
        }
        if let Ok(endpoint) = std::env::var("ORACLE_ENDPOINT") {
            config.endpoint = endpoint;
        }
        if let Ok(model) = std::env::var("ORACLE_MODEL") {
            config.model = model;
        }
        config
    }

    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}

#[derive(Debug, Error)]
pub enum OracleError {
    #[error("prompt is required")]
    EmptyPrompt,
    #[error("request timeout after {0}s")]
    Timeout(u64),
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("api returned status {0}")]
    Status(reqwest::StatusCode),
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    content: Option<String>,
}

/// Client for the narrative service
#[derive(Debug, Clone)]
pub struct OracleClient {
    config: OracleConfig,
    client: reqwest::Client,
}

impl OracleClient {
    pub fn new(config: OracleConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Ask the oracle, degrading every transport failure to the fallback
    /// string. The only error surfaced to the caller is a missing prompt.
    pub async fn consult(&self, prompt: &str) -> Result<String, OracleError> {
        if prompt.trim().is_empty() {
            return Err(OracleError::EmptyPrompt);
        }
        match self.fetch_completion(prompt).await {
            Ok(text) => Ok(text),
            Err(err) => {
                warn!("Oracle consultation failed: {err}");
                Ok(FALLBACK_TEXT.to_string())
            }
        }
    }

    async fn fetch_completion(&self, prompt: &str) -> Result<String, OracleError> {
        let body = ChatRequest {
            model: &self.config.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        debug!("Consulting oracle at {}", self.config.endpoint);
        let request = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&body);

        let response = timeout(Duration::from_secs(self.config.timeout_secs), request.send())
            .await
            .map_err(|_| OracleError::Timeout(self.config.timeout_secs))??;

        if !response.status().is_success() {
            return Err(OracleError::Status(response.status()));
        }

        let completion: ChatCompletion = response.json().await?;
        let text = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_else(|| EMPTY_COMPLETION_TEXT.to_string());
        Ok(text)
    }
}
