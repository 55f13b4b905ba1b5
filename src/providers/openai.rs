//! OpenAI-compatible provider implementation for Hey
//!
//! This module implements the Provider trait against any chat-completions
//! endpoint speaking the OpenAI wire format. The call is blocking: the
//! interactive loop suspends entirely until the reply arrives.

use crate::config::ProviderConfig;
use crate::error::{HeyError, Result};
use crate::providers::{ChatMessage, Provider};

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Request timeout; long enough for slow completions on big prompts.
const REQUEST_TIMEOUT_SECS: u64 = 120;

/// Chat completions API provider
///
/// Connects to an OpenAI-compatible server to generate replies. The API
/// key is read from the environment variable named in the configuration.
///
/// # Examples
///
/// ```no_run
/// use hey::config::ProviderConfig;
/// use hey::providers::{ChatMessage, OpenAiProvider, Provider};
///
/// # fn example() -> hey::error::Result<()> {
/// let provider = OpenAiProvider::new(ProviderConfig::default())?;
/// let reply = provider.complete(&[ChatMessage::user("Hello!")])?;
/// # Ok(())
/// # }
/// ```
pub struct OpenAiProvider {
    client: Client,
    config: ProviderConfig,
}

/// Request structure for the chat completions endpoint
#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

/// Response structure from the chat completions endpoint
#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiProvider {
    /// Create a new provider from configuration
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| HeyError::Provider(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Endpoint URL for chat completions
    fn completions_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.api_base.trim_end_matches('/')
        )
    }

    /// Resolve the API key from the configured environment variable
    fn api_key(&self) -> Result<String> {
        std::env::var(&self.config.api_key_env).map_err(|_| {
            HeyError::Provider(format!(
                "missing API key: set the {} environment variable",
                self.config.api_key_env
            ))
            .into()
        })
    }
}

impl Provider for OpenAiProvider {
    fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        let api_key = self.api_key()?;
        let request = CompletionRequest {
            model: &self.config.model,
            messages,
        };

        tracing::debug!(
            model = %self.config.model,
            message_count = messages.len(),
            "requesting completion"
        );

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .map_err(|e| HeyError::Provider(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(HeyError::Provider(format!(
                "API returned {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            ))
            .into());
        }

        let completion: CompletionResponse = response
            .json()
            .map_err(|e| HeyError::Provider(format!("invalid response body: {}", e)))?;

        let reply = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| HeyError::Provider("response contained no completion".to_string()))?;

        Ok(reply)
    }
}
