use std::time::Duration;

use async_trait::async_trait;
use log::warn;
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};

use crate::errors::ProviderError;
use crate::providers::Provider;
use crate::translation::retry::{retry_with_backoff, BackoffPolicy};

/// OpenAI-compatible client for chat-completion requests
#[derive(Debug)]
pub struct OpenAI {
    /// HTTP client for API requests; the connection pool is shared across
    /// concurrent calls
    client: Client,
    /// API key for bearer authentication
    api_key: String,
    /// API base URL (e.g. "https://api.openai.com/v1")
    endpoint: String,
    /// Backoff policy applied to each request
    backoff: BackoffPolicy,
}

/// Chat message format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message sender (system, user, assistant)
    pub role: String,

    /// Content of the message
    pub content: String,
}

/// Chat-completion request
#[derive(Debug, Clone, Serialize)]
pub struct OpenAIRequest {
    /// The model to use
    model: String,

    /// The messages for the conversation
    messages: Vec<ChatMessage>,

    /// Maximum number of tokens to generate
    max_tokens: u32,

    /// Temperature for generation
    temperature: f32,
}

/// Chat-completion response envelope
#[derive(Debug, Deserialize)]
pub struct OpenAIResponse {
    /// Completions returned by the model
    pub choices: Vec<Choice>,

    /// Token usage information, when the API reports it
    #[serde(default)]
    pub usage: Option<TokenUsage>,
}

/// One completion choice
#[derive(Debug, Deserialize)]
pub struct Choice {
    /// The completion message
    pub message: ResponseMessage,
}

/// Message body of a completion choice
#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    /// The generated text content
    pub content: String,
}

/// Token usage information
#[derive(Debug, Deserialize)]
pub struct TokenUsage {
    /// Number of input tokens
    #[serde(default)]
    pub prompt_tokens: u32,
    /// Number of output tokens
    #[serde(default)]
    pub completion_tokens: u32,
}

impl OpenAIRequest {
    /// Create a new chat-completion request
    pub fn new(model: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            model: model.into(),
            messages: Vec::new(),
            max_tokens,
            temperature: 0.3,
        }
    }

    /// Add a message to the request
    pub fn add_message(mut self, role: impl Into<String>, content: impl Into<String>) -> Self {
        self.messages.push(ChatMessage {
            role: role.into(),
            content: content.into(),
        });
        self
    }

    /// Set the temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

impl OpenAI {
    /// Create a new client with default timeout and backoff
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self::with_config(api_key, endpoint, Duration::from_secs(10), BackoffPolicy::default())
    }

    /// Create a new client with explicit timeout and backoff policy
    pub fn with_config(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        timeout: Duration,
        backoff: BackoffPolicy,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            backoff,
        }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.endpoint.trim_end_matches('/'))
    }

    /// Complete a chat request.
    ///
    /// The single HTTP attempt (send plus status check) runs under the
    /// backoff policy: transport errors and non-success statuses are
    /// retried, everything after a successful status is not.
    pub async fn complete(&self, request: OpenAIRequest) -> Result<OpenAIResponse, ProviderError> {
        let url = self.completions_url();

        let response = retry_with_backoff(
            &self.backoff,
            || {
                let client = self.client.clone();
                let url = url.clone();
                let api_key = self.api_key.clone();
                let request = request.clone();

                async move {
                    let response = client
                        .post(&url)
                        .header(header::CONTENT_TYPE, "application/json")
                        .header(header::AUTHORIZATION, format!("Bearer {}", api_key))
                        .json(&request)
                        .send()
                        .await
                        .map_err(|e| {
                            ProviderError::ConnectionError(format!(
                                "Failed to send completion request: {}",
                                e
                            ))
                        })?;

                    let status = response.status();
                    if !status.is_success() {
                        let message = response
                            .text()
                            .await
                            .unwrap_or_else(|_| "Failed to get error response text".to_string());
                        return Err(ProviderError::ApiError {
                            status_code: status.as_u16(),
                            message,
                        });
                    }

                    Ok(response)
                }
            },
            |err, delay| warn!("Retrying completion request in {:?} after error: {}", delay, err),
        )
        .await?;

        let parsed = response
            .json::<OpenAIResponse>()
            .await
            .map_err(|e| ProviderError::ParseError(format!("Failed to decode completion response: {}", e)))?;

        if parsed.choices.is_empty() {
            return Err(ProviderError::EmptyResponse("no choices available".to_string()));
        }

        Ok(parsed)
    }

    /// Extract the first completion's text content
    pub fn extract_text_from_response(response: &OpenAIResponse) -> String {
        response
            .choices
            .first()
            .map(|c| c.message.content.clone())
            .unwrap_or_default()
    }

    /// Test the connection with a minimal request
    pub async fn test_connection(&self, model: &str) -> Result<(), ProviderError> {
        let request = OpenAIRequest::new(model, 10).add_message("user", "Hello");
        self.complete(request).await?;
        Ok(())
    }
}

#[async_trait]
impl Provider for OpenAI {
    type Request = OpenAIRequest;
    type Response = OpenAIResponse;

    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError> {
        OpenAI::complete(self, request).await
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        // Model-independent probe is not available on the completions API;
        // use a tiny default-model request.
        OpenAI::test_connection(self, "gpt-4o-mini").await
    }

    fn extract_text(response: &Self::Response) -> String {
        Self::extract_text_from_response(response)
    }
}
