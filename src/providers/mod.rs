/*!
 * Provider implementation for the remote completion service.
 *
 * This module contains the client for the OpenAI-compatible chat-completions
 * API that performs the actual translation work.
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for LLM completion providers
///
/// This trait defines the interface a provider implementation must follow so
/// the translation service can stay independent of the concrete API shape.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// The request type for this provider
    type Request: Send + Sync;

    /// The response type for this provider
    type Response: Send + Sync;

    /// Complete a request using this provider
    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError>;

    /// Test the connection to the provider
    async fn test_connection(&self) -> Result<(), ProviderError>;

    /// Extract the completion text from the provider response
    fn extract_text(response: &Self::Response) -> String;
}

pub mod openai;
