/*!
 * Core translation service implementation.
 *
 * This module contains the Translator seam used by the orchestrator and the
 * TranslationService that implements it against the OpenAI-compatible
 * completion API.
 */

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use log::debug;

use crate::app_config::TranslationConfig;
use crate::errors::{ProviderError, TranslationError};
use crate::language_utils::display_name;
use crate::providers::openai::{OpenAI, OpenAIRequest};

/// The seam between the orchestrator and the remote translation backend.
///
/// One logical call translates one serialized batch (a JSON array of
/// sentences encoded as a single text blob) and returns the model's raw
/// text output; the caller interprets it.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate one serialized batch from `source_language` to
    /// `target_language` and return the raw completion text
    async fn translate_batch(
        &self,
        serialized_batch: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, TranslationError>;

    /// The character budget one request may carry
    fn max_chars_per_request(&self) -> usize;
}

/// Translation service backed by a chat-completion provider
pub struct TranslationService {
    /// Provider client; its connection pool is shared by concurrent batches
    client: OpenAI,

    /// Configuration for the translation service
    pub config: TranslationConfig,
}

impl TranslationService {
    /// Create a new translation service with the given configuration
    pub fn new(config: TranslationConfig) -> Result<Self> {
        config.validate()?;

        let client = OpenAI::with_config(
            config.api_key.clone(),
            config.endpoint.clone(),
            Duration::from_secs(config.timeout_secs),
            config.backoff_policy(),
        );

        Ok(Self { client, config })
    }

    /// Build the system instruction for a language pair.
    ///
    /// Display names ("Arabic", "English") read better in the prompt than
    /// ISO codes, so codes are resolved when possible.
    fn build_system_prompt(&self, source_language: &str, target_language: &str) -> String {
        let source = display_name(source_language);
        let target = display_name(target_language);

        format!(
            "You are TranslateAI. Your task is to translate speech transcriptions \
             from {source} to {target}. Only translate the {source} content; leave \
             proper nouns, technical terms, and any phrases that are not in {source} \
             unchanged. The user message is a JSON array of strings. Respond with a \
             JSON array of the translated strings in the same order, and nothing else."
        )
    }

    /// Output token budget, sized to ~1.5x the token estimate of a
    /// full-budget request (4 chars per token heuristic)
    fn max_output_tokens(&self) -> u32 {
        ((self.config.max_chars_per_request as f64 / 4.0) * 1.5).ceil() as u32
    }

    /// Test the connection to the completion API
    pub async fn test_connection(&self) -> Result<(), ProviderError> {
        self.client.test_connection(&self.config.model).await
    }
}

#[async_trait]
impl Translator for TranslationService {
    async fn translate_batch(
        &self,
        serialized_batch: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, TranslationError> {
        let request = OpenAIRequest::new(self.config.model.clone(), self.max_output_tokens())
            .add_message("system", self.build_system_prompt(source_language, target_language))
            .add_message("user", serialized_batch)
            .temperature(self.config.temperature);

        let response = self.client.complete(request).await?;

        if let Some(usage) = &response.usage {
            debug!(
                "Completion used {} prompt + {} completion tokens",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        Ok(OpenAI::extract_text_from_response(&response))
    }

    fn max_chars_per_request(&self) -> usize {
        self.config.max_chars_per_request
    }
}
