/*!
 * Mock translators for exercising the orchestrator without a network.
 *
 * `MockTranslator` interprets directives embedded in the sentences it
 * receives, so a test controls per-batch behavior purely through its input:
 * - a sentence `"!!fail:<message>"` fails that batch with an API error
 * - a sentence `"!!sleep:<ms>"` delays that batch before replying
 * - anything else is translated to `"[<target>] <sentence>"`
 */

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use scribetrans::errors::{ProviderError, TranslationError};
use scribetrans::translation::Translator;

/// Directive-driven mock translator
#[derive(Debug, Clone)]
pub struct MockTranslator {
    /// Request budget reported to the partitioner
    max_chars: usize,
    /// Number of translate calls made against this mock
    calls: Arc<AtomicUsize>,
}

impl MockTranslator {
    /// Create a mock with the default 6300-char budget
    pub fn working() -> Self {
        Self::with_max_chars(6300)
    }

    /// Create a mock with an explicit request budget
    pub fn with_max_chars(max_chars: usize) -> Self {
        Self {
            max_chars,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of batch calls observed so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Translator for MockTranslator {
    async fn translate_batch(
        &self,
        serialized_batch: &str,
        _source_language: &str,
        target_language: &str,
    ) -> Result<String, TranslationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let sentences: Vec<String> = serde_json::from_str(serialized_batch)
            .expect("orchestrator must send a JSON array of strings");

        for sentence in &sentences {
            if let Some(delay) = sentence.strip_prefix("!!sleep:") {
                let ms: u64 = delay.parse().expect("!!sleep directive wants milliseconds");
                tokio::time::sleep(Duration::from_millis(ms)).await;
            }
        }

        for sentence in &sentences {
            if let Some(message) = sentence.strip_prefix("!!fail:") {
                return Err(ProviderError::ApiError {
                    status_code: 500,
                    message: message.to_string(),
                }
                .into());
            }
        }

        let translated: Vec<String> = sentences
            .iter()
            .map(|s| format!("[{}] {}", target_language, s))
            .collect();
        Ok(serde_json::to_string(&translated).unwrap())
    }

    fn max_chars_per_request(&self) -> usize {
        self.max_chars
    }
}

/// Replies with prose instead of JSON
#[derive(Debug)]
pub struct GarbageTranslator;

#[async_trait]
impl Translator for GarbageTranslator {
    async fn translate_batch(
        &self,
        _serialized_batch: &str,
        _source_language: &str,
        _target_language: &str,
    ) -> Result<String, TranslationError> {
        Ok("I'm sorry, I can only translate text.".to_string())
    }

    fn max_chars_per_request(&self) -> usize {
        6300
    }
}

/// Drops the last element of every batch it translates
#[derive(Debug)]
pub struct ShortBatchTranslator;

#[async_trait]
impl Translator for ShortBatchTranslator {
    async fn translate_batch(
        &self,
        serialized_batch: &str,
        _source_language: &str,
        _target_language: &str,
    ) -> Result<String, TranslationError> {
        let mut sentences: Vec<String> = serde_json::from_str(serialized_batch).unwrap();
        sentences.pop();
        Ok(serde_json::to_string(&sentences).unwrap())
    }

    fn max_chars_per_request(&self) -> usize {
        6300
    }
}
