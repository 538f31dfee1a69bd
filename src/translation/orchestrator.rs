/*!
 * Concurrent batch dispatch and collection.
 *
 * Each batch is serialized and dispatched as one concurrent unit of work
 * against the translator; results arrive in completion order and are
 * reassembled by origin index, so output order depends only on dispatch
 * order. All units are awaited before the operation returns, whether the
 * request succeeds or fails; on failure only the first error (lowest origin
 * index) is surfaced and no partial output escapes.
 *
 * Fan-out is bounded by `max_concurrent_requests` rather than spawning one
 * unbounded task per batch, so a large transcription cannot burst an
 * arbitrary number of simultaneous outbound calls.
 */

use std::sync::atomic::{AtomicUsize, Ordering};

use futures::stream::{self, StreamExt};
use log::{error, info};

use crate::errors::TranslationError;
use crate::translation::core::Translator;

/// Outcome of one dispatched batch, tagged with its origin index
#[derive(Debug)]
pub struct DispatchResult {
    /// Position of the batch in dispatch order; used only for reassembly
    pub index: usize,

    /// The translated batch, or the failure that ended it
    pub outcome: Result<Vec<String>, TranslationError>,
}

/// Translate all batches concurrently and reassemble them in dispatch order.
///
/// `progress` is invoked with `(completed, total)` as units finish, in
/// completion order; it has no effect on control flow.
pub async fn process_batches<T, P>(
    translator: &T,
    batches: &[Vec<String>],
    source_language: &str,
    target_language: &str,
    max_concurrent_requests: usize,
    progress: P,
) -> Result<Vec<String>, TranslationError>
where
    T: Translator + ?Sized,
    P: Fn(usize, usize) + Send + Sync,
{
    let total = batches.len();
    if total == 0 {
        return Ok(Vec::new());
    }

    let completed = AtomicUsize::new(0);
    let concurrency = max_concurrent_requests.max(1);

    let mut results: Vec<DispatchResult> = stream::iter(0..total)
        .map(|index| {
            run_unit(
                translator,
                index,
                &batches[index],
                source_language,
                target_language,
                &completed,
                total,
                &progress,
            )
        })
        .buffer_unordered(concurrency)
        .collect()
        .await;

    // Every unit has reported by this point; nothing is left in flight.
    results.sort_by_key(|r| r.index);

    let mut translated = Vec::new();
    for result in results {
        match result.outcome {
            Ok(batch) => translated.extend(batch),
            Err(e) => {
                error!("Translation failed for batch {}: {}", result.index + 1, e);
                return Err(e);
            }
        }
    }

    info!("Translated {} batches ({} sentences)", total, translated.len());
    Ok(translated)
}

/// Dispatch one batch and report its completion via `progress`.
///
/// Extracted into a named `async fn` so its future type properly abstracts
/// over the borrowed batch's lifetime; an inline `async move` block in the
/// stream closure fails the higher-ranked trait bound that `buffer_unordered`
/// requires.
#[allow(clippy::too_many_arguments)]
async fn run_unit<T, P>(
    translator: &T,
    index: usize,
    batch: &[String],
    source_language: &str,
    target_language: &str,
    completed: &AtomicUsize,
    total: usize,
    progress: &P,
) -> DispatchResult
where
    T: Translator + ?Sized,
    P: Fn(usize, usize) + Send + Sync,
{
    let result = dispatch_batch(translator, index, batch, source_language, target_language).await;
    let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
    progress(done, total);
    result
}

/// Run one batch end to end: serialize, translate, validate, deserialize
async fn dispatch_batch<T>(
    translator: &T,
    index: usize,
    batch: &[String],
    source_language: &str,
    target_language: &str,
) -> DispatchResult
where
    T: Translator + ?Sized,
{
    let outcome = translate_one_batch(translator, batch, source_language, target_language).await;
    DispatchResult { index, outcome }
}

async fn translate_one_batch<T>(
    translator: &T,
    batch: &[String],
    source_language: &str,
    target_language: &str,
) -> Result<Vec<String>, TranslationError>
where
    T: Translator + ?Sized,
{
    let serialized = serde_json::to_string(batch)
        .map_err(|e| TranslationError::Serialization(e.to_string()))?;

    let translated_text = translator
        .translate_batch(&serialized, source_language, target_language)
        .await?;

    // Validate syntax first so a non-JSON reply is reported as such rather
    // than as a shape error.
    let value: serde_json::Value = serde_json::from_str(&translated_text)
        .map_err(|_| TranslationError::InvalidPayload(truncate_for_error(&translated_text)))?;

    let translated: Vec<String> = serde_json::from_value(value).map_err(|e| {
        TranslationError::InvalidPayload(format!("expected a JSON array of strings: {}", e))
    })?;

    if translated.len() != batch.len() {
        return Err(TranslationError::BatchShapeMismatch {
            expected: batch.len(),
            actual: translated.len(),
        });
    }

    Ok(translated)
}

fn truncate_for_error(text: &str) -> String {
    const LIMIT: usize = 200;
    if text.chars().count() > LIMIT {
        text.chars().take(LIMIT).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
