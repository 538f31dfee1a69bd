/*!
 * AI-powered transcription translation.
 *
 * The module is organized as follows:
 * - `core`: Translator seam and the completion-backed service
 * - `batch`: partitioning of sentences into request-sized batches
 * - `orchestrator`: concurrent dispatch and ordered collection
 * - `retry`: exponential backoff for individual HTTP attempts
 */

pub mod batch;
pub mod core;
pub mod orchestrator;
pub mod retry;

use log::info;

use crate::errors::TranslationError;
use crate::transcription::TranscriptionCollection;

pub use self::core::{TranslationService, Translator};
pub use self::retry::BackoffPolicy;

/// Translate a whole transcription end to end.
///
/// Extracts the sentences, partitions them against the translator's request
/// budget, dispatches the batches concurrently, and writes the translated
/// sentences back into the records positionally. All-or-nothing: any batch
/// failure fails the whole call and no partial output is returned.
pub async fn translate_transcriptions<T, P>(
    translator: &T,
    transcriptions: TranscriptionCollection,
    source_language: &str,
    target_language: &str,
    max_concurrent_requests: usize,
    progress: P,
) -> Result<TranscriptionCollection, TranslationError>
where
    T: Translator + ?Sized,
    P: Fn(usize, usize) + Send + Sync,
{
    let sentences = transcriptions.extract_sentences();
    let batches = batch::group_into_batches(&sentences, translator.max_chars_per_request());

    info!(
        "Number of transcriptions: {}, batches after grouping: {}",
        transcriptions.len(),
        batches.len()
    );

    let translated = orchestrator::process_batches(
        translator,
        &batches,
        source_language,
        target_language,
        max_concurrent_requests,
        progress,
    )
    .await?;

    transcriptions.reintegrate(translated)
}
