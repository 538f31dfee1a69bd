/*!
 * End-to-end pipeline tests: records in, translated records out
 */

use scribetrans::errors::TranslationError;
use scribetrans::transcription::TranscriptionCollection;
use scribetrans::translation::translate_transcriptions;

use crate::common::mock_translators::MockTranslator;
use crate::common::{init_test_logging, sample_records};

#[tokio::test]
async fn test_translate_transcriptions_shouldMapSentencesPositionally() {
    init_test_logging();
    let records = sample_records(&["A", "B", "C"]);
    let collection = TranscriptionCollection::new(records.clone());

    let translator = MockTranslator::working();
    let translated = translate_transcriptions(&translator, collection, "ar", "en", 4, |_, _| {})
        .await
        .unwrap();

    assert_eq!(translated.len(), 3);
    assert_eq!(translated.records[0].sentence, "[en] A");
    assert_eq!(translated.records[1].sentence, "[en] B");
    assert_eq!(translated.records[2].sentence, "[en] C");

    // Speaker and time survive untouched
    for (original, translated) in records.iter().zip(&translated.records) {
        assert_eq!(original.speaker, translated.speaker);
        assert_eq!(original.time, translated.time);
    }
}

#[tokio::test]
async fn test_translate_transcriptions_withEmptyInput_shouldReturnEmpty() {
    let collection = TranscriptionCollection::default();
    let translator = MockTranslator::working();

    let translated = translate_transcriptions(&translator, collection, "ar", "en", 4, |_, _| {})
        .await
        .unwrap();

    assert!(translated.is_empty());
    // No batches means no upstream calls at all
    assert_eq!(translator.call_count(), 0);
}

#[tokio::test]
async fn test_translate_transcriptions_withTwoLargeSentences_shouldSplitAndPreserveOrder() {
    // 4000 + 4000 chars against a 6300-char budget: one batch per sentence
    let first = "a".repeat(4000);
    let second = "b".repeat(4000);
    let collection = TranscriptionCollection::new(sample_records(&[&first, &second]));

    let translator = MockTranslator::working();
    let translated = translate_transcriptions(&translator, collection, "ar", "en", 4, |_, _| {})
        .await
        .unwrap();

    assert_eq!(translator.call_count(), 2);
    assert_eq!(translated.records[0].sentence, format!("[en] {}", first));
    assert_eq!(translated.records[1].sentence, format!("[en] {}", second));
}

#[tokio::test]
async fn test_translate_transcriptions_withManyRecords_shouldKeepOrderAcrossBatches() {
    let sentences: Vec<String> = (0..40).map(|i| format!("sentence {:02}", i)).collect();
    let refs: Vec<&str> = sentences.iter().map(|s| s.as_str()).collect();
    let collection = TranscriptionCollection::new(sample_records(&refs));

    // Tiny budget forces many batches; order must still hold end to end
    let translator = MockTranslator::with_max_chars(30);
    let translated = translate_transcriptions(&translator, collection, "ar", "en", 8, |_, _| {})
        .await
        .unwrap();

    assert!(translator.call_count() > 1);
    for (i, record) in translated.records.iter().enumerate() {
        assert_eq!(record.sentence, format!("[en] sentence {:02}", i));
    }
}

#[tokio::test]
async fn test_translate_transcriptions_withFailingBatch_shouldReturnErrorAndNoOutput() {
    let collection = TranscriptionCollection::new(sample_records(&[
        "fine",
        "!!fail:remote unavailable",
        "also fine",
    ]));

    let translator = MockTranslator::working();
    let result = translate_transcriptions(&translator, collection, "ar", "en", 4, |_, _| {}).await;

    assert!(matches!(result, Err(TranslationError::Provider(_))));
}
