/*!
 * HTTP surface tests driven through the router with tower's oneshot
 */

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use tower::util::ServiceExt;

use scribetrans::server::{router, AppState};
use scribetrans::transcription::TranscriptionRecord;

use crate::common::init_test_logging;
use crate::common::mock_translators::{GarbageTranslator, MockTranslator};

fn test_state(translator: Arc<dyn scribetrans::translation::Translator>) -> Arc<AppState> {
    Arc::new(AppState {
        translator,
        source_language: "ar".to_string(),
        target_language: "en".to_string(),
        max_concurrent_requests: 4,
    })
}

fn translate_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/translate")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

#[tokio::test]
async fn test_health_shouldAnswerOk() {
    init_test_logging();
    let app = router(test_state(Arc::new(MockTranslator::working())));
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_translate_withValidBody_shouldReturnTranslatedRecords() {
    let app = router(test_state(Arc::new(MockTranslator::working())));

    let body = r#"[
        {"speaker": "Agent", "time": "00:00:01", "sentence": "hello"},
        {"speaker": "Customer", "time": "00:00:04", "sentence": "world"}
    ]"#;
    let response = app.oneshot(translate_request(body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = body_bytes(response).await;
    let records: Vec<TranscriptionRecord> = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].sentence, "[en] hello");
    assert_eq!(records[1].sentence, "[en] world");
    assert_eq!(records[0].speaker, "Agent");
    assert_eq!(records[1].time, "00:00:04");
}

#[tokio::test]
async fn test_translate_withMalformedBody_shouldReturn400() {
    let app = router(test_state(Arc::new(MockTranslator::working())));

    let response = app.oneshot(translate_request("{not json")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = body_bytes(response).await;
    let error: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(error["error"], "unable to unmarshal JSON");
}

#[tokio::test]
async fn test_translate_withWrongShape_shouldReturn400() {
    let app = router(test_state(Arc::new(MockTranslator::working())));

    // Valid JSON, but not an array of records
    let response = app
        .oneshot(translate_request(r#"{"speaker": "x"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_translate_withFailingTranslator_shouldReturn500() {
    let app = router(test_state(Arc::new(GarbageTranslator)));

    let body = r#"[{"speaker": "Agent", "time": "00:00:01", "sentence": "hello"}]"#;
    let response = app.oneshot(translate_request(body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let bytes = body_bytes(response).await;
    let error: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert!(error["error"].as_str().unwrap().contains("Invalid JSON"));
}

#[tokio::test]
async fn test_translate_withEmptyArray_shouldReturnEmptyArray() {
    let app = router(test_state(Arc::new(MockTranslator::working())));

    let response = app.oneshot(translate_request("[]")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = body_bytes(response).await;
    let records: Vec<TranscriptionRecord> = serde_json::from_slice(&bytes).unwrap();
    assert!(records.is_empty());
}
