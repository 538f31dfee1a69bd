/*!
 * HTTP surface for the translation service.
 *
 * One route does the work: `POST /translate` takes a JSON array of
 * transcription records and returns the same array with translated
 * sentences. Malformed payloads are the caller's fault (400); translation
 * failures are internal (500). `GET /health` is a liveness probe.
 */

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use log::{debug, error, info};
use serde_json::json;
use tokio::net::TcpListener;

use crate::app_config::ServerConfig;
use crate::transcription::{TranscriptionCollection, TranscriptionRecord};
use crate::translation::{self, Translator};

/// Shared state handed to every request
pub struct AppState {
    /// The translation backend; shared read-only across requests
    pub translator: Arc<dyn Translator>,

    /// Source language for all requests
    pub source_language: String,

    /// Target language for all requests
    pub target_language: String,

    /// Fan-out bound for one request's batches
    pub max_concurrent_requests: usize,
}

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/translate", post(translate_handler))
        .with_state(state)
}

/// Bind and serve until the process is stopped
pub async fn serve(server: &ServerConfig, state: Arc<AppState>) -> Result<()> {
    let addr = server.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Starting server on {}", addr);
    axum::serve(listener, router(state))
        .await
        .context("Server terminated unexpectedly")?;
    Ok(())
}

async fn health_handler() -> &'static str {
    "ok"
}

/// Handle a translation request.
///
/// The body is parsed by hand rather than through the Json extractor so a
/// malformed payload produces the same `{"error": ...}` shape as every
/// other failure.
async fn translate_handler(State(state): State<Arc<AppState>>, body: String) -> Response {
    let records: Vec<TranscriptionRecord> = match serde_json::from_str(&body) {
        Ok(records) => records,
        Err(e) => {
            debug!("Rejected translation request: {}", e);
            return error_response(StatusCode::BAD_REQUEST, "unable to unmarshal JSON");
        }
    };

    let collection = TranscriptionCollection::new(records);

    let translated = translation::translate_transcriptions(
        state.translator.as_ref(),
        collection,
        &state.source_language,
        &state.target_language,
        state.max_concurrent_requests,
        |_, _| {},
    )
    .await;

    match translated {
        Ok(translated) => (StatusCode::OK, Json(translated.records)).into_response(),
        Err(e) => {
            error!("Translation error: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string())
        }
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}
