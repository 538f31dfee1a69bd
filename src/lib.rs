/*!
 * # scribetrans - AI transcription translation service
 *
 * A Rust service that translates speech-transcription records between
 * languages using an LLM completion API.
 *
 * ## Features
 *
 * - Accepts ordered transcription records (speaker, time, sentence)
 * - Partitions sentences into request-sized batches
 * - Dispatches batches concurrently with bounded fan-out
 * - Retries transient API failures with exponential backoff
 * - Reassembles results deterministically in the original order
 * - All-or-nothing per request: no partial translations escape
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `transcription`: Transcription record handling
 * - `translation`: AI-powered translation:
 *   - `translation::core`: Translator seam and completion-backed service
 *   - `translation::batch`: Batch partitioning
 *   - `translation::orchestrator`: Concurrent dispatch and collection
 *   - `translation::retry`: Exponential backoff policy
 * - `providers`: Client for the OpenAI-compatible completion API
 * - `server`: Axum HTTP surface (`POST /translate`)
 * - `app_controller`: Main application controller
 * - `language_utils`: Language code and name utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod language_utils;
pub mod providers;
pub mod server;
pub mod transcription;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use errors::{AppError, ProviderError, TranslationError};
pub use transcription::{TranscriptionCollection, TranscriptionRecord};
pub use translation::{BackoffPolicy, TranslationService, Translator};
