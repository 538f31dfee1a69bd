/*!
 * Error types for the scribetrans application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when talking to the completion API
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The API returned an envelope with no completions
    #[error("Empty completion response: {0}")]
    EmptyResponse(String),
}

/// Errors that can occur during batch translation
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Error from the provider API
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error serializing a batch for transport
    #[error("Failed to serialize batch: {0}")]
    Serialization(String),

    /// The translated payload was not valid JSON
    #[error("Invalid JSON received from translator: {0}")]
    InvalidPayload(String),

    /// The translated batch does not match the input batch cardinality
    #[error("Translated batch has {actual} items, expected {expected}")]
    BatchShapeMismatch {
        /// Number of items in the dispatched batch
        expected: usize,
        /// Number of items the translator returned
        actual: usize,
    },

    /// The flattened translations do not line up with the input records
    #[error("Translation count {translations} does not match record count {records}")]
    LengthMismatch {
        /// Number of input records
        records: usize,
        /// Number of translated sentences
        translations: usize,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error loading or validating configuration
    #[error("Config error: {0}")]
    Config(String),

    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error parsing caller-supplied input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from translation
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
