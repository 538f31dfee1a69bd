/*!
 * Transcription record handling.
 *
 * A transcription is an ordered list of speaker-attributed sentences with
 * free-form timestamps. Only the sentence text participates in translation;
 * speaker and time ride along untouched and order is significant end-to-end.
 */

use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::errors::TranslationError;

/// One transcribed sentence with its speaker and timestamp
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptionRecord {
    /// Speaker label as produced by the transcription step
    pub speaker: String,

    /// Free-form timestamp; never interpreted, only carried through
    pub time: String,

    /// The sentence text to translate
    pub sentence: String,
}

impl TranscriptionRecord {
    /// Create a new transcription record
    pub fn new(
        speaker: impl Into<String>,
        time: impl Into<String>,
        sentence: impl Into<String>,
    ) -> Self {
        Self {
            speaker: speaker.into(),
            time: time.into(),
            sentence: sentence.into(),
        }
    }
}

/// An ordered collection of transcription records
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranscriptionCollection {
    /// Records in their original order
    pub records: Vec<TranscriptionRecord>,
}

impl TranscriptionCollection {
    /// Create a collection from a vector of records
    pub fn new(records: Vec<TranscriptionRecord>) -> Self {
        Self { records }
    }

    /// Parse a collection from a JSON array of records
    pub fn from_json_str(json: &str) -> Result<Self> {
        let records: Vec<TranscriptionRecord> =
            serde_json::from_str(json).context("Failed to parse transcription JSON")?;
        Ok(Self { records })
    }

    /// Parse a collection from a reader producing a JSON array of records
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let records: Vec<TranscriptionRecord> =
            serde_json::from_reader(reader).context("Failed to parse transcription JSON")?;
        Ok(Self { records })
    }

    /// Load a collection from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref()).with_context(|| {
            format!("Failed to open transcription file: {}", path.as_ref().display())
        })?;
        Self::from_reader(BufReader::new(file))
    }

    /// Serialize the collection to a JSON array string
    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string(&self.records).context("Failed to serialize transcriptions")
    }

    /// Write the collection to a file as a JSON array
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = self.to_json_string()?;
        let mut file = File::create(path.as_ref()).with_context(|| {
            format!("Failed to create output file: {}", path.as_ref().display())
        })?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }

    /// Number of records in the collection
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the collection holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Extract the sentence texts in record order
    pub fn extract_sentences(&self) -> Vec<String> {
        self.records.iter().map(|r| r.sentence.clone()).collect()
    }

    /// Replace each record's sentence positionally with its translation.
    ///
    /// The translated sequence must have exactly one entry per record;
    /// anything else is a hard error, never a silent truncation.
    pub fn reintegrate(mut self, translations: Vec<String>) -> Result<Self, TranslationError> {
        if translations.len() != self.records.len() {
            return Err(TranslationError::LengthMismatch {
                records: self.records.len(),
                translations: translations.len(),
            });
        }

        for (record, translated) in self.records.iter_mut().zip(translations) {
            record.sentence = translated;
        }

        Ok(self)
    }
}
