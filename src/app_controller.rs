/*!
 * Application controller.
 *
 * Wires configuration into the translation service and drives the two entry
 * points: the long-running HTTP server and the one-shot file translation
 * used from the command line.
 */

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;

use crate::app_config::Config;
use crate::server::{self, AppState};
use crate::transcription::TranscriptionCollection;
use crate::translation::{self, TranslationService};

/// Main application controller
pub struct Controller {
    /// Application configuration
    config: Config,
}

impl Controller {
    /// Create a new controller with the given configuration
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Create a controller from a config file, applying environment
    /// overrides; a default config file is written if none exists
    pub fn with_config_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Config::load_or_create(path)?;
        config.apply_env_overrides();
        Self::new(config)
    }

    /// The effective configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the HTTP server until it is stopped
    pub async fn run_server(&self) -> Result<()> {
        let service = TranslationService::new(self.config.translation.clone())?;

        let state = Arc::new(AppState {
            translator: Arc::new(service),
            source_language: self.config.source_language.clone(),
            target_language: self.config.target_language.clone(),
            max_concurrent_requests: self.config.translation.concurrent_requests,
        });

        server::serve(&self.config.server, state).await
    }

    /// Translate a transcription file and write the result next to it (or
    /// to `output` when given). Returns the path written.
    pub async fn translate_file(
        &self,
        input: &Path,
        output: Option<&Path>,
    ) -> Result<PathBuf> {
        let collection = TranscriptionCollection::from_file(input)?;
        info!(
            "Translating {} records from {} to {}",
            collection.len(),
            self.config.source_language,
            self.config.target_language
        );

        let service = TranslationService::new(self.config.translation.clone())?;

        let progress_bar = ProgressBar::new(0);
        progress_bar.set_style(
            ProgressStyle::with_template("{spinner} [{bar:40}] {pos}/{len} batches")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        let bar = progress_bar.clone();

        let translated = translation::translate_transcriptions(
            &service,
            collection,
            &self.config.source_language,
            &self.config.target_language,
            self.config.translation.concurrent_requests,
            move |done, total| {
                bar.set_length(total as u64);
                bar.set_position(done as u64);
            },
        )
        .await?;

        progress_bar.finish_and_clear();

        let output_path = match output {
            Some(path) => path.to_path_buf(),
            None => default_output_path(input, &self.config.target_language),
        };

        translated
            .write_to_file(&output_path)
            .with_context(|| format!("Failed to write {}", output_path.display()))?;

        info!("Wrote {}", output_path.display());
        Ok(output_path)
    }
}

/// Derive `input.<target>.json` from the input path
fn default_output_path(input: &Path, target_language: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("transcription");
    let file_name = format!("{}.{}.json", stem, target_language);
    input.with_file_name(file_name)
}
