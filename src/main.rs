// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use std::io::Write;
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

use scribetrans::app_config::{Config, LogLevel};
use scribetrans::app_controller::Controller;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP translation server (default command)
    Serve,

    /// Translate a transcription file and exit
    Translate(TranslateArgs),

    /// Generate shell completions for scribetrans
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug)]
struct TranslateArgs {
    /// Input transcription JSON file
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Output file path (defaults to <input>.<target>.json)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Source language code (e.g. 'ar')
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language code (e.g. 'en')
    #[arg(short, long)]
    target_language: Option<String>,
}

/// scribetrans - AI transcription translation service
///
/// Translates speech-transcription records between languages using an LLM
/// completion API, preserving record order and metadata.
#[derive(Parser, Debug)]
#[command(name = "scribetrans")]
#[command(version = "1.0.0")]
#[command(about = "AI-powered transcription translation service")]
#[command(long_about = "scribetrans translates speech-transcription records (speaker, time, sentence) \
between languages using an LLM completion API.

EXAMPLES:
    scribetrans                                  # Start the HTTP server with conf.json
    scribetrans serve -c prod.json               # Start the server with another config
    scribetrans translate call.json              # Translate a file, write call.en.json
    scribetrans translate -s ar -t fr call.json  # Override the language pair
    scribetrans completions bash                 # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. If the config file doesn't
    exist, a default one is created automatically. The environment variables
    OPENAI_API_KEY, OPENAI_MODEL_NAME, OPENAI_API_URL and PORT override the file.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let color = Self::color_for_level(record.level());
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} [{}] {}\x1B[0m",
                color,
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {}
}

#[tokio::main]
async fn main() -> Result<()> {
    let options = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = &options.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "scribetrans", &mut std::io::stdout());
        return Ok(());
    }

    let mut config = Config::load_or_create(&options.config_path)?;
    config.apply_env_overrides();

    let log_level = options
        .log_level
        .map(LogLevel::from)
        .unwrap_or(config.log_level);
    CustomLogger::init(log_level.to_level_filter())
        .map_err(|e| anyhow!("Failed to initialize logger: {}", e))?;

    match options.command {
        None | Some(Commands::Serve) => {
            let controller = Controller::new(config)?;
            controller.run_server().await
        }
        Some(Commands::Translate(args)) => {
            if let Some(source) = args.source_language {
                config.source_language = source;
            }
            if let Some(target) = args.target_language {
                config.target_language = target;
            }

            let controller = Controller::new(config)?;
            controller
                .translate_file(&args.input_path, args.output.as_deref())
                .await?;
            Ok(())
        }
        Some(Commands::Completions { .. }) => unreachable!("handled before config load"),
    }
}
