// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::fs::File;
use std::io::BufReader;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::app_config::{Config, LogLevel};
use crate::pivot::{OutputKind, Tag};
use app_controller::Controller;

mod app_config;
mod app_controller;
mod encoders;
mod errors;
mod file_utils;
mod markup;
mod pipeline;
mod pivot;
mod tagger;

/// CLI wrapper for OutputKind to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliOutputKind {
    Pivot,
    Json,
    Txm,
    Conllu,
    Hyperbase,
}

impl From<CliOutputKind> for OutputKind {
    fn from(kind: CliOutputKind) -> Self {
        match kind {
            CliOutputKind::Pivot => OutputKind::Pivot,
            CliOutputKind::Json => OutputKind::Json,
            CliOutputKind::Txm => OutputKind::Txm,
            CliOutputKind::Conllu => OutputKind::Conllu,
            CliOutputKind::Hyperbase => OutputKind::Hyperbase,
        }
    }
}

/// CLI wrapper for Tag to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTag {
    Id,
    Form,
    Lemma,
    Pos,
    Text,
}

impl From<CliTag> for Tag {
    fn from(tag: CliTag) -> Self {
        match tag {
            CliTag::Id => Tag::Id,
            CliTag::Form => Tag::Form,
            CliTag::Lemma => Tag::Lemma,
            CliTag::Pos => Tag::Pos,
            CliTag::Text => Tag::Text,
        }
    }
}

/// CLI wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
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
    /// Convert TEI-like documents into annotated corpus formats (default command)
    #[command(alias = "convert")]
    Convert(ConvertArgs),

    /// Generate shell completions for pivotier
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct ConvertArgs {
    /// Input document or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Output directory (defaults to the input's directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Output kinds to produce (repeatable or comma-separated)
    #[arg(short = 'k', long = "output", value_enum, value_delimiter = ',')]
    outputs: Vec<CliOutputKind>,

    /// Token attributes to keep in every output (repeatable or comma-separated)
    #[arg(short = 'T', long = "tag", value_enum, value_delimiter = ',')]
    tags: Vec<CliTag>,

    /// Tagger language variant (e.g. 'french', 'old_french')
    #[arg(short = 'v', long)]
    variant: Option<String>,

    /// Use the built-in mock tagger instead of TreeTagger
    #[arg(long)]
    mock_tagger: bool,

    /// Number of parallel document workers
    #[arg(short, long)]
    workers: Option<usize>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// pivotier - TEI to annotated corpus formats
///
/// Converts scholarly text editions encoded in a TEI-like XML dialect into a
/// canonical annotated pivot tree, then renders it for corpus-analysis tools
/// (JSON, TXM, CoNLL-U, Hyperbase) in one annotation pass.
#[derive(Parser, Debug)]
#[command(name = "pivotier")]
#[command(version = "1.0.0")]
#[command(about = "TEI to annotated corpus formats")]
#[command(long_about = "pivotier tokenizes and tags TEI-like documents with TreeTagger and renders
the resulting pivot tree into several corpus formats in one pass.

EXAMPLES:
    pivotier avare.xml                          # json output, full tag set
    pivotier -k pivot,conllu avare.xml          # several outputs at once
    pivotier -T form,pos -k json corpus/        # restrict token attributes
    pivotier -v old_french -k txm avare.xml     # pick the tagger variant
    pivotier --mock-tagger avare.xml            # no TreeTagger install needed
    pivotier completions bash > pivotier.bash   # generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default
    one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input document or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Output directory (defaults to the input's directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Output kinds to produce (repeatable or comma-separated)
    #[arg(short = 'k', long = "output", value_enum, value_delimiter = ',')]
    outputs: Vec<CliOutputKind>,

    /// Token attributes to keep in every output (repeatable or comma-separated)
    #[arg(short = 'T', long = "tag", value_enum, value_delimiter = ',')]
    tags: Vec<CliTag>,

    /// Tagger language variant (e.g. 'french', 'old_french')
    #[arg(short = 'v', long)]
    variant: Option<String>,

    /// Use the built-in mock tagger instead of TreeTagger
    #[arg(long)]
    mock_tagger: bool,

    /// Number of parallel document workers
    #[arg(short, long)]
    workers: Option<usize>,

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
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:5} {}\x1B[0m",
                color,
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn level_filter(level: &LogLevel) -> LevelFilter {
    match level {
        LogLevel::Error => LevelFilter::Error,
        LogLevel::Warn => LevelFilter::Warn,
        LogLevel::Info => LevelFilter::Info,
        LogLevel::Debug => LevelFilter::Debug,
        LogLevel::Trace => LevelFilter::Trace,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "pivotier", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Convert(args)) => run_convert(args).await,
        None => {
            // Default behavior - use top-level args for backwards compatibility
            let input_path = cli.input_path.ok_or_else(|| {
                anyhow!("INPUT_PATH is required when no subcommand is specified")
            })?;

            let convert_args = ConvertArgs {
                input_path,
                output_dir: cli.output_dir,
                force_overwrite: cli.force_overwrite,
                outputs: cli.outputs,
                tags: cli.tags,
                variant: cli.variant,
                mock_tagger: cli.mock_tagger,
                workers: cli.workers,
                config_path: cli.config_path,
                log_level: cli.log_level,
            };
            run_convert(convert_args).await
        }
    }
}

async fn run_convert(options: ConvertArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let level: LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level_filter(&level));
    }

    // Load or create configuration
    let config_path = &options.config_path;
    let mut config = if Path::new(config_path).exists() {
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?
    } else {
        // Create default configuration if not exists
        warn!("Config file not found at '{}', creating default config.", config_path);

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    // Override config with CLI options if provided
    if let Some(variant) = &options.variant {
        config.tagger.variant = variant.clone();
    }
    if options.mock_tagger {
        config.tagger.use_mock = true;
    }
    if let Some(workers) = options.workers {
        config.pipeline.workers = workers;
    }
    if !options.outputs.is_empty() {
        config.pipeline.outputs = options.outputs.iter().cloned().map(Into::into).collect();
    }
    if !options.tags.is_empty() {
        let set: crate::pivot::TagSet = options.tags.iter().cloned().map(Tag::from).collect();
        config.pipeline.tags = vec![set];
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    // Validate the configuration after loading and overriding
    config.validate().context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        log::set_max_level(level_filter(&config.log_level));
    }

    let output_dir = options.output_dir.clone().unwrap_or_else(|| {
        if options.input_path.is_dir() {
            options.input_path.clone()
        } else {
            options
                .input_path
                .parent()
                .unwrap_or(Path::new("."))
                .to_path_buf()
        }
    });

    let controller = Controller::with_config(config)?;
    controller
        .run(options.input_path, output_dir, options.force_overwrite)
        .await
}
