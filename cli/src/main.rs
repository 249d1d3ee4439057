use std::path::PathBuf;
use std::process::exit;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use dotenvy::dotenv;

use versebook_backend::logger::{self, Level};
use versebook_backend::{
    run_assemble, run_split, AssembleConfig, DuplicatePolicy, JsonStyle, SplitConfig,
    DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_DIR,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Split a verse list into one JSON document per book", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Log verbosity. Overrides the LOG_LEVEL environment variable.
    #[arg(long, global = true, value_enum)]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Split a verse list document into one file per book
    Split {
        /// JSON document with a top-level "verses" list
        #[arg(long, short, value_name = "FILE", env = "VERSEBOOK_INPUT", default_value = DEFAULT_INPUT_PATH)]
        input: PathBuf,

        /// Directory for the book files, created if missing
        #[arg(long, short, value_name = "DIRECTORY_PATH", env = "VERSEBOOK_OUTPUT_DIR", default_value = DEFAULT_OUTPUT_DIR)]
        output_dir: PathBuf,

        #[arg(long, value_enum, default_value_t = Style::Pretty)]
        style: Style,

        /// Also write one file per chapter under <OUTPUT_DIR>/<book>/
        #[arg(long, default_value_t = false)]
        split_chapters: bool,

        /// Don't write index.json
        #[arg(long, default_value_t = false)]
        no_index: bool,

        /// Fail on a repeated book, chapter and verse instead of keeping both
        #[arg(long, default_value_t = false)]
        reject_duplicates: bool,
    },

    /// Merge a directory of book files into one document keyed by file name
    #[command(arg_required_else_help = true)]
    Assemble {
        #[arg(value_name = "DIRECTORY_PATH")]
        books_dir: PathBuf,

        #[arg(value_name = "FILE")]
        output_file: PathBuf,

        #[arg(long, value_enum, default_value_t = Style::Compact)]
        style: Style,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Style {
    Pretty,
    Compact,
}

impl From<Style> for JsonStyle {
    fn from(style: Style) -> Self {
        match style {
            Style::Pretty => JsonStyle::Pretty,
            Style::Compact => JsonStyle::Compact,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum LogLevel {
    Silent,
    Error,
    Warn,
    Info,
    Debug,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Silent => Level::Silent,
            LogLevel::Error => Level::Error,
            LogLevel::Warn => Level::Warn,
            LogLevel::Info => Level::Info,
            LogLevel::Debug => Level::Debug,
        }
    }
}

fn split(config: SplitConfig) -> Result<()> {
    let report = run_split(&config)
        .with_context(|| format!("Failed to split {}", config.input_path.display()))?;

    if !report.duplicates.is_empty() {
        logger::warn(&format!(
            "{} duplicate verses were kept, use --reject-duplicates to fail instead",
            report.duplicates.len()
        ));
    }

    println!("{}", report.summary());
    Ok(())
}

fn assemble(config: AssembleConfig) -> Result<()> {
    let count = run_assemble(&config)
        .with_context(|| format!("Failed to assemble {}", config.books_dir.display()))?;

    println!("Assembled {} books into {}", count, config.output_file.display());
    Ok(())
}

fn main() {
    // A .env file may define VERSEBOOK_INPUT, VERSEBOOK_OUTPUT_DIR or LOG_LEVEL.
    // Clap picks up the paths via `env = ...`.
    dotenv().ok();

    let cli = Cli::parse();

    if let Some(level) = cli.log_level {
        logger::set_log_level(level.into());
    }

    let command_result = match cli.command {
        Commands::Split { input, output_dir, style, split_chapters, no_index, reject_duplicates } => {
            let mut config = SplitConfig::new(input, output_dir);
            config.style = style.into();
            config.split_chapters = split_chapters;
            config.write_index = !no_index;
            config.duplicate_policy = if reject_duplicates {
                DuplicatePolicy::Reject
            } else {
                DuplicatePolicy::Keep
            };
            split(config)
        }

        Commands::Assemble { books_dir, output_file, style } => {
            if !books_dir.is_dir() {
                Err(anyhow::anyhow!("Books directory does not exist or is not a directory: {:?}", books_dir))
            } else {
                assemble(AssembleConfig {
                    books_dir,
                    output_file,
                    style: style.into(),
                })
            }
        }
    };

    if let Err(e) = command_result {
        logger::error(&format!("{:#}", e));
        eprintln!("Error executing command: {:#}", e);
        exit(1);
    }
}
