// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::{IsTerminal, Write};
use std::path::PathBuf;

use pleco2anki::app_config::{Config, LineBreakStyle, LogLevel};
use pleco2anki::Controller;

/// CLI Wrapper for LogLevel to implement ValueEnum
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
    /// Generate shell completions for pleco2anki
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// pleco2anki - Pleco flashcards to Anki decks
///
/// Reads a Pleco XML flashcard export and writes an Anki package that can
/// be imported with File > Import.
#[derive(Parser, Debug)]
#[command(name = "pleco2anki")]
#[command(version)]
#[command(about = "Convert a Pleco XML flashcard export into an Anki deck")]
#[command(long_about = "pleco2anki reads a Pleco XML flashcard export, splits each definition into readable lines and writes an Anki .apkg package.

EXAMPLES:
    pleco2anki flashcards.xml ~/Desktop            # Write ~/Desktop/pleco_to_anki.apkg
    pleco2anki -c deck.json flashcards.xml out     # Use deck settings from deck.json
    pleco2anki --deck-name HSK3 flashcards.xml out # Override the deck name
    pleco2anki completions bash > pleco2anki.bash  # Generate bash completions

CONFIGURATION:
    Deck and note type ids are fixed so repeated imports merge into the same
    deck. They can be changed in a JSON config file passed with --config.")]
#[command(args_conflicts_with_subcommands = true)]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Pleco flashcard export (.xml)
    #[arg(value_name = "INPUT_FILE")]
    input_file: Option<PathBuf>,

    /// Directory to write the Anki package into
    #[arg(value_name = "OUTPUT_PATH")]
    output_path: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Deck name shown in Anki
    #[arg(long)]
    deck_name: Option<String>,

    /// Keep newlines in definitions instead of converting them to <br>
    #[arg(long)]
    raw_newlines: bool,
}

// @struct: Custom logger implementation
struct CustomLogger {
    stdout_color: bool,
    stderr_color: bool,
}

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger {
            stdout_color: std::io::stdout().is_terminal(),
            stderr_color: std::io::stderr().is_terminal(),
        });
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
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let now = chrono::Local::now().format("%H:%M:%S%.3f");
        let line = format!("{} {:<5} {}", now, record.level(), record.args());

        // Progress goes to stdout, problems to stderr
        let _ = if record.level() <= Level::Warn {
            let mut stderr = std::io::stderr();
            if self.stderr_color {
                writeln!(stderr, "{}{}\x1B[0m", Self::color_for_level(record.level()), line)
            } else {
                writeln!(stderr, "{}", line)
            }
        } else {
            let mut stdout = std::io::stdout();
            if self.stdout_color {
                writeln!(stdout, "{}{}\x1B[0m", Self::color_for_level(record.level()), line)
            } else {
                writeln!(stdout, "{}", line)
            }
        };
    }

    fn flush(&self) {
        let _ = std::io::stdout().flush();
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Level is lowered or raised once the config is known
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "pleco2anki", &mut std::io::stdout());
        return Ok(());
    }

    run_convert(cli)
}

fn run_convert(options: CommandLineOptions) -> Result<()> {
    let (Some(input_file), Some(output_path)) = (options.input_file, options.output_path) else {
        let mut cmd = CommandLineOptions::command();
        cmd.print_help()?;
        anyhow::bail!("INPUT_FILE and OUTPUT_PATH are required");
    };

    let mut config = match &options.config {
        Some(config_path) => Config::from_file(config_path)?,
        None => Config::default(),
    };

    if let Some(log_level) = options.log_level {
        config.log_level = log_level.into();
    }
    if let Some(deck_name) = options.deck_name {
        config.deck.deck_name = deck_name;
    }
    if options.raw_newlines {
        config.deck.line_breaks = LineBreakStyle::Newline;
    }

    log::set_max_level((&config.log_level).into());

    let controller = Controller::with_config(config)?;
    controller
        .run(&input_file, &output_path)
        .context("Conversion failed")?;

    Ok(())
}
