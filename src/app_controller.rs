use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::app_config::Config;
use crate::deck_builder::DeckBuilder;
use crate::file_utils::FileManager;
use crate::pleco_reader::PlecoReader;

// @module: Application controller for Pleco to Anki conversion

/// What a finished run produced
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Path of the written package
    pub output_path: PathBuf,
    /// Number of `<card>` elements in the input
    pub total_cards: usize,
    /// Cards that failed validation
    pub skipped_cards: usize,
    /// Notes written to the deck
    pub notes_written: usize,
    /// Wall time of the run
    pub elapsed: Duration,
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    /// Create a new controller with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self { config })
    }

    /// Configuration in use
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Convert one Pleco export into a deck package inside `output_dir`
    pub fn run(&self, input_file: &Path, output_dir: &Path) -> Result<RunSummary> {
        let start_time = Instant::now();

        FileManager::validate_input_file(input_file)?;
        FileManager::validate_output_dir(output_dir)?;

        info!("Importing Pleco XML file {:?}", input_file);
        let content = FileManager::read_to_string(input_file)?;
        let report = PlecoReader::parse_str(&content)
            .with_context(|| format!("Failed to read Pleco export: {:?}", input_file))?;

        if report.cards.is_empty() {
            warn!("No valid cards in {:?}, the deck will be empty", input_file);
        }

        info!("Creating Anki deck '{}'", self.config.deck.deck_name);
        let mut builder = DeckBuilder::new(&self.config.deck);

        let progress_bar = Self::create_progress_bar(report.cards.len());
        for card in &report.cards {
            builder
                .add_card(card)
                .with_context(|| format!("Failed to add card {}", card.simplified))?;
            progress_bar.inc(1);
        }
        progress_bar.finish_and_clear();

        FileManager::ensure_dir(output_dir)?;
        let output_path = FileManager::generate_output_path(output_dir, &self.config.output_filename);
        if output_path.exists() {
            warn!("Overwriting existing package {:?}", output_path);
        }
        builder.write_to_file(&output_path)?;

        let summary = RunSummary {
            output_path,
            total_cards: report.total_cards,
            skipped_cards: report.skipped.len(),
            notes_written: builder.note_count(),
            elapsed: start_time.elapsed(),
        };

        info!(
            "Done: wrote {} notes to {:?} in {} ({} skipped)",
            summary.notes_written,
            summary.output_path,
            Self::format_duration(summary.elapsed),
            summary.skipped_cards
        );

        Ok(summary)
    }

    fn create_progress_bar(len: usize) -> ProgressBar {
        let progress_bar = ProgressBar::new(len as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} cards ({percent}%) {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{bar:40}] {pos}/{len} ({percent}%)"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("█▓▒░"));
        progress_bar
    }

    /// Format duration in a human-readable format
    fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let minutes = total_seconds / 60;
        let seconds = total_seconds % 60;

        if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
