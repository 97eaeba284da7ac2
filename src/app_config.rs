use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Application configuration module
/// This module handles loading and validating the settings that shape the
/// generated deck. Every field has a default, so a partial file is valid.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Deck and note type settings
    #[serde(default)]
    pub deck: DeckConfig,

    /// File name of the package written into the output directory
    #[serde(default = "default_output_filename")]
    pub output_filename: String,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// How line breaks in the definition reach the Anki field
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LineBreakStyle {
    // @style: Escape HTML and turn newlines into <br>
    #[default]
    Html,
    // @style: Keep newline characters as they are
    Newline,
}

/// Settings for the Anki deck and note type
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DeckConfig {
    /// Deck id; keep it fixed so re-imports merge with earlier ones
    #[serde(default = "default_deck_id")]
    pub deck_id: i64,

    /// Deck name shown in Anki
    #[serde(default = "default_deck_name")]
    pub deck_name: String,

    /// Deck description
    #[serde(default)]
    pub deck_description: String,

    /// Note type id; keep it fixed so re-imports merge with earlier ones
    #[serde(default = "default_model_id")]
    pub model_id: i64,

    /// Note type name shown in Anki
    #[serde(default = "default_model_name")]
    pub model_name: String,

    /// Line break handling for the definition field
    #[serde(default)]
    pub line_breaks: LineBreakStyle,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            deck_id: default_deck_id(),
            deck_name: default_deck_name(),
            deck_description: String::new(),
            model_id: default_model_id(),
            model_name: default_model_name(),
            line_breaks: LineBreakStyle::default(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<&LogLevel> for log::LevelFilter {
    fn from(level: &LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_deck_id() -> i64 {
    2059400110
}

fn default_model_id() -> i64 {
    1607392319
}

fn default_deck_name() -> String {
    "Pleco to Anki Imported Cards".to_string()
}

fn default_model_name() -> String {
    "Pleco to Anki Import model".to_string()
}

fn default_output_filename() -> String {
    "pleco_to_anki.apkg".to_string()
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {:?}", path))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.deck.deck_id <= 0 {
            return Err(anyhow!("Deck id must be positive, got {}", self.deck.deck_id));
        }

        if self.deck.model_id <= 0 {
            return Err(anyhow!("Model id must be positive, got {}", self.deck.model_id));
        }

        if self.deck.deck_name.trim().is_empty() {
            return Err(anyhow!("Deck name must not be empty"));
        }

        if self.deck.model_name.trim().is_empty() {
            return Err(anyhow!("Model name must not be empty"));
        }

        if !self.output_filename.ends_with(".apkg") {
            return Err(anyhow!("Output filename must end with .apkg: {}", self.output_filename));
        }

        if self.output_filename.contains('/') || self.output_filename.contains('\\') {
            return Err(anyhow!("Output filename must not contain a path separator: {}", self.output_filename));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            deck: DeckConfig::default(),
            output_filename: default_output_filename(),
            log_level: LogLevel::default(),
        }
    }
}
