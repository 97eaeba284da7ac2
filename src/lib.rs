/*!
 * # pleco2anki
 *
 * Converts a Pleco flashcard export (XML) into an Anki deck package (.apkg).
 *
 * ## Architecture
 *
 * - `pleco_reader`: walks the export and validates each card
 * - `definition_formatter`: inserts line breaks into run-on definitions
 * - `deck_builder`: maps cards onto Anki note fields and writes the package
 * - `xml_tree`: small element tree over quick-xml events
 * - `app_config`: JSON configuration with defaults
 * - `app_controller`: runs the conversion end to end
 * - `file_utils`: path checks
 * - `errors`: custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod deck_builder;
pub mod definition_formatter;
pub mod errors;
pub mod file_utils;
pub mod pleco_reader;
pub mod xml_tree;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, RunSummary};
pub use deck_builder::{DeckBuilder, NoteFields};
pub use definition_formatter::DefinitionFormatter;
pub use errors::{DeckError, ExtractError};
pub use pleco_reader::{CardRecord, ExtractionReport, PlecoReader, SkipReason, SkippedCard};
