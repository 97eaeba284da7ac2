/*!
 * Error types for the pleco2anki application.
 *
 * Fatal errors only: problems with a single card are reported as
 * skips by the reader, never as errors.
 */

use thiserror::Error;

/// Errors that can occur while reading a Pleco export
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The document is not well-formed XML
    #[error("Invalid XML at byte {position}: {message}")]
    Xml {
        /// Byte offset reported by the XML reader
        position: usize,
        /// Reader error message
        message: String,
    },

    /// The document contains no root element
    #[error("Document has no root element")]
    NoRootElement,

    /// The input file could not be read
    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur while building or writing the Anki package
#[derive(Error, Debug)]
pub enum DeckError {
    /// A note could not be created from a card
    #[error("Failed to create note for '{headword}': {message}")]
    Note {
        /// Simplified headword of the offending card
        headword: String,
        /// Error reported by the package writer
        message: String,
    },

    /// The package could not be written
    #[error("Failed to write package: {0}")]
    Package(String),

    /// The output path cannot be handed to the package writer
    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
