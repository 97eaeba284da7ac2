/*!
 * Anki deck assembly.
 *
 * Maps card records onto the four fields of a fixed note type and hands
 * them to `genanki-rs`, which owns the `.apkg` layout.
 */

use std::path::Path;
use genanki_rs::{Deck, Field, Model, Note, Template};
use log::debug;

use crate::app_config::{DeckConfig, LineBreakStyle};
use crate::errors::DeckError;
use crate::pleco_reader::CardRecord;

/// Note type field names, in note field order
pub const FIELD_NAMES: [&str; 4] = ["SimplifiedChar", "TraditionalChar", "Pinyin", "DictDefinition"];

/// Question side: headword and pinyin
pub const FRONT_TEMPLATE: &str = "{{SimplifiedChar}}: {{Pinyin}}";

/// Answer side: the front, a divider, then the definition
pub const BACK_TEMPLATE: &str = r#"{{FrontSide}}<hr id="answer">{{DictDefinition}}"#;

const TEMPLATE_NAME: &str = "Card 1";

/// Field values of one note
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteFields {
    pub simplified: String,
    pub traditional: String,
    pub pinyin: String,
    pub definition: String,
}

impl NoteFields {
    /// Map a card onto note fields; a missing traditional form becomes empty
    pub fn from_record(record: &CardRecord, style: LineBreakStyle) -> Self {
        Self {
            simplified: render_field(&record.simplified, style),
            traditional: render_field(record.traditional.as_deref().unwrap_or_default(), style),
            pinyin: render_field(&record.pronunciation, style),
            definition: render_field(&record.definition, style),
        }
    }

    /// Fields in the order of `FIELD_NAMES`
    pub fn as_vec(&self) -> Vec<&str> {
        vec![
            self.simplified.as_str(),
            self.traditional.as_str(),
            self.pinyin.as_str(),
            self.definition.as_str(),
        ]
    }
}

/// Prepare plain text for an Anki field
pub fn render_field(text: &str, style: LineBreakStyle) -> String {
    match style {
        LineBreakStyle::Newline => text.to_string(),
        LineBreakStyle::Html => {
            let mut rendered = String::with_capacity(text.len());
            for c in text.chars() {
                match c {
                    '&' => rendered.push_str("&amp;"),
                    '<' => rendered.push_str("&lt;"),
                    '>' => rendered.push_str("&gt;"),
                    '\n' => rendered.push_str("<br>"),
                    _ => rendered.push(c),
                }
            }
            rendered
        }
    }
}

/// Builds one deck of notes and writes it as a package
pub struct DeckBuilder {
    // @field: Note type shared by every note
    model: Model,

    // @field: Target deck
    deck: Deck,

    // @field: Field rendering style
    line_breaks: LineBreakStyle,

    // @field: Notes added so far
    note_count: usize,
}

impl DeckBuilder {
    /// Create an empty deck with the configured ids and names
    pub fn new(config: &DeckConfig) -> Self {
        let fields = FIELD_NAMES.iter().map(|name| Field::new(name)).collect();
        let templates = vec![
            Template::new(TEMPLATE_NAME)
                .qfmt(FRONT_TEMPLATE)
                .afmt(BACK_TEMPLATE),
        ];

        Self {
            model: Model::new(config.model_id, &config.model_name, fields, templates),
            deck: Deck::new(config.deck_id, &config.deck_name, &config.deck_description),
            line_breaks: config.line_breaks,
            note_count: 0,
        }
    }

    /// Add one note for a card
    pub fn add_card(&mut self, record: &CardRecord) -> Result<(), DeckError> {
        let fields = NoteFields::from_record(record, self.line_breaks);
        let note = Note::new(self.model.clone(), fields.as_vec()).map_err(|e| DeckError::Note {
            headword: record.simplified.clone(),
            message: format!("{:?}", e),
        })?;

        self.deck.add_note(note);
        self.note_count += 1;
        Ok(())
    }

    /// Number of notes in the deck
    pub fn note_count(&self) -> usize {
        self.note_count
    }

    /// Write the deck package to `path`, replacing any existing file
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), DeckError> {
        let path = path.as_ref();
        let path_str = path
            .to_str()
            .ok_or_else(|| DeckError::InvalidPath(format!("{:?} is not valid UTF-8", path)))?;

        debug!("Writing {} notes to {}", self.note_count, path_str);
        self.deck
            .write_to_file(path_str)
            .map_err(|e| DeckError::Package(format!("{:?}", e)))
    }
}
