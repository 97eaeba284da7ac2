use std::fmt;
use std::fs;
use std::path::Path;
use log::{debug, info};

use crate::definition_formatter::DefinitionFormatter;
use crate::errors::ExtractError;
use crate::xml_tree::XmlElement;

// @module: Card extraction from Pleco flashcard exports
//
// A Pleco export card looks like:
//
//    <card language="chinese" created="1686178463" modified="1689690343">
//      <entry>
//        <headword charset="sc">难</headword>
//        <headword charset="tc">難</headword>
//        <pron type="hypy" tones="numbers">nan2</pron>
//        <defn>adjective 1 difficult; hard; ...</defn>
//      </entry>
//      <dictref dictid="PACE" entryid="27183104"/>
//      <catassign category="HSK 3.0/Level 1"/>
//      <scoreinfo scorefile="Default" score="400" difficulty="84"/>
//    </card>

/// Number of child elements a usable `<entry>` has
pub const ENTRY_FIELD_COUNT: usize = 4;

/// Charset marker of the simplified headword
pub const SIMPLIFIED_CHARSET: &str = "sc";

/// Charset marker of the traditional headword
pub const TRADITIONAL_CHARSET: &str = "tc";

/// Romanization marker of Hanyu Pinyin pronunciations
pub const PINYIN_SYSTEM: &str = "hypy";

// @struct: One vocabulary card ready for the deck
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardRecord {
    // @field: Simplified headword
    pub simplified: String,

    // @field: Traditional headword, when the card has one
    pub traditional: Option<String>,

    // @field: Pinyin as exported
    pub pronunciation: String,

    // @field: Definition with line breaks inserted
    pub definition: String,
}

impl fmt::Display for CardRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Card(simplified={}, traditional={}, pinyin={}, definition={})",
            self.simplified,
            self.traditional.as_deref().unwrap_or("None"),
            self.pronunciation,
            self.definition
        )
    }
}

/// Why a card was left out of the deck
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The card has no `<entry>` element
    MissingEntry,
    /// `<entry>` does not have exactly four children
    WrongFieldCount(usize),
    /// The first child is not a simplified headword
    MissingSimplified,
    /// The third child is not a pinyin pronunciation
    MissingPronunciation,
    /// The fourth child is not a definition
    MissingDefinition,
}

impl SkipReason {
    /// Silent skips are only reported at debug level
    pub fn is_silent(&self) -> bool {
        matches!(self, Self::MissingSimplified)
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::MissingEntry => write!(f, "card has no <entry>"),
            Self::WrongFieldCount(count) => write!(
                f,
                "<entry> has {} children, expected simplified, traditional, pron and defn",
                count
            ),
            Self::MissingSimplified => write!(f, "no simplified headword"),
            Self::MissingPronunciation => write!(f, "no pronunciation"),
            Self::MissingDefinition => write!(f, "no definition"),
        }
    }
}

/// A card that failed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedCard {
    /// Position among all `<card>` elements, starting at zero
    pub index: usize,
    /// What was wrong with it
    pub reason: SkipReason,
}

/// Outcome of reading one export
#[derive(Debug, Clone, Default)]
pub struct ExtractionReport {
    /// Valid cards in document order
    pub cards: Vec<CardRecord>,
    /// Cards that were left out
    pub skipped: Vec<SkippedCard>,
    /// Number of `<card>` elements in the document
    pub total_cards: usize,
}

/// Reader for Pleco XML flashcard exports
pub struct PlecoReader;

impl PlecoReader {
    /// Read and extract an export file
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<ExtractionReport, ExtractError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::parse_str(&content)
    }

    /// Extract every valid card from an export document.
    ///
    /// Only a document that is not well-formed XML is an error; a card with
    /// the wrong structure is logged and skipped.
    pub fn parse_str(xml: &str) -> Result<ExtractionReport, ExtractError> {
        let document = XmlElement::parse_document(xml)?;
        let card_elements = document.descendants("card");

        let mut report = ExtractionReport {
            total_cards: card_elements.len(),
            ..Default::default()
        };

        for (index, card) in card_elements.into_iter().enumerate() {
            match Self::extract_card(card) {
                Ok(record) => {
                    debug!("{}", record);
                    report.cards.push(record);
                }
                Err(reason) => {
                    if reason.is_silent() {
                        debug!("Skipping card {}: {}", index, reason);
                    } else {
                        info!("Skipping card {}: {}", index, reason);
                    }
                    report.skipped.push(SkippedCard { index, reason });
                }
            }
        }

        info!("Found {} cards", report.cards.len());
        Ok(report)
    }

    /// Validate one `<card>` element and build its record
    pub fn extract_card(card: &XmlElement) -> Result<CardRecord, SkipReason> {
        let entry = card.child("entry").ok_or(SkipReason::MissingEntry)?;

        let fields = &entry.children;
        if fields.len() != ENTRY_FIELD_COUNT {
            return Err(SkipReason::WrongFieldCount(fields.len()));
        }

        let simplified = &fields[0];
        if !simplified.is("headword", "charset", SIMPLIFIED_CHARSET) {
            return Err(SkipReason::MissingSimplified);
        }

        let traditional = &fields[1];
        let traditional = traditional
            .is("headword", "charset", TRADITIONAL_CHARSET)
            .then(|| traditional.trimmed_text().to_string());

        let pron = &fields[2];
        if !pron.is("pron", "type", PINYIN_SYSTEM) {
            return Err(SkipReason::MissingPronunciation);
        }

        let defn = &fields[3];
        if defn.name != "defn" {
            return Err(SkipReason::MissingDefinition);
        }

        Ok(CardRecord {
            simplified: simplified.trimmed_text().to_string(),
            traditional,
            pronunciation: pron.trimmed_text().to_string(),
            definition: DefinitionFormatter::format(defn.trimmed_text()),
        })
    }
}
