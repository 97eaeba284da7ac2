/*!
 * Tests for Pleco export card extraction
 */

use anyhow::Result;
use pleco2anki::errors::ExtractError;
use pleco2anki::pleco_reader::{PlecoReader, SkipReason};
use crate::common;

/// Test that a well-formed card yields every field
#[test]
fn test_parse_str_withFullCard_shouldExtractAllFields() -> Result<()> {
    let xml = common::pleco_export(&[common::full_card("难", "難", "nan2", "verb put sb. into a difficult position")]);
    let report = PlecoReader::parse_str(&xml)?;

    assert_eq!(report.total_cards, 1);
    assert!(report.skipped.is_empty());

    let card = &report.cards[0];
    assert_eq!(card.simplified, "难");
    assert_eq!(card.traditional.as_deref(), Some("難"));
    assert_eq!(card.pronunciation, "nan2");
    assert_eq!(card.definition, "verb put sb. into a difficult position");

    Ok(())
}

/// Test that the definition goes through the reformatter
#[test]
fn test_parse_str_withRunOnDefinition_shouldInsertLineBreaks() -> Result<()> {
    let xml = common::pleco_export(&[common::full_card(
        "难",
        "難",
        "nan2",
        "adjective 1 difficult; hard 很难想象 Hěn nán xiǎngxiàng hard to imagine 2 hardly possible; unavoidable",
    )]);
    let report = PlecoReader::parse_str(&xml)?;

    assert_eq!(
        report.cards[0].definition,
        "adjective \n\n1 difficult; hard \n很难想象 Hěn nán xiǎngxiàng hard to imagine \n\n2 hardly possible; unavoidable"
    );

    Ok(())
}

/// Test that a card missing its definition is skipped and the rest survives
#[test]
fn test_parse_str_withThreeFieldEntry_shouldSkipOnlyThatCard() -> Result<()> {
    let report = PlecoReader::parse_str(&common::one_good_one_bad_export())?;

    assert_eq!(report.total_cards, 2);
    assert_eq!(report.cards.len(), 1);
    assert_eq!(report.cards[0].simplified, "难");

    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].index, 1);
    assert_eq!(report.skipped[0].reason, SkipReason::WrongFieldCount(3));

    Ok(())
}

/// Test that a missing traditional headword is recorded as absent, not skipped
#[test]
fn test_parse_str_withoutTraditionalHeadword_shouldKeepCard() -> Result<()> {
    let card = common::card_with_entry(
        r#"<headword charset="sc">你好</headword><headword>ni3hao3</headword><pron type="hypy">ni3 hao3</pron><defn>hello</defn>"#,
    );
    let report = PlecoReader::parse_str(&common::pleco_export(&[card]))?;

    assert_eq!(report.cards.len(), 1);
    assert_eq!(report.cards[0].traditional, None);
    assert_eq!(report.cards[0].pronunciation, "ni3 hao3");

    Ok(())
}

/// Test that the first field must be the simplified headword
#[test]
fn test_parse_str_withTraditionalFirst_shouldSkipSilently() -> Result<()> {
    let card = common::card_with_entry(
        r#"<headword charset="tc">難</headword><headword charset="tc">難</headword><pron type="hypy">nan2</pron><defn>hard</defn>"#,
    );
    let report = PlecoReader::parse_str(&common::pleco_export(&[card]))?;

    assert!(report.cards.is_empty());
    assert_eq!(report.skipped[0].reason, SkipReason::MissingSimplified);
    assert!(report.skipped[0].reason.is_silent());

    Ok(())
}

/// Test that a headword without a charset attribute does not raise
#[test]
fn test_parse_str_withMissingCharsetAttribute_shouldSkipCard() -> Result<()> {
    let card = common::card_with_entry(
        r#"<headword>难</headword><headword charset="tc">難</headword><pron type="hypy">nan2</pron><defn>hard</defn>"#,
    );
    let report = PlecoReader::parse_str(&common::pleco_export(&[card]))?;

    assert!(report.cards.is_empty());
    assert_eq!(report.skipped[0].reason, SkipReason::MissingSimplified);

    Ok(())
}

/// Test that only Hanyu Pinyin pronunciations are accepted
#[test]
fn test_parse_str_withOtherRomanization_shouldSkipCard() -> Result<()> {
    let card = common::card_with_entry(
        r#"<headword charset="sc">难</headword><headword charset="tc">難</headword><pron type="wg">nan2</pron><defn>hard</defn>"#,
    );
    let report = PlecoReader::parse_str(&common::pleco_export(&[card]))?;

    assert!(report.cards.is_empty());
    assert_eq!(report.skipped[0].reason, SkipReason::MissingPronunciation);
    assert!(!report.skipped[0].reason.is_silent());

    Ok(())
}

/// Test that the fourth field must be the definition
#[test]
fn test_parse_str_withWrongFourthField_shouldSkipCard() -> Result<()> {
    let card = common::card_with_entry(
        r#"<headword charset="sc">难</headword><headword charset="tc">難</headword><pron type="hypy">nan2</pron><note>hard</note>"#,
    );
    let report = PlecoReader::parse_str(&common::pleco_export(&[card]))?;

    assert!(report.cards.is_empty());
    assert_eq!(report.skipped[0].reason, SkipReason::MissingDefinition);

    Ok(())
}

/// Test that a card without an entry is skipped
#[test]
fn test_parse_str_withoutEntry_shouldSkipCard() -> Result<()> {
    let card = r#"<card language="chinese"><dictref dictid="PACE" entryid="1"/></card>"#.to_string();
    let report = PlecoReader::parse_str(&common::pleco_export(&[card]))?;

    assert!(report.cards.is_empty());
    assert_eq!(report.skipped[0].reason, SkipReason::MissingEntry);

    Ok(())
}

/// Test that document order is preserved and counts add up
#[test]
fn test_parse_str_withMixedCards_shouldPreserveOrderAndCounts() -> Result<()> {
    let cards = vec![
        common::full_card("一", "一", "yi1", "one"),
        common::card_with_entry("<defn>orphan</defn>"),
        common::full_card("二", "二", "er4", "two"),
        common::full_card("三", "三", "san1", "three"),
    ];
    let report = PlecoReader::parse_str(&common::pleco_export(&cards))?;

    let headwords: Vec<&str> = report.cards.iter().map(|c| c.simplified.as_str()).collect();
    assert_eq!(headwords, vec!["一", "二", "三"]);
    assert_eq!(report.cards.len() + report.skipped.len(), report.total_cards);
    assert_eq!(report.skipped[0].reason, SkipReason::WrongFieldCount(1));

    Ok(())
}

/// Test that an export without cards is not an error
#[test]
fn test_parse_str_withNoCards_shouldReturnEmptyReport() -> Result<()> {
    let report = PlecoReader::parse_str(&common::pleco_export(&[]))?;

    assert_eq!(report.total_cards, 0);
    assert!(report.cards.is_empty());

    Ok(())
}

/// Test that escaped text is decoded
#[test]
fn test_parse_str_withEscapedDefinition_shouldUnescapeText() -> Result<()> {
    let xml = common::pleco_export(&[common::full_card("和", "和", "he2", "and &amp; with")]);
    let report = PlecoReader::parse_str(&xml)?;

    assert_eq!(report.cards[0].definition, "and & with");

    Ok(())
}

/// Test that malformed XML is a fatal error
#[test]
fn test_parse_str_withMalformedXml_shouldFail() {
    let result = PlecoReader::parse_str("<plecoflash><cards><card></cards></plecoflash>");
    assert!(matches!(result, Err(ExtractError::Xml { .. })));
}

/// Test that reading a missing file reports an IO error
#[test]
fn test_parse_file_withMissingFile_shouldFail() {
    let result = PlecoReader::parse_file("no_such_export_12345.xml");
    assert!(matches!(result, Err(ExtractError::Io(_))));
}

/// Test the debug representation of a card
#[test]
fn test_card_display_withoutTraditional_shouldShowNone() -> Result<()> {
    let card = common::card_with_entry(
        r#"<headword charset="sc">好</headword><headword/><pron type="hypy">hao3</pron><defn>good</defn>"#,
    );
    let report = PlecoReader::parse_str(&common::pleco_export(&[card]))?;

    assert_eq!(
        report.cards[0].to_string(),
        "Card(simplified=好, traditional=None, pinyin=hao3, definition=good)"
    );

    Ok(())
}
