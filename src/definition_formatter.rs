/*!
 * Line-break insertion for Pleco definition text.
 *
 * Pleco exports a definition as one run-on string: part-of-speech labels,
 * numbered senses, gloss lists and example sentences (hanzi, then pinyin,
 * then an English gloss) all concatenated. This module splits it into
 * lines by inserting newline characters and never touches anything else.
 */

use regex::Regex;
use once_cell::sync::Lazy;

/// Number of characters, starting at the current one, the patterns may inspect
pub const LOOKAHEAD_CHARS: usize = 40;

/// Part-of-speech labels that start a new line
pub const PARTS_OF_SPEECH: [&str; 3] = ["noun", "verb", "adjective"];

/// Numbered sense: "2 hardly possible;"
static SENSE_NUMBER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]+ [a-zA-Z ]+;").unwrap()
});

/// Leading ASCII word of the lookahead window
static LEADING_WORD_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z]+").unwrap()
});

/// Returns true for characters in the CJK Unified Ideographs block
pub fn is_cjk_char(c: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&c)
}

/// Definition reformatter
pub struct DefinitionFormatter;

impl DefinitionFormatter {
    /// Insert line breaks into a raw Pleco definition.
    ///
    /// Every rule is checked at every character and each rule that fires
    /// contributes its own breaks:
    /// - `\n` before the first character of a run of two or more hanzi
    /// - `\n\n` before a numbered sense ("1 difficult; hard;")
    /// - `\n` before the labels "noun", "verb" and "adjective"
    ///
    /// Nothing is inserted before the first character.
    pub fn format(raw: &str) -> String {
        let chars: Vec<char> = raw.chars().collect();
        let offsets: Vec<usize> = raw
            .char_indices()
            .map(|(offset, _)| offset)
            .chain(std::iter::once(raw.len()))
            .collect();

        let mut formatted = String::with_capacity(raw.len() + raw.len() / 8);
        let mut in_cjk_run = false;

        for (i, &c) in chars.iter().enumerate() {
            let window_end = offsets[(i + LOOKAHEAD_CHARS).min(chars.len())];
            let window = &raw[offsets[i]..window_end];
            let previous = i.checked_sub(1).map(|p| chars[p]);

            let mut breaks = 0;

            if is_cjk_char(c) {
                let next_is_cjk = chars.get(i + 1).is_some_and(|&next| is_cjk_char(next));
                if !in_cjk_run && next_is_cjk {
                    breaks += 1;
                    in_cjk_run = true;
                }
            } else {
                in_cjk_run = false;
            }

            if Self::starts_numbered_sense(window, previous) {
                breaks += 2;
            }

            if Self::starts_part_of_speech(window, previous) {
                breaks += 1;
            }

            if i > 0 {
                formatted.extend(std::iter::repeat_n('\n', breaks));
            }
            formatted.push(c);
        }

        formatted
    }

    // @checks: Window begins a sense number that is not the tail of a longer number
    fn starts_numbered_sense(window: &str, previous: Option<char>) -> bool {
        if previous.is_some_and(|p| p.is_ascii_digit()) {
            return false;
        }
        SENSE_NUMBER_REGEX.is_match(window)
    }

    // @checks: Window begins with a whole part-of-speech word
    fn starts_part_of_speech(window: &str, previous: Option<char>) -> bool {
        if previous.is_some_and(|p| p.is_ascii_alphabetic()) {
            return false;
        }
        LEADING_WORD_REGEX
            .find(window)
            .is_some_and(|word| PARTS_OF_SPEECH.contains(&word.as_str()))
    }
}
