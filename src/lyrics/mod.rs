//! Lyrics processing module.
//!
//! Splits lyric text into lines and lines into word/space tokens. Chord entry
//! and rendering both go through this module so word slots always agree.

pub mod tokenize;

pub use tokenize::{tokenize, Token, TokenKind};

use std::sync::LazyLock;

use regex::Regex;

use crate::types::WordIndex;

/// Regex matching a single line break; `\r\n` counts as one.
#[allow(clippy::expect_used)]
static RE_LINE_BREAK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\r\n|[\n\r\x0b\x0c\x1c-\x1e\x{85}\x{2028}\x{2029}]").expect("valid regex: RE_LINE_BREAK")
});

/// A word that can carry a chord, with its slot coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordSlot<'a> {
    /// Coordinate used as the chord map key.
    pub index: WordIndex,
    /// The word text.
    pub word: &'a str,
}

/// Split lyrics into lines.
///
/// Breaks on `\n`, `\r\n`, lone `\r`, vertical tab, form feed, the
/// `\x1c`-`\x1e` separators, NEL and the Unicode line and paragraph
/// separators. A trailing line break does not add an empty line.
pub fn split_lines(lyrics: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = RE_LINE_BREAK.split(lyrics).collect();
    if lines.last() == Some(&"") {
        lines.pop();
    }
    lines
}

/// Enumerate every word of the lyrics with the slot a chord would attach to.
pub fn word_slots(lyrics: &str) -> Vec<WordSlot<'_>> {
    split_lines(lyrics)
        .into_iter()
        .enumerate()
        .flat_map(|(line, text)| {
            tokenize(text)
                .into_iter()
                .enumerate()
                .filter(|(_, token)| token.is_word())
                .map(move |(token, t)| WordSlot {
                    index: WordIndex::new(line, token),
                    word: t.text,
                })
        })
        .collect()
}
