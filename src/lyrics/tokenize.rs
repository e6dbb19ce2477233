//! Word/space tokenizer for lyric lines.

use std::sync::LazyLock;

use regex::Regex;

/// Regex matching maximal whitespace or non-whitespace runs.
///
/// The information separators `\x1c`-`\x1f` count as whitespace, which
/// Unicode `\s` alone leaves out.
#[allow(clippy::expect_used)]
static RE_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^\s\x1c-\x1f]+|[\s\x1c-\x1f]+").expect("valid regex: RE_TOKEN")
});

/// Classification of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A run of non-whitespace characters.
    Word,
    /// A run of whitespace characters.
    Space,
}

/// A slice of a line that is entirely whitespace or entirely not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// Word or space.
    pub kind: TokenKind,
    /// The text of the run, borrowed from the line.
    pub text: &'a str,
}

impl Token<'_> {
    /// Check whether this token can carry a chord.
    pub fn is_word(&self) -> bool {
        self.kind == TokenKind::Word
    }
}

/// Whitespace as the tokenizer sees it.
pub fn is_space(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}

/// Split a line into alternating word and space tokens.
///
/// Concatenating the token texts reproduces `line`. An empty line yields no tokens.
pub fn tokenize(line: &str) -> Vec<Token<'_>> {
    RE_TOKEN
        .find_iter(line)
        .map(|m| {
            let text = m.as_str();
            let kind = if text.chars().all(is_space) {
                TokenKind::Space
            } else {
                TokenKind::Word
            };
            Token { kind, text }
        })
        .collect()
}
