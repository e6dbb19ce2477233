//! Core type definitions shared by the tokenizer, the renderer and callers.
//!
//! Chords are keyed by [`WordIndex`], a `(line, token)` coordinate where the
//! token index counts every token of the line, spaces included.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Position of a word token within a lyric sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WordIndex {
    /// Zero-based line number.
    pub line: usize,
    /// Zero-based token number within the line (spaces are counted).
    pub token: usize,
}

impl WordIndex {
    /// Create a new `WordIndex`.
    #[must_use]
    pub const fn new(line: usize, token: usize) -> Self {
        Self { line, token }
    }
}

impl fmt::Display for WordIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.token)
    }
}

impl From<(usize, usize)> for WordIndex {
    fn from((line, token): (usize, usize)) -> Self {
        Self { line, token }
    }
}

/// One chord assignment as stored in chord files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChordEntry {
    /// Zero-based line number.
    pub line: usize,
    /// Zero-based token number within the line.
    pub token: usize,
    /// Chord label as typed.
    pub chord: String,
}

/// Sparse map from word slots to chord labels.
///
/// Labels are stored exactly as typed apart from surrounding whitespace.
/// Blank labels are never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<ChordEntry>", into = "Vec<ChordEntry>")]
pub struct ChordMap {
    chords: BTreeMap<WordIndex, String>,
}

impl ChordMap {
    /// Create an empty map.
    pub const fn new() -> Self {
        Self { chords: BTreeMap::new() }
    }

    /// Assign a chord to a slot, returning the previous label.
    ///
    /// A label that is empty after trimming removes the slot instead.
    pub fn insert(&mut self, index: WordIndex, label: &str) -> Option<String> {
        let label = label.trim();
        if label.is_empty() {
            return self.chords.remove(&index);
        }
        self.chords.insert(index, label.to_string())
    }

    /// Remove the chord at a slot.
    pub fn remove(&mut self, index: WordIndex) -> Option<String> {
        self.chords.remove(&index)
    }

    /// Chord label at a slot, if any.
    pub fn get(&self, index: WordIndex) -> Option<&str> {
        self.chords.get(&index).map(String::as_str)
    }

    /// Number of assigned chords.
    pub fn len(&self) -> usize {
        self.chords.len()
    }

    /// Check whether no chords are assigned.
    pub fn is_empty(&self) -> bool {
        self.chords.is_empty()
    }

    /// Remove every chord.
    pub fn clear(&mut self) {
        self.chords.clear();
    }

    /// Iterate over assignments in `(line, token)` order.
    pub fn iter(&self) -> impl Iterator<Item = (WordIndex, &str)> {
        self.chords.iter().map(|(index, label)| (*index, label.as_str()))
    }
}

impl From<Vec<ChordEntry>> for ChordMap {
    fn from(entries: Vec<ChordEntry>) -> Self {
        let mut map = Self::new();
        for entry in entries {
            map.insert(WordIndex::new(entry.line, entry.token), &entry.chord);
        }
        map
    }
}

impl From<ChordMap> for Vec<ChordEntry> {
    fn from(map: ChordMap) -> Self {
        map.chords
            .into_iter()
            .map(|(index, chord)| ChordEntry { line: index.line, token: index.token, chord })
            .collect()
    }
}

impl<S: AsRef<str>> FromIterator<(WordIndex, S)> for ChordMap {
    fn from_iter<T: IntoIterator<Item = (WordIndex, S)>>(iter: T) -> Self {
        let mut map = Self::new();
        for (index, label) in iter {
            map.insert(index, label.as_ref());
        }
        map
    }
}
