//! Chord entry session state.
//!
//! A [`ChordSession`] is what a chord-entry front end keeps between renders:
//! the lyrics being annotated, the chords entered so far, and the page
//! options. The renderer never sees the session itself; each render receives
//! a snapshot of its chords.

use std::path::{Path, PathBuf};

use image::RgbImage;
use serde::{Deserialize, Serialize};

use crate::constants::export::SIDECAR_SUFFIX;
use crate::constants::layout::DEFAULT_PAGE_WIDTH;
use crate::error::{Error, Result};
use crate::lyrics::{word_slots, WordSlot};
use crate::render::{self, LayoutConfig, PngExport};
use crate::types::{ChordMap, WordIndex};

/// Persistent state for annotating one lyric sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChordSession {
    /// Lyrics being annotated.
    #[serde(default)]
    pub lyrics: String,

    /// Optional sheet title.
    #[serde(default)]
    pub title: Option<String>,

    /// Canvas width in pixels.
    #[serde(default = "default_page_width")]
    pub page_width: u32,

    /// Chords entered so far.
    #[serde(default)]
    chords: ChordMap,
}

const fn default_page_width() -> u32 {
    DEFAULT_PAGE_WIDTH
}

impl Default for ChordSession {
    fn default() -> Self {
        Self::new("")
    }
}

impl ChordSession {
    /// Start a session with no chords.
    pub fn new(lyrics: impl Into<String>) -> Self {
        Self {
            lyrics: lyrics.into(),
            title: None,
            page_width: DEFAULT_PAGE_WIDTH,
            chords: ChordMap::new(),
        }
    }

    /// Replace the lyrics, keeping entered chords.
    ///
    /// Chords whose slot no longer holds a word are skipped at render time.
    pub fn set_lyrics(&mut self, lyrics: impl Into<String>) {
        self.lyrics = lyrics.into();
    }

    /// Every word that can take a chord, keyed the same way the renderer keys it.
    pub fn word_slots(&self) -> Vec<WordSlot<'_>> {
        word_slots(&self.lyrics)
    }

    /// Record the chord typed for a word; blank text clears it.
    pub fn set_chord(&mut self, index: WordIndex, chord: &str) {
        self.chords.insert(index, chord);
    }

    /// Chord currently stored for a word.
    pub fn chord(&self, index: WordIndex) -> Option<&str> {
        self.chords.get(index)
    }

    /// Replace all chords at once.
    pub fn set_chords(&mut self, chords: ChordMap) {
        self.chords = chords;
    }

    /// Chords entered so far.
    pub const fn chords(&self) -> &ChordMap {
        &self.chords
    }

    /// Clear every stored chord.
    pub fn reset(&mut self) {
        self.chords.clear();
    }

    /// Layout options for this session on top of `base`.
    pub fn layout_config(&self, base: &LayoutConfig) -> LayoutConfig {
        let config = base.clone().with_page_width(self.page_width);
        match &self.title {
            Some(title) => config.with_title(title.clone()),
            None => config,
        }
    }

    /// Render the current state.
    pub fn render(&self, base: &LayoutConfig) -> Result<RgbImage> {
        render::render(&self.lyrics, &self.chords, &self.layout_config(base))
    }

    /// Render and encode the current state as a PNG download.
    pub fn export(&self, base: &LayoutConfig) -> Result<PngExport> {
        PngExport::from_image(&self.render(base)?)
    }

    /// Load a session saved with [`ChordSession::save`].
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path).map_err(|e| Error::io(e, path.to_path_buf()))?;
        serde_json::from_str(&data).map_err(|e| Error::parse(e.to_string(), path.to_path_buf()))
    }

    /// Save the session as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| Error::Msg(format!("Failed to serialize session: {e}")))?;
        std::fs::write(path, json).map_err(|e| Error::io(e, path.to_path_buf()))
    }
}

/// Chord file stored next to a lyric file: `song.txt` → `song.chords.json`.
pub fn sidecar_path(lyrics_path: &Path) -> PathBuf {
    let stem = lyrics_path
        .file_stem()
        .map_or_else(|| "lyrics".into(), |s| s.to_string_lossy());
    lyrics_path.with_file_name(format!("{stem}{SIDECAR_SUFFIX}"))
}

/// Read a chord file, a JSON list of `{line, token, chord}` entries.
pub fn load_chords(path: &Path) -> Result<ChordMap> {
    let data = std::fs::read_to_string(path).map_err(|e| Error::io(e, path.to_path_buf()))?;
    serde_json::from_str(&data).map_err(|e| Error::parse(e.to_string(), path.to_path_buf()))
}

/// Write a chord file.
pub fn save_chords(chords: &ChordMap, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(chords)
        .map_err(|e| Error::Msg(format!("Failed to serialize chords: {e}")))?;
    std::fs::write(path, json).map_err(|e| Error::io(e, path.to_path_buf()))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn test_set_chord_and_reset() {
        let mut session = ChordSession::new("Guide me, O Thou");
        session.set_chord(WordIndex::new(0, 0), " C ");
        session.set_chord(WordIndex::new(0, 4), "F");
        assert_eq!(session.chord(WordIndex::new(0, 0)), Some("C"));
        assert_eq!(session.chords().len(), 2);

        session.set_chord(WordIndex::new(0, 4), "");
        assert_eq!(session.chords().len(), 1);

        session.reset();
        assert!(session.chords().is_empty());
        assert_eq!(session.lyrics, "Guide me, O Thou");
    }

    #[test]
    fn test_chords_survive_lyric_edit() {
        let mut session = ChordSession::new("Guide me");
        session.set_chord(WordIndex::new(0, 2), "G");
        session.set_lyrics("Guide");
        assert_eq!(session.chord(WordIndex::new(0, 2)), Some("G"));
        assert_eq!(session.word_slots().len(), 1);
    }

    #[test]
    fn test_layout_config_overrides() {
        let mut session = ChordSession::new("x");
        session.title = Some("Chord Chart".to_string());
        session.page_width = 900;
        let config = session.layout_config(&LayoutConfig::default());
        assert_eq!(config.page_width, 900);
        assert_eq!(config.title.as_deref(), Some("Chord Chart"));
        assert_eq!(config.margin, 60);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let mut session = ChordSession::new("Pilgrim through this barren land");
        session.set_chord(WordIndex::new(0, 0), "Am");
        session.save(&path).unwrap();

        let loaded = ChordSession::load(&path).unwrap();
        assert_eq!(loaded, session);
    }

    #[test]
    fn test_load_defaults_missing_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, r#"{"lyrics":"a b"}"#).unwrap();

        let loaded = ChordSession::load(&path).unwrap();
        assert_eq!(loaded.page_width, 1500);
        assert!(loaded.chords().is_empty());
    }

    #[test]
    fn test_load_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chords.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(load_chords(&path), Err(Error::Parse { .. })));
        assert!(matches!(ChordSession::load(&path), Err(Error::Parse { .. })));
    }

    #[test]
    fn test_chord_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("song.chords.json");
        let chords: ChordMap = [(WordIndex::new(0, 0), "C"), (WordIndex::new(2, 4), "G7")].into_iter().collect();
        save_chords(&chords, &path).unwrap();
        assert_eq!(load_chords(&path).unwrap(), chords);
    }

    #[test]
    fn test_sidecar_path() {
        assert_eq!(
            sidecar_path(Path::new("/songs/#510 - Jesus Shall Reign.txt")),
            PathBuf::from("/songs/#510 - Jesus Shall Reign.chords.json")
        );
    }
}
