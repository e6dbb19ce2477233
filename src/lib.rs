//! `chordsheet` - chord-over-lyrics sheet layout and PNG export.
//!
//! Lyrics are tokenized into words and spaces, chords are attached to words
//! by `(line, token)` coordinate, and the sheet is rasterized with chords
//! centered above their words.

// Re-export public modules for use in integration tests and as a library
pub mod config;
pub mod constants;
pub mod error;
pub mod lyrics;
pub mod render;
pub mod session;
pub mod source;
pub mod types;

pub use error::{Error, Result};
pub use lyrics::{tokenize, Token, TokenKind};
pub use render::{render, LayoutConfig, PngExport};
pub use session::ChordSession;
pub use types::{ChordMap, WordIndex};
