//! Lyric text files.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Lyrics read from a file, titled after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LyricSheet {
    /// File stem, used as the default sheet title.
    pub title: String,
    /// Full lyric text.
    pub lyrics: String,
    /// File the lyrics were read from.
    pub path: PathBuf,
}

impl LyricSheet {
    /// Output file name for this sheet: its stem with a `.png` extension.
    pub fn png_name(&self) -> String {
        let stem = self.path.file_stem().map_or_else(|| "sheet".into(), |s| s.to_string_lossy());
        format!("{stem}.png")
    }
}

/// Read a lyric text file.
pub fn load_sheet(path: &Path) -> Result<LyricSheet> {
    let lyrics = std::fs::read_to_string(path).map_err(|e| Error::io(e, path.to_path_buf()))?;
    let title = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .trim()
        .to_string();
    tracing::debug!("Read {} bytes of lyrics from {}", lyrics.len(), path.display());

    Ok(LyricSheet {
        title,
        lyrics,
        path: path.to_path_buf(),
    })
}
