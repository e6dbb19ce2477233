//! Application configuration.
//!
//! Handles loading configuration from environment variables and .env files.

use dotenv::dotenv;
use std::env;
use std::path::PathBuf;

use crate::constants::layout;
use crate::error::Result;
use crate::render::LayoutConfig;

/// Configuration for the application.
#[derive(Debug, Clone)]
pub struct Config {
    /// Canvas width in pixels
    pub page_width: u32,
    /// Margin on every edge
    pub margin: u32,
    /// Space after each lyric row
    pub line_spacing: u32,
    /// Gap between chord and lyric rows
    pub chord_gap: u32,
    /// Extra directory searched for font files
    pub font_dir: Option<PathBuf>,
    /// Directory rendered sheets are written to
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_width: layout::DEFAULT_PAGE_WIDTH,
            margin: layout::DEFAULT_MARGIN,
            line_spacing: layout::DEFAULT_LINE_SPACING,
            chord_gap: layout::DEFAULT_CHORD_GAP,
            font_dir: None,
            output_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    #[allow(clippy::unnecessary_wraps)] // Returns Result for forward-compatible API
    pub fn load() -> Result<Self> {
        // Try to load .env file if present
        dotenv().ok();

        let mut config = Self::default();

        if let Some(width) = env_number("CHORDSHEET_WIDTH") {
            config.page_width = width;
        }
        if let Some(margin) = env_number("CHORDSHEET_MARGIN") {
            config.margin = margin;
        }
        if let Some(spacing) = env_number("CHORDSHEET_LINE_SPACING") {
            config.line_spacing = spacing;
        }
        if let Some(gap) = env_number("CHORDSHEET_CHORD_GAP") {
            config.chord_gap = gap;
        }

        config.font_dir = env::var("CHORDSHEET_FONT_DIR").ok().map(|path| expand(&path));

        if let Ok(path) = env::var("CHORDSHEET_OUTPUT_DIR") {
            config.output_dir = expand(&path);
        }

        Ok(config)
    }

    /// Layout options built from this configuration.
    pub fn layout(&self) -> LayoutConfig {
        let mut layout = LayoutConfig {
            page_width: self.page_width,
            margin: self.margin,
            line_spacing: self.line_spacing,
            chord_gap: self.chord_gap,
            ..LayoutConfig::default()
        };
        layout.fonts.search_dirs = self.font_dir.iter().cloned().chain(user_font_dir()).collect();
        layout
    }
}

/// Parse a numeric environment variable, ignoring unset or malformed values.
fn env_number(key: &str) -> Option<u32> {
    let value = env::var(key).ok()?;
    match value.trim().parse() {
        Ok(n) => Some(n),
        Err(_) => {
            tracing::warn!("Ignoring {key}={value:?}: not a number");
            None
        }
    }
}

fn expand(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).to_string())
}

/// Per-user font directory, when it exists.
fn user_font_dir() -> Option<PathBuf> {
    dirs::font_dir().filter(|p| p.is_dir())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn test_default_layout_matches_constants() {
        let layout = Config::default().layout();
        assert_eq!(layout.page_width, 1500);
        assert_eq!(layout.margin, 60);
        assert_eq!(layout.line_spacing, 18);
        assert_eq!(layout.chord_gap, 8);
        assert!(layout.title.is_none());
    }

    #[test]
    fn test_font_dir_searched_first() {
        let config = Config {
            font_dir: Some(PathBuf::from("/opt/fonts")),
            ..Config::default()
        };
        assert_eq!(config.layout().fonts.search_dirs.first(), Some(&PathBuf::from("/opt/fonts")));
    }

    #[test]
    fn test_expand_tilde() {
        let expanded = expand("~/fonts");
        assert!(!expanded.to_string_lossy().starts_with('~') || dirs::home_dir().is_none());
    }
}
