//! Layout and font options for a single render.

use std::path::PathBuf;

use crate::constants::{fonts, layout};
use crate::error::{Error, Result};

/// A preferred font for one text role.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    /// Family name queried in the system font database.
    pub family: String,
    /// File name searched for in the font directories.
    pub file: String,
    /// Explicit font file, tried before anything else.
    pub path: Option<PathBuf>,
    /// Pixel size.
    pub size: f32,
}

impl FontSpec {
    /// Create a spec for a family/file pair at `size` pixels.
    pub fn new(family: impl Into<String>, file: impl Into<String>, size: f32) -> Self {
        Self {
            family: family.into(),
            file: file.into(),
            path: None,
            size,
        }
    }
}

/// Fonts for the title, lyric and chord rows.
#[derive(Debug, Clone, PartialEq)]
pub struct FontConfig {
    /// Title font.
    pub title: FontSpec,
    /// Lyric font.
    pub lyric: FontSpec,
    /// Chord font.
    pub chord: FontSpec,
    /// Directories searched for each spec's file name.
    pub search_dirs: Vec<PathBuf>,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            title: FontSpec::new(fonts::TITLE_FAMILY, fonts::TITLE_FILE, fonts::TITLE_SIZE),
            lyric: FontSpec::new(fonts::MONO_FAMILY, fonts::MONO_FILE, fonts::LYRIC_SIZE),
            chord: FontSpec::new(fonts::MONO_FAMILY, fonts::MONO_FILE, fonts::CHORD_SIZE),
            search_dirs: Vec::new(),
        }
    }
}

/// Geometry and text options for a chord sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Canvas width in pixels.
    pub page_width: u32,
    /// Margin on every edge.
    pub margin: u32,
    /// Space after each lyric row.
    pub line_spacing: u32,
    /// Gap between a chord row and its lyric row.
    pub chord_gap: u32,
    /// Optional centered title.
    pub title: Option<String>,
    /// Font selection.
    pub fonts: FontConfig,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            page_width: layout::DEFAULT_PAGE_WIDTH,
            margin: layout::DEFAULT_MARGIN,
            line_spacing: layout::DEFAULT_LINE_SPACING,
            chord_gap: layout::DEFAULT_CHORD_GAP,
            title: None,
            fonts: FontConfig::default(),
        }
    }
}

impl LayoutConfig {
    /// Set the title; blank titles are treated as none.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        let title = title.into();
        self.title = (!title.trim().is_empty()).then_some(title);
        self
    }

    /// Set the canvas width.
    #[must_use]
    pub fn with_page_width(mut self, page_width: u32) -> Self {
        self.page_width = page_width;
        self
    }

    /// Check render preconditions.
    ///
    /// Widths outside the recommended range are allowed but logged.
    pub fn validate(&self) -> Result<()> {
        if self.page_width == 0 {
            return Err(Error::config("page width must be positive", "Use a width between 800 and 2200 pixels"));
        }
        if u64::from(self.margin) * 2 >= u64::from(self.page_width) {
            return Err(Error::config(
                format!("margin {} leaves no room on a {} px page", self.margin, self.page_width),
                "Reduce the margin or widen the page",
            ));
        }
        for (role, spec) in [("title", &self.fonts.title), ("lyric", &self.fonts.lyric), ("chord", &self.fonts.chord)] {
            if !spec.size.is_finite() || spec.size <= 0.0 {
                return Err(Error::config(
                    format!("{role} font size {} is not a positive number", spec.size),
                    "Font sizes are given in pixels",
                ));
            }
        }
        if !(layout::MIN_RECOMMENDED_WIDTH..=layout::MAX_RECOMMENDED_WIDTH).contains(&self.page_width) {
            tracing::warn!(
                "Page width {} is outside the recommended {}-{} px range",
                self.page_width,
                layout::MIN_RECOMMENDED_WIDTH,
                layout::MAX_RECOMMENDED_WIDTH
            );
        }
        Ok(())
    }
}
