//! Chord sheet layout and rasterization.
//!
//! Rendering happens in two passes: [`layout`] measures text and produces a
//! [`SheetLayout`] (canvas size plus every text placement), and [`paint`]
//! draws that layout onto a white RGB canvas. [`render`] runs both.
//!
//! Chords are centered over their word using the lyric font's measurements.
//! The horizontal cursor advances by the word width plus one space after each
//! word, and again by the width of each whitespace token, so chords over later
//! words drift right of the single-string lyric row.

pub mod export;
pub mod font;
pub mod options;

pub use export::{encode_png, PngExport};
pub use font::{resolve_face, Font, FontSet, Typeface};
pub use options::{FontConfig, FontSpec, LayoutConfig};

use image::{Rgb, RgbImage};

use crate::constants::layout::{MAX_CANVAS_BYTES, TITLE_PADDING};
use crate::error::{Error, Result};
use crate::lyrics::{split_lines, tokenize, TokenKind};
use crate::types::{ChordMap, WordIndex};

const INK: Rgb<u8> = Rgb([0, 0, 0]);
const PAPER: Rgb<u8> = Rgb([255, 255, 255]);

/// Which font a placement is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextRole {
    /// Sheet title.
    Title,
    /// Chord label above a word.
    Chord,
    /// Full lyric line.
    Lyric,
}

/// A string positioned on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    /// Font role.
    pub role: TextRole,
    /// Text to draw.
    pub text: String,
    /// Left edge of the pen, in pixels.
    pub x: f32,
    /// Ascender line, in pixels from the top.
    pub y: u32,
    /// Measured advance of `text`.
    pub width: f32,
    /// Target word, for chords.
    pub word: Option<WordIndex>,
}

/// Heights of each row kind, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowMetrics {
    /// Title block including padding; zero without a title.
    pub title_block: u32,
    /// Chord row.
    pub chord_row: u32,
    /// Lyric row.
    pub lyric_row: u32,
}

/// A fully measured sheet, ready to paint.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetLayout {
    /// Canvas width.
    pub width: u32,
    /// Canvas height.
    pub height: u32,
    /// Row heights used for the layout.
    pub rows: RowMetrics,
    /// Placements in draw order.
    pub placements: Vec<Placement>,
}

impl SheetLayout {
    /// Chord placements only.
    pub fn chords(&self) -> impl Iterator<Item = &Placement> {
        self.placements.iter().filter(|p| p.role == TextRole::Chord)
    }
}

/// Render lyrics and chords with the configured fonts.
///
/// Fonts are resolved through the shared face cache; missing fonts fall back
/// to the built-in font.
pub fn render(lyrics: &str, chords: &ChordMap, config: &LayoutConfig) -> Result<RgbImage> {
    config.validate()?;
    let fonts = FontSet::load(&config.fonts);
    render_with(&fonts, lyrics, chords, config)
}

/// Render with already resolved fonts.
pub fn render_with(fonts: &FontSet, lyrics: &str, chords: &ChordMap, config: &LayoutConfig) -> Result<RgbImage> {
    let sheet = layout(fonts, lyrics, chords, config)?;
    Ok(paint(&sheet, fonts))
}

/// Measure the sheet and place every string.
pub fn layout(fonts: &FontSet, lyrics: &str, chords: &ChordMap, config: &LayoutConfig) -> Result<SheetLayout> {
    config.validate()?;

    let lines = split_lines(lyrics);
    let rows = RowMetrics {
        title_block: config
            .title
            .as_ref()
            .map_or(0, |_| fonts.title.row_height() + TITLE_PADDING),
        chord_row: fonts.chord.row_height(),
        lyric_row: fonts.lyric.row_height(),
    };
    let line_advance = u64::from(rows.chord_row)
        + u64::from(config.chord_gap)
        + u64::from(rows.lyric_row)
        + u64::from(config.line_spacing);
    let height = u64::from(config.margin) * 2 + u64::from(rows.title_block) + line_advance * lines.len() as u64;
    let bytes = u64::from(config.page_width).saturating_mul(height).saturating_mul(3);
    if bytes > MAX_CANVAS_BYTES {
        return Err(Error::config(
            format!("a {}x{height} px sheet needs {bytes} bytes, over the {MAX_CANVAS_BYTES} byte limit", config.page_width),
            "Use a narrower page or split the lyrics into several sheets",
        ));
    }
    let height = u32::try_from(height)
        .map_err(|_| Error::config(format!("sheet height {height} px is too large"), "Split the lyrics into several sheets"))?;

    let mut placements = Vec::new();
    let mut y = config.margin;

    if let Some(title) = &config.title {
        let width = fonts.title.text_width(title);
        placements.push(Placement {
            role: TextRole::Title,
            text: title.clone(),
            x: ((config.page_width as f32 - width) / 2.0).floor(),
            y,
            width,
            word: None,
        });
        y += rows.title_block;
    }

    let space_width = fonts.lyric.text_width(" ");
    let margin = config.margin as f32;
    let mut placed = 0;

    for (line_index, line) in lines.iter().enumerate() {
        let mut x = margin;
        for (token_index, token) in tokenize(line).into_iter().enumerate() {
            let token_width = fonts.lyric.text_width(token.text);
            if token.kind == TokenKind::Space {
                x += token_width;
                continue;
            }
            let index = WordIndex::new(line_index, token_index);
            if let Some(chord) = chords.get(index) {
                let chord_width = fonts.chord.text_width(chord);
                placements.push(Placement {
                    role: TextRole::Chord,
                    text: chord.to_string(),
                    x: x + (token_width - chord_width) / 2.0,
                    y,
                    width: chord_width,
                    word: Some(index),
                });
                placed += 1;
            }
            x += token_width + space_width;
        }

        placements.push(Placement {
            role: TextRole::Lyric,
            text: (*line).to_string(),
            x: margin,
            y: y + rows.chord_row + config.chord_gap,
            width: fonts.lyric.text_width(line),
            word: None,
        });
        // Cannot overflow: the total height was checked above.
        y += line_advance as u32;
    }

    if placed < chords.len() {
        tracing::debug!("Ignored {} chords with no matching word", chords.len() - placed);
    }
    tracing::debug!("Laid out {} lines, {placed} chords on a {}x{height} canvas", lines.len(), config.page_width);

    Ok(SheetLayout {
        width: config.page_width,
        height,
        rows,
        placements,
    })
}

/// Draw a laid out sheet onto a fresh white canvas.
pub fn paint(sheet: &SheetLayout, fonts: &FontSet) -> RgbImage {
    let mut canvas = RgbImage::from_pixel(sheet.width, sheet.height, PAPER);
    for placement in &sheet.placements {
        let font = match placement.role {
            TextRole::Title => &fonts.title,
            TextRole::Chord => &fonts.chord,
            TextRole::Lyric => &fonts.lyric,
        };
        font.draw(&mut canvas, placement.x, placement.y, &placement.text, INK);
    }
    canvas
}
