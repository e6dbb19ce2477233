//! Outline font path: measurement and drawing with a real TrueType face.

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use std::path::PathBuf;

use chordsheet::render::{layout, resolve_face, Font, FontSet, FontSpec, TextRole};
use chordsheet::{ChordMap, LayoutConfig, WordIndex};
use fontdue::FontSettings;
use image::{Rgb, RgbImage};

const SIZE: f32 = 28.0;

fn fixtures() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn fixture_path() -> PathBuf {
    fixtures().join("DejaVuSansMono.ttf")
}

/// The fixture parsed directly, to compare against.
fn reference() -> fontdue::Font {
    let data = std::fs::read(fixture_path()).unwrap();
    fontdue::Font::from_bytes(data, FontSettings::default()).unwrap()
}

/// The fixture resolved through an explicit path.
fn fixture_font(size: f32) -> Font {
    let mut spec = FontSpec::new("Chordsheet Fixture Mono", "NotInAnyDir.ttf", size);
    spec.path = Some(fixture_path());
    Font::new(resolve_face(&spec, &[]), size)
}

#[test]
fn explicit_path_loads_outline_face() {
    assert!(!fixture_font(SIZE).is_builtin());
}

#[test]
fn row_height_is_ink_extent_of_sample() {
    let reference = reference();
    let (top, bottom) = ['A', 'g']
        .iter()
        .map(|&c| reference.metrics(c, SIZE))
        .fold((i32::MIN, i32::MAX), |(top, bottom), m| {
            (top.max(m.ymin + m.height as i32), bottom.min(m.ymin))
        });

    let height = fixture_font(SIZE).row_height();
    assert_eq!(height, (top - bottom) as u32);
    assert!(height > 20 && height < 40, "row height {height} at {SIZE} px");
}

#[test]
fn text_width_sums_advances() {
    let reference = reference();
    let advance = reference.metrics('M', SIZE).advance_width;
    let font = fixture_font(SIZE);

    // Monospaced: every character advances the same amount.
    assert!((font.text_width("Guide") - 5.0 * advance).abs() < 0.01);
    assert!((font.text_width(" ") - advance).abs() < 0.01);
}

#[test]
fn glyph_ink_starts_below_ascent_line() {
    let reference = reference();
    let ascent = reference.horizontal_line_metrics(SIZE).unwrap().ascent;
    let metrics = reference.metrics('A', SIZE);

    let y = 10;
    let mut canvas = RgbImage::from_pixel(60, 60, Rgb([255, 255, 255]));
    fixture_font(SIZE).draw(&mut canvas, 10.0, y, "A", Rgb([0, 0, 0]));

    let first_ink = (0..canvas.height())
        .find(|&row| (0..canvas.width()).any(|x| canvas.get_pixel(x, row).0 != [255, 255, 255]))
        .unwrap();
    let expected = (y as f32 + ascent - (metrics.ymin + metrics.height as i32) as f32).round() as u32;
    // The outermost rasterized row can have zero coverage.
    assert!((expected..=expected + 1).contains(&first_ink), "ink at {first_ink}, expected {expected}");
}

#[test]
fn layout_measures_with_font_dir() {
    let mut config = LayoutConfig::default();
    config.fonts.search_dirs = vec![fixtures()];
    let fonts = FontSet::load(&config.fonts);
    assert!(!fonts.lyric.is_builtin() && !fonts.chord.is_builtin());

    let chords: ChordMap = [(WordIndex::new(0, 0), "C")].into_iter().collect();
    let sheet = layout(&fonts, "Guide me", &chords, &config).unwrap();
    assert_eq!(sheet.rows.lyric_row, fonts.lyric.row_height());
    assert_eq!(sheet.rows.chord_row, fonts.chord.row_height());

    let chord = sheet.chords().next().unwrap();
    let expected = 60.0 + (fonts.lyric.text_width("Guide") - fonts.chord.text_width("C")) / 2.0;
    assert!((chord.x - expected).abs() < 0.01);

    let lyric = sheet.placements.iter().find(|p| p.role == TextRole::Lyric).unwrap();
    assert_eq!(lyric.y, 60 + sheet.rows.chord_row + 8);
}
