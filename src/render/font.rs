//! Font resolution, measurement and glyph drawing.
//!
//! Faces are resolved once per (family, file, path) and shared read-only
//! through [`Arc`]. A face that cannot be found or parsed is replaced by the
//! built-in 8x8 bitmap font, so resolution never fails.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock, Mutex, PoisonError};

use font8x8::{UnicodeFonts, BASIC_FONTS, LATIN_FONTS};
use fontdue::FontSettings;
use image::{Rgb, RgbImage};

use crate::constants::fonts::{BUILTIN_CELL, HEIGHT_SAMPLE};
use crate::render::options::{FontConfig, FontSpec};

/// System font database, scanned on first use.
static SYSTEM_FONTS: LazyLock<fontdb::Database> = LazyLock::new(|| {
    let mut db = fontdb::Database::new();
    db.load_system_fonts();
    tracing::debug!("Indexed {} system font faces", db.len());
    db
});

/// Resolved faces keyed by where they were looked up.
static FACE_CACHE: LazyLock<Mutex<HashMap<FaceKey, Arc<Typeface>>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct FaceKey {
    family: String,
    file: String,
    path: Option<PathBuf>,
    search_dirs: Vec<PathBuf>,
}

/// A size-independent font face.
pub enum Typeface {
    /// A parsed TrueType/OpenType face.
    Outline(fontdue::Font),
    /// The built-in 8x8 bitmap font.
    Builtin,
}

impl std::fmt::Debug for Typeface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Outline(font) => write!(f, "Outline({:?})", font.name()),
            Self::Builtin => write!(f, "Builtin"),
        }
    }
}

/// A face at a fixed pixel size.
#[derive(Debug, Clone)]
pub struct Font {
    face: Arc<Typeface>,
    size: f32,
}

impl Font {
    /// Pair a face with a size.
    pub const fn new(face: Arc<Typeface>, size: f32) -> Self {
        Self { face, size }
    }

    /// The built-in bitmap font scaled toward `size`.
    pub fn builtin(size: f32) -> Self {
        Self::new(Arc::new(Typeface::Builtin), size)
    }

    /// Whether this font is the built-in fallback.
    pub fn is_builtin(&self) -> bool {
        matches!(*self.face, Typeface::Builtin)
    }

    /// Integer magnification of the bitmap font; at least 1.
    fn builtin_scale(&self) -> u32 {
        ((self.size / BUILTIN_CELL as f32).round() as u32).max(1)
    }

    /// Horizontal advance of `text`, in pixels.
    pub fn text_width(&self, text: &str) -> f32 {
        match &*self.face {
            Typeface::Outline(font) => text
                .chars()
                .map(|c| font.metrics(c, self.size).advance_width)
                .sum(),
            Typeface::Builtin => {
                (text.chars().count() as u32 * BUILTIN_CELL * self.builtin_scale()) as f32
            }
        }
    }

    /// Row height: ink extent of the ascender/descender sample.
    pub fn row_height(&self) -> u32 {
        let (top, bottom) = match &*self.face {
            Typeface::Outline(font) => HEIGHT_SAMPLE
                .chars()
                .map(|c| font.metrics(c, self.size))
                .filter(|m| m.height > 0)
                .fold((i32::MIN, i32::MAX), |(top, bottom), m| {
                    (top.max(m.ymin + m.height as i32), bottom.min(m.ymin))
                }),
            Typeface::Builtin => {
                let scale = self.builtin_scale() as i32;
                HEIGHT_SAMPLE
                    .chars()
                    .flat_map(|c| lit_rows(builtin_glyph(c)))
                    .fold((i32::MIN, i32::MAX), |(top, bottom), row| {
                        // Rows count downward; flip so `top` is the larger value.
                        let row = row as i32;
                        (top.max(-row * scale), bottom.min(-(row + 1) * scale))
                    })
            }
        };
        if top < bottom {
            return 0;
        }
        (top - bottom) as u32
    }

    /// Draw `text` with its ascender line at `y` and its pen starting at `x`.
    pub fn draw(&self, canvas: &mut RgbImage, x: f32, y: u32, text: &str, color: Rgb<u8>) {
        match &*self.face {
            Typeface::Outline(font) => {
                let ascent = font
                    .horizontal_line_metrics(self.size)
                    .map_or(self.size, |m| m.ascent);
                let baseline = y as f32 + ascent;
                let mut pen = x;
                for c in text.chars() {
                    let (metrics, coverage) = font.rasterize(c, self.size);
                    let left = (pen + metrics.xmin as f32).round() as i64;
                    let top = (baseline - (metrics.ymin + metrics.height as i32) as f32).round() as i64;
                    for row in 0..metrics.height {
                        for col in 0..metrics.width {
                            let alpha = coverage[row * metrics.width + col];
                            blend(canvas, left + col as i64, top + row as i64, alpha, color);
                        }
                    }
                    pen += metrics.advance_width;
                }
            }
            Typeface::Builtin => {
                let scale = i64::from(self.builtin_scale());
                let cell = i64::from(BUILTIN_CELL) * scale;
                let mut pen = x.round() as i64;
                for c in text.chars() {
                    let glyph = builtin_glyph(c);
                    for (row, bits) in glyph.iter().enumerate() {
                        for col in 0..8 {
                            if bits & (1u8 << col) == 0 {
                                continue;
                            }
                            let px = pen + col * scale;
                            let py = i64::from(y) + row as i64 * scale;
                            for dy in 0..scale {
                                for dx in 0..scale {
                                    blend(canvas, px + dx, py + dy, u8::MAX, color);
                                }
                            }
                        }
                    }
                    pen += cell;
                }
            }
        }
    }
}

/// Fonts for every text role of a sheet.
#[derive(Debug, Clone)]
pub struct FontSet {
    /// Title font.
    pub title: Font,
    /// Lyric row font.
    pub lyric: Font,
    /// Chord row font.
    pub chord: Font,
}

impl FontSet {
    /// Resolve every configured font, falling back to the built-in font.
    pub fn load(config: &FontConfig) -> Self {
        let load = |spec: &FontSpec| Font::new(resolve_face(spec, &config.search_dirs), spec.size);
        Self {
            title: load(&config.title),
            lyric: load(&config.lyric),
            chord: load(&config.chord),
        }
    }

    /// Use the built-in font for every role, at the configured sizes.
    pub fn builtin(config: &FontConfig) -> Self {
        Self {
            title: Font::builtin(config.title.size),
            lyric: Font::builtin(config.lyric.size),
            chord: Font::builtin(config.chord.size),
        }
    }
}

/// Look up a face, consulting the process-wide cache first.
pub fn resolve_face(spec: &FontSpec, search_dirs: &[PathBuf]) -> Arc<Typeface> {
    let key = FaceKey {
        family: spec.family.clone(),
        file: spec.file.clone(),
        path: spec.path.clone(),
        search_dirs: search_dirs.to_vec(),
    };

    let mut cache = FACE_CACHE.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(face) = cache.get(&key) {
        return Arc::clone(face);
    }

    let face = Arc::new(load_face(spec, search_dirs).map_or_else(
        || {
            tracing::warn!("Font {:?} unavailable, using built-in font", spec.family);
            Typeface::Builtin
        },
        Typeface::Outline,
    ));
    cache.insert(key, Arc::clone(&face));
    face
}

fn load_face(spec: &FontSpec, search_dirs: &[PathBuf]) -> Option<fontdue::Font> {
    if let Some(path) = &spec.path {
        if let Some(font) = load_file(path) {
            return Some(font);
        }
    }

    for dir in search_dirs {
        let candidate = dir.join(&spec.file);
        if candidate.is_file() {
            if let Some(font) = load_file(&candidate) {
                return Some(font);
            }
        }
    }

    load_system(&spec.family)
}

fn load_file(path: &Path) -> Option<fontdue::Font> {
    let data = match fs_err::read(path) {
        Ok(data) => data,
        Err(e) => {
            tracing::debug!("Skipping font file: {e}");
            return None;
        }
    };
    match fontdue::Font::from_bytes(data, FontSettings::default()) {
        Ok(font) => {
            tracing::info!("Loaded font {}", path.display());
            Some(font)
        }
        Err(e) => {
            tracing::debug!("Failed to parse font {}: {e}", path.display());
            None
        }
    }
}

fn load_system(family: &str) -> Option<fontdue::Font> {
    let families = [fontdb::Family::Name(family)];
    let query = fontdb::Query {
        families: &families,
        ..fontdb::Query::default()
    };
    let id = SYSTEM_FONTS.query(&query)?;
    let parsed = SYSTEM_FONTS.with_face_data(id, |data, index| {
        let settings = FontSettings {
            collection_index: index,
            ..FontSettings::default()
        };
        fontdue::Font::from_bytes(data, settings)
    })?;
    match parsed {
        Ok(font) => {
            tracing::info!("Loaded system font {family:?}");
            Some(font)
        }
        Err(e) => {
            tracing::debug!("Failed to parse system font {family:?}: {e}");
            None
        }
    }
}

/// Bitmap rows for `c`; unknown characters render as `?`.
fn builtin_glyph(c: char) -> [u8; 8] {
    BASIC_FONTS
        .get(c)
        .or_else(|| LATIN_FONTS.get(c))
        .or_else(|| BASIC_FONTS.get('?'))
        .unwrap_or([0; 8])
}

fn lit_rows(glyph: [u8; 8]) -> impl Iterator<Item = usize> {
    glyph.into_iter().enumerate().filter(|(_, bits)| *bits != 0).map(|(row, _)| row)
}

/// Mix `color` into the pixel at `(x, y)` with the given coverage; clipped to the canvas.
fn blend(canvas: &mut RgbImage, x: i64, y: i64, alpha: u8, color: Rgb<u8>) {
    if alpha == 0 || x < 0 || y < 0 || x >= i64::from(canvas.width()) || y >= i64::from(canvas.height()) {
        return;
    }
    let pixel = canvas.get_pixel_mut(x as u32, y as u32);
    let a = u32::from(alpha);
    for (dst, src) in pixel.0.iter_mut().zip(color.0) {
        *dst = ((u32::from(*dst) * (255 - a) + u32::from(src) * a) / 255) as u8;
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn test_builtin_width_is_fixed_pitch() {
        let font = Font::builtin(28.0);
        // 28 / 8 rounds to a 4x magnification: 32 px per character.
        assert!((font.text_width("Guide") - 160.0).abs() < f32::EPSILON);
        assert!((font.text_width(" ") - 32.0).abs() < f32::EPSILON);
        assert!(font.text_width("").abs() < f32::EPSILON);
    }

    #[test]
    fn test_builtin_row_height_covers_sample() {
        // "A" occupies rows 0-6 and "g" rows 2-7 of the 8x8 cell.
        assert_eq!(Font::builtin(8.0).row_height(), 8);
        assert_eq!(Font::builtin(24.0).row_height(), 24);
    }

    #[test]
    fn test_builtin_set_uses_configured_sizes() {
        let fonts = FontSet::builtin(&FontConfig::default());
        assert!(fonts.lyric.is_builtin() && fonts.chord.is_builtin() && fonts.title.is_builtin());
        assert_eq!(fonts.chord.row_height(), 24);
        assert_eq!(fonts.lyric.row_height(), 32);
        assert_eq!(fonts.title.row_height(), 40);
    }

    #[test]
    fn test_builtin_scale_never_zero() {
        let font = Font::builtin(2.0);
        assert!((font.text_width("ab") - 16.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_missing_font_falls_back() {
        let spec = FontSpec {
            family: "No Such Family For Chordsheet".to_string(),
            file: "NoSuchFont.ttf".to_string(),
            path: Some(PathBuf::from("/nonexistent/NoSuchFont.ttf")),
            size: 20.0,
        };
        let face = resolve_face(&spec, &[PathBuf::from("/nonexistent")]);
        assert!(matches!(*face, Typeface::Builtin));

        // Second lookup reuses the cached face.
        let again = resolve_face(&spec, &[PathBuf::from("/nonexistent")]);
        assert!(Arc::ptr_eq(&face, &again));
    }

    #[test]
    fn test_draw_clips_to_canvas() {
        let mut canvas = RgbImage::from_pixel(10, 10, Rgb([255, 255, 255]));
        Font::builtin(8.0).draw(&mut canvas, -4.0, 6, "WW", Rgb([0, 0, 0]));
        assert!(canvas.pixels().any(|p| p.0 == [0, 0, 0]));
    }

    #[test]
    fn test_blend_full_and_partial() {
        let mut canvas = RgbImage::from_pixel(2, 1, Rgb([255, 255, 255]));
        blend(&mut canvas, 0, 0, 255, Rgb([0, 0, 0]));
        blend(&mut canvas, 1, 0, 128, Rgb([0, 0, 0]));
        assert_eq!(canvas.get_pixel(0, 0).0, [0, 0, 0]);
        assert_eq!(canvas.get_pixel(1, 0).0, [127, 127, 127]);
    }
}
