//! Application constants.
//!
//! Centralizes magic numbers and configuration values for better maintainability.

/// Page layout defaults, in pixels.
pub mod layout {
    /// Default canvas width.
    pub const DEFAULT_PAGE_WIDTH: u32 = 1500;

    /// Smallest recommended canvas width.
    pub const MIN_RECOMMENDED_WIDTH: u32 = 800;

    /// Largest recommended canvas width.
    pub const MAX_RECOMMENDED_WIDTH: u32 = 2200;

    /// Default margin on every edge.
    pub const DEFAULT_MARGIN: u32 = 60;

    /// Default space after each lyric row.
    pub const DEFAULT_LINE_SPACING: u32 = 18;

    /// Default gap between a chord row and its lyric row.
    pub const DEFAULT_CHORD_GAP: u32 = 8;

    /// Extra space below the title row.
    pub const TITLE_PADDING: u32 = 20;

    /// Largest RGB canvas a render may allocate, in bytes (256 MiB).
    pub const MAX_CANVAS_BYTES: u64 = 256 * 1024 * 1024;
}

/// Font selection defaults.
pub mod fonts {
    /// Family used for lyric and chord rows.
    pub const MONO_FAMILY: &str = "DejaVu Sans Mono";

    /// File name looked up for lyric and chord rows.
    pub const MONO_FILE: &str = "DejaVuSansMono.ttf";

    /// Family used for the title.
    pub const TITLE_FAMILY: &str = "DejaVu Sans";

    /// File name looked up for the title.
    pub const TITLE_FILE: &str = "DejaVuSans.ttf";

    /// Lyric text size in pixels.
    pub const LYRIC_SIZE: f32 = 28.0;

    /// Chord text size in pixels.
    pub const CHORD_SIZE: f32 = 24.0;

    /// Title text size in pixels.
    pub const TITLE_SIZE: f32 = 36.0;

    /// Sample used to measure row height (ascender plus descender).
    pub const HEIGHT_SAMPLE: &str = "Ag";

    /// Native cell size of the built-in bitmap font.
    pub const BUILTIN_CELL: u32 = 8;
}

/// Export defaults.
pub mod export {
    /// File name offered for downloads.
    pub const DEFAULT_FILE_NAME: &str = "lyrics_chords.png";

    /// MIME type of exported images.
    pub const PNG_MIME: &str = "image/png";

    /// Suffix of chord sidecar files next to lyric files.
    pub const SIDECAR_SUFFIX: &str = ".chords.json";

    /// Title used when neither the caller nor the lyric source provides one.
    pub const DEFAULT_TITLE: &str = "Chord Chart";
}
