//! PNG export of rendered sheets.

use std::io::Cursor;
use std::path::Path;

use image::{ImageFormat, RgbImage};

use crate::constants::export::{DEFAULT_FILE_NAME, PNG_MIME};
use crate::error::{Error, Result};

/// Encode an image as PNG bytes.
pub fn encode_png(image: &RgbImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// An encoded sheet ready for download or display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PngExport {
    /// PNG file contents.
    pub bytes: Vec<u8>,
    /// Suggested file name.
    pub file_name: String,
    /// MIME type of `bytes`.
    pub mime: &'static str,
}

impl PngExport {
    /// Encode `image` under the default file name.
    pub fn from_image(image: &RgbImage) -> Result<Self> {
        Ok(Self {
            bytes: encode_png(image)?,
            file_name: DEFAULT_FILE_NAME.to_string(),
            mime: PNG_MIME,
        })
    }

    /// Replace the suggested file name.
    #[must_use]
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    /// Inline `data:` URL for direct display.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, base64::encode(&self.bytes))
    }

    /// Write the PNG to `path`.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        std::fs::write(path, &self.bytes).map_err(|e| Error::io(e, path.to_path_buf()))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use image::Rgb;

    const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_export_defaults() {
        let image = RgbImage::from_pixel(4, 3, Rgb([255, 255, 255]));
        let export = PngExport::from_image(&image).unwrap();
        assert_eq!(export.file_name, "lyrics_chords.png");
        assert_eq!(export.mime, "image/png");
        assert_eq!(&export.bytes[..8], &PNG_SIGNATURE);

        let decoded = image::load_from_memory(&export.bytes).unwrap().to_rgb8();
        assert_eq!(decoded, image);
    }

    #[test]
    fn test_data_url_prefix() {
        let image = RgbImage::from_pixel(1, 1, Rgb([0, 0, 0]));
        let export = PngExport::from_image(&image).unwrap().with_file_name("hymn.png");
        assert_eq!(export.file_name, "hymn.png");
        assert!(export.data_url().starts_with("data:image/png;base64,iVBORw0KGgo"));
    }

    #[test]
    fn test_write_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sheet.png");
        let image = RgbImage::from_pixel(2, 2, Rgb([255, 255, 255]));
        PngExport::from_image(&image).unwrap().write_to(&path).unwrap();
        assert_eq!(std::fs::read(&path).unwrap()[..8], PNG_SIGNATURE);
    }

    #[test]
    fn test_write_to_missing_dir_reports_path() {
        let image = RgbImage::from_pixel(1, 1, Rgb([255, 255, 255]));
        let export = PngExport::from_image(&image).unwrap();
        let err = export.write_to(Path::new("/nonexistent/dir/sheet.png")).unwrap_err();
        assert!(matches!(err, Error::Io { path: Some(_), .. }));
    }
}
