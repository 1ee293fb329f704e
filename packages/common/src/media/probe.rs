use std::io::Cursor;

use image::{ImageFormat, ImageReader};

/// Header-level facts about an encoded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageInfo {
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
}

impl ImageInfo {
    /// MIME type derived from the sniffed format.
    pub fn mime_type(&self) -> &'static str {
        self.format.to_mime_type()
    }
}

/// Sniff the format of `data` from its magic bytes and decode the header.
///
/// Returns `None` unless the bytes form a decodable image of a compiled-in
/// format with non-zero dimensions. Pixel data is not decoded.
pub fn probe(data: &[u8]) -> Option<ImageInfo> {
    let reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .ok()?;
    let format = reader.format()?;
    let (width, height) = reader.into_dimensions().ok()?;
    if width == 0 || height == 0 {
        return None;
    }
    Some(ImageInfo {
        format,
        width,
        height,
    })
}
