use std::path::Path;

use image::{DynamicImage, ImageReader};
use tracing::{debug, info};

use crate::error::Result;

const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tif", "tiff", "webp"];

/// True when `path` has an extension we can decode (case-insensitive).
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| SUPPORTED_EXTENSIONS.iter().any(|s| e.eq_ignore_ascii_case(s)))
        .unwrap_or(false)
}

/// Open and decode an image. The format is sniffed from content, so a
/// misnamed extension still decodes.
pub fn open_image(path: &Path) -> Result<DynamicImage> {
    info!("Loading image: {:?}", path);
    let img = ImageReader::open(path)?.with_guessed_format()?.decode()?;
    debug!(
        "Decoded {}x{} {:?}",
        img.width(),
        img.height(),
        img.color()
    );
    Ok(img)
}
