use std::path::Path;

use image::GrayImage;
use tracing::info;

use crate::error::Result;
use crate::io::writers::bmp::write_gray_bmp;
use crate::io::writers::png::write_gray_png;
use crate::types::OutputFormat;

/// Encode the final crop to `output`, replacing any existing file.
pub fn save_processed_image(image: &GrayImage, output: &Path, format: OutputFormat) -> Result<()> {
    let (cols, rows) = image.dimensions();
    match format {
        OutputFormat::Bmp => write_gray_bmp(output, cols, rows, image.as_raw())?,
        OutputFormat::Png => write_gray_png(output, cols, rows, image.as_raw())?,
    }
    info!("save_processed_image: {}x{} {} saved to {:?}", cols, rows, format, output);
    Ok(())
}
