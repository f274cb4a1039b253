use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::ExtendedColorType;
use image::codecs::bmp::BmpEncoder;

use crate::error::Result;

/// Write 8-bit gray pixels as a palettised BMP.
pub fn write_gray_bmp(output: &Path, cols: u32, rows: u32, data: &[u8]) -> Result<()> {
    let file = File::create(output)?;
    let mut writer = BufWriter::new(file);
    let mut encoder = BmpEncoder::new(&mut writer);
    encoder.encode(data, cols, rows, ExtendedColorType::L8)?;
    Ok(())
}
