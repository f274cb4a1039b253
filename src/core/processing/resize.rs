use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer, images::Image};
use image::GrayImage;
use tracing::info;

use crate::error::{Error, Result};
use crate::types::ResizeFilter;

fn resize_alg(filter: ResizeFilter) -> ResizeAlg {
    match filter {
        ResizeFilter::Nearest => ResizeAlg::Nearest,
        ResizeFilter::Bilinear => ResizeAlg::Convolution(FilterType::Bilinear),
        ResizeFilter::Bicubic => ResizeAlg::Convolution(FilterType::CatmullRom),
        ResizeFilter::Lanczos3 => ResizeAlg::Convolution(FilterType::Lanczos3),
    }
}

pub fn resize_u8_image(
    data: &[u8],
    original_cols: u32,
    original_rows: u32,
    target_cols: u32,
    target_rows: u32,
    filter: ResizeFilter,
) -> Result<Vec<u8>> {
    let resize_options = ResizeOptions::new().resize_alg(resize_alg(filter));
    let mut resizer = Resizer::new();

    let src_image = Image::from_vec_u8(original_cols, original_rows, data.to_vec(), PixelType::U8)
        .map_err(Error::resize)?;
    let mut dst_image = Image::new(target_cols, target_rows, PixelType::U8);
    resizer
        .resize(&src_image, &mut dst_image, &resize_options)
        .map_err(Error::resize)?;

    Ok(dst_image.into_vec())
}

/// Resize a gray crop to exactly `target_cols x target_rows`, ignoring aspect ratio.
pub fn resize_gray(
    img: &GrayImage,
    target_cols: u32,
    target_rows: u32,
    filter: ResizeFilter,
) -> Result<GrayImage> {
    if target_cols == 0 || target_rows == 0 {
        return Err(Error::InvalidArgument {
            arg: "output size",
            value: format!("{}x{}", target_cols, target_rows),
        });
    }

    let (cols, rows) = img.dimensions();
    if (cols, rows) == (target_cols, target_rows) {
        return Ok(img.clone());
    }

    info!(
        "Original size: {}x{}, New size: {}x{} ({})",
        cols, rows, target_cols, target_rows, filter
    );
    let resized = resize_u8_image(img.as_raw(), cols, rows, target_cols, target_rows, filter)?;
    GrayImage::from_raw(target_cols, target_rows, resized)
        .ok_or_else(|| Error::resize("resized buffer has the wrong length"))
}
