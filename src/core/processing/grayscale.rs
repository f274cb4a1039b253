use image::{DynamicImage, GrayImage, Luma};

use crate::types::LumaWeights;

/// Fixed-point (16.16) channel weights; each triple sums to 65536.
fn weights_q16(weights: LumaWeights) -> (u32, u32, u32) {
    match weights {
        LumaWeights::Bt601 => (19595, 38470, 7471),
        LumaWeights::Rec709 => (13933, 46871, 4732),
    }
}

/// Convert any decoded image to single-channel luminance. Alpha is ignored.
pub fn to_grayscale(img: &DynamicImage, weights: LumaWeights) -> GrayImage {
    match img {
        DynamicImage::ImageLuma8(gray) => gray.clone(),
        DynamicImage::ImageLumaA8(_) | DynamicImage::ImageLuma16(_) | DynamicImage::ImageLumaA16(_) => {
            img.to_luma8()
        }
        _ => {
            let rgb = img.to_rgb8();
            let (wr, wg, wb) = weights_q16(weights);
            GrayImage::from_fn(rgb.width(), rgb.height(), |x, y| {
                let [r, g, b] = rgb.get_pixel(x, y).0;
                let l = (r as u32 * wr + g as u32 * wg + b as u32 * wb + 0x8000) >> 16;
                Luma([l as u8])
            })
        }
    }
}
