use ndarray::{Array2, ArrayView2, s};
use tracing::info;

use crate::core::processing::crop::CropRect;

/// Copy `window` out of `src` onto a zero canvas of the window's size.
/// Parts of the window outside `src` stay zero.
pub fn pad_window(src: ArrayView2<'_, u8>, window: CropRect) -> Array2<u8> {
    let (rows, cols) = src.dim();
    let out_rows = window.height().max(0) as usize;
    let out_cols = window.width().max(0) as usize;
    let mut padded = Array2::<u8>::zeros((out_rows, out_cols));

    let Some(inside) = window.intersect(cols as u32, rows as u32) else {
        info!("Crop window {} lies entirely outside the image; output is blank", window);
        return padded;
    };

    let pad_top = (inside.upper - window.upper) as usize;
    let pad_left = (inside.left - window.left) as usize;
    let h = inside.height() as usize;
    let w = inside.width() as usize;

    if h != out_rows || w != out_cols {
        info!(
            "Padding crop: window={}, inside={}, pad_left={}, pad_top={}",
            window, inside, pad_left, pad_top
        );
    }

    let src_slice = src.slice(s![
        inside.upper as usize..inside.lower as usize,
        inside.left as usize..inside.right as usize
    ]);
    padded
        .slice_mut(s![pad_top..pad_top + h, pad_left..pad_left + w])
        .assign(&src_slice);
    padded
}
