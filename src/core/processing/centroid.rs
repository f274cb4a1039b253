use image::GrayImage;
use ndarray::ArrayView2;
use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};

/// Intensity-weighted centre of a grid, in (row, column) pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Centroid {
    pub row: f64,
    pub col: f64,
}

/// Borrow a gray image as a `(rows, cols)` grid.
pub fn as_grid(img: &GrayImage) -> Result<ArrayView2<'_, u8>> {
    let shape = (img.height() as usize, img.width() as usize);
    ArrayView2::from_shape(shape, img.as_raw().as_slice())
        .map_err(|e| Error::Processing(format!("gray buffer does not match {:?}: {}", shape, e)))
}

/// Centre of mass of `grid`. Returns `None` when every cell is zero.
pub fn center_of_mass(grid: ArrayView2<'_, u8>) -> Option<Centroid> {
    // Integer sums stay exact, so symmetric blobs land exactly on their centre.
    let mut total: u64 = 0;
    let mut row_moment: u64 = 0;
    let mut col_moment: u64 = 0;

    for (r, row) in grid.outer_iter().enumerate() {
        let mut row_mass: u64 = 0;
        for (c, &v) in row.iter().enumerate() {
            let v = v as u64;
            row_mass += v;
            col_moment += c as u64 * v;
        }
        total += row_mass;
        row_moment += r as u64 * row_mass;
    }

    if total == 0 {
        return None;
    }

    Some(Centroid {
        row: row_moment as f64 / total as f64,
        col: col_moment as f64 / total as f64,
    })
}

/// Centroid of the foreground left in a background-removed image.
pub fn locate_centroid(img: &GrayImage) -> Result<Centroid> {
    let centroid = center_of_mass(as_grid(img)?).ok_or(Error::DegenerateMass {
        width: img.width(),
        height: img.height(),
    })?;
    debug!("Centroid at row={:.2}, col={:.2}", centroid.row, centroid.col);
    Ok(centroid)
}
