use image::GrayImage;
use serde::Serialize;
use tracing::debug;

use crate::core::params::CropParams;
use crate::core::processing::centroid::{Centroid, as_grid};
use crate::core::processing::padding::pad_window;
use crate::error::{Error, Result};
use crate::types::BoundsPolicy;

/// Largest window side accepted, in pixels.
pub const MAX_WINDOW_SIDE: i64 = 1 << 15;

/// Half-open pixel window `[left, right) x [upper, lower)`. May extend past the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CropRect {
    pub left: i64,
    pub upper: i64,
    pub right: i64,
    pub lower: i64,
}

impl CropRect {
    pub fn width(&self) -> i64 {
        self.right - self.left
    }

    pub fn height(&self) -> i64 {
        self.lower - self.upper
    }

    pub fn is_empty(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    /// Square of side `2 * (crop_size / 2)` centred on `centroid`, before any offsets.
    pub fn base_window(centroid: Centroid, crop_size: u32) -> Result<CropRect> {
        Self::shifted(centroid, crop_size, [0, 0, 0, 0])
    }

    /// Window for `centroid` under `params`: the base square with each bound
    /// moved by its additive offset.
    pub fn around(centroid: Centroid, params: &CropParams) -> Result<CropRect> {
        Self::shifted(
            centroid,
            params.crop_size,
            [
                params.offset_left,
                params.offset_top,
                params.offset_right,
                params.offset_bottom,
            ],
        )
    }

    fn shifted(centroid: Centroid, crop_size: u32, [dl, dt, dr, db]: [i64; 4]) -> Result<CropRect> {
        let half = (crop_size / 2) as i64;
        let overflow = || Error::InvalidArgument {
            arg: "crop window",
            value: format!("crop_size={} offsets=({}, {}, {}, {})", crop_size, dl, dt, dr, db),
        };
        // Far edges follow from the exact window size so a rounding tie never resizes it.
        let width = (2 * half)
            .checked_add(dr)
            .and_then(|v| v.checked_sub(dl))
            .ok_or_else(overflow)?;
        let height = (2 * half)
            .checked_add(db)
            .and_then(|v| v.checked_sub(dt))
            .ok_or_else(overflow)?;
        let left = (centroid.col - half as f64 + dl as f64).round_ties_even() as i64;
        let upper = (centroid.row - half as f64 + dt as f64).round_ties_even() as i64;
        Ok(CropRect {
            left,
            upper,
            right: left.checked_add(width).ok_or_else(overflow)?,
            lower: upper.checked_add(height).ok_or_else(overflow)?,
        })
    }

    pub fn is_within(&self, width: u32, height: u32) -> bool {
        self.left >= 0 && self.upper >= 0 && self.right <= width as i64 && self.lower <= height as i64
    }

    /// Intersection with the `width x height` image extent, if non-empty.
    pub fn intersect(&self, width: u32, height: u32) -> Option<CropRect> {
        let inter = CropRect {
            left: self.left.max(0),
            upper: self.upper.max(0),
            right: self.right.min(width as i64),
            lower: self.lower.min(height as i64),
        };
        if inter.is_empty() { None } else { Some(inter) }
    }
}

impl std::fmt::Display for CropRect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})-({}, {})", self.left, self.upper, self.right, self.lower)
    }
}

/// Cut `rect` out of `img`, resolving out-of-range windows per `policy`.
pub fn extract(img: &GrayImage, rect: CropRect, policy: BoundsPolicy) -> Result<GrayImage> {
    let (width, height) = img.dimensions();
    let bounds_error = || Error::Bounds { rect, width, height };

    if rect.is_empty() || rect.width() > MAX_WINDOW_SIDE || rect.height() > MAX_WINDOW_SIDE {
        return Err(bounds_error());
    }

    let window = match policy {
        BoundsPolicy::Pad => rect,
        BoundsPolicy::Clamp => rect.intersect(width, height).ok_or_else(bounds_error)?,
        BoundsPolicy::Fail => {
            if !rect.is_within(width, height) {
                return Err(bounds_error());
            }
            rect
        }
    };
    debug!("Extracting {} ({:?}) from {}x{}", window, policy, width, height);

    let cropped = pad_window(as_grid(img)?, window);
    let (rows, cols) = cropped.dim();
    GrayImage::from_raw(cols as u32, rows as u32, cropped.into_raw_vec())
        .ok_or_else(|| Error::Processing(format!("crop buffer does not match {}x{}", cols, rows)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::params::Preset;
    use image::Luma;

    fn at(row: f64, col: f64) -> Centroid {
        Centroid { row, col }
    }

    #[test]
    fn base_window_is_crop_size_for_both_presets() {
        for preset in [Preset::FolderSweep, Preset::SingleShot] {
            let params = preset.params();
            for c in [at(0.0, 0.0), at(1500.0, 1500.0), at(333.3, 2711.9), at(-40.5, 12.5)] {
                let base = CropRect::base_window(c, params.crop_size).unwrap();
                assert_eq!(base.width(), 1500);
                assert_eq!(base.height(), 1500);
            }
        }
    }

    #[test]
    fn folder_sweep_window_is_shifted_and_non_square() {
        let rect = CropRect::around(at(1500.0, 1500.0), &Preset::FolderSweep.params()).unwrap();
        assert_eq!(
            rect,
            CropRect { left: 1450, upper: 1050, right: 3150, lower: 2600 }
        );
        assert_eq!((rect.width(), rect.height()), (1700, 1550));
    }

    #[test]
    fn single_shot_window_is_centred_square() {
        let rect = CropRect::around(at(1000.0, 2000.0), &Preset::SingleShot.params()).unwrap();
        assert_eq!(rect, CropRect { left: 1250, upper: 250, right: 2750, lower: 1750 });
    }

    #[test]
    fn ties_round_to_even() {
        let rect = CropRect::around(at(750.5, 751.5), &Preset::SingleShot.params()).unwrap();
        assert_eq!(rect.upper, 0);
        assert_eq!(rect.left, 2);
        assert_eq!(rect.width(), 1500);
    }

    #[test]
    fn odd_crop_size_uses_floored_half() {
        let mut params = Preset::SingleShot.params();
        params.crop_size = 41;
        let rect = CropRect::around(at(100.0, 100.0), &params).unwrap();
        assert_eq!(rect, CropRect { left: 80, upper: 80, right: 120, lower: 120 });
        assert_eq!(rect.width(), 40);
    }

    #[test]
    fn overflowing_offset_is_an_error() {
        let mut params = Preset::SingleShot.params();
        params.offset_right = i64::MAX;
        assert!(matches!(
            CropRect::around(at(10.0, 10.0), &params),
            Err(Error::InvalidArgument { arg: "crop window", .. })
        ));
    }

    #[test]
    fn oversized_window_is_rejected_before_allocation() {
        let img = GrayImage::new(4, 4);
        let rect = CropRect { left: 0, upper: 0, right: 4_000_000_000, lower: 4 };
        assert!(matches!(extract(&img, rect, BoundsPolicy::Pad), Err(Error::Bounds { .. })));
    }

    fn blob_in_corner() -> GrayImage {
        GrayImage::from_fn(20, 10, |x, y| if x < 4 && y < 4 { Luma([200]) } else { Luma([0]) })
    }

    #[test]
    fn pad_keeps_full_window() {
        let img = blob_in_corner();
        let rect = CropRect { left: -3, upper: -3, right: 5, lower: 5 };
        let out = extract(&img, rect, BoundsPolicy::Pad).unwrap();
        assert_eq!(out.dimensions(), (8, 8));
        assert_eq!(out.get_pixel(0, 0).0[0], 0);
        assert_eq!(out.get_pixel(3, 3).0[0], 200);
        assert_eq!(out.get_pixel(7, 7).0[0], 0);
    }

    #[test]
    fn clamp_shrinks_to_image() {
        let img = blob_in_corner();
        let rect = CropRect { left: -3, upper: -3, right: 5, lower: 5 };
        let out = extract(&img, rect, BoundsPolicy::Clamp).unwrap();
        assert_eq!(out.dimensions(), (5, 5));
        assert_eq!(out.get_pixel(0, 0).0[0], 200);
    }

    #[test]
    fn clamp_with_no_overlap_fails() {
        let img = blob_in_corner();
        let rect = CropRect { left: 30, upper: 0, right: 40, lower: 5 };
        assert!(matches!(extract(&img, rect, BoundsPolicy::Clamp), Err(Error::Bounds { .. })));
    }

    #[test]
    fn fail_policy_rejects_overhang_only() {
        let img = blob_in_corner();
        let inside = CropRect { left: 0, upper: 0, right: 20, lower: 10 };
        assert_eq!(extract(&img, inside, BoundsPolicy::Fail).unwrap().dimensions(), (20, 10));
        let overhang = CropRect { left: 0, upper: 0, right: 21, lower: 10 };
        match extract(&img, overhang, BoundsPolicy::Fail) {
            Err(Error::Bounds { rect, width, height }) => {
                assert_eq!(rect, overhang);
                assert_eq!((width, height), (20, 10));
            }
            other => panic!("expected Bounds, got {:?}", other),
        }
    }

    #[test]
    fn empty_window_is_rejected_under_any_policy() {
        let img = blob_in_corner();
        let rect = CropRect { left: 5, upper: 5, right: 5, lower: 9 };
        for policy in [BoundsPolicy::Pad, BoundsPolicy::Clamp, BoundsPolicy::Fail] {
            assert!(matches!(extract(&img, rect, policy), Err(Error::Bounds { .. })));
        }
    }
}
