use image::{DynamicImage, GrayImage};
use tracing::info;

use crate::core::params::CropParams;
use crate::core::processing::centroid::{Centroid, locate_centroid};
use crate::core::processing::crop::{CropRect, extract};
use crate::core::processing::grayscale::to_grayscale;
use crate::core::processing::resize::resize_gray;
use crate::error::Result;
use crate::segment::{BackgroundRemover, remove_checked};

/// Everything one pass over an image produced.
#[derive(Debug, Clone)]
pub struct ProcessedCrop {
    pub centroid: Centroid,
    pub rect: CropRect,
    /// Crop dimensions before resizing
    pub crop_width: u32,
    pub crop_height: u32,
    pub image: GrayImage,
}

/// Grayscale, remove background, locate the centroid, crop around it and resize.
pub fn crop_to_subject(
    img: &DynamicImage,
    params: &CropParams,
    remover: &dyn BackgroundRemover,
) -> Result<ProcessedCrop> {
    params.validate()?;

    let gray = to_grayscale(img, params.luma);
    let removed = remove_checked(remover, &gray)?;
    drop(gray);

    let centroid = locate_centroid(&removed)?;
    let rect = CropRect::around(centroid, params)?;
    let cropped = extract(&removed, rect, params.bounds)?;
    let (crop_width, crop_height) = cropped.dimensions();
    info!(
        "Crop {} around centroid ({:.1}, {:.1}): {}x{}",
        rect, centroid.row, centroid.col, crop_width, crop_height
    );

    let image = resize_gray(&cropped, params.output_width, params.output_height, params.filter)?;

    Ok(ProcessedCrop {
        centroid,
        rect,
        crop_width,
        crop_height,
        image,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::params::Preset;
    use crate::segment::PassthroughRemover;
    use crate::error::Error;
    use crate::types::BoundsPolicy;
    use image::Luma;

    fn disc(size: u32, cx: f64, cy: f64, radius: f64) -> DynamicImage {
        DynamicImage::ImageLuma8(GrayImage::from_fn(size, size, |x, y| {
            let dx = x as f64 - cx;
            let dy = y as f64 - cy;
            if dx * dx + dy * dy <= radius * radius {
                Luma([255])
            } else {
                Luma([0])
            }
        }))
    }

    #[test]
    fn centred_disc_with_folder_sweep() {
        let img = disc(3000, 1500.0, 1500.0, 200.0);
        let out = crop_to_subject(&img, &Preset::FolderSweep.params(), &PassthroughRemover).unwrap();
        assert!((out.centroid.row - 1500.0).abs() < 1e-9);
        assert!((out.centroid.col - 1500.0).abs() < 1e-9);
        assert_eq!(out.rect, CropRect { left: 1450, upper: 1050, right: 3150, lower: 2600 });
        assert_eq!((out.crop_width, out.crop_height), (1700, 1550));
        assert_eq!(out.image.dimensions(), (130, 100));
    }

    #[test]
    fn single_shot_output_size() {
        let img = disc(2000, 900.0, 1100.0, 150.0);
        let out = crop_to_subject(&img, &Preset::SingleShot.params(), &PassthroughRemover).unwrap();
        assert_eq!((out.crop_width, out.crop_height), (1500, 1500));
        assert_eq!(out.image.dimensions(), (120, 100));
    }

    #[test]
    fn edge_blob_under_each_policy() {
        let img = disc(1600, 10.0, 10.0, 60.0);
        let mut params = Preset::SingleShot.params();

        params.bounds = BoundsPolicy::Pad;
        let padded = crop_to_subject(&img, &params, &PassthroughRemover).unwrap();
        assert_eq!((padded.crop_width, padded.crop_height), (1500, 1500));
        assert!(padded.rect.left < 0 && padded.rect.upper < 0);

        params.bounds = BoundsPolicy::Clamp;
        let clamped = crop_to_subject(&img, &params, &PassthroughRemover).unwrap();
        assert!(clamped.crop_width < 1500 && clamped.crop_height < 1500);
        assert_eq!(clamped.image.dimensions(), (120, 100));

        params.bounds = BoundsPolicy::Fail;
        assert!(matches!(
            crop_to_subject(&img, &params, &PassthroughRemover),
            Err(Error::Bounds { .. })
        ));
    }

    #[test]
    fn blank_image_is_degenerate() {
        let img = DynamicImage::ImageLuma8(GrayImage::new(64, 64));
        assert!(matches!(
            crop_to_subject(&img, &Preset::SingleShot.params(), &PassthroughRemover),
            Err(Error::DegenerateMass { .. })
        ));
    }

    #[test]
    fn out_of_range_params_error_instead_of_panicking() {
        let img = disc(64, 32.0, 32.0, 8.0);
        let mut params = Preset::SingleShot.params();
        params.crop_size = 4_000_000_000;
        assert!(matches!(
            crop_to_subject(&img, &params, &PassthroughRemover),
            Err(Error::InvalidArgument { arg: "crop_size", .. })
        ));

        let mut params = Preset::SingleShot.params();
        params.offset_right = i64::MAX;
        assert!(matches!(
            crop_to_subject(&img, &params, &PassthroughRemover),
            Err(Error::InvalidArgument { arg: "offset_right", .. })
        ));
    }

    #[test]
    fn zero_crop_size_is_rejected() {
        let img = disc(64, 32.0, 32.0, 8.0);
        let mut params = Preset::SingleShot.params();
        params.crop_size = 0;
        assert!(matches!(
            crop_to_subject(&img, &params, &PassthroughRemover),
            Err(Error::InvalidArgument { arg: "crop_size", .. })
        ));
    }
}
