use image::{GrayImage, Luma};
use tracing::debug;

use super::BackgroundRemover;
use crate::error::Result;
use crate::types::Polarity;

/// Global Otsu threshold. Pixels on the background side become zero.
#[derive(Debug, Clone, Copy)]
pub struct OtsuRemover {
    pub polarity: Polarity,
}

impl OtsuRemover {
    pub fn new(polarity: Polarity) -> Self {
        Self { polarity }
    }
}

impl Default for OtsuRemover {
    fn default() -> Self {
        Self::new(Polarity::LightBackground)
    }
}

fn histogram(gray: &GrayImage) -> [u64; 256] {
    let mut hist = [0u64; 256];
    for &v in gray.as_raw() {
        hist[v as usize] += 1;
    }
    hist
}

/// Threshold `t` maximising between-class variance for classes `<= t` and `> t`.
/// `None` when the image has a single gray level.
pub fn otsu_threshold(hist: &[u64; 256]) -> Option<u8> {
    let total: u64 = hist.iter().sum();
    let weighted_total: f64 = hist
        .iter()
        .enumerate()
        .map(|(i, &n)| i as f64 * n as f64)
        .sum();

    let mut weight_low: u64 = 0;
    let mut sum_low = 0.0f64;
    let mut best: Option<(u8, f64)> = None;

    for (t, &n) in hist.iter().enumerate() {
        weight_low += n;
        if weight_low == 0 {
            continue;
        }
        let weight_high = total - weight_low;
        if weight_high == 0 {
            break;
        }
        sum_low += t as f64 * n as f64;

        let mean_low = sum_low / weight_low as f64;
        let mean_high = (weighted_total - sum_low) / weight_high as f64;
        let between = weight_low as f64 * weight_high as f64 * (mean_low - mean_high).powi(2);

        if best.is_none_or(|(_, b)| between > b) {
            best = Some((t as u8, between));
        }
    }

    best.map(|(t, _)| t)
}

impl BackgroundRemover for OtsuRemover {
    fn name(&self) -> &str {
        "otsu"
    }

    fn remove_background(&self, gray: &GrayImage) -> Result<GrayImage> {
        let Some(threshold) = otsu_threshold(&histogram(gray)) else {
            debug!("Single gray level, no foreground to separate");
            return Ok(GrayImage::new(gray.width(), gray.height()));
        };
        debug!("Otsu threshold {} ({:?})", threshold, self.polarity);

        let keep = |v: u8| match self.polarity {
            Polarity::LightBackground => v <= threshold,
            Polarity::DarkBackground => v > threshold,
        };
        let mut out = gray.clone();
        for Luma([v]) in out.pixels_mut() {
            if !keep(*v) {
                *v = 0;
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_level(subject: u8, backdrop: u8) -> GrayImage {
        GrayImage::from_fn(40, 30, |x, y| {
            if (10..20).contains(&x) && (5..15).contains(&y) {
                Luma([subject])
            } else {
                Luma([backdrop])
            }
        })
    }

    #[test]
    fn threshold_splits_two_levels() {
        let img = two_level(60, 220);
        let t = otsu_threshold(&histogram(&img)).unwrap();
        assert!((60..220).contains(&t));
    }

    #[test]
    fn light_background_is_removed() {
        let img = two_level(60, 220);
        let out = OtsuRemover::new(Polarity::LightBackground).remove_background(&img).unwrap();
        assert_eq!(out.get_pixel(0, 0).0[0], 0);
        assert_eq!(out.get_pixel(12, 7).0[0], 60);
    }

    #[test]
    fn dark_background_is_removed() {
        let img = two_level(200, 10);
        let out = OtsuRemover::new(Polarity::DarkBackground).remove_background(&img).unwrap();
        assert_eq!(out.get_pixel(0, 0).0[0], 0);
        assert_eq!(out.get_pixel(12, 7).0[0], 200);
        let mass: u64 = out.as_raw().iter().map(|&v| v as u64).sum();
        assert_eq!(mass, 200 * 100);
    }

    #[test]
    fn uniform_image_has_no_foreground() {
        let img = GrayImage::from_pixel(16, 16, Luma([128]));
        assert_eq!(otsu_threshold(&histogram(&img)), None);
        let out = OtsuRemover::default().remove_background(&img).unwrap();
        assert!(out.as_raw().iter().all(|&v| v == 0));
    }
}
