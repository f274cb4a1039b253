//! Background removal as a narrow capability: given a gray bitmap, return a
//! bitmap of the same size with background pixels set to zero and foreground
//! pixels keeping their intensity.
//!
//! The pipeline only depends on [`BackgroundRemover`], so any segmentation
//! backend can be plugged in. Two are bundled: [`OtsuRemover`], a global
//! histogram threshold suited to studio shots on a plain backdrop, and
//! [`PassthroughRemover`] for inputs that are already matted.
pub mod otsu;

use image::GrayImage;

use crate::error::{Error, Result};
use crate::types::{Polarity, RemoverKind};

pub use otsu::OtsuRemover;

pub trait BackgroundRemover: Send + Sync {
    /// Short name used in logs and errors.
    fn name(&self) -> &str;

    fn remove_background(&self, gray: &GrayImage) -> Result<GrayImage>;
}

/// Returns its input unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughRemover;

impl BackgroundRemover for PassthroughRemover {
    fn name(&self) -> &str {
        "passthrough"
    }

    fn remove_background(&self, gray: &GrayImage) -> Result<GrayImage> {
        Ok(gray.clone())
    }
}

pub fn build_remover(kind: RemoverKind, polarity: Polarity) -> Box<dyn BackgroundRemover> {
    match kind {
        RemoverKind::Otsu => Box::new(OtsuRemover::new(polarity)),
        RemoverKind::Passthrough => Box::new(PassthroughRemover),
    }
}

/// Run `remover` and check it kept the spatial dimensions.
pub fn remove_checked(remover: &dyn BackgroundRemover, gray: &GrayImage) -> Result<GrayImage> {
    let removed = remover.remove_background(gray)?;
    if removed.dimensions() != gray.dimensions() {
        return Err(Error::model(
            remover.name(),
            format!(
                "returned {}x{} for a {}x{} input",
                removed.width(),
                removed.height(),
                gray.width(),
                gray.height()
            ),
        ));
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Shrinking;

    impl BackgroundRemover for Shrinking {
        fn name(&self) -> &str {
            "shrinking"
        }

        fn remove_background(&self, gray: &GrayImage) -> Result<GrayImage> {
            Ok(GrayImage::new(gray.width() / 2, gray.height()))
        }
    }

    #[test]
    fn shape_mismatch_is_model_error() {
        let gray = GrayImage::new(8, 8);
        match remove_checked(&Shrinking, &gray) {
            Err(Error::Model { remover, reason }) => {
                assert_eq!(remover, "shrinking");
                assert!(reason.contains("4x8"));
            }
            other => panic!("expected Model error, got {:?}", other),
        }
    }

    #[test]
    fn passthrough_is_identity() {
        let gray = GrayImage::from_fn(5, 3, |x, y| image::Luma([(x * y) as u8]));
        assert_eq!(remove_checked(&PassthroughRemover, &gray).unwrap(), gray);
    }

    #[test]
    fn build_remover_names() {
        assert_eq!(build_remover(RemoverKind::Otsu, Polarity::LightBackground).name(), "otsu");
        assert_eq!(
            build_remover(RemoverKind::Passthrough, Polarity::LightBackground).name(),
            "passthrough"
        );
    }
}
