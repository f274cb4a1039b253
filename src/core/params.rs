use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::core::processing::crop::MAX_WINDOW_SIDE;
use crate::error::{Error, Result};
use crate::types::{BoundsPolicy, LumaWeights, OutputFormat, OutputPathRule, ResizeFilter};

/// Crop parameters suitable for config files and presets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropParams {
    /// Side of the base square centred on the centroid
    pub crop_size: u32,
    pub offset_left: i64,
    pub offset_top: i64,
    pub offset_right: i64,
    pub offset_bottom: i64,
    pub output_width: u32,
    pub output_height: u32,
    pub output_path_rule: OutputPathRule,
    pub output_format: OutputFormat,
    pub bounds: BoundsPolicy,
    pub filter: ResizeFilter,
    pub luma: LumaWeights,
}

impl Default for CropParams {
    fn default() -> Self {
        Preset::FolderSweep.params()
    }
}

impl CropParams {
    /// Reject parameter sets that cannot produce an image: the crop size and
    /// each offset are bounded by `MAX_WINDOW_SIDE`, and the final window must
    /// have a positive area no larger than `MAX_WINDOW_SIDE` per side.
    pub fn validate(&self) -> Result<()> {
        if self.crop_size == 0 || self.crop_size as i64 > MAX_WINDOW_SIDE {
            return Err(Error::InvalidArgument {
                arg: "crop_size",
                value: self.crop_size.to_string(),
            });
        }
        for (arg, offset) in [
            ("offset_left", self.offset_left),
            ("offset_top", self.offset_top),
            ("offset_right", self.offset_right),
            ("offset_bottom", self.offset_bottom),
        ] {
            if offset.unsigned_abs() > MAX_WINDOW_SIDE as u64 {
                return Err(Error::InvalidArgument {
                    arg,
                    value: offset.to_string(),
                });
            }
        }

        let (width, height) = self.window_size();
        if !(1..=MAX_WINDOW_SIDE).contains(&width) || !(1..=MAX_WINDOW_SIDE).contains(&height) {
            return Err(Error::InvalidArgument {
                arg: "crop window",
                value: format!("{}x{}", width, height),
            });
        }

        if self.output_width == 0 || self.output_height == 0 {
            return Err(Error::InvalidArgument {
                arg: "output size",
                value: format!("{}x{}", self.output_width, self.output_height),
            });
        }
        Ok(())
    }

    /// Width and height of the crop window before resizing. Call after
    /// bounding the offsets; unchecked sums may overflow otherwise.
    pub fn window_size(&self) -> (i64, i64) {
        let base = 2 * (self.crop_size / 2) as i64;
        (
            base + self.offset_right - self.offset_left,
            base + self.offset_bottom - self.offset_top,
        )
    }
}

/// Named parameter sets for the two photo sessions the tool was built for.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    /// Shifted, non-square window; 130x100 output named after each input.
    FolderSweep,
    /// Centred square window; 120x100 output to a single fixed file.
    SingleShot,
}

impl Preset {
    pub fn params(self) -> CropParams {
        match self {
            Preset::FolderSweep => CropParams {
                crop_size: 1500,
                offset_left: 700,
                offset_top: 300,
                offset_right: 900,
                offset_bottom: 350,
                output_width: 130,
                output_height: 100,
                output_path_rule: OutputPathRule::ReplaceExtension,
                output_format: OutputFormat::Bmp,
                bounds: BoundsPolicy::Pad,
                filter: ResizeFilter::Bicubic,
                luma: LumaWeights::Bt601,
            },
            Preset::SingleShot => CropParams {
                crop_size: 1500,
                offset_left: 0,
                offset_top: 0,
                offset_right: 0,
                offset_bottom: 0,
                output_width: 120,
                output_height: 100,
                output_path_rule: OutputPathRule::Fixed {
                    path: PathBuf::from("cropped_image.bmp"),
                },
                output_format: OutputFormat::Bmp,
                bounds: BoundsPolicy::Pad,
                filter: ResizeFilter::Bicubic,
                luma: LumaWeights::Bt601,
            },
        }
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Preset::FolderSweep => write!(f, "FolderSweep"),
            Preset::SingleShot => write!(f, "SingleShot"),
        }
    }
}

/// Load `CropParams` from a JSON file. Missing fields take the default preset's values.
pub fn load_params(path: &Path) -> Result<CropParams> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}
