//! Shared types and enums used across masscrop.
//! Includes the crop-window `BoundsPolicy`, resampling `ResizeFilter`,
//! `LumaWeights`, `OutputFormat`, `OutputPathRule`, and the remover selection
//! (`RemoverKind`, `Polarity`).
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// What to do with a crop rectangle that reaches outside the source image.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BoundsPolicy {
    /// Keep the full rectangle; pixels outside the image are zero.
    Pad,
    /// Shrink the rectangle to its intersection with the image.
    Clamp,
    /// Reject any rectangle not fully inside the image.
    Fail,
}

impl std::fmt::Display for BoundsPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BoundsPolicy::Pad => "Pad",
            BoundsPolicy::Clamp => "Clamp",
            BoundsPolicy::Fail => "Fail",
        };
        write!(f, "{}", s)
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResizeFilter {
    Nearest,
    Bilinear,
    /// Catmull-Rom cubic convolution
    Bicubic,
    Lanczos3,
}

impl std::fmt::Display for ResizeFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResizeFilter::Nearest => write!(f, "Nearest"),
            ResizeFilter::Bilinear => write!(f, "Bilinear"),
            ResizeFilter::Bicubic => write!(f, "Bicubic"),
            ResizeFilter::Lanczos3 => write!(f, "Lanczos3"),
        }
    }
}

/// RGB to luminance weights used by the grayscale step.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LumaWeights {
    /// ITU-R BT.601: 0.299 R + 0.587 G + 0.114 B
    Bt601,
    /// ITU-R BT.709: 0.2126 R + 0.7152 G + 0.0722 B
    Rec709,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    Bmp,
    Png,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Bmp => "bmp",
            OutputFormat::Png => "png",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension().to_uppercase())
    }
}

/// How the output file name is derived from the input.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "kebab-case")]
pub enum OutputPathRule {
    /// Input path with the extension swapped for the output format's.
    ReplaceExtension,
    /// Always the same file; repeated runs overwrite it.
    Fixed { path: PathBuf },
}

impl OutputPathRule {
    /// Resolve the output path for `input`. A given `output_dir` replaces the
    /// input's directory (and anchors a relative fixed path).
    pub fn resolve(&self, input: &Path, output_dir: Option<&Path>, format: OutputFormat) -> PathBuf {
        match self {
            OutputPathRule::ReplaceExtension => {
                let renamed = input.with_extension(format.extension());
                match (output_dir, renamed.file_name()) {
                    (Some(dir), Some(name)) => dir.join(name),
                    _ => renamed,
                }
            }
            OutputPathRule::Fixed { path } => match output_dir {
                Some(dir) if path.is_relative() => dir.join(path),
                _ => path.clone(),
            },
        }
    }
}

impl std::fmt::Display for OutputPathRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputPathRule::ReplaceExtension => write!(f, "ReplaceExtension"),
            OutputPathRule::Fixed { path } => write!(f, "Fixed({})", path.display()),
        }
    }
}

/// Which side of the Otsu threshold counts as background.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Polarity {
    /// Subject is darker than its backdrop.
    LightBackground,
    /// Subject is brighter than its backdrop.
    DarkBackground,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RemoverKind {
    Otsu,
    /// Input is already matted; keep every pixel.
    Passthrough,
}

impl std::fmt::Display for RemoverKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RemoverKind::Otsu => write!(f, "otsu"),
            RemoverKind::Passthrough => write!(f, "passthrough"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_extension_keeps_directory_without_output_dir() {
        let rule = OutputPathRule::ReplaceExtension;
        let out = rule.resolve(Path::new("shots/1-1.jpg"), None, OutputFormat::Bmp);
        assert_eq!(out, PathBuf::from("shots/1-1.bmp"));
    }

    #[test]
    fn replace_extension_moves_into_output_dir() {
        let rule = OutputPathRule::ReplaceExtension;
        let out = rule.resolve(Path::new("shots/3-4.jpg"), Some(Path::new("out")), OutputFormat::Png);
        assert_eq!(out, PathBuf::from("out/3-4.png"));
    }

    #[test]
    fn fixed_rule_ignores_input_name() {
        let rule = OutputPathRule::Fixed {
            path: PathBuf::from("cropped_image.bmp"),
        };
        assert_eq!(
            rule.resolve(Path::new("one v6.JPG"), None, OutputFormat::Bmp),
            PathBuf::from("cropped_image.bmp")
        );
        assert_eq!(
            rule.resolve(Path::new("a/b.jpg"), Some(Path::new("out")), OutputFormat::Bmp),
            PathBuf::from("out/cropped_image.bmp")
        );
    }

    #[test]
    fn output_path_rule_json_shape() {
        let rule = OutputPathRule::Fixed {
            path: PathBuf::from("x.bmp"),
        };
        let json = serde_json::to_string(&rule).unwrap();
        assert_eq!(json, r#"{"rule":"fixed","path":"x.bmp"}"#);
        let back: OutputPathRule = serde_json::from_str(r#"{"rule":"replace-extension"}"#).unwrap();
        assert_eq!(back, OutputPathRule::ReplaceExtension);
    }
}
