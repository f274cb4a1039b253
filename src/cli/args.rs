use clap::Parser;
use std::path::PathBuf;

use masscrop::{
    BoundsPolicy, LumaWeights, OutputFormat, Polarity, Preset, RemoverKind, ResizeFilter,
};

#[derive(Parser, Debug)]
#[command(name = "masscrop", version, about = "Crop photographs around their subject's centre of mass")]
pub struct CliArgs {
    /// Input image (single file mode)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output file (single file mode only); overrides the preset's naming rule.
    /// Rejected together with --grid or --input-dir
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Directory holding the inputs. Without --grid every image file in it is processed
    #[arg(long)]
    pub input_dir: Option<PathBuf>,

    /// Directory for outputs (created if missing)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Process "{outer}-{inner}.{ext}" for a grid such as 6x5
    #[arg(long)]
    pub grid: Option<String>,

    /// Extension of grid inputs
    #[arg(long, default_value = "jpg")]
    pub grid_ext: String,

    /// Named parameter set
    #[arg(long, value_enum, default_value_t = Preset::FolderSweep)]
    pub preset: Preset,

    /// JSON file with crop parameters; replaces the preset
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Side of the square crop window around the centroid
    #[arg(long)]
    pub crop_size: Option<u32>,

    #[arg(long, allow_hyphen_values = true)]
    pub offset_left: Option<i64>,

    #[arg(long, allow_hyphen_values = true)]
    pub offset_top: Option<i64>,

    #[arg(long, allow_hyphen_values = true)]
    pub offset_right: Option<i64>,

    #[arg(long, allow_hyphen_values = true)]
    pub offset_bottom: Option<i64>,

    /// Output width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Output height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Handling of crop windows that leave the image (pad, clamp, fail)
    #[arg(long, value_enum)]
    pub bounds: Option<BoundsPolicy>,

    /// Resampling filter for the final resize
    #[arg(long, value_enum)]
    pub filter: Option<ResizeFilter>,

    /// Grayscale weights
    #[arg(long, value_enum)]
    pub luma: Option<LumaWeights>,

    /// Output format (bmp or png)
    #[arg(short = 'f', long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Background remover
    #[arg(long, value_enum, default_value_t = RemoverKind::Otsu)]
    pub remover: RemoverKind,

    /// Which side of the threshold is background (otsu remover)
    #[arg(long, value_enum, default_value_t = Polarity::LightBackground)]
    pub polarity: Polarity,

    /// Enable logging
    #[arg(long, default_value_t = false)]
    pub log: bool,

    /// Batch mode: continue with the remaining images when one fails
    #[arg(long, default_value_t = false)]
    pub batch: bool,
}
