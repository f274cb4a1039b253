#![doc = r#"
masscrop: crop photographs around their subject's centre of mass.

Each image is converted to grayscale, passed through a background remover,
and reduced to the intensity-weighted centroid of whatever foreground is left.
A fixed-size window (optionally shifted by per-edge offsets) is cut around
that centroid, resized to a small fixed resolution, and written to disk.

Quick start: one image to a file
--------------------------------
```rust,no_run
use std::path::Path;
use masscrop::{process_image_to_path, OtsuRemover, Preset};

fn main() -> masscrop::Result<()> {
    let params = Preset::SingleShot.params();
    let written = process_image_to_path(
        Path::new("one v6.JPG"),
        &params,
        &OtsuRemover::default(),
        None,
    )?;
    println!("{:?} ({}x{} before resize)", written.output, written.crop.crop_width, written.crop.crop_height);
    Ok(())
}
```

Batches
-------
Inputs are an explicit list of `InputDescriptor`s, so any naming scheme works.
`grid_inputs` reproduces the `{outer}-{inner}.jpg` layout of a photo session.

```rust,no_run
use std::path::Path;
use masscrop::{grid_inputs, process_batch, OtsuRemover, Preset};

fn main() -> masscrop::Result<()> {
    let inputs = grid_inputs(Path::new("."), 6, 5, "jpg");
    let report = process_batch(
        &inputs,
        &Preset::FolderSweep.params(),
        &OtsuRemover::default(),
        None,
        true, // continue_on_error
    )?;
    println!("processed={} errors={}", report.processed, report.errors);
    Ok(())
}
```

Plugging in a segmentation model
--------------------------------
Anything implementing [`BackgroundRemover`] can replace the bundled Otsu
threshold, as long as it returns an image of the same size with background
pixels set to zero.

```rust
use image::GrayImage;
use masscrop::{BackgroundRemover, Result};

struct KeepBright;

impl BackgroundRemover for KeepBright {
    fn name(&self) -> &str {
        "keep-bright"
    }

    fn remove_background(&self, gray: &GrayImage) -> Result<GrayImage> {
        let mut out = gray.clone();
        for p in out.pixels_mut() {
            if p.0[0] < 128 {
                p.0[0] = 0;
            }
        }
        Ok(out)
    }
}
```

Error handling
--------------
All public functions return `masscrop::Result<T>`. `Error::DegenerateMass`
means nothing survived background removal, `Error::Bounds` that the crop window
was rejected under the configured `BoundsPolicy`, and `Error::Model` that the
remover failed or changed the image size.

Useful modules
--------------
- [`api`]: high-level entry points and batch helpers.
- [`segment`]: the `BackgroundRemover` capability and bundled removers.
- [`types`]: enums shared across the crate.
- [`error`]: crate-level `Error` and `Result`.
"#]

// Core modules (public)
pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod segment;
pub mod types;

// Curated public API surface
// Types
pub use core::params::{CropParams, Preset, load_params};
pub use core::processing::centroid::Centroid;
pub use core::processing::crop::CropRect;
pub use core::processing::pipeline::ProcessedCrop;
pub use error::{Error, Result};
pub use types::{
    BoundsPolicy, LumaWeights, OutputFormat, OutputPathRule, Polarity, RemoverKind, ResizeFilter,
};

// Background removal
pub use segment::{BackgroundRemover, OtsuRemover, PassthroughRemover};

// High-level API re-exports
pub use api::{
    BatchEntry, BatchReport, InputDescriptor, WrittenCrop, grid_inputs, iterate_images,
    plan_outputs, process_batch, process_directory_to_path, process_image_to_buffer, process_image_to_file,
    process_image_to_path,
};
