//! High-level, ergonomic library API: process one image to a file or an
//! in-memory buffer, enumerate batch inputs, and run batches with a report.
//! Prefer these entrypoints over the low-level processing modules.
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use image::DynamicImage;
use tracing::{info, warn};

use crate::core::params::CropParams;
use crate::core::processing::pipeline::{ProcessedCrop, crop_to_subject};
use crate::core::processing::save::save_processed_image;
use crate::error::{Error, Result};
use crate::io::{is_supported_image, open_image};
use crate::segment::BackgroundRemover;

/// One image to process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputDescriptor {
    pub path: PathBuf,
}

impl InputDescriptor {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

/// A processed crop together with where it was written.
#[derive(Debug, Clone)]
pub struct WrittenCrop {
    pub input: PathBuf,
    pub output: PathBuf,
    pub crop: ProcessedCrop,
}

/// One successful batch item; the full crop buffer is not kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchEntry {
    pub input: PathBuf,
    pub output: PathBuf,
    pub crop_width: u32,
    pub crop_height: u32,
}

/// Batch processing report
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub processed: usize,
    pub errors: usize,
    pub entries: Vec<BatchEntry>,
    /// Input path and error message of every failed image
    pub failures: Vec<(PathBuf, String)>,
}

/// `dir/{o}-{i}.{extension}` for `o` in `1..=outer`, `i` in `1..=inner`, outer-major.
pub fn grid_inputs(dir: &Path, outer: u32, inner: u32, extension: &str) -> Vec<InputDescriptor> {
    (1..=outer)
        .flat_map(|o| (1..=inner).map(move |i| (o, i)))
        .map(|(o, i)| InputDescriptor::new(dir.join(format!("{}-{}.{}", o, i, extension))))
        .collect()
}

/// Image files directly inside `input_dir`, sorted by path.
pub fn iterate_images(input_dir: &Path) -> Result<Vec<InputDescriptor>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(input_dir)? {
        let path = entry?.path();
        if path.is_file() && is_supported_image(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files.into_iter().map(InputDescriptor::new).collect())
}

/// Run the crop pipeline on an already decoded image.
pub fn process_image_to_buffer(
    image: &DynamicImage,
    params: &CropParams,
    remover: &dyn BackgroundRemover,
) -> Result<ProcessedCrop> {
    crop_to_subject(image, params, remover)
}

/// Process `input` and write to an explicit `output` path.
pub fn process_image_to_file(
    input: &Path,
    output: &Path,
    params: &CropParams,
    remover: &dyn BackgroundRemover,
) -> Result<WrittenCrop> {
    if input == output {
        return Err(Error::InvalidArgument {
            arg: "output",
            value: format!("{} is the input file", output.display()),
        });
    }
    let image = open_image(input)?;
    let crop = crop_to_subject(&image, params, remover)?;
    drop(image);

    save_processed_image(&crop.image, output, params.output_format)?;
    Ok(WrittenCrop {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        crop,
    })
}

/// Process `input` and write where `params.output_path_rule` says,
/// relative to `output_dir` when one is given.
pub fn process_image_to_path(
    input: &Path,
    params: &CropParams,
    remover: &dyn BackgroundRemover,
    output_dir: Option<&Path>,
) -> Result<WrittenCrop> {
    let output = params
        .output_path_rule
        .resolve(input, output_dir, params.output_format);
    process_image_to_file(input, &output, params, remover)
}

/// Resolve every output path of a batch up front. A batch may neither
/// overwrite one of its inputs nor write the same output twice.
pub fn plan_outputs(
    inputs: &[InputDescriptor],
    params: &CropParams,
    output_dir: Option<&Path>,
) -> Result<Vec<PathBuf>> {
    let input_paths: HashSet<&Path> = inputs.iter().map(|d| d.path.as_path()).collect();
    let mut seen = HashSet::with_capacity(inputs.len());
    let mut outputs = Vec::with_capacity(inputs.len());

    for input in inputs {
        let output = params
            .output_path_rule
            .resolve(&input.path, output_dir, params.output_format);
        if input_paths.contains(output.as_path()) {
            return Err(Error::InvalidArgument {
                arg: "output",
                value: format!("{} would overwrite an input", output.display()),
            });
        }
        if !seen.insert(output.clone()) {
            return Err(Error::InvalidArgument {
                arg: "output",
                value: format!(
                    "{} would be written more than once (from {})",
                    output.display(),
                    input.path.display()
                ),
            });
        }
        outputs.push(output);
    }
    Ok(outputs)
}

/// Process `inputs` in order. With `continue_on_error` false the first failure
/// is returned; otherwise failures are recorded in the report. Output
/// collisions are rejected before any image is touched.
pub fn process_batch(
    inputs: &[InputDescriptor],
    params: &CropParams,
    remover: &dyn BackgroundRemover,
    output_dir: Option<&Path>,
    continue_on_error: bool,
) -> Result<BatchReport> {
    params.validate()?;
    let outputs = plan_outputs(inputs, params, output_dir)?;
    if let Some(dir) = output_dir {
        std::fs::create_dir_all(dir)?;
    }

    let mut report = BatchReport::default();
    for (input, output) in inputs.iter().zip(&outputs) {
        info!("Processing: {:?} -> {:?}", input.path, output);
        match process_image_to_file(&input.path, output, params, remover) {
            Ok(written) => {
                report.processed += 1;
                report.entries.push(BatchEntry {
                    input: written.input,
                    output: written.output,
                    crop_width: written.crop.crop_width,
                    crop_height: written.crop.crop_height,
                });
            }
            Err(e) => {
                report.errors += 1;
                if !continue_on_error {
                    return Err(e);
                }
                warn!("Error processing {:?}: {}", input.path, e);
                report.failures.push((input.path.clone(), e.to_string()));
            }
        }
    }

    info!(
        "Batch complete: processed={} errors={}",
        report.processed, report.errors
    );
    Ok(report)
}

/// Process every image file in `input_dir` into `output_dir`.
pub fn process_directory_to_path(
    input_dir: &Path,
    output_dir: &Path,
    params: &CropParams,
    remover: &dyn BackgroundRemover,
    continue_on_error: bool,
) -> Result<BatchReport> {
    let inputs = iterate_images(input_dir)?;
    if inputs.is_empty() {
        warn!("No image files found in {:?}", input_dir);
    }
    process_batch(&inputs, params, remover, Some(output_dir), continue_on_error)
}
