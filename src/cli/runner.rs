use std::path::{Path, PathBuf};

use tracing::info;
use tracing_subscriber::EnvFilter;

use masscrop::segment::{BackgroundRemover, build_remover};
use masscrop::{
    CropParams, InputDescriptor, grid_inputs, iterate_images, load_params, process_batch,
    process_image_to_file, process_image_to_path,
};

use super::args::CliArgs;
use super::errors::AppError;

/// Parse "OUTERxINNER" (e.g. "6x5").
pub fn parse_grid(grid: &str) -> Result<(u32, u32), AppError> {
    let invalid = || AppError::InvalidGrid {
        grid: grid.to_string(),
    };
    let (outer, inner) = grid
        .split_once(|c| c == 'x' || c == 'X')
        .ok_or_else(invalid)?;
    let outer: u32 = outer.trim().parse().map_err(|_| invalid())?;
    let inner: u32 = inner.trim().parse().map_err(|_| invalid())?;
    if outer == 0 || inner == 0 {
        return Err(invalid());
    }
    Ok((outer, inner))
}

/// `--output` names one file, so it cannot combine with the batch modes.
pub fn check_output_mode(args: &CliArgs) -> Result<(), AppError> {
    if args.output.is_none() {
        return Ok(());
    }
    if args.grid.is_some() {
        return Err(AppError::OutputInBatchMode { mode: "--grid" });
    }
    if args.input_dir.is_some() {
        return Err(AppError::OutputInBatchMode { mode: "--input-dir" });
    }
    Ok(())
}

/// Preset or config file, then individual flag overrides.
pub fn resolve_params(args: &CliArgs) -> masscrop::Result<CropParams> {
    let mut params = match &args.config {
        Some(path) => load_params(path)?,
        None => args.preset.params(),
    };

    if let Some(v) = args.crop_size {
        params.crop_size = v;
    }
    if let Some(v) = args.offset_left {
        params.offset_left = v;
    }
    if let Some(v) = args.offset_top {
        params.offset_top = v;
    }
    if let Some(v) = args.offset_right {
        params.offset_right = v;
    }
    if let Some(v) = args.offset_bottom {
        params.offset_bottom = v;
    }
    if let Some(v) = args.width {
        params.output_width = v;
    }
    if let Some(v) = args.height {
        params.output_height = v;
    }
    if let Some(v) = args.bounds {
        params.bounds = v;
    }
    if let Some(v) = args.filter {
        params.filter = v;
    }
    if let Some(v) = args.luma {
        params.luma = v;
    }
    if let Some(v) = args.format {
        params.output_format = v;
    }

    params.validate()?;
    Ok(params)
}

fn run_batch(
    inputs: &[InputDescriptor],
    params: &CropParams,
    remover: &dyn BackgroundRemover,
    output_dir: Option<&Path>,
    continue_on_error: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let report = process_batch(inputs, params, remover, output_dir, continue_on_error)?;

    for entry in &report.entries {
        println!(
            "{} -> {} ({}, {})",
            entry.input.display(),
            entry.output.display(),
            entry.crop_width,
            entry.crop_height
        );
    }
    for (input, message) in &report.failures {
        eprintln!("{}: {}", input.display(), message);
    }

    info!("Processed: {}", report.processed);
    info!("Errors: {}", report.errors);

    if report.errors > 0 {
        return Err(AppError::BatchFailures {
            failed: report.errors,
            total: inputs.len(),
        }
        .into());
    }
    Ok(())
}

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.log {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .init();
    }

    check_output_mode(&args)?;
    let params = resolve_params(&args)?;
    let remover = build_remover(args.remover, args.polarity);
    info!(
        "Using remover '{}', crop_size={}, output {}x{}, bounds={}",
        remover.name(),
        params.crop_size,
        params.output_width,
        params.output_height,
        params.bounds
    );

    let output_dir = args.output_dir.as_deref();

    if let Some(grid) = &args.grid {
        let (outer, inner) = parse_grid(grid)?;
        let dir = args.input_dir.clone().unwrap_or_else(|| PathBuf::from("."));
        let inputs = grid_inputs(&dir, outer, inner, &args.grid_ext);
        info!("Starting grid batch {}x{} in {:?}", outer, inner, dir);
        return run_batch(&inputs, &params, remover.as_ref(), output_dir, args.batch);
    }

    if let Some(dir) = &args.input_dir {
        let inputs = iterate_images(dir)?;
        info!("Starting batch processing from directory: {:?}", dir);
        return run_batch(&inputs, &params, remover.as_ref(), output_dir, args.batch);
    }

    let input = args.input.ok_or(AppError::MissingArgument {
        arg: "--input, --input-dir or --grid".to_string(),
    })?;

    let written = match &args.output {
        Some(output) => process_image_to_file(&input, output, &params, remover.as_ref())?,
        None => {
            if let Some(dir) = output_dir {
                std::fs::create_dir_all(dir)?;
            }
            process_image_to_path(&input, &params, remover.as_ref(), output_dir)?
        }
    };

    println!("({}, {})", written.crop.crop_width, written.crop.crop_height);
    info!("Successfully processed: {:?} -> {:?}", input, written.output);
    Ok(())
}
