use thiserror::Error;

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid grid: {grid}. Expected OUTERxINNER with positive integers, e.g. 6x5")]
    InvalidGrid { grid: String },

    #[error("Missing required argument: {arg}")]
    MissingArgument { arg: String },

    #[error("--output applies to a single --input only; use --output-dir with {mode}")]
    OutputInBatchMode { mode: &'static str },

    #[error("{failed} of {total} images failed")]
    BatchFailures { failed: usize, total: usize },
}
