//! Command Line Interface (CLI) layer for masscrop.
//!
//! This module defines argument parsing (`args`), error types (`errors`),
//! and the orchestration logic (`runner`) for single-image, grid and
//! directory batches. It wires user-provided options to `masscrop::api`.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
