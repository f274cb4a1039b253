//! Core processing building blocks: grayscale conversion, centroid location,
//! crop-window derivation and extraction, resizing, and the per-image pipeline.
//! These are internal primitives consumed by the high-level `api` module.
pub mod params;
pub mod processing;
