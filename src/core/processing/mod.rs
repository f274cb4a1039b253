pub mod centroid;
pub mod crop;
pub mod grayscale;
pub mod padding;
pub mod pipeline;
pub mod resize;
pub mod save;
