pub mod bmp;
pub mod png;
