//! I/O layer: decoding input photographs (`reader`) and encoding the final
//! gray crops (`writers`).
pub mod reader;
pub use reader::{is_supported_image, open_image};

pub mod writers;
