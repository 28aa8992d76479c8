//! Pipeline output types.

mod index_map;
mod quantized_image;

pub use index_map::IndexMap;
pub use quantized_image::QuantizedImage;
