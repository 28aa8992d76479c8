pub mod indexed_png;
pub mod preprocess;

pub use indexed_png::{encode_indexed_png, encode_rgb_png};
pub use preprocess::{decode, prepare, PrepareOptions, PreparedImage};
