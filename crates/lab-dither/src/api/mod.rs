//! High-level API.

mod builder;
mod error;

pub use builder::{Quantizer, DEFAULT_STRENGTH};
pub use error::QuantizeError;
