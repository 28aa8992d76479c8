//! Inkpress
//!
//! Photo quantization and dashboard server for low-color e-paper displays.
//! The quantization core lives in the `lab-dither` crate; this crate adds
//! image decoding, persistence, display output and the HTTP dashboard.
//! This library exposes modules for integration testing.

pub mod api;
pub mod assets;
pub mod error;
pub mod models;
pub mod rendering;
pub mod server;
pub mod services;
