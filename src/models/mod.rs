pub mod config;

pub use config::{
    AppConfig, ColorEntry, DisplayConfig, DitherConfig, GalleryConfig, InitialParams,
    OptimizerConfig, PaletteConfig, Strategy,
};
