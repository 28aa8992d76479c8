use crate::assets::AssetLoader;
use lab_dither::palette::DEFAULT_PRESET;
use lab_dither::{
    AdjustmentParams, Lab, LinearRgb, Palette, PaletteError, Quantizer, SearchStrategy, Srgb,
    DEFAULT_STRENGTH,
};
use serde::Deserialize;
use std::path::PathBuf;

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    /// Target panel geometry
    #[serde(default)]
    pub display: DisplayConfig,

    /// Palette the photos are reduced to
    #[serde(default)]
    pub palette: PaletteConfig,

    #[serde(default)]
    pub dither: DitherConfig,

    /// Adjustment parameter search
    #[serde(default)]
    pub optimizer: OptimizerConfig,

    /// Where converted images are stored
    #[serde(default)]
    pub gallery: GalleryConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DisplayConfig {
    #[serde(default = "default_width")]
    pub width: u32,

    #[serde(default = "default_height")]
    pub height: u32,

    /// Rotate portrait sources to landscape before cropping
    #[serde(default = "default_true")]
    pub rotate_portrait: bool,
}

fn default_width() -> u32 {
    640
}

fn default_height() -> u32 {
    400
}

fn default_true() -> bool {
    true
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            rotate_portrait: true,
        }
    }
}

/// Palette selection: explicit colors win over the preset name
#[derive(Debug, Deserialize, Clone)]
pub struct PaletteConfig {
    #[serde(default = "default_preset")]
    pub preset: String,

    #[serde(default)]
    pub colors: Vec<ColorEntry>,
}

fn default_preset() -> String {
    DEFAULT_PRESET.to_string()
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            preset: default_preset(),
            colors: Vec::new(),
        }
    }
}

/// One palette entry, given either in CIELAB or as an sRGB hex string
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum ColorEntry {
    Lab { lab: [f32; 3] },
    Hex { hex: String },
}

impl ColorEntry {
    pub fn to_lab(&self) -> Result<Lab, PaletteError> {
        match self {
            ColorEntry::Lab { lab: [l, a, b] } => Ok(Lab::new(*l, *a, *b)),
            ColorEntry::Hex { hex } => {
                let srgb: Srgb = hex.parse()?;
                Ok(Lab::from(LinearRgb::from(srgb)))
            }
        }
    }
}

impl PaletteConfig {
    /// Build the configured palette
    pub fn build(&self) -> Result<Palette, PaletteError> {
        if self.colors.is_empty() {
            return Palette::preset(&self.preset);
        }
        let entries = self
            .colors
            .iter()
            .map(ColorEntry::to_lab)
            .collect::<Result<Vec<_>, _>>()?;
        Palette::new(&entries)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DitherConfig {
    /// Activity bias strength; 0 gives plain Floyd-Steinberg
    #[serde(default = "default_strength")]
    pub strength: f32,
}

fn default_strength() -> f32 {
    DEFAULT_STRENGTH
}

impl Default for DitherConfig {
    fn default() -> Self {
        Self {
            strength: default_strength(),
        }
    }
}

/// Search strategy as named in config.yaml and on the command line
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    #[default]
    NelderMead,
    PatternSearch,
}

impl From<Strategy> for SearchStrategy {
    fn from(strategy: Strategy) -> Self {
        match strategy {
            Strategy::NelderMead => SearchStrategy::NelderMead,
            Strategy::PatternSearch => SearchStrategy::PatternSearch,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct OptimizerConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default)]
    pub strategy: Strategy,

    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,

    /// Evaluate the loss on every n-th row and column
    #[serde(default = "default_sample_stride")]
    pub sample_stride: usize,

    /// Starting point (or the fixed parameters when disabled)
    #[serde(default)]
    pub initial: InitialParams,
}

fn default_max_iterations() -> usize {
    400
}

fn default_sample_stride() -> usize {
    1
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            strategy: Strategy::default(),
            max_iterations: default_max_iterations(),
            sample_stride: default_sample_stride(),
            initial: InitialParams::default(),
        }
    }
}

/// Partial adjustment parameters; unset fields keep the built-in start
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq)]
pub struct InitialParams {
    pub saturation: Option<f64>,
    pub vibrance: Option<f64>,
    pub black_point: Option<f64>,
    pub white_point: Option<f64>,
    pub gamma: Option<f64>,
    pub contrast: Option<f64>,
    pub hue_rotation: Option<f64>,
}

impl InitialParams {
    pub fn resolve(&self) -> AdjustmentParams {
        let base = AdjustmentParams::DEFAULT_INITIAL;
        AdjustmentParams {
            saturation: self.saturation.unwrap_or(base.saturation),
            vibrance: self.vibrance.unwrap_or(base.vibrance),
            black_point: self.black_point.unwrap_or(base.black_point),
            white_point: self.white_point.unwrap_or(base.white_point),
            gamma: self.gamma.unwrap_or(base.gamma),
            contrast: self.contrast.unwrap_or(base.contrast),
            hue_rotation: self.hue_rotation.unwrap_or(base.hue_rotation),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct GalleryConfig {
    #[serde(default = "default_gallery_dir")]
    pub dir: PathBuf,
}

fn default_gallery_dir() -> PathBuf {
    PathBuf::from("img")
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            dir: default_gallery_dir(),
        }
    }
}

impl AppConfig {
    /// Load configuration from AssetLoader (embedded or external)
    pub fn load_from_assets(loader: &AssetLoader) -> Self {
        match loader.read_config_string() {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    let config: Self = config;
                    tracing::info!(
                        width = config.display.width,
                        height = config.display.height,
                        preset = %config.palette.preset,
                        colors = config.palette.colors.len(),
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Build a quantizer from the palette, dither and optimizer sections
    pub fn quantizer(&self) -> Result<Quantizer, PaletteError> {
        let palette = self.palette.build()?;
        Ok(Quantizer::new(palette)
            .strength(self.dither.strength)
            .initial_params(self.optimizer.initial.resolve())
            .optimize(self.optimizer.enabled)
            .strategy(self.optimizer.strategy.into())
            .max_iterations(self.optimizer.max_iterations)
            .sample_stride(self.optimizer.sample_stride))
    }
}
