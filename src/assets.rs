//! Asset loading with embedded fallbacks
//!
//! The default `config.yaml` and the dashboard template are compiled into the
//! binary. An external config file (from `CONFIG_FILE`) takes precedence when
//! it exists.

use rust_embed::RustEmbed;
use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::PathBuf;

/// Embedded default config
#[derive(RustEmbed)]
#[folder = "."]
#[include = "config.yaml"]
struct EmbeddedConfig;

/// Embedded HTML templates
#[derive(RustEmbed)]
#[folder = "templates/"]
#[include = "*.html"]
struct EmbeddedTemplates;

pub const DASHBOARD_TEMPLATE: &str = "dashboard.html";

/// Asset loader with optional filesystem override for the config file
#[derive(Debug, Clone, Default)]
pub struct AssetLoader {
    /// External config file path (from CONFIG_FILE env var)
    config_file: Option<PathBuf>,
}

impl AssetLoader {
    /// Create a new asset loader
    ///
    /// `config_file` should be `Some` only if the env var was set.
    pub fn new(config_file: Option<PathBuf>) -> Self {
        Self { config_file }
    }

    /// Read the config file
    ///
    /// Tries the external file first if configured, then falls back to embedded.
    pub fn read_config(&self) -> io::Result<Cow<'static, [u8]>> {
        if let Some(ref path) = self.config_file {
            if path.exists() {
                tracing::trace!(path = %path.display(), "Loading config from filesystem");
                return Ok(Cow::Owned(fs::read(path)?));
            }
            tracing::warn!(path = %path.display(), "Config file not found, using embedded");
        }

        EmbeddedConfig::get("config.yaml")
            .map(|f| f.data)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "Embedded config not found"))
    }

    /// Read the config as a UTF-8 string
    pub fn read_config_string(&self) -> io::Result<String> {
        let bytes = self.read_config()?;
        String::from_utf8(bytes.into_owned())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Read an embedded template as a UTF-8 string
    pub fn read_template(&self, name: &str) -> io::Result<String> {
        let file = EmbeddedTemplates::get(name).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("Template not found: {name}"),
            )
        })?;
        String::from_utf8(file.data.into_owned())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// The dashboard page template
    pub fn dashboard_template(&self) -> io::Result<String> {
        self.read_template(DASHBOARD_TEMPLATE)
    }
}
