use serde::Serialize;
use tera::{Context, Tera};

use crate::assets::{AssetLoader, DASHBOARD_TEMPLATE};

/// Error type for template rendering
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("Template error: {0}")]
    Tera(#[from] tera::Error),

    #[error("Failed to read template: {0}")]
    Io(#[from] std::io::Error),
}

/// Renders the HTML pages with Tera
///
/// Templates are compiled once at startup from the embedded assets.
pub struct TemplateService {
    tera: Tera,
}

impl TemplateService {
    pub fn new(loader: &AssetLoader) -> Result<Self, TemplateError> {
        let mut tera = Tera::default();
        tera.add_raw_template(DASHBOARD_TEMPLATE, &loader.dashboard_template()?)?;
        Self::register_filters(&mut tera);

        tracing::info!(
            templates = tera.get_template_names().count(),
            "Template service initialized"
        );
        Ok(Self { tera })
    }

    /// Register custom Tera filters
    fn register_filters(tera: &mut Tera) {
        // format_time filter: unix seconds to a UTC string
        tera.register_filter(
            "format_time",
            |value: &tera::Value, args: &std::collections::HashMap<String, tera::Value>| {
                let ts = tera::try_get_value!("format_time", "value", i64, value);
                let fmt = args
                    .get("format")
                    .and_then(|v| v.as_str())
                    .unwrap_or("%Y-%m-%d %H:%M");

                use chrono::{TimeZone, Utc};
                if let Some(dt) = Utc.timestamp_opt(ts, 0).single() {
                    Ok(tera::Value::String(dt.format(fmt).to_string()))
                } else {
                    Ok(tera::Value::String("--".to_string()))
                }
            },
        );
    }

    /// Render a template with the given data
    pub fn render<T: Serialize>(&self, template: &str, data: &T) -> Result<String, TemplateError> {
        let context = Context::from_serialize(data)?;
        Ok(self.tera.render(template, &context)?)
    }
}
