//! Built-in palettes.

use crate::color::Lab;

use super::error::PaletteError;
use super::palette::Palette;

/// A named built-in palette.
#[derive(Debug, Clone, Copy)]
pub struct Preset {
    pub name: &'static str,
    pub description: &'static str,
    pub entries: &'static [Lab],
}

/// Seven-color ACeP panel, nominal ink colors in CIELAB.
const INKY_IMPRESSION_7: &[Lab] = &[
    Lab::new(0.0, 0.0, 0.0),      // black
    Lab::new(100.0, 0.0, 0.0),    // white
    Lab::new(25.0, -100.0, 0.0),  // green
    Lab::new(25.0, 50.0, -86.0),  // blue
    Lab::new(50.0, 81.0, 59.0),   // red
    Lab::new(100.0, 0.0, 100.0),  // yellow
    Lab::new(75.0, 50.0, 86.0),   // orange
];

const BLACK_WHITE: &[Lab] = &[Lab::new(0.0, 0.0, 0.0), Lab::new(100.0, 0.0, 0.0)];

/// Every built-in palette, default first.
pub const PRESETS: &[Preset] = &[
    Preset {
        name: "inky-impression-7",
        description: "7-color ACeP e-paper (black, white, green, blue, red, yellow, orange)",
        entries: INKY_IMPRESSION_7,
    },
    Preset {
        name: "black-white",
        description: "Monochrome e-paper",
        entries: BLACK_WHITE,
    },
];

/// Name of the palette used when none is configured.
pub const DEFAULT_PRESET: &str = "inky-impression-7";

impl Palette {
    /// Look up a built-in palette by name.
    ///
    /// # Example
    ///
    /// ```
    /// use lab_dither::Palette;
    ///
    /// assert_eq!(Palette::preset("inky-impression-7").unwrap().len(), 7);
    /// assert!(Palette::preset("nope").is_err());
    /// ```
    pub fn preset(name: &str) -> Result<Palette, PaletteError> {
        PRESETS
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| PaletteError::UnknownPreset(name.to_string()))
            .and_then(|p| Palette::new(p.entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_presets_build() {
        for preset in PRESETS {
            let palette = Palette::preset(preset.name).unwrap();
            assert_eq!(palette.len(), preset.entries.len());
        }
    }

    #[test]
    fn test_default_preset_exists() {
        assert_eq!(PRESETS[0].name, DEFAULT_PRESET);
        let palette = Palette::preset(DEFAULT_PRESET).unwrap();
        assert_eq!(palette.entry(4), Some(Lab::new(50.0, 81.0, 59.0)));
    }

    #[test]
    fn test_unknown_preset() {
        assert_eq!(
            Palette::preset("cga"),
            Err(PaletteError::UnknownPreset("cga".into()))
        );
    }
}
