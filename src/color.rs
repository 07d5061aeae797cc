use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: country → Color32
// ---------------------------------------------------------------------------

/// Maps each country to a distinct colour, shared by the sidebar swatches
/// and the correlation scatter.
#[derive(Debug, Clone)]
pub struct CountryColors {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl CountryColors {
    /// Build the colour map from the dataset's unique country names.
    pub fn new(countries: &BTreeSet<String>) -> Self {
        let palette = generate_palette(countries.len());
        let mapping: BTreeMap<String, Color32> =
            countries.iter().cloned().zip(palette).collect();

        CountryColors {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a given country.
    pub fn color_for(&self, country: &str) -> Color32 {
        self.mapping
            .get(country)
            .copied()
            .unwrap_or(self.default_color)
    }
}
