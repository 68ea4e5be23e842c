use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

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
            to_color32(rgb)
        })
        .collect()
}

fn to_color32(rgb: Srgb) -> Color32 {
    Color32::from_rgb(
        (rgb.red.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.green.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.blue.clamp(0.0, 1.0) * 255.0) as u8,
    )
}

// ---------------------------------------------------------------------------
// Color mapping: chart label → Color32
// ---------------------------------------------------------------------------

/// Maps the labels of a chart (regions, categories, products) to distinct
/// colours so the same label keeps its colour across redraws.
#[derive(Debug, Clone)]
pub struct ColorMap<K: Ord> {
    mapping: BTreeMap<K, Color32>,
    default_color: Color32,
}

impl<K: Ord + Clone> ColorMap<K> {
    /// Build a colour map over the given labels.
    pub fn new<'a, I>(labels: I) -> Self
    where
        I: IntoIterator<Item = &'a K>,
        K: 'a,
    {
        let labels: Vec<&K> = labels.into_iter().collect();
        let palette = generate_palette(labels.len());
        let mapping = labels
            .into_iter()
            .zip(palette)
            .map(|(k, c)| (k.clone(), c))
            .collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a label.
    pub fn color_for(&self, label: &K) -> Color32 {
        self.mapping
            .get(label)
            .copied()
            .unwrap_or(self.default_color)
    }
}

// ---------------------------------------------------------------------------
// Diverging scale for the correlation heatmap
// ---------------------------------------------------------------------------

const NEGATIVE: (f32, f32, f32) = (0.70, 0.09, 0.17);
const NEUTRAL: (f32, f32, f32) = (0.97, 0.97, 0.97);
const POSITIVE: (f32, f32, f32) = (0.13, 0.40, 0.67);

/// Red → white → blue for values in `[-1, 1]`.  `NaN` maps to grey.
pub fn diverging(value: f64) -> Color32 {
    if value.is_nan() {
        return Color32::DARK_GRAY;
    }
    let t = value.clamp(-1.0, 1.0) as f32;
    let lin = |(r, g, b): (f32, f32, f32)| -> LinSrgb { Srgb::new(r, g, b).into_linear() };
    let mixed = if t < 0.0 {
        lin(NEUTRAL).mix(lin(NEGATIVE), -t)
    } else {
        lin(NEUTRAL).mix(lin(POSITIVE), t)
    };
    to_color32(Srgb::from_linear(mixed))
}

/// Black or white, whichever reads better on `background`.
pub fn contrasting_text(background: Color32) -> Color32 {
    let [r, g, b, _] = background.to_array();
    let luma = 0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32;
    if luma > 140.0 {
        Color32::BLACK
    } else {
        Color32::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Region;

    #[test]
    fn palette_has_requested_size() {
        assert!(generate_palette(0).is_empty());
        let p = generate_palette(4);
        assert_eq!(p.len(), 4);
        assert_ne!(p[0], p[1]);
    }

    #[test]
    fn labels_keep_their_colour() {
        let map = ColorMap::new(&Region::ALL);
        let east = map.color_for(&Region::East);
        assert_eq!(ColorMap::new(&Region::ALL).color_for(&Region::East), east);
        assert_ne!(map.color_for(&Region::West), east);

        let partial = ColorMap::new(&[Region::East]);
        assert_eq!(partial.color_for(&Region::North), Color32::GRAY);
    }

    #[test]
    fn diverging_scale_endpoints() {
        assert_eq!(diverging(f64::NAN), Color32::DARK_GRAY);
        let neg = diverging(-1.0);
        let pos = diverging(1.0);
        assert!(neg.r() > neg.b());
        assert!(pos.b() > pos.r());
        let mid = diverging(0.0);
        assert!(mid.r() > 240 && mid.g() > 240 && mid.b() > 240);
        assert_eq!(contrasting_text(mid), Color32::BLACK);
    }
}
