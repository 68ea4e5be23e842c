use std::f32::consts::{FRAC_PI_2, TAU};

use eframe::egui::{vec2, Color32, Pos2, RichText, Sense, Shape, Stroke, Ui};

use crate::color::ColorMap;
use crate::data::model::Region;

/// Inner radius as a share of the outer one.
const HOLE: f32 = 0.3;
/// Max arc covered by one painted quad.
const STEP: f32 = TAU / 180.0;

/// A slice's share of the whole and its start angle, clockwise from 12 o'clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slice {
    pub start: f32,
    pub sweep: f32,
    pub share: f64,
}

/// Split a full turn proportionally to `values`.  Non-positive values get
/// an empty slice.
pub fn slices(values: &[f64]) -> Vec<Slice> {
    let total: f64 = values.iter().filter(|v| **v > 0.0).sum();
    let mut start = 0.0;
    values
        .iter()
        .map(|&v| {
            let share = if total > 0.0 && v > 0.0 { v / total } else { 0.0 };
            let sweep = share as f32 * TAU;
            let slice = Slice { start, sweep, share };
            start += sweep;
            slice
        })
        .collect()
}

fn point(center: Pos2, radius: f32, angle: f32) -> Pos2 {
    let a = angle - FRAC_PI_2;
    center + vec2(a.cos(), a.sin()) * radius
}

/// Revenue share per region as a donut with a legend beside it.
pub fn region_donut(ui: &mut Ui, by_region: &[(Region, f64)], colors: &ColorMap<Region>) {
    let values: Vec<f64> = by_region.iter().map(|(_, v)| *v).collect();
    let parts = slices(&values);

    ui.horizontal(|ui: &mut Ui| {
        let size = ui.available_height().clamp(160.0, 260.0);
        let (response, painter) = ui.allocate_painter(vec2(size, size), Sense::hover());
        let center = response.rect.center();
        let outer = size * 0.48;
        let inner = outer * HOLE;

        for ((region, _), slice) in by_region.iter().zip(&parts) {
            let color = colors.color_for(region);
            let steps = (slice.sweep / STEP).ceil().max(1.0) as usize;
            for k in 0..steps {
                let a0 = slice.start + slice.sweep * k as f32 / steps as f32;
                let a1 = slice.start + slice.sweep * (k + 1) as f32 / steps as f32;
                painter.add(Shape::convex_polygon(
                    vec![
                        point(center, inner, a0),
                        point(center, outer, a0),
                        point(center, outer, a1),
                        point(center, inner, a1),
                    ],
                    color,
                    Stroke::NONE,
                ));
            }
        }

        if let Some(pos) = response.hover_pos() {
            let offset = pos - center;
            let dist = offset.length();
            if dist >= inner && dist <= outer {
                let angle = (offset.y.atan2(offset.x) + FRAC_PI_2).rem_euclid(TAU);
                let hit = by_region
                    .iter()
                    .zip(&parts)
                    .find(|(_, s)| angle >= s.start && angle < s.start + s.sweep);
                if let Some(((region, value), slice)) = hit {
                    response.on_hover_text(format!(
                        "{region}: ${value:.2} ({:.1}%)",
                        slice.share * 100.0
                    ));
                }
            }
        }

        ui.vertical(|ui: &mut Ui| {
            ui.add_space(8.0);
            for ((region, _), slice) in by_region.iter().zip(&parts) {
                ui.horizontal(|ui: &mut Ui| {
                    let (rect, _) = ui.allocate_exact_size(vec2(12.0, 12.0), Sense::hover());
                    ui.painter().rect_filled(rect, 2.0, colors.color_for(region));
                    ui.label(format!("{region}  {:.1}%", slice.share * 100.0));
                });
            }
            if by_region.is_empty() {
                ui.label(RichText::new("No regions").color(Color32::GRAY));
            }
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slices_cover_a_full_turn() {
        let s = slices(&[1.0, 1.0, 2.0]);
        assert_eq!(s.len(), 3);
        assert_eq!(s[0].start, 0.0);
        assert!((s[2].share - 0.5).abs() < 1e-12);
        let end = s[2].start + s[2].sweep;
        assert!((end - TAU).abs() < 1e-5);
    }

    #[test]
    fn zero_total_gives_empty_slices() {
        let s = slices(&[0.0, 0.0]);
        assert!(s.iter().all(|sl| sl.sweep == 0.0 && sl.share == 0.0));
    }
}
