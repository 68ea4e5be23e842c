use eframe::egui::{Align, Direction, Layout, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::{contrasting_text, diverging};
use crate::data::summary::CorrelationMatrix;

const CELL_WIDTH: f32 = 86.0;
const ROW_HEIGHT: f32 = 28.0;

/// Cell text: two decimals, or `n/a` where the correlation is undefined.
pub fn cell_text(value: f64) -> String {
    if value.is_nan() {
        "n/a".to_string()
    } else {
        format!("{value:.2}")
    }
}

/// Correlation matrix as a coloured grid with the coefficient printed in
/// every cell.
pub fn correlation_heatmap(ui: &mut Ui, matrix: &CorrelationMatrix) {
    let labels = matrix.labels();

    TableBuilder::new(ui)
        .id_salt("correlation_heatmap")
        .vscroll(false)
        .cell_layout(Layout::centered_and_justified(Direction::LeftToRight))
        .column(Column::exact(CELL_WIDTH))
        .columns(Column::exact(CELL_WIDTH), labels.len())
        .header(ROW_HEIGHT, |mut header| {
            header.col(|_ui| {});
            for label in labels {
                header.col(|ui| {
                    ui.strong(*label);
                });
            }
        })
        .body(|mut body| {
            for (i, row_label) in labels.iter().enumerate() {
                body.row(ROW_HEIGHT, |mut row| {
                    row.col(|ui| {
                        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                            ui.strong(*row_label);
                        });
                    });
                    for j in 0..labels.len() {
                        let value = matrix.get(i, j);
                        let fill = diverging(value);
                        row.col(|ui| {
                            ui.painter().rect_filled(ui.max_rect(), 0.0, fill);
                            ui.label(RichText::new(cell_text(value)).color(contrasting_text(fill)));
                        })
                        .1
                        .on_hover_text(format!("{row_label} × {}: {}", labels[j], cell_text(value)));
                    }
                });
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undefined_correlations_read_as_na() {
        assert_eq!(cell_text(f64::NAN), "n/a");
        assert_eq!(cell_text(1.0), "1.00");
        assert_eq!(cell_text(-0.456), "-0.46");
    }
}
