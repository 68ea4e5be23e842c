use eframe::egui::{Color32, RichText, ScrollArea, Ui};

use crate::config::{APP_TITLE, TOP_PRODUCTS};
use crate::data::summary::{KeyMetrics, Summary};
use crate::state::AppState;
use crate::ui::{donut, heatmap, plot};

// ---------------------------------------------------------------------------
// Number formatting
// ---------------------------------------------------------------------------

/// `1234567` → `"1,234,567"`.
pub fn with_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `1234` → `"$1,234"`.
pub fn dollars(n: i64) -> String {
    if n < 0 {
        format!("-${}", with_thousands(n).trim_start_matches('-'))
    } else {
        format!("${}", with_thousands(n))
    }
}

// ---------------------------------------------------------------------------
// Central panel
// ---------------------------------------------------------------------------

/// Render metrics and charts for the current selection.
pub fn central_panel(ui: &mut Ui, state: &AppState) {
    ui.heading(APP_TITLE);

    if state.dataset.is_none() {
        // Load failed: nothing is computed until a file loads.
        ui.add_space(24.0);
        ui.centered_and_justified(|ui: &mut Ui| {
            let msg = state
                .status_message
                .as_deref()
                .unwrap_or("Open a sales extract to begin  (File → Open…)");
            ui.label(RichText::new(msg).color(Color32::RED).size(16.0));
        });
        return;
    }

    let Some(summary) = &state.summary else {
        ui.add_space(12.0);
        ui.label(
            RichText::new("No data available for the selected filters.")
                .color(Color32::from_rgb(230, 160, 20))
                .size(16.0),
        );
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            charts(ui, state, summary);
        });
}

fn charts(ui: &mut Ui, state: &AppState, summary: &Summary) {
    key_metrics(ui, &summary.metrics);
    ui.separator();

    ui.heading("Monthly Revenue & Profit Trends");
    plot::monthly_trend(ui, &summary.monthly);
    ui.add_space(12.0);

    ui.columns(2, |cols| {
        cols[0].heading("Revenue by Category");
        plot::category_bars(&mut cols[0], &summary.by_category, &state.category_colors);

        cols[1].heading("Revenue Share by Region");
        donut::region_donut(&mut cols[1], &summary.by_region, &state.region_colors);
    });
    ui.add_space(12.0);

    ui.heading(format!("Top {TOP_PRODUCTS} Products by Revenue"));
    plot::top_products_bars(ui, &summary.top_products);
    ui.add_space(12.0);

    ui.heading("Correlation Analysis");
    heatmap::correlation_heatmap(ui, &summary.correlation);
}

fn key_metrics(ui: &mut Ui, metrics: &KeyMetrics) {
    ui.columns(3, |cols| {
        metric(&mut cols[0], "Total Revenue", dollars(metrics.whole_revenue()));
        metric(&mut cols[1], "Total Profit", dollars(metrics.whole_profit()));
        metric(&mut cols[2], "Total Units Sold", with_thousands(metrics.units_sold));
    });
}

fn metric(ui: &mut Ui, label: &str, value: String) {
    ui.group(|ui: &mut Ui| {
        ui.vertical(|ui: &mut Ui| {
            ui.label(RichText::new(label).color(Color32::GRAY));
            ui.label(RichText::new(value).size(26.0).strong());
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_separators() {
        assert_eq!(with_thousands(0), "0");
        assert_eq!(with_thousands(999), "999");
        assert_eq!(with_thousands(1000), "1,000");
        assert_eq!(with_thousands(1234567), "1,234,567");
        assert_eq!(with_thousands(-45000), "-45,000");
        assert_eq!(with_thousands(i64::MIN), "-9,223,372,036,854,775,808");
    }

    #[test]
    fn dollar_amounts() {
        assert_eq!(dollars(34_492_035), "$34,492,035");
        assert_eq!(dollars(-12), "-$12");
    }
}
