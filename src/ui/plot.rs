use std::ops::RangeInclusive;

use chrono::{Datelike, NaiveDate};
use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoints};

use crate::color::{generate_palette, ColorMap};
use crate::data::model::Category;
use crate::data::summary::MonthlyTotals;

const CHART_HEIGHT: f32 = 280.0;

const REVENUE_COLOR: Color32 = Color32::from_rgb(99, 110, 250);
const PROFIT_COLOR: Color32 = Color32::from_rgb(239, 85, 59);

// ---------------------------------------------------------------------------
// Month axis
// ---------------------------------------------------------------------------

/// Months since year 0, so consecutive months are one unit apart on the x axis.
pub fn month_to_x(month: NaiveDate) -> f64 {
    (month.year() as f64) * 12.0 + (month.month0() as f64)
}

/// Inverse of [`month_to_x`] for whole values; `None` between months.
pub fn x_to_month_label(x: f64) -> Option<String> {
    if x.fract() != 0.0 {
        return None;
    }
    let index = x as i64;
    let year = index.div_euclid(12);
    let month = index.rem_euclid(12) + 1;
    Some(format!("{year}-{month:02}"))
}

fn month_axis_label(mark: GridMark, _range: &RangeInclusive<f64>) -> String {
    x_to_month_label(mark.value).unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Monthly revenue & profit (line chart)
// ---------------------------------------------------------------------------

pub fn monthly_trend(ui: &mut Ui, monthly: &[MonthlyTotals]) {
    let revenue: PlotPoints = monthly
        .iter()
        .map(|m| [month_to_x(m.month), m.revenue])
        .collect();
    let profit: PlotPoints = monthly
        .iter()
        .map(|m| [month_to_x(m.month), m.profit])
        .collect();

    Plot::new("monthly_trend")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("Month")
        .y_axis_label("USD")
        .x_axis_formatter(month_axis_label)
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new(revenue).name("Revenue").color(REVENUE_COLOR).width(2.0));
            plot_ui.line(Line::new(profit).name("Profit").color(PROFIT_COLOR).width(2.0));
        });
}

// ---------------------------------------------------------------------------
// Bar charts
// ---------------------------------------------------------------------------

/// Bars in the given order, one colour each, labelled underneath.
fn labelled_bars(ui: &mut Ui, id: &str, items: Vec<(String, f64, Color32)>) {
    let labels: Vec<String> = items.iter().map(|(l, _, _)| l.clone()).collect();
    let bars: Vec<Bar> = items
        .into_iter()
        .enumerate()
        .map(|(i, (label, value, color))| {
            Bar::new(i as f64, value)
                .name(label)
                .fill(color)
                .width(0.6)
        })
        .collect();

    Plot::new(id)
        .height(CHART_HEIGHT)
        .y_axis_label("Revenue")
        .x_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
            let v = mark.value;
            if v.fract() != 0.0 || v < 0.0 {
                return String::new();
            }
            labels.get(v as usize).cloned().unwrap_or_default()
        })
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

/// Revenue per category, already sorted descending.
pub fn category_bars(ui: &mut Ui, by_category: &[(Category, f64)], colors: &ColorMap<Category>) {
    let items = by_category
        .iter()
        .map(|(c, v)| (c.to_string(), *v, colors.color_for(c)))
        .collect();
    labelled_bars(ui, "revenue_by_category", items);
}

/// The top products, already sorted descending.
pub fn top_products_bars(ui: &mut Ui, top_products: &[(String, f64)]) {
    let palette = generate_palette(top_products.len());
    let items = top_products
        .iter()
        .zip(palette)
        .map(|((name, v), color)| (name.clone(), *v, color))
        .collect();
    labelled_bars(ui, "top_products", items);
}
