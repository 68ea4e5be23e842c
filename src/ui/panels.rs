use std::collections::BTreeSet;
use std::sync::Arc;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::color::ColorMap;
use crate::config::SUPPORTED_EXTENSIONS;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// What a multi-select list asks the state to do after a frame.
enum SelectionChange<T> {
    Toggle(T),
    SelectAll,
    Clear,
}

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    // Hold our own handle so the state can be mutated while listing values.
    let Some(dataset) = state.dataset.as_ref().map(Arc::clone) else {
        ui.label("No dataset loaded.");
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            let change = multi_select(
                ui,
                "Region",
                &dataset.regions,
                &state.filters.regions,
                &state.region_colors,
            );
            match change {
                Some(SelectionChange::Toggle(r)) => state.toggle_region(r),
                Some(SelectionChange::SelectAll) => state.select_all_regions(),
                Some(SelectionChange::Clear) => state.select_no_regions(),
                None => {}
            }

            ui.separator();

            let change = multi_select(
                ui,
                "Category",
                &dataset.categories,
                &state.filters.categories,
                &state.category_colors,
            );
            match change {
                Some(SelectionChange::Toggle(c)) => state.toggle_category(c),
                Some(SelectionChange::SelectAll) => state.select_all_categories(),
                Some(SelectionChange::Clear) => state.select_no_categories(),
                None => {}
            }
        });
}

/// One collapsible multi-select list with All / None buttons and a
/// colour-coded checkbox per value.
fn multi_select<T>(
    ui: &mut Ui,
    title: &str,
    options: &BTreeSet<T>,
    selected: &BTreeSet<T>,
    colors: &ColorMap<T>,
) -> Option<SelectionChange<T>>
where
    T: Ord + Copy + std::fmt::Display,
{
    let mut change = None;
    let header_text = format!("{title}  ({}/{})", selected.len(), options.len());

    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt(title)
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    change = Some(SelectionChange::SelectAll);
                }
                if ui.small_button("None").clicked() {
                    change = Some(SelectionChange::Clear);
                }
            });

            for &value in options {
                let mut checked = selected.contains(&value);
                let text = RichText::new(value.to_string()).color(colors.color_for(&value));
                if ui.checkbox(&mut checked, text).changed() {
                    change = Some(SelectionChange::Toggle(value));
                }
            }
        });

    change
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(state.data_path.display().to_string());

        if let Some(ds) = &state.dataset {
            ui.separator();
            ui.label(format!(
                "{} records loaded, {} visible",
                ds.len(),
                state.visible_indices.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open sales data")
        .add_filter("Supported files", SUPPORTED_EXTENSIONS)
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load(&path);
    }
}
