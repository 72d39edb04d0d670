use eframe::egui::{self, Color32, RichText, Ui};

use product_lens::data::filter::CategoryFilter;
use product_lens::data::loader::FILTERED_FILE;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – category filter and download
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    if state.catalog.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    let mut chosen: Option<CategoryFilter> = None;

    ui.strong("Select Category");
    egui::ComboBox::from_id_salt("category_filter")
        .selected_text(state.filter.label())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for option in &state.category_options {
                if ui
                    .selectable_label(state.filter == *option, option.label())
                    .clicked()
                {
                    chosen = Some(option.clone());
                }
            }
        });

    if let Some(filter) = chosen {
        state.set_filter(filter);
    }

    ui.add_space(8.0);
    ui.separator();

    ui.strong("Download Cleaned Data");
    ui.label(format!("{} products in the current view", state.view.visible.len()));
    if ui.button("Download CSV").clicked() {
        save_file_dialog(state);
    }
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
        });

        ui.separator();

        if let Some(catalog) = &state.catalog {
            ui.label(format!(
                "{} products loaded, {} visible",
                catalog.len(),
                state.view.visible.len()
            ));
        }
        if let Some(source) = &state.source {
            ui.separator();
            ui.label(RichText::new(source.display().to_string()).weak());
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open cleaned product data")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.open(&path);
    }
}

pub fn save_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Save filtered products")
        .set_file_name(FILTERED_FILE)
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        state.export(&path);
    }
}
