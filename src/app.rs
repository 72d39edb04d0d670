use eframe::egui::{self, ScrollArea, Ui};

use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct ProductLensApp {
    pub state: AppState,
}

impl ProductLensApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for ProductLensApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: category filter ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: charts, table, insights ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.catalog.is_none() {
                ui.centered_and_justified(|ui: &mut Ui| {
                    ui.heading("Open a cleaned product file  (File → Open…)");
                });
                return;
            }

            let state = &self.state;
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    ui.heading("Product Analysis Dashboard");
                    ui.label(format!("Showing category: {}", state.filter.label()));
                    ui.separator();

                    section(ui, "Top 10 Categories by Number of Products", |ui| {
                        plot::category_bar_chart(ui, state)
                    });
                    section(ui, "Average Rating & Discount per Category", |ui| {
                        plot::category_heatmap(ui, state)
                    });
                    section(ui, "Rating Distribution", |ui| plot::rating_histogram(ui, state));
                    section(ui, "Discount vs Rating", |ui| {
                        plot::discount_rating_scatter(ui, state)
                    });
                    section(ui, "Price Category Distribution", |ui| {
                        plot::price_pie(ui, state)
                    });
                    section(ui, "Top 10 Products by Rating", |ui| {
                        table::top_products_table(ui, state)
                    });
                    section(ui, "Key Insights", |ui| table::key_insights(ui, state));
                });
        });
    }
}

fn section(ui: &mut Ui, title: &str, body: impl FnOnce(&mut Ui)) {
    ui.add_space(8.0);
    ui.heading(title);
    body(ui);
    ui.separator();
}
