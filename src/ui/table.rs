use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Top products table (selection)
// ---------------------------------------------------------------------------

pub fn top_products_table(ui: &mut Ui, state: &AppState) {
    let products = &state.view.top_products;
    if products.is_empty() {
        ui.label("No products in the current view.");
        return;
    }

    ui.push_id("top_products", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .vscroll(false)
            .column(Column::initial(320.0).at_least(120.0).clip(true))
            .column(Column::initial(220.0).at_least(80.0).clip(true))
            .columns(Column::auto().at_least(70.0), 3)
            .header(20.0, |mut header| {
                for title in [
                    "product_name",
                    "category",
                    "rating",
                    "actual_price",
                    "discount_percentage",
                ] {
                    header.col(|ui: &mut Ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|mut body| {
                for p in products {
                    body.row(18.0, |mut row| {
                        row.col(|ui: &mut Ui| {
                            ui.label(&p.product_name);
                        });
                        row.col(|ui: &mut Ui| {
                            ui.label(&p.category);
                        });
                        row.col(|ui: &mut Ui| {
                            ui.label(p.rating.to_string());
                        });
                        row.col(|ui: &mut Ui| {
                            ui.label(p.actual_price.to_string());
                        });
                        row.col(|ui: &mut Ui| {
                            ui.label(p.discount_percentage.to_string());
                        });
                    });
                }
            });
    });
}

// ---------------------------------------------------------------------------
// Key insights (whole catalog)
// ---------------------------------------------------------------------------

pub fn key_insights(ui: &mut Ui, state: &AppState) {
    let insights = &state.view.insights;
    let or_na = |v: &Option<String>| v.clone().unwrap_or_else(|| "n/a".to_string());

    let rows = [
        ("Category with most products:", or_na(&insights.most_products)),
        ("Category with highest average rating:", or_na(&insights.highest_rating)),
        ("Category with highest average discount:", or_na(&insights.highest_discount)),
        (
            "Majority of products fall under price category:",
            insights
                .majority_price
                .map_or_else(|| "n/a".to_string(), |p| p.to_string()),
        ),
    ];

    for (label, value) in rows {
        ui.horizontal_wrapped(|ui: &mut Ui| {
            ui.label(RichText::new(label).strong());
            ui.label(value);
        });
    }
}
