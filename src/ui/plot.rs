use std::f32::consts::TAU;

use eframe::egui::{self, Align2, Color32, FontId, Pos2, RichText, Sense, Shape, Stroke, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot, PlotPoints, Points};

use crate::color::{generate_palette, heat_color};
use crate::state::AppState;

const PLOT_HEIGHT: f32 = 260.0;

// ---------------------------------------------------------------------------
// Top categories bar chart (whole catalog)
// ---------------------------------------------------------------------------

pub fn category_bar_chart(ui: &mut Ui, state: &AppState) {
    let counts = &state.view.category_counts;
    let palette = generate_palette(counts.len());

    let bars: Vec<Bar> = counts
        .iter()
        .zip(&palette)
        .enumerate()
        .map(|(i, (c, &color))| {
            Bar::new(i as f64, c.count as f64)
                .name(&c.category)
                .fill(color)
                .width(0.7)
        })
        .collect();

    let labels: Vec<String> = counts.iter().map(|c| short_label(&c.category)).collect();

    Plot::new("category_counts")
        .height(PLOT_HEIGHT)
        .x_axis_label("Category")
        .y_axis_label("Number of Products")
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > f64::EPSILON || idx < 0.0 {
                return String::new();
            }
            labels.get(idx as usize).cloned().unwrap_or_default()
        })
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("products"));
        });
}

/// Keep the leaf of a `A|B|C` category path for axis labels.
fn short_label(category: &str) -> String {
    category.rsplit('|').next().unwrap_or(category).to_string()
}

// ---------------------------------------------------------------------------
// Category heat grid (whole catalog)
// ---------------------------------------------------------------------------

pub fn category_heatmap(ui: &mut Ui, state: &AppState) {
    let summary = &state.view.category_summary;
    if summary.is_empty() {
        ui.label("No categories.");
        return;
    }

    let span = |values: Vec<f64>| {
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        move |v: f64| {
            let range = max - min;
            if range.abs() < f64::EPSILON {
                0.5
            } else {
                ((v - min) / range) as f32
            }
        }
    };
    let rating_t = span(summary.iter().map(|s| s.mean_rating).collect());
    let discount_t = span(summary.iter().map(|s| s.mean_discount).collect());

    egui::ScrollArea::vertical()
        .id_salt("category_heatmap")
        .max_height(PLOT_HEIGHT)
        .show(ui, |ui: &mut Ui| {
            egui::Grid::new("category_heat_grid")
                .num_columns(3)
                .spacing([12.0, 4.0])
                .show(ui, |ui: &mut Ui| {
                    ui.strong("category");
                    ui.strong("rating");
                    ui.strong("discount_percentage");
                    ui.end_row();

                    for s in summary {
                        ui.label(&s.category);
                        ui.label(
                            RichText::new(format!(" {:.2} ", s.mean_rating))
                                .background_color(heat_color(rating_t(s.mean_rating)))
                                .color(Color32::BLACK),
                        );
                        ui.label(
                            RichText::new(format!(" {:.2} ", s.mean_discount))
                                .background_color(heat_color(discount_t(s.mean_discount)))
                                .color(Color32::BLACK),
                        );
                        ui.end_row();
                    }
                });
        });
}

// ---------------------------------------------------------------------------
// Rating histogram (selection)
// ---------------------------------------------------------------------------

pub fn rating_histogram(ui: &mut Ui, state: &AppState) {
    let bars: Vec<Bar> = state
        .view
        .rating_distribution
        .bins
        .iter()
        .map(|bin| {
            let width = bin.upper - bin.lower;
            Bar::new(bin.lower + width / 2.0, bin.count as f64)
                .width(width)
                .name(format!("{:.2} – {:.2}", bin.lower, bin.upper))
        })
        .collect();

    Plot::new("rating_distribution")
        .height(PLOT_HEIGHT)
        .x_axis_label("Rating")
        .y_axis_label("Number of Products")
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(
                BarChart::new(bars)
                    .name("rating")
                    .color(Color32::from_rgb(255, 165, 0)),
            );
        });
}

// ---------------------------------------------------------------------------
// Discount vs rating scatter (selection, coloured by category)
// ---------------------------------------------------------------------------

pub fn discount_rating_scatter(ui: &mut Ui, state: &AppState) {
    Plot::new("discount_vs_rating")
        .height(PLOT_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("Discount (%)")
        .y_axis_label("Rating")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for series in &state.view.scatter {
                let color = state
                    .color_map
                    .as_ref()
                    .map(|cm| cm.color_for(&series.category))
                    .unwrap_or(Color32::LIGHT_BLUE);
                let points = PlotPoints::new(series.points.clone());
                plot_ui.points(
                    Points::new(points)
                        .name(&series.category)
                        .color(color.gamma_multiply(0.7))
                        .radius(3.0),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Price category pie (selection)
// ---------------------------------------------------------------------------

const PIE_COLORS: [Color32; 2] = [
    Color32::from_rgb(135, 206, 235),
    Color32::from_rgb(144, 238, 144),
];

pub fn price_pie(ui: &mut Ui, state: &AppState) {
    let counts = &state.view.price_counts;
    let total: usize = counts.iter().map(|c| c.count).sum();
    if total == 0 {
        ui.label("No products in the current view.");
        return;
    }

    ui.horizontal(|ui: &mut Ui| {
        let size = 220.0;
        let (rect, _response) = ui.allocate_exact_size(egui::vec2(size, size), Sense::hover());
        let painter = ui.painter_at(rect);
        let center = rect.center();
        let radius = size / 2.0 - 4.0;

        let mut start = -TAU / 4.0;
        for (i, c) in counts.iter().enumerate() {
            let fraction = c.count as f32 / total as f32;
            let sweep = fraction * TAU;
            let color = PIE_COLORS[i % PIE_COLORS.len()];

            // Fan of thin convex wedges so slices over 180° render correctly.
            let steps = ((sweep / 0.05).ceil() as usize).max(1);
            for s in 0..steps {
                let a0 = start + sweep * s as f32 / steps as f32;
                let a1 = start + sweep * (s + 1) as f32 / steps as f32;
                painter.add(Shape::convex_polygon(
                    vec![center, polar(center, radius, a0), polar(center, radius, a1)],
                    color,
                    Stroke::NONE,
                ));
            }

            let mid = start + sweep / 2.0;
            painter.text(
                polar(center, radius * 0.6, mid),
                Align2::CENTER_CENTER,
                format!("{:.1}%", fraction * 100.0),
                FontId::proportional(14.0),
                Color32::BLACK,
            );
            start += sweep;
        }

        ui.vertical(|ui: &mut Ui| {
            for (i, c) in counts.iter().enumerate() {
                let color = PIE_COLORS[i % PIE_COLORS.len()];
                ui.label(
                    RichText::new(format!("■ {}  ({})", c.price_category, c.count)).color(color),
                );
            }
            if let Some(threshold) = state.view.price_threshold {
                ui.label(RichText::new(format!("High means actual_price > {threshold:.2}")).weak());
            }
        });
    });
}

fn polar(center: Pos2, radius: f32, angle: f32) -> Pos2 {
    center + egui::vec2(angle.cos(), angle.sin()) * radius
}
