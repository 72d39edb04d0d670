mod app;
mod color;
mod state;
mod ui;

use std::path::PathBuf;

use app::ProductLensApp;
use clap::Parser;
use eframe::egui;
use product_lens::data::loader::CLEANED_FILE;
use state::AppState;

/// Interactive dashboard over a cleaned product dataset.
#[derive(Parser, Debug)]
#[command(name = "product-lens", version, about)]
struct Args {
    /// Cleaned dataset to open on startup
    #[arg(default_value = CLEANED_FILE)]
    path: PathBuf,
}

fn main() -> eframe::Result {
    env_logger::init();
    let args = Args::parse();

    let mut state = AppState::default();
    if args.path.exists() {
        state.open(&args.path);
    } else {
        log::warn!("{} not found, starting empty", args.path.display());
        state.status_message = Some(format!(
            "{} not found – run clean-products first or use File → Open…",
            args.path.display()
        ));
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([640.0, 420.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Product Lens – Product Analysis Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(ProductLensApp::new(state)))),
    )
}
