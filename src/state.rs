use std::path::{Path, PathBuf};

use product_lens::data::filter::CategoryFilter;
use product_lens::data::loader;
use product_lens::data::view::DashboardView;
use product_lens::data::Catalog;

use crate::color::ColorMap;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Loaded catalog (None until a file is loaded).
    pub catalog: Option<Catalog>,

    /// File the catalog came from.
    pub source: Option<PathBuf>,

    /// Active category selection.
    pub filter: CategoryFilter,

    /// Selector entries for the loaded catalog.
    pub category_options: Vec<CategoryFilter>,

    /// Aggregates for the current selection (cached).
    pub view: DashboardView,

    /// Category colours for the scatter plot.
    pub color_map: Option<ColorMap>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Load a cleaned file, replacing the current catalog on success.
    pub fn open(&mut self, path: &Path) {
        match loader::load_cleaned(path) {
            Ok(catalog) => {
                log::info!(
                    "Loaded {} products in {} categories",
                    catalog.len(),
                    catalog.categories.len()
                );
                self.set_catalog(catalog, path.to_path_buf());
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Ingest a newly loaded catalog, reset the filter and colours.
    pub fn set_catalog(&mut self, catalog: Catalog, source: PathBuf) {
        self.filter = CategoryFilter::All;
        self.category_options = CategoryFilter::options(&catalog);
        self.color_map = Some(ColorMap::new(&catalog.categories));
        self.view = DashboardView::build(&catalog, &self.filter);

        self.catalog = Some(catalog);
        self.source = Some(source);
        self.status_message = None;
    }

    /// Switch the category selection and recompute the view.
    pub fn set_filter(&mut self, filter: CategoryFilter) {
        if filter == self.filter {
            return;
        }
        self.filter = filter;
        if let Some(catalog) = &self.catalog {
            self.view = DashboardView::build(catalog, &self.filter);
        }
    }

    /// Write the current selection to `path`.
    pub fn export(&mut self, path: &Path) {
        let Some(catalog) = &self.catalog else {
            return;
        };
        match loader::write_filtered(path, catalog, &self.view) {
            Ok(()) => {
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to export: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
