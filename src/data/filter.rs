use super::model::{Catalog, Product};

// ---------------------------------------------------------------------------
// Category selection
// ---------------------------------------------------------------------------

/// The single dashboard filter: every category, or exactly one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// Selector options: "All" first, then categories in first-seen order.
    pub fn options(catalog: &Catalog) -> Vec<CategoryFilter> {
        std::iter::once(CategoryFilter::All)
            .chain(catalog.categories.iter().cloned().map(CategoryFilter::Only))
            .collect()
    }

    pub fn label(&self) -> &str {
        match self {
            CategoryFilter::All => "All",
            CategoryFilter::Only(category) => category.as_str(),
        }
    }

    pub fn matches(&self, product: &Product) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => product.category == *category,
        }
    }
}

/// Return indices of products that pass the filter, in catalog order.
pub fn filtered_indices(catalog: &Catalog, filter: &CategoryFilter) -> Vec<usize> {
    catalog
        .products
        .iter()
        .enumerate()
        .filter(|(_, p)| filter.matches(p))
        .map(|(i, _)| i)
        .collect()
}
