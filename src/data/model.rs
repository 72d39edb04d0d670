use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use super::error::CleanError;

// ---------------------------------------------------------------------------
// Column names
// ---------------------------------------------------------------------------

pub const PRODUCT_NAME: &str = "product_name";
pub const CATEGORY: &str = "category";
pub const PRICE_CATEGORY: &str = "price_category";

/// The three columns that are coerced to numbers and imputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericColumn {
    Rating,
    DiscountPercentage,
    ActualPrice,
}

impl NumericColumn {
    pub const ALL: [NumericColumn; 3] = [
        NumericColumn::Rating,
        NumericColumn::DiscountPercentage,
        NumericColumn::ActualPrice,
    ];

    /// Header name of the column in the CSV files.
    pub fn name(self) -> &'static str {
        match self {
            NumericColumn::Rating => "rating",
            NumericColumn::DiscountPercentage => "discount_percentage",
            NumericColumn::ActualPrice => "actual_price",
        }
    }
}

impl fmt::Display for NumericColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Schema – header positions of the required columns
// ---------------------------------------------------------------------------

/// Header row of a product file plus the positions of the five columns the
/// pipeline understands. All other columns are carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    pub headers: Vec<String>,
    pub product_name: usize,
    pub category: usize,
    pub rating: usize,
    pub discount_percentage: usize,
    pub actual_price: usize,
}

impl Schema {
    /// Locate the required columns. Header names are compared after trimming;
    /// when a name repeats, the first occurrence wins.
    pub fn from_headers(headers: Vec<String>) -> Result<Self, CleanError> {
        let find = |name: &'static str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or(CleanError::MissingColumn(name))
        };

        Ok(Schema {
            product_name: find(PRODUCT_NAME)?,
            category: find(CATEGORY)?,
            rating: find(NumericColumn::Rating.name())?,
            discount_percentage: find(NumericColumn::DiscountPercentage.name())?,
            actual_price: find(NumericColumn::ActualPrice.name())?,
            headers,
        })
    }

    pub fn numeric_index(&self, column: NumericColumn) -> usize {
        match column {
            NumericColumn::Rating => self.rating,
            NumericColumn::DiscountPercentage => self.discount_percentage,
            NumericColumn::ActualPrice => self.actual_price,
        }
    }

    /// Positions of every column that is not one of the five known ones, in
    /// header order.
    pub fn extra_indices(&self) -> Vec<usize> {
        let known: HashSet<usize> = [
            self.product_name,
            self.category,
            self.rating,
            self.discount_percentage,
            self.actual_price,
        ]
        .into_iter()
        .collect();

        (0..self.headers.len()).filter(|i| !known.contains(i)).collect()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h.trim() == name)
    }

    pub fn width(&self) -> usize {
        self.headers.len()
    }
}

// ---------------------------------------------------------------------------
// RawTable – the export exactly as read
// ---------------------------------------------------------------------------

/// Unparsed rows of a product export. Every row has `schema.width()` cells.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    pub schema: Schema,
    pub rows: Vec<Vec<String>>,
}

// ---------------------------------------------------------------------------
// PriceCategory
// ---------------------------------------------------------------------------

/// Derived price label relative to the mean `actual_price`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PriceCategory {
    High,
    Low,
}

impl PriceCategory {
    /// `High` only when strictly above the threshold.
    pub fn classify(actual_price: f64, threshold: f64) -> Self {
        if actual_price > threshold {
            PriceCategory::High
        } else {
            PriceCategory::Low
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PriceCategory::High => "High",
            PriceCategory::Low => "Low",
        }
    }
}

impl fmt::Display for PriceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Product – one cleaned row
// ---------------------------------------------------------------------------

/// A single cleaned product record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub product_name: String,
    pub category: String,
    pub rating: f64,
    pub discount_percentage: f64,
    pub actual_price: f64,
    /// Cells of the non-required columns, ordered like [`Schema::extra_indices`].
    #[serde(skip)]
    pub extra: Vec<String>,
}

impl Product {
    /// Lay the record back out in file column order.
    pub fn to_cells(&self, schema: &Schema) -> Vec<String> {
        let mut cells = vec![String::new(); schema.width()];
        cells[schema.product_name] = self.product_name.clone();
        cells[schema.category] = self.category.clone();
        cells[schema.rating] = format_number(self.rating);
        cells[schema.discount_percentage] = format_number(self.discount_percentage);
        cells[schema.actual_price] = format_number(self.actual_price);
        for (idx, value) in schema.extra_indices().into_iter().zip(&self.extra) {
            cells[idx] = value.clone();
        }
        cells
    }
}

/// Shortest representation that parses back to the same `f64`.
pub fn format_number(value: f64) -> String {
    format!("{value}")
}

// ---------------------------------------------------------------------------
// Catalog – the complete cleaned dataset
// ---------------------------------------------------------------------------

/// The cleaned dataset with its distinct categories pre-computed.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    pub schema: Schema,
    pub products: Vec<Product>,
    /// Distinct categories in first-seen order.
    pub categories: Vec<String>,
}

impl Catalog {
    /// Build the category index from the cleaned products.
    pub fn from_products(schema: Schema, products: Vec<Product>) -> Self {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut categories = Vec::new();
        for p in &products {
            if seen.insert(p.category.as_str()) {
                categories.push(p.category.clone());
            }
        }
        Catalog {
            schema,
            products,
            categories,
        }
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Mean `actual_price` over the whole catalog, `None` when empty.
    pub fn mean_price(&self) -> Option<f64> {
        mean(self.products.iter().map(|p| p.actual_price))
    }
}

pub(crate) fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (count > 0).then(|| sum / count as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn schema_locates_required_columns_among_extras() {
        let schema = Schema::from_headers(headers(&[
            "product_id",
            "product_name",
            "category",
            "discounted_price",
            "actual_price",
            "discount_percentage",
            "rating",
        ]))
        .unwrap();

        assert_eq!(schema.product_name, 1);
        assert_eq!(schema.actual_price, 4);
        assert_eq!(schema.rating, 6);
        assert_eq!(schema.extra_indices(), vec![0, 3]);
    }

    #[test]
    fn schema_reports_missing_column() {
        let err = Schema::from_headers(headers(&["product_name", "category", "rating"]))
            .unwrap_err();
        assert!(matches!(err, CleanError::MissingColumn("discount_percentage")));
    }

    #[test]
    fn to_cells_restores_column_order() {
        let schema = Schema::from_headers(headers(&[
            "rating",
            "sku",
            "category",
            "product_name",
            "actual_price",
            "discount_percentage",
        ]))
        .unwrap();
        let product = Product {
            product_name: "Cable".into(),
            category: "Electronics".into(),
            rating: 4.0,
            discount_percentage: 12.5,
            actual_price: 199.0,
            extra: vec!["SKU-1".into()],
        };

        assert_eq!(
            product.to_cells(&schema),
            vec!["4", "SKU-1", "Electronics", "Cable", "199", "12.5"]
        );
    }

    #[test]
    fn price_category_is_strictly_above_threshold() {
        assert_eq!(PriceCategory::classify(300.0, 200.0), PriceCategory::High);
        assert_eq!(PriceCategory::classify(200.0, 200.0), PriceCategory::Low);
        assert_eq!(PriceCategory::classify(100.0, 200.0), PriceCategory::Low);
    }

    #[test]
    fn catalog_keeps_first_seen_category_order() {
        let schema = Schema::from_headers(headers(&[
            "product_name",
            "category",
            "rating",
            "discount_percentage",
            "actual_price",
        ]))
        .unwrap();
        let product = |cat: &str| Product {
            product_name: "p".into(),
            category: cat.into(),
            rating: 1.0,
            discount_percentage: 1.0,
            actual_price: 1.0,
            extra: Vec::new(),
        };
        let catalog =
            Catalog::from_products(schema, vec![product("Toys"), product("Books"), product("Toys")]);

        assert_eq!(catalog.categories, vec!["Toys", "Books"]);
    }
}
