/// Data layer: core types, cleaning, aggregation, loading, and filtering.
///
/// Architecture:
/// ```text
///   amazon.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → RawTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  clean    │  dedup → impute → re-dedup → Catalog
///   └──────────┘
///        │                         cleaned_amazon_products.csv
///        ▼                                    │
///   ┌──────────┐                              ▼
///   │ summary   │  aggregates + insights   ┌──────────┐
///   └──────────┘                           │  filter   │  category → indices
///                                          └──────────┘
///                                                │
///                                                ▼
///                                          ┌──────────┐
///                                          │  view     │  full/filtered aggregates
///                                          └──────────┘
/// ```

pub mod clean;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod summary;
pub mod view;

pub use clean::{clean, Cleaned, CleanStats, NumberParsing};
pub use error::CleanError;
pub use model::{Catalog, PriceCategory, Product, RawTable, Schema};
pub use summary::{summarize, summarize_with_threshold, Insights, Summary};
