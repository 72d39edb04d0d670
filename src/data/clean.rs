use std::collections::HashSet;
use std::hash::Hash;

use serde::Serialize;

use super::error::CleanError;
use super::model::{mean, Catalog, NumericColumn, Product, RawTable};

// ---------------------------------------------------------------------------
// Numeric coercion
// ---------------------------------------------------------------------------

/// How numeric cells are read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NumberParsing {
    /// Plain decimal literals only; anything else is missing.
    #[default]
    Strict,
    /// Strip currency symbols, thousands separators and percent signs first,
    /// so `₹1,099` reads as `1099` and `64%` as `64`.
    Lenient,
}

const CURRENCY_SYMBOLS: &[char] = &['$', '€', '£', '¥', '₹', '₩', '₽', '¢', '₺', '₫'];

impl NumberParsing {
    /// Parse one cell. Empty, unparseable and non-finite values are `None`.
    pub fn parse(self, cell: &str) -> Option<f64> {
        let trimmed = cell.trim();
        let value = match self {
            NumberParsing::Strict => trimmed.parse::<f64>().ok()?,
            NumberParsing::Lenient => {
                let stripped: String = trimmed
                    .chars()
                    .filter(|c| {
                        !c.is_whitespace() && *c != ',' && *c != '%' && !CURRENCY_SYMBOLS.contains(c)
                    })
                    .collect();
                stripped.parse::<f64>().ok()?
            }
        };
        value.is_finite().then_some(value)
    }
}

// ---------------------------------------------------------------------------
// Cleaning report
// ---------------------------------------------------------------------------

/// Imputation outcome for one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnImputation {
    pub column: NumericColumn,
    /// Cells that failed to parse and received the mean.
    pub imputed: usize,
    /// Mean of the originally parseable cells; `None` for an empty table.
    pub mean: Option<f64>,
}

/// What cleaning did to the input.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CleanStats {
    pub rows_read: usize,
    /// Byte-identical rows dropped before parsing.
    pub raw_duplicates: usize,
    /// Rows that only became identical once numbers were normalized.
    pub normalized_duplicates: usize,
    pub imputations: Vec<ColumnImputation>,
}

impl CleanStats {
    pub fn duplicates_removed(&self) -> usize {
        self.raw_duplicates + self.normalized_duplicates
    }

    pub fn imputed_cells(&self) -> usize {
        self.imputations.iter().map(|c| c.imputed).sum()
    }
}

/// Output of [`clean`].
#[derive(Debug, Clone, PartialEq)]
pub struct Cleaned {
    pub catalog: Catalog,
    pub stats: CleanStats,
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Turn a raw export into a cleaned [`Catalog`].
///
/// Steps, in order:
/// 1. drop exact duplicate rows (first occurrence kept),
/// 2. coerce `rating`, `discount_percentage`, `actual_price` and fill every
///    missing cell with the mean of the cells that did parse,
/// 3. drop rows that became identical through normalization.
///
/// Fails when a non-empty numeric column has no parseable cell at all.
pub fn clean(raw: &RawTable, parsing: NumberParsing) -> Result<Cleaned, CleanError> {
    let schema = &raw.schema;
    log::info!("Cleaning {} rows", raw.rows.len());

    let (rows, raw_duplicates) = dedup_stable(raw.rows.iter().collect(), |row| *row);
    if raw_duplicates > 0 {
        log::info!("Removed {raw_duplicates} duplicate rows");
    }

    let mut imputations = Vec::with_capacity(NumericColumn::ALL.len());
    let mut filled: Vec<Vec<f64>> = Vec::with_capacity(NumericColumn::ALL.len());
    for column in NumericColumn::ALL {
        let idx = schema.numeric_index(column);
        let parsed: Vec<Option<f64>> = rows.iter().map(|row| parsing.parse(&row[idx])).collect();
        let (values, report) = impute(column, &parsed)?;
        filled.push(values);
        imputations.push(report);
    }

    let extra = schema.extra_indices();
    let products: Vec<Product> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| Product {
            product_name: row[schema.product_name].clone(),
            category: row[schema.category].clone(),
            rating: filled[0][i],
            discount_percentage: filled[1][i],
            actual_price: filled[2][i],
            extra: extra.iter().map(|&e| row[e].clone()).collect(),
        })
        .collect();

    let (products, normalized_duplicates) = dedup_stable(products, |p| p.to_cells(schema));
    if normalized_duplicates > 0 {
        log::info!("Removed {normalized_duplicates} rows duplicated after normalization");
    }

    let stats = CleanStats {
        rows_read: raw.rows.len(),
        raw_duplicates,
        normalized_duplicates,
        imputations,
    };
    Ok(Cleaned {
        catalog: Catalog::from_products(schema.clone(), products),
        stats,
    })
}

/// Re-coerce an already cleaned table, as the dashboard does on load.
pub fn recoerce(raw: &RawTable) -> Result<Catalog, CleanError> {
    clean(raw, NumberParsing::Strict).map(|c| c.catalog)
}

/// Fill `None` cells with the mean of the `Some` cells.
fn impute(
    column: NumericColumn,
    parsed: &[Option<f64>],
) -> Result<(Vec<f64>, ColumnImputation), CleanError> {
    let fill = mean(parsed.iter().flatten().copied());
    let missing = parsed.iter().filter(|v| v.is_none()).count();

    let values = match fill {
        Some(m) => parsed.iter().map(|v| v.unwrap_or(m)).collect(),
        None if parsed.is_empty() => Vec::new(),
        None => return Err(CleanError::NoParseableValues { column: column.name() }),
    };

    if missing > 0 {
        log::warn!("Imputed {missing} missing '{column}' values with mean {fill:?}");
    } else {
        log::debug!("Column '{column}' fully numeric, mean {fill:?}");
    }

    Ok((
        values,
        ColumnImputation {
            column,
            imputed: missing,
            mean: fill,
        },
    ))
}

/// Keep the first item for each distinct key, preserving order. Returns the
/// survivors and how many were dropped.
fn dedup_stable<T, K, F>(items: Vec<T>, key: F) -> (Vec<T>, usize)
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let before = items.len();
    let mut seen: HashSet<K> = HashSet::with_capacity(before);
    let mut kept = Vec::with_capacity(before);
    for item in items {
        if seen.insert(key(&item)) {
            kept.push(item);
        }
    }
    let dropped = before - kept.len();
    (kept, dropped)
}

/// Build a raw table back from a catalog, in file layout.
pub fn to_raw(catalog: &Catalog) -> RawTable {
    RawTable {
        schema: catalog.schema.clone(),
        rows: catalog
            .products
            .iter()
            .map(|p| p.to_cells(&catalog.schema))
            .collect(),
    }
}
