use std::io;
use std::path::Path;

use anyhow::{Context, Result};

use super::clean::recoerce;
use super::model::{Catalog, RawTable, Schema, PRICE_CATEGORY};
use super::view::DashboardView;

pub const RAW_FILE: &str = "amazon.csv";
pub const CLEANED_FILE: &str = "cleaned_amazon_products.csv";
pub const FILTERED_FILE: &str = "amazon_products_filtered.csv";

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

/// Read a product export as raw text cells.
///
/// The header row must name `product_name`, `category`, `rating`,
/// `discount_percentage` and `actual_price`; other columns are kept. A row
/// with a different number of fields than the header is an error.
pub fn read_raw(path: &Path) -> Result<RawTable> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let table = read_raw_from(file).with_context(|| format!("reading {}", path.display()))?;
    log::info!(
        "Loaded {} rows with columns {:?} from {}",
        table.rows.len(),
        table.schema.headers,
        path.display()
    );
    Ok(table)
}

pub fn read_raw_from<R: io::Read>(reader: R) -> Result<RawTable> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();
    let schema = Schema::from_headers(headers)?;

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        rows.push(record.iter().map(|cell| cell.to_string()).collect());
    }

    Ok(RawTable { schema, rows })
}

/// Load a cleaned file for display. Numeric columns are coerced and imputed
/// again so a hand-edited file still yields a complete catalog.
pub fn load_cleaned(path: &Path) -> Result<Catalog> {
    let raw = read_raw(path)?;
    let catalog = recoerce(&raw).with_context(|| format!("coercing {}", path.display()))?;
    Ok(catalog)
}

// ---------------------------------------------------------------------------
// Writing
// ---------------------------------------------------------------------------

/// Persist the cleaned catalog with the input's own header row.
pub fn write_cleaned(path: &Path, catalog: &Catalog) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    write_cleaned_to(file, catalog).with_context(|| format!("writing {}", path.display()))?;
    log::info!("Wrote {} products to {}", catalog.len(), path.display());
    Ok(())
}

pub fn write_cleaned_to<W: io::Write>(writer: W, catalog: &Catalog) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(&catalog.schema.headers)?;
    for product in &catalog.products {
        writer.write_record(product.to_cells(&catalog.schema))?;
    }
    writer.flush()?;
    Ok(())
}

/// Save the rows selected in `view` plus their `price_category`.
pub fn write_filtered(path: &Path, catalog: &Catalog, view: &DashboardView) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    write_filtered_to(file, catalog, view)
        .with_context(|| format!("writing {}", path.display()))?;
    log::info!(
        "Exported {} '{}' products to {}",
        view.visible.len(),
        view.filter.label(),
        path.display()
    );
    Ok(())
}

pub fn write_filtered_to<W: io::Write>(
    writer: W,
    catalog: &Catalog,
    view: &DashboardView,
) -> Result<()> {
    let schema = &catalog.schema;
    // A file that already carries the label gets it overwritten, not repeated.
    let existing = schema.position(PRICE_CATEGORY);

    let mut headers = schema.headers.clone();
    if existing.is_none() {
        headers.push(PRICE_CATEGORY.to_string());
    }

    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(&headers)?;
    for product in view.products(catalog) {
        let mut cells = product.to_cells(schema);
        let label = view.price_category(product).to_string();
        match existing {
            Some(idx) => cells[idx] = label,
            None => cells.push(label),
        }
        writer.write_record(&cells)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::clean::{clean, NumberParsing};
    use crate::data::error::CleanError;
    use crate::data::filter::CategoryFilter;

    const RAW: &str = "\
product_id,product_name,category,rating,discount_percentage,actual_price
B01,USB Cable,Computers|Accessories,4.5,64,1099
B02,Charger,Electronics,,43,349
B01,USB Cable,Computers|Accessories,4.5,64,1099
B03,Mouse,Computers|Accessories,3.5,bad,699
";

    fn cleaned() -> Catalog {
        let raw = read_raw_from(RAW.as_bytes()).unwrap();
        clean(&raw, NumberParsing::Strict).unwrap().catalog
    }

    #[test]
    fn reads_extra_columns_and_pipes_in_category() {
        let raw = read_raw_from(RAW.as_bytes()).unwrap();

        assert_eq!(raw.rows.len(), 4);
        assert_eq!(raw.schema.extra_indices(), vec![0]);
        assert_eq!(raw.rows[0][2], "Computers|Accessories");
    }

    #[test]
    fn missing_required_column_is_fatal() {
        let err = read_raw_from("product_name,category,rating\nx,y,1\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("discount_percentage"));
    }

    #[test]
    fn ragged_row_is_fatal() {
        let text = "product_name,category,rating,discount_percentage,actual_price\na,b,1\n";
        assert!(read_raw_from(text.as_bytes()).is_err());
    }

    #[test]
    fn cleaned_file_keeps_input_columns() {
        let mut out = Vec::new();
        write_cleaned_to(&mut out, &cleaned()).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(
            text,
            "\
product_id,product_name,category,rating,discount_percentage,actual_price
B01,USB Cable,Computers|Accessories,4.5,64,1099
B02,Charger,Electronics,4,43,349
B03,Mouse,Computers|Accessories,3.5,53.5,699
"
        );
    }

    #[test]
    fn filtered_export_appends_price_category() {
        let catalog = cleaned();
        let view = DashboardView::build(&catalog, &CategoryFilter::Only("Computers|Accessories".into()));
        let mut out = Vec::new();
        write_filtered_to(&mut out, &catalog, &view).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            "product_id,product_name,category,rating,discount_percentage,actual_price,price_category"
        );
        // Mean price is (1099 + 349 + 699) / 3 ≈ 715.67.
        assert_eq!(lines[1], "B01,USB Cable,Computers|Accessories,4.5,64,1099,High");
        assert_eq!(lines[2], "B03,Mouse,Computers|Accessories,3.5,53.5,699,Low");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn existing_price_category_column_is_overwritten() {
        let text = "\
product_name,category,rating,discount_percentage,actual_price,price_category
a,X,4,10,100,stale
b,X,4,10,300,stale
";
        let catalog = recoerce(&read_raw_from(text.as_bytes()).unwrap()).unwrap();
        let view = DashboardView::build(&catalog, &CategoryFilter::All);
        let mut out = Vec::new();
        write_filtered_to(&mut out, &catalog, &view).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "\
product_name,category,rating,discount_percentage,actual_price,price_category
a,X,4,10,100,Low
b,X,4,10,300,High
"
        );
    }

    #[test]
    fn load_cleaned_imputes_hand_edited_cells() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CLEANED_FILE);
        std::fs::write(
            &path,
            "\
product_name,category,rating,discount_percentage,actual_price
a,X,4,10,100
b,X,oops,20,300
c,Y,2,,200
",
        )
        .unwrap();

        let catalog = load_cleaned(&path).unwrap();
        let ratings: Vec<f64> = catalog.products.iter().map(|p| p.rating).collect();
        assert_eq!(ratings, vec![4.0, 3.0, 2.0]);
        assert_eq!(catalog.products[2].discount_percentage, 15.0);
    }

    #[test]
    fn load_cleaned_rejects_an_unparseable_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CLEANED_FILE);
        std::fs::write(
            &path,
            "\
product_name,category,rating,discount_percentage,actual_price
a,X,4,10,n/a
b,X,3,20,n/a
",
        )
        .unwrap();

        let err = load_cleaned(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CleanError>(),
            Some(CleanError::NoParseableValues { column: "actual_price" })
        ));
    }
}
