use std::fs;

use product_lens::data::filter::CategoryFilter;
use product_lens::data::loader;
use product_lens::data::view::DashboardView;
use product_lens::data::{clean, summarize, NumberParsing, PriceCategory};

const RAW: &str = "\
product_id,product_name,category,rating,discount_percentage,actual_price
P1,Wireless Mouse,Computers|Accessories,4.5,20,100
P2,HDMI Cable,Electronics|Cables,bad,30,200
P3,Desk Lamp,Home|Lighting,3.0,10,300
P2,HDMI Cable,Electronics|Cables,bad,30,200
P4,Keyboard,Computers|Accessories,4.0,,400
";

#[test]
fn clean_persist_reload_and_export() {
    let dir = tempfile::tempdir().unwrap();
    let raw_path = dir.path().join(loader::RAW_FILE);
    let cleaned_path = dir.path().join(loader::CLEANED_FILE);
    let filtered_path = dir.path().join(loader::FILTERED_FILE);
    fs::write(&raw_path, RAW).unwrap();

    let raw = loader::read_raw(&raw_path).unwrap();
    let cleaned = clean(&raw, NumberParsing::Strict).unwrap();
    assert_eq!(cleaned.stats.raw_duplicates, 1);
    assert_eq!(cleaned.catalog.len(), 4);
    // mean(4.5, 3.0, 4.0) = 3.8333…
    let hdmi = &cleaned.catalog.products[1];
    assert!((hdmi.rating - 11.5 / 3.0).abs() < 1e-12);
    // mean(20, 30, 10) = 20
    assert_eq!(cleaned.catalog.products[3].discount_percentage, 20.0);

    loader::write_cleaned(&cleaned_path, &cleaned.catalog).unwrap();
    let reloaded = loader::load_cleaned(&cleaned_path).unwrap();
    assert_eq!(reloaded, cleaned.catalog);

    let summary = summarize(&reloaded.products);
    assert_eq!(summary.price_threshold, Some(250.0));
    assert_eq!(
        summary.insights.most_products.as_deref(),
        Some("Computers|Accessories")
    );
    // Two High, two Low: the label seen first wins.
    assert_eq!(summary.insights.majority_price, Some(PriceCategory::Low));

    let view = DashboardView::build(
        &reloaded,
        &CategoryFilter::Only("Computers|Accessories".into()),
    );
    loader::write_filtered(&filtered_path, &reloaded, &view).unwrap();
    let exported = fs::read_to_string(&filtered_path).unwrap();
    assert_eq!(
        exported,
        "\
product_id,product_name,category,rating,discount_percentage,actual_price,price_category
P1,Wireless Mouse,Computers|Accessories,4.5,20,100,Low
P4,Keyboard,Computers|Accessories,4,20,400,High
"
    );
}

#[test]
fn cleaning_a_cleaned_file_changes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let raw_path = dir.path().join("raw.csv");
    let once_path = dir.path().join("once.csv");
    let twice_path = dir.path().join("twice.csv");
    fs::write(&raw_path, RAW).unwrap();

    let first = clean(&loader::read_raw(&raw_path).unwrap(), NumberParsing::Strict).unwrap();
    loader::write_cleaned(&once_path, &first.catalog).unwrap();

    let second = clean(&loader::read_raw(&once_path).unwrap(), NumberParsing::Strict).unwrap();
    loader::write_cleaned(&twice_path, &second.catalog).unwrap();

    assert_eq!(second.stats.duplicates_removed(), 0);
    assert_eq!(second.stats.imputed_cells(), 0);
    assert_eq!(
        fs::read_to_string(&once_path).unwrap(),
        fs::read_to_string(&twice_path).unwrap()
    );
}

#[test]
fn missing_input_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = loader::read_raw(&dir.path().join("amazon.csv")).unwrap_err();
    assert!(format!("{err:#}").contains("opening"));
}
