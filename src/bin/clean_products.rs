use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use product_lens::data::loader::{self, CLEANED_FILE, RAW_FILE};
use product_lens::data::{clean, summarize, CleanStats, NumberParsing, RawTable, Summary};

const PREVIEW_ROWS: usize = 5;

/// Clean a product export and print exploratory insights.
#[derive(Parser, Debug)]
#[command(name = "clean-products", version, about)]
struct Args {
    /// Raw export to read
    #[arg(default_value = RAW_FILE)]
    input: PathBuf,

    /// Where to write the cleaned dataset
    #[arg(short, long, default_value = CLEANED_FILE)]
    output: PathBuf,

    /// Strip currency symbols, thousands separators and '%' before parsing numbers
    #[arg(long)]
    lenient_numbers: bool,

    /// Print one JSON report instead of text tables
    #[arg(long)]
    json: bool,
}

/// Everything `--json` prints, as a single document.
#[derive(Serialize)]
struct Report<'a> {
    output: &'a Path,
    stats: &'a CleanStats,
    summary: &'a Summary,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let parsing = if args.lenient_numbers {
        NumberParsing::Lenient
    } else {
        NumberParsing::Strict
    };

    let raw = loader::read_raw(&args.input)?;
    let cleaned = clean(&raw, parsing)
        .with_context(|| format!("cleaning {}", args.input.display()))?;
    let summary = summarize(&cleaned.catalog.products);

    loader::write_cleaned(&args.output, &cleaned.catalog)?;

    if args.json {
        let report = Report {
            output: &args.output,
            stats: &cleaned.stats,
            summary: &summary,
        };
        let out = serde_json::to_string_pretty(&report).context("serializing report")?;
        println!("{out}");
        return Ok(());
    }

    print_overview(&raw, &cleaned.stats);
    print_aggregates(&summary);
    println!("Cleaned dataset saved as '{}'", args.output.display());

    println!("\nINSIGHTS:");
    for line in summary.insights.lines() {
        println!("{line}");
    }
    Ok(())
}

fn print_overview(raw: &RawTable, stats: &CleanStats) {
    let headers = &raw.schema.headers;
    println!("Dataset Info:");
    println!("  rows: {}", stats.rows_read);
    println!("  columns ({}): {}", headers.len(), headers.join(", "));

    println!("\nFirst {PREVIEW_ROWS} rows:");
    println!("  {}", headers.join(" | "));
    for row in raw.rows.iter().take(PREVIEW_ROWS) {
        println!("  {}", row.join(" | "));
    }
    println!();

    println!(
        "  duplicates removed: {} exact, {} after normalization",
        stats.raw_duplicates, stats.normalized_duplicates
    );
    for c in &stats.imputations {
        match c.mean {
            Some(mean) => println!("  {}: {} imputed with mean {mean:.4}", c.column, c.imputed),
            None => println!("  {}: no values", c.column),
        }
    }
}

fn print_aggregates(summary: &Summary) {
    println!("\nTop Categories:");
    for c in &summary.category_counts {
        println!("  {:>6}  {}", c.count, c.category);
    }

    println!("\nCategory Summary (Average Rating & Discount):");
    let mut by_rating: Vec<_> = summary.category_summary.iter().collect();
    by_rating.sort_by(|a, b| b.mean_rating.total_cmp(&a.mean_rating));
    for s in by_rating {
        println!(
            "  {:>8.4}  {:>8.2}  {}",
            s.mean_rating, s.mean_discount, s.category
        );
    }

    println!("\nRating Distribution:");
    for bin in &summary.rating_distribution.bins {
        println!("  [{:>6.3}, {:>6.3}]  {}", bin.lower, bin.upper, bin.count);
    }

    println!("\nTop 10 Products by Rating:");
    for p in &summary.top_products {
        println!(
            "  {:>4}  {:>10}  {} ({})",
            p.rating, p.actual_price, p.product_name, p.category
        );
    }

    println!("\nPrice Category Distribution:");
    let total: usize = summary.price_counts.iter().map(|c| c.count).sum();
    for c in &summary.price_counts {
        let pct = 100.0 * c.count as f64 / total as f64;
        println!("  {:<5} {:>6}  ({pct:.1}%)", c.price_category.as_str(), c.count);
    }
    println!();
}
