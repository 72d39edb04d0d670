use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use serde::Serialize;

use super::model::{mean, PriceCategory, Product};

/// How many categories / products the ranked aggregates keep.
pub const TOP_N: usize = 10;
/// Number of equal-width bins in the rating histogram.
pub const RATING_BINS: usize = 10;

// ---------------------------------------------------------------------------
// Aggregate types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// Mean rating and discount of one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryStats {
    pub category: String,
    pub mean_rating: f64,
    pub mean_discount: f64,
    pub products: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Equal-width histogram. Bins are half-open except the last, which also
/// holds the maximum.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Histogram {
    pub bins: Vec<HistogramBin>,
}

impl Histogram {
    pub fn new(values: &[f64], bins: usize) -> Self {
        let (Some(min), Some(max)) = (
            values.iter().copied().reduce(f64::min),
            values.iter().copied().reduce(f64::max),
        ) else {
            return Histogram::default();
        };
        if bins == 0 {
            return Histogram::default();
        }

        // A single distinct value gets a unit-wide range around it.
        let (lo, hi) = if min == max {
            (min - 0.5, max + 0.5)
        } else {
            (min, max)
        };
        let width = (hi - lo) / bins as f64;

        let mut counts = vec![0usize; bins];
        for &v in values {
            let idx = (((v - lo) / width) as usize).min(bins - 1);
            counts[idx] += 1;
        }

        let bins = counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| HistogramBin {
                lower: lo + width * i as f64,
                upper: if i + 1 == bins { hi } else { lo + width * (i + 1) as f64 },
                count,
            })
            .collect();
        Histogram { bins }
    }

    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceCount {
    pub price_category: PriceCategory,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopRated {
    pub product_name: String,
    pub category: String,
    pub rating: f64,
}

/// The headline findings printed after cleaning and shown on the dashboard.
/// Every field is empty for an empty dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Insights {
    pub most_products: Option<String>,
    pub highest_rating: Option<String>,
    pub highest_discount: Option<String>,
    pub top_rated: Vec<TopRated>,
    pub majority_price: Option<PriceCategory>,
}

impl Insights {
    /// The five numbered insight lines. The top-rated entry spans several
    /// physical lines.
    pub fn lines(&self) -> Vec<String> {
        let or_na = |v: &Option<String>| v.clone().unwrap_or_else(|| "n/a".to_string());

        let mut top = String::from("4. Top-rated products:");
        if self.top_rated.is_empty() {
            top.push_str(" n/a");
        }
        for t in &self.top_rated {
            top.push_str(&format!("\n   {} | {} | {}", t.product_name, t.category, t.rating));
        }

        vec![
            format!("1. Category with most products: {}", or_na(&self.most_products)),
            format!("2. Category with highest average rating: {}", or_na(&self.highest_rating)),
            format!(
                "3. Category with highest average discount: {}",
                or_na(&self.highest_discount)
            ),
            top,
            format!(
                "5. Majority of products fall under {} price category",
                self.majority_price.map_or("n/a", PriceCategory::as_str)
            ),
        ]
    }
}

/// Every aggregate computed over one set of products.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    /// Top categories by product count, descending.
    pub category_counts: Vec<CategoryCount>,
    /// Per-category means over all categories, ordered by name.
    pub category_summary: Vec<CategoryStats>,
    pub rating_distribution: Histogram,
    /// Highest rated products, descending; ties keep input order.
    pub top_products: Vec<Product>,
    /// Products per price label, descending.
    pub price_counts: Vec<PriceCount>,
    /// Price above which a product is `High`.
    pub price_threshold: Option<f64>,
    pub insights: Insights,
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Aggregate `products`, classifying prices against their own mean.
pub fn summarize(products: &[Product]) -> Summary {
    let threshold = mean(products.iter().map(|p| p.actual_price));
    build(products, threshold)
}

/// Aggregate `products`, classifying prices against an externally fixed
/// threshold (the full dataset's mean when `products` is a filtered subset).
pub fn summarize_with_threshold(products: &[Product], threshold: f64) -> Summary {
    build(products, Some(threshold))
}

/// `price_category` of each product, in input order.
pub fn price_categories(products: &[Product], threshold: f64) -> Vec<PriceCategory> {
    products
        .iter()
        .map(|p| PriceCategory::classify(p.actual_price, threshold))
        .collect()
}

fn build(products: &[Product], threshold: Option<f64>) -> Summary {
    let category_counts: Vec<CategoryCount> =
        value_counts(products.iter().map(|p| p.category.as_str()))
            .into_iter()
            .take(TOP_N)
            .map(|(category, count)| CategoryCount {
                category: category.to_string(),
                count,
            })
            .collect();

    let category_summary = category_summary(products);

    let ratings: Vec<f64> = products.iter().map(|p| p.rating).collect();
    let rating_distribution = Histogram::new(&ratings, RATING_BINS);

    let top_products = top_products(products, TOP_N);

    let price_counts: Vec<PriceCount> = match threshold {
        Some(t) => value_counts(price_categories(products, t).into_iter())
            .into_iter()
            .map(|(price_category, count)| PriceCount {
                price_category,
                count,
            })
            .collect(),
        None => Vec::new(),
    };

    let insights = Insights {
        most_products: category_counts.first().map(|c| c.category.clone()),
        highest_rating: argmax(&category_summary, |s| s.mean_rating),
        highest_discount: argmax(&category_summary, |s| s.mean_discount),
        top_rated: top_products
            .iter()
            .map(|p| TopRated {
                product_name: p.product_name.clone(),
                category: p.category.clone(),
                rating: p.rating,
            })
            .collect(),
        majority_price: price_counts.first().map(|c| c.price_category),
    };

    Summary {
        category_counts,
        category_summary,
        rating_distribution,
        top_products,
        price_counts,
        price_threshold: threshold,
        insights,
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Occurrences per distinct key, count descending, ties in first-seen order.
fn value_counts<K, I>(keys: I) -> Vec<(K, usize)>
where
    K: Eq + Hash + Clone,
    I: Iterator<Item = K>,
{
    let mut slots: HashMap<K, usize> = HashMap::new();
    let mut counts: Vec<(K, usize)> = Vec::new();
    for key in keys {
        match slots.get(&key) {
            Some(&i) => counts[i].1 += 1,
            None => {
                slots.insert(key.clone(), counts.len());
                counts.push((key, 1));
            }
        }
    }
    // Stable sort keeps first-seen order among equal counts.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

fn category_summary(products: &[Product]) -> Vec<CategoryStats> {
    let mut groups: BTreeMap<&str, (f64, f64, usize)> = BTreeMap::new();
    for p in products {
        let entry = groups.entry(p.category.as_str()).or_default();
        entry.0 += p.rating;
        entry.1 += p.discount_percentage;
        entry.2 += 1;
    }
    groups
        .into_iter()
        .map(|(category, (rating, discount, n))| CategoryStats {
            category: category.to_string(),
            mean_rating: rating / n as f64,
            mean_discount: discount / n as f64,
            products: n,
        })
        .collect()
}

fn top_products(products: &[Product], n: usize) -> Vec<Product> {
    let mut sorted: Vec<&Product> = products.iter().collect();
    sorted.sort_by(|a, b| b.rating.total_cmp(&a.rating));
    sorted.into_iter().take(n).cloned().collect()
}

/// Category with the largest value; the first one in name order wins ties.
fn argmax(stats: &[CategoryStats], value: impl Fn(&CategoryStats) -> f64) -> Option<String> {
    let mut best: Option<&CategoryStats> = None;
    for s in stats {
        if best.map_or(true, |b| value(s) > value(b)) {
            best = Some(s);
        }
    }
    best.map(|s| s.category.clone())
}
