use std::collections::HashMap;

use super::filter::{filtered_indices, CategoryFilter};
use super::model::{Catalog, PriceCategory, Product};
use super::summary::{
    summarize, summarize_with_threshold, CategoryCount, CategoryStats, Histogram, Insights,
    PriceCount,
};

/// Everything the dashboard draws for one category selection.
///
/// Category rankings, category means and the insights always describe the
/// whole catalog, whatever the selection. The rating histogram, scatter,
/// top products and price split describe only the selected rows, with prices
/// still classified against the whole catalog's mean.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardView {
    pub filter: CategoryFilter,
    /// Catalog indices of the selected products.
    pub visible: Vec<usize>,

    // -- whole catalog --
    pub category_counts: Vec<CategoryCount>,
    pub category_summary: Vec<CategoryStats>,
    pub insights: Insights,
    pub price_threshold: Option<f64>,

    // -- selected rows --
    pub rating_distribution: Histogram,
    pub top_products: Vec<Product>,
    pub price_counts: Vec<PriceCount>,
    /// `[discount_percentage, rating]` points, one series per category.
    pub scatter: Vec<ScatterSeries>,
}

/// Scatter points of one category, in catalog order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScatterSeries {
    pub category: String,
    pub points: Vec<[f64; 2]>,
}

impl DashboardView {
    pub fn build(catalog: &Catalog, filter: &CategoryFilter) -> Self {
        let full = summarize(&catalog.products);
        let threshold = catalog.mean_price();

        let visible = filtered_indices(catalog, filter);
        let selected: Vec<Product> = visible
            .iter()
            .map(|&i| catalog.products[i].clone())
            .collect();
        let subset = match threshold {
            Some(threshold) => summarize_with_threshold(&selected, threshold),
            None => summarize(&selected),
        };
        let scatter = scatter_series(&selected);

        log::debug!(
            "Built view for '{}': {} of {} products",
            filter.label(),
            visible.len(),
            catalog.len()
        );

        DashboardView {
            filter: filter.clone(),
            visible,
            category_counts: full.category_counts,
            category_summary: full.category_summary,
            insights: full.insights,
            price_threshold: threshold,
            rating_distribution: subset.rating_distribution,
            top_products: subset.top_products,
            price_counts: subset.price_counts,
            scatter,
        }
    }

    /// Selected products in catalog order.
    pub fn products<'a>(&'a self, catalog: &'a Catalog) -> impl Iterator<Item = &'a Product> + 'a {
        self.visible.iter().map(move |&i| &catalog.products[i])
    }

    /// `price_category` of a product under this view's threshold.
    pub fn price_category(&self, product: &Product) -> PriceCategory {
        PriceCategory::classify(product.actual_price, self.price_threshold.unwrap_or(f64::INFINITY))
    }
}

fn scatter_series(products: &[Product]) -> Vec<ScatterSeries> {
    let mut series: Vec<ScatterSeries> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for p in products {
        let point = [p.discount_percentage, p.rating];
        match index.get(p.category.as_str()) {
            Some(&i) => series[i].points.push(point),
            None => {
                index.insert(&p.category, series.len());
                series.push(ScatterSeries {
                    category: p.category.clone(),
                    points: vec![point],
                });
            }
        }
    }
    series
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::clean::{clean, tests::raw, NumberParsing};

    fn catalog() -> Catalog {
        clean(
            &raw(&[
                ["a1", "A", "5", "50", "100"],
                ["a2", "A", "4", "40", "150"],
                ["a3", "A", "3", "30", "110"],
                ["b1", "B", "2", "90", "500"],
                ["b2", "B", "1", "80", "140"],
            ]),
            NumberParsing::Strict,
        )
        .unwrap()
        .catalog
    }

    #[test]
    fn category_aggregates_ignore_the_filter() {
        let catalog = catalog();
        let all = DashboardView::build(&catalog, &CategoryFilter::All);
        let only_b = DashboardView::build(&catalog, &CategoryFilter::Only("B".into()));

        assert_eq!(only_b.category_counts, all.category_counts);
        assert_eq!(only_b.category_summary, all.category_summary);
        assert_eq!(only_b.insights, all.insights);
        assert_eq!(only_b.insights.most_products.as_deref(), Some("A"));
    }

    #[test]
    fn charts_follow_the_filter() {
        let catalog = catalog();
        let only_b = DashboardView::build(&catalog, &CategoryFilter::Only("B".into()));

        assert_eq!(only_b.visible, vec![3, 4]);
        assert_eq!(only_b.rating_distribution.total(), 2);
        let names: Vec<&str> = only_b
            .top_products
            .iter()
            .map(|p| p.product_name.as_str())
            .collect();
        assert_eq!(names, vec!["b1", "b2"]);
    }

    #[test]
    fn filtered_prices_use_the_full_mean() {
        // Full mean price is 1000 / 5 = 200. Against A's own mean of 120,
        // a2 (150) would have been High.
        let catalog = catalog();
        let only_a = DashboardView::build(&catalog, &CategoryFilter::Only("A".into()));

        assert_eq!(only_a.price_threshold, Some(200.0));
        assert_eq!(
            only_a.price_counts,
            vec![PriceCount {
                price_category: PriceCategory::Low,
                count: 3
            }]
        );
        let a2 = &catalog.products[1];
        assert_eq!(only_a.price_category(a2), PriceCategory::Low);
    }

    #[test]
    fn scatter_groups_selected_points_by_category() {
        let catalog = catalog();
        let all = DashboardView::build(&catalog, &CategoryFilter::All);

        let categories: Vec<&str> = all.scatter.iter().map(|s| s.category.as_str()).collect();
        assert_eq!(categories, vec!["A", "B"]);
        assert_eq!(all.scatter[1].points, vec![[90.0, 2.0], [80.0, 1.0]]);

        let only_a = DashboardView::build(&catalog, &CategoryFilter::Only("A".into()));
        assert_eq!(only_a.scatter.len(), 1);
        assert_eq!(only_a.scatter[0].points.len(), 3);
    }
}
