//! Category and search narrowing over the aggregated product view.

use crate::aggregate::ProductSummary;

/// Sentinel category value meaning "no category narrowing".
pub const ALL_CATEGORIES: &str = "All";

/// Apply the sidebar filters: exact category match AND case-insensitive
/// substring match on the product title. Both filters are optional; the
/// input order is preserved. An empty result is a valid state the caller
/// renders as "no matching products".
pub fn filter_summaries<'a>(
    summaries: &'a [ProductSummary],
    category: Option<&str>,
    search: Option<&str>,
) -> Vec<&'a ProductSummary> {
    let category = category
        .map(str::trim)
        .filter(|c| !c.is_empty() && *c != ALL_CATEGORIES);
    let needle = search
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    summaries
        .iter()
        .filter(|summary| category.map_or(true, |c| summary.category == c))
        .filter(|summary| {
            needle
                .as_deref()
                .map_or(true, |n| summary.product_title.to_lowercase().contains(n))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(title: &str, category: &str, rating: f64) -> ProductSummary {
        ProductSummary {
            product_title: title.to_string(),
            category: category.to_string(),
            average_rating: rating,
            review_count: 1,
            average_sentiment: 0.0,
        }
    }

    fn catalog() -> Vec<ProductSummary> {
        vec![
            summary("Kindle Paperwhite", "Electronics", 4.5),
            summary("War and Peace", "Books", 4.8),
            summary("Kindle Cover", "Clothing", 3.0),
            summary("Atlas of the World", "Books", 4.0),
        ]
    }

    #[test]
    fn test_category_filter_exact_match() {
        let catalog = catalog();
        let filtered = filter_summaries(&catalog, Some("Books"), None);
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|s| s.category == "Books"));
        // Input order survives the filter.
        assert_eq!(filtered[0].product_title, "War and Peace");
        assert_eq!(filtered[1].product_title, "Atlas of the World");
    }

    #[test]
    fn test_all_sentinel_disables_category_filter() {
        let catalog = catalog();
        let filtered = filter_summaries(&catalog, Some("All"), None);
        assert_eq!(filtered.len(), catalog.len());
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let catalog = catalog();
        let filtered = filter_summaries(&catalog, Some("All"), Some("kindle"));
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].product_title, "Kindle Paperwhite");
        assert_eq!(filtered[1].product_title, "Kindle Cover");
    }

    #[test]
    fn test_category_and_search_combine_as_and() {
        let catalog = catalog();
        let filtered = filter_summaries(&catalog, Some("Electronics"), Some("KINDLE"));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].product_title, "Kindle Paperwhite");
    }

    #[test]
    fn test_empty_and_whitespace_search_means_no_filter() {
        let catalog = catalog();
        assert_eq!(filter_summaries(&catalog, None, Some("")).len(), 4);
        assert_eq!(filter_summaries(&catalog, None, Some("   ")).len(), 4);
    }

    #[test]
    fn test_no_match_yields_empty_result() {
        let catalog = catalog();
        let filtered = filter_summaries(&catalog, Some("Books"), Some("kindle"));
        assert!(filtered.is_empty());
    }
}
