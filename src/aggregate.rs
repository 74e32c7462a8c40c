//! Product-level aggregation over the raw review table.
//!
//! Groups reviews by the composite (product_title, category) key and
//! derives the summary statistics the dashboard renders per product card.
//! Summaries are recomputed from scratch on every dataset load; there is
//! no incremental update path.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;

use crate::sentiment::{Sentiment, SentimentBreakdown};

fn default_product_title() -> String {
    "Unknown Product".to_string()
}

/// One user-submitted review row from the dataset.
#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct Review {
    /// Product name. Datasets exported with a bare `title` column are
    /// accepted; rows missing the column entirely get a placeholder.
    #[serde(alias = "title", default = "default_product_title")]
    pub product_title: String,
    /// Category label such as "Books" or "Electronics". Older exports
    /// name this column `domain`.
    #[serde(alias = "domain")]
    pub category: String,
    /// Star rating on the 1-5 scale.
    pub rating: f64,
    /// Free-text review body. Unused by aggregation, carried for display.
    #[serde(alias = "reviewText", default)]
    pub review_text: Option<String>,
}

/// Aggregate statistics for one (product_title, category) group.
#[derive(Debug, Serialize, Clone, ToSchema)]
pub struct ProductSummary {
    pub product_title: String,
    pub category: String,
    /// Arithmetic mean of the group's ratings.
    pub average_rating: f64,
    /// Group size, always >= 1.
    pub review_count: u64,
    /// Mean sentiment score over the group, in [-1, 1].
    pub average_sentiment: f64,
}

struct GroupStats {
    rating_sum: f64,
    score_sum: i64,
    count: u64,
}

/// Fold the review table into per-product summaries.
///
/// Products sharing a title across different categories stay separate
/// groups. Output order follows each group's first appearance in the
/// input; an empty input yields an empty output.
pub fn aggregate(reviews: &[Review]) -> Vec<ProductSummary> {
    let mut order: Vec<(String, String)> = Vec::new();
    let mut groups: HashMap<(String, String), GroupStats> = HashMap::new();

    for review in reviews {
        let key = (review.product_title.clone(), review.category.clone());
        let stats = groups.entry(key.clone()).or_insert_with(|| {
            order.push(key);
            GroupStats {
                rating_sum: 0.0,
                score_sum: 0,
                count: 0,
            }
        });
        stats.rating_sum += review.rating;
        stats.score_sum += i64::from(Sentiment::from_rating(review.rating).score());
        stats.count += 1;
    }

    order
        .into_iter()
        .map(|key| {
            let stats = &groups[&key];
            let n = stats.count as f64;
            ProductSummary {
                product_title: key.0,
                category: key.1,
                average_rating: stats.rating_sum / n,
                review_count: stats.count,
                average_sentiment: stats.score_sum as f64 / n,
            }
        })
        .collect()
}

/// Sentiment tallies for one product, recomputed from the raw table.
/// Matches on the same composite key the aggregation groups by.
pub fn sentiment_breakdown(
    reviews: &[Review],
    product_title: &str,
    category: &str,
) -> SentimentBreakdown {
    let mut breakdown = SentimentBreakdown::default();
    for review in reviews {
        if review.product_title == product_title && review.category == category {
            breakdown.record(Sentiment::from_rating(review.rating));
        }
    }
    breakdown
}
