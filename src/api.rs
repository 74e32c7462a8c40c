//! JSON API consumed by the dashboard front ends.
//!
//! Every handler reads the current dataset snapshot and recomputes the
//! requested view in full; nothing here mutates the snapshot except the
//! explicit reload/invalidate endpoints.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use crate::aggregate::{self, ProductSummary};
use crate::filter;
use crate::recommend::{self, RecommendOutcome};
use crate::sentiment::SentimentBreakdown;
use crate::store::{DatasetSnapshot, ReviewStore};
use crate::verdict::Verdict;

pub struct AppState {
    pub store: ReviewStore,
    pub dataset_path: String,
}

/// Round to two decimals for display; core math stays full precision.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Sentiment counts and percentages for one product.
#[derive(Debug, Serialize, ToSchema)]
pub struct SentimentReport {
    pub positive: u64,
    pub neutral: u64,
    pub negative: u64,
    pub positive_pct: f64,
    pub neutral_pct: f64,
    pub negative_pct: f64,
}

impl From<&SentimentBreakdown> for SentimentReport {
    fn from(breakdown: &SentimentBreakdown) -> Self {
        SentimentReport {
            positive: breakdown.positive,
            neutral: breakdown.neutral,
            negative: breakdown.negative,
            positive_pct: round2(breakdown.percent(breakdown.positive)),
            neutral_pct: round2(breakdown.percent(breakdown.neutral)),
            negative_pct: round2(breakdown.percent(breakdown.negative)),
        }
    }
}

/// One product card: summary statistics, verdict and sentiment breakdown.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProductReport {
    #[schema(example = "Kindle Paperwhite")]
    pub product_title: String,
    #[schema(example = "Electronics")]
    pub category: String,
    pub average_rating: f64,
    pub review_count: u64,
    /// Sentiment meter value in [-1, 1].
    pub average_sentiment: f64,
    pub verdict: Verdict,
    pub sentiment: SentimentReport,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductListResponse {
    pub success: bool,
    pub products: Vec<ProductReport>,
    pub message: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ProductQuery {
    /// Category filter; "All" or absent disables category narrowing.
    pub category: Option<String>,
    /// Case-insensitive substring match on the product title.
    pub search: Option<String>,
}

/// Dashboard KPI cards.
#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardStats {
    pub total_products: usize,
    /// Mean of the per-product average ratings.
    pub average_rating: f64,
    pub total_reviews: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StatsResponse {
    pub success: bool,
    pub stats: Option<DashboardStats>,
    pub message: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoriesResponse {
    pub success: bool,
    /// "All" followed by the distinct categories in the dataset.
    pub categories: Vec<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RecommendRequest {
    /// Free-text question, e.g. "best phone?".
    #[schema(example = "best phone?")]
    pub query: Option<String>,
    /// Explicit category filter, used when the query has no keyword hit.
    pub category: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RecommendResponse {
    pub success: bool,
    pub recommendation: Option<ProductReport>,
    /// Category the query resolved to, if any narrowing happened.
    pub resolved_category: Option<String>,
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DatasetStatus {
    pub source: String,
    pub loaded_at: String,
    pub total_reviews: usize,
    pub total_products: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DatasetResponse {
    pub success: bool,
    pub status: Option<DatasetStatus>,
    pub message: String,
}

fn product_report(snapshot: &DatasetSnapshot, summary: &ProductSummary) -> ProductReport {
    let breakdown = aggregate::sentiment_breakdown(
        &snapshot.reviews,
        &summary.product_title,
        &summary.category,
    );
    ProductReport {
        product_title: summary.product_title.clone(),
        category: summary.category.clone(),
        average_rating: round2(summary.average_rating),
        review_count: summary.review_count,
        average_sentiment: round2(summary.average_sentiment),
        verdict: Verdict::from_average_rating(summary.average_rating),
        sentiment: SentimentReport::from(&breakdown),
    }
}

fn dataset_status_of(snapshot: &DatasetSnapshot) -> DatasetStatus {
    DatasetStatus {
        source: snapshot.source.clone(),
        loaded_at: snapshot.loaded_at.clone(),
        total_reviews: snapshot.reviews.len(),
        total_products: snapshot.summaries.len(),
    }
}

const NO_DATASET: &str = "No dataset loaded. POST /dataset/reload to load one.";

/// Non-empty, trimmed form of an optional query argument.
fn cleaned(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[utoipa::path(
    get,
    path = "/products",
    params(ProductQuery),
    responses(
        (status = 200, description = "Filtered product summaries with verdicts and sentiment breakdowns", body = ProductListResponse)
    ),
    tag = "products"
)]
pub async fn list_products(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ProductQuery>,
) -> Result<Json<ProductListResponse>, StatusCode> {
    let Some(snapshot) = state.store.current() else {
        return Ok(Json(ProductListResponse {
            success: false,
            products: Vec::new(),
            message: Some(NO_DATASET.to_string()),
        }));
    };

    let filtered = filter::filter_summaries(
        &snapshot.summaries,
        cleaned(query.category.as_deref()),
        cleaned(query.search.as_deref()),
    );
    let products: Vec<ProductReport> = filtered
        .into_iter()
        .map(|summary| product_report(&snapshot, summary))
        .collect();

    let message = if products.is_empty() {
        Some("No matching products found.".to_string())
    } else {
        None
    };

    Ok(Json(ProductListResponse {
        success: true,
        products,
        message,
    }))
}

#[utoipa::path(
    get,
    path = "/stats",
    responses(
        (status = 200, description = "Dashboard KPI totals", body = StatsResponse)
    ),
    tag = "products"
)]
pub async fn dashboard_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatsResponse>, StatusCode> {
    let Some(snapshot) = state.store.current() else {
        return Ok(Json(StatsResponse {
            success: false,
            stats: None,
            message: Some(NO_DATASET.to_string()),
        }));
    };

    let total_products = snapshot.summaries.len();
    let average_rating = if total_products == 0 {
        0.0
    } else {
        let sum: f64 = snapshot.summaries.iter().map(|s| s.average_rating).sum();
        round2(sum / total_products as f64)
    };

    Ok(Json(StatsResponse {
        success: true,
        stats: Some(DashboardStats {
            total_products,
            average_rating,
            total_reviews: snapshot.reviews.len(),
        }),
        message: None,
    }))
}

#[utoipa::path(
    get,
    path = "/categories",
    responses(
        (status = 200, description = "Category choices for the sidebar filter", body = CategoriesResponse)
    ),
    tag = "products"
)]
pub async fn list_categories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CategoriesResponse>, StatusCode> {
    let Some(snapshot) = state.store.current() else {
        return Ok(Json(CategoriesResponse {
            success: false,
            categories: vec![filter::ALL_CATEGORIES.to_string()],
        }));
    };

    let mut categories = vec![filter::ALL_CATEGORIES.to_string()];
    for summary in &snapshot.summaries {
        if !categories.contains(&summary.category) {
            categories.push(summary.category.clone());
        }
    }

    Ok(Json(CategoriesResponse {
        success: true,
        categories,
    }))
}

#[utoipa::path(
    post,
    path = "/recommend",
    request_body = RecommendRequest,
    responses(
        (status = 200, description = "Best-rated product for the question, or an explicit no-match outcome", body = RecommendResponse)
    ),
    tag = "assistant"
)]
pub async fn recommend_product(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RecommendRequest>,
) -> Result<Json<RecommendResponse>, StatusCode> {
    let Some(snapshot) = state.store.current() else {
        return Ok(Json(RecommendResponse {
            success: false,
            recommendation: None,
            resolved_category: None,
            message: NO_DATASET.to_string(),
        }));
    };

    let outcome = recommend::recommend(
        &snapshot.summaries,
        cleaned(request.category.as_deref()),
        cleaned(request.query.as_deref()),
    );

    let response = match outcome {
        RecommendOutcome::Match {
            product,
            resolved_category,
        } => RecommendResponse {
            success: true,
            message: format!(
                "Recommended product: {} ({} ⭐ {:.2})",
                product.product_title, product.category, product.average_rating
            ),
            recommendation: Some(product_report(&snapshot, product)),
            resolved_category,
        },
        RecommendOutcome::NoCandidates { resolved_category } => RecommendResponse {
            success: false,
            recommendation: None,
            message: match resolved_category.as_deref() {
                Some(category) => format!("No products found in the {} category.", category),
                None => "No products available to recommend.".to_string(),
            },
            resolved_category,
        },
    };

    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/dataset/status",
    responses(
        (status = 200, description = "Active dataset snapshot info", body = DatasetResponse)
    ),
    tag = "dataset"
)]
pub async fn dataset_status(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DatasetResponse>, StatusCode> {
    match state.store.current() {
        Some(snapshot) => Ok(Json(DatasetResponse {
            success: true,
            status: Some(dataset_status_of(&snapshot)),
            message: "Dataset loaded".to_string(),
        })),
        None => Ok(Json(DatasetResponse {
            success: false,
            status: None,
            message: NO_DATASET.to_string(),
        })),
    }
}

#[utoipa::path(
    post,
    path = "/dataset/reload",
    responses(
        (status = 200, description = "Reload the configured dataset source", body = DatasetResponse)
    ),
    tag = "dataset"
)]
pub async fn reload_dataset(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DatasetResponse>, StatusCode> {
    match state.store.load(&state.dataset_path) {
        Ok(snapshot) => Ok(Json(DatasetResponse {
            success: true,
            status: Some(dataset_status_of(&snapshot)),
            message: "Dataset reloaded".to_string(),
        })),
        Err(e) => {
            eprintln!("❌ Dataset reload failed: {:#}", e);
            Ok(Json(DatasetResponse {
                success: false,
                status: None,
                message: format!("Reload failed: {}", e),
            }))
        }
    }
}

#[utoipa::path(
    delete,
    path = "/dataset",
    responses(
        (status = 200, description = "Drop the active dataset snapshot", body = DatasetResponse)
    ),
    tag = "dataset"
)]
pub async fn invalidate_dataset(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DatasetResponse>, StatusCode> {
    state.store.invalidate();
    Ok(Json(DatasetResponse {
        success: true,
        status: None,
        message: "Dataset cache invalidated".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::Review;

    fn snapshot() -> DatasetSnapshot {
        let reviews = vec![
            Review {
                product_title: "Kindle".to_string(),
                category: "Electronics".to_string(),
                rating: 5.0,
                review_text: None,
            },
            Review {
                product_title: "Kindle".to_string(),
                category: "Electronics".to_string(),
                rating: 2.0,
                review_text: None,
            },
            Review {
                product_title: "Kindle".to_string(),
                category: "Electronics".to_string(),
                rating: 5.0,
                review_text: None,
            },
        ];
        let summaries = aggregate::aggregate(&reviews);
        DatasetSnapshot {
            source: "test.json".to_string(),
            loaded_at: "2026-01-01T00:00:00Z".to_string(),
            reviews,
            summaries,
        }
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(3.333333), 3.33);
        assert_eq!(round2(2.0 / 3.0), 0.67);
        assert_eq!(round2(4.0), 4.0);
    }

    #[test]
    fn test_product_report_rounds_and_classifies() {
        let snapshot = snapshot();
        let report = product_report(&snapshot, &snapshot.summaries[0]);
        assert_eq!(report.product_title, "Kindle");
        assert_eq!(report.average_rating, 4.0);
        assert_eq!(report.review_count, 3);
        assert_eq!(report.average_sentiment, 0.33);
        assert_eq!(report.verdict, Verdict::StrongBuy);
        assert_eq!(report.sentiment.positive, 2);
        assert_eq!(report.sentiment.negative, 1);
        assert_eq!(report.sentiment.positive_pct, 66.67);
    }

    #[test]
    fn test_cleaned_drops_blank_values() {
        assert_eq!(cleaned(Some("  Books ")), Some("Books"));
        assert_eq!(cleaned(Some("   ")), None);
        assert_eq!(cleaned(None), None);
    }
}
