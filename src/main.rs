mod aggregate;
mod api;
mod filter;
mod recommend;
mod sentiment;
mod store;
mod verdict;

use axum::{
    routing::{delete, get, post},
    Router,
};
use dotenv::dotenv;
use std::env;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::list_products,
        api::dashboard_stats,
        api::list_categories,
        api::recommend_product,
        api::dataset_status,
        api::reload_dataset,
        api::invalidate_dataset
    ),
    components(
        schemas(
            api::ProductListResponse,
            api::ProductReport,
            api::SentimentReport,
            api::StatsResponse,
            api::DashboardStats,
            api::CategoriesResponse,
            api::RecommendRequest,
            api::RecommendResponse,
            api::DatasetResponse,
            api::DatasetStatus,
            crate::sentiment::Sentiment,
            crate::verdict::Verdict
        )
    ),
    tags(
        (name = "products", description = "Product Summary API"),
        (name = "assistant", description = "Recommendation Assistant API"),
        (name = "dataset", description = "Dataset Management API")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let dataset_path =
        env::var("DATASET_PATH").unwrap_or_else(|_| "master_dataset.json".to_string());

    let state = Arc::new(api::AppState {
        store: store::ReviewStore::new(),
        dataset_path: dataset_path.clone(),
    });

    state.store.load(&dataset_path)?;

    let app = Router::new()
        .merge(SwaggerUi::new("/review-intelligence-swagger").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/products", get(api::list_products))
        .route("/stats", get(api::dashboard_stats))
        .route("/categories", get(api::list_categories))
        .route("/recommend", post(api::recommend_product))
        // Dataset lifecycle endpoints
        .route("/dataset/status", get(api::dataset_status))
        .route("/dataset/reload", post(api::reload_dataset))
        .route("/dataset", delete(api::invalidate_dataset))
        .nest_service("/", ServeDir::new("static")) // Serve Dashboard
        .layer(CorsLayer::permissive())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
    println!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
