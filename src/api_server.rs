// Axum server module
//
// Purpose: HTML pages for the content site plus a JSON mirror of the same
// page data, both served from one ViewModelAssembler.

#[cfg(feature = "api")]
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};

#[cfg(feature = "api")]
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    services::ServeDir,
    trace::TraceLayer,
};

#[cfg(feature = "api")]
use std::sync::Arc;

#[cfg(feature = "api")]
use crate::config::{AssemblerConfig, SiteConfig};

#[cfg(feature = "api")]
use crate::content::{ContentClient, DeliveryClient};

#[cfg(feature = "api")]
use crate::error::ContentError;

#[cfg(feature = "api")]
use crate::site::{ArticleDetail, HomePageData, TopicArticles, TopicSummary, ViewModelAssembler};

#[cfg(feature = "api")]
use crate::web::handlers::pages;

// ============================================================================
// Application State
// ============================================================================

#[cfg(feature = "api")]
#[derive(Clone)]
pub struct AppState {
    pub assembler: Arc<ViewModelAssembler>,
    pub public_dir: String,
}

#[cfg(feature = "api")]
impl AppState {
    /// State backed by the HTTP delivery client. The client is built once
    /// here and shared by every request.
    pub fn new(config: &SiteConfig) -> anyhow::Result<Self> {
        tracing::info!("Initializing content client ({})...", config.client.api_base());
        let client: Arc<dyn ContentClient> = Arc::new(DeliveryClient::new(config.client.clone())?);
        Ok(Self::with_client(client, config.assembler.clone(), &config.public_dir))
    }

    /// State over any client (used by tests with the in-memory client).
    pub fn with_client(
        client: Arc<dyn ContentClient>,
        assembler: AssemblerConfig,
        public_dir: &str,
    ) -> Self {
        tracing::debug!(client = client.name(), "building view-model assembler");
        Self {
            assembler: Arc::new(ViewModelAssembler::new(client, assembler)),
            public_dir: public_dir.to_string(),
        }
    }
}

// ============================================================================
// Router
// ============================================================================

#[cfg(feature = "api")]
pub fn create_router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.public_dir);

    Router::new()
        // Health check
        .route("/health", get(health_check))

        // Pages (HTML)
        .route("/", get(pages::topics_page))
        .route("/articles/:topic_id", get(pages::articles_page))
        .route("/article/:article_id", get(pages::article_page))

        // Page data (JSON)
        .route("/api/home", get(get_home))
        .route("/api/topics/:topic_id", get(get_topic))
        .route("/api/topics/:topic_id/articles", get(get_topic_articles))
        .route("/api/articles/:article_id", get(get_article))

        // Stylesheet and other static assets
        .nest_service("/public", static_files)

        .fallback(pages::not_found_page)

        // Middleware (applied in reverse order)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// JSON Handlers
// ============================================================================

#[cfg(feature = "api")]
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

#[cfg(feature = "api")]
async fn get_home(State(state): State<AppState>) -> Result<Json<HomePageData>, AppError> {
    Ok(Json(state.assembler.home_page_data().await?))
}

#[cfg(feature = "api")]
async fn get_topic(
    State(state): State<AppState>,
    Path(topic_id): Path<String>,
) -> Result<Json<TopicSummary>, AppError> {
    Ok(Json(state.assembler.topic(&topic_id).await?))
}

#[cfg(feature = "api")]
async fn get_topic_articles(
    State(state): State<AppState>,
    Path(topic_id): Path<String>,
) -> Result<Json<TopicArticles>, AppError> {
    Ok(Json(state.assembler.topic_articles(&topic_id).await?))
}

#[cfg(feature = "api")]
async fn get_article(
    State(state): State<AppState>,
    Path(article_id): Path<String>,
) -> Result<Json<ArticleDetail>, AppError> {
    Ok(Json(state.assembler.article_detail(&article_id).await?))
}

// ============================================================================
// Error Handling
// ============================================================================

/// HTTP status for a failed page operation.
#[cfg(feature = "api")]
pub fn status_for(err: &ContentError) -> StatusCode {
    match err {
        ContentError::NotFound(_) => StatusCode::NOT_FOUND,
        ContentError::Validation(_) => StatusCode::BAD_REQUEST,
        ContentError::Upstream(_) => StatusCode::BAD_GATEWAY,
    }
}

#[cfg(feature = "api")]
#[derive(Debug)]
pub struct AppError(ContentError);

#[cfg(feature = "api")]
impl From<ContentError> for AppError {
    fn from(err: ContentError) -> Self {
        AppError(err)
    }
}

#[cfg(feature = "api")]
impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = status_for(&self.0);

        // Upstream detail (URLs, response bodies) stays in the logs
        let message = match self.0 {
            ContentError::Upstream(_) => "content could not be loaded".to_string(),
            ref other => other.to_string(),
        };
        let body = Json(serde_json::json!({ "error": message }));

        (status, body).into_response()
    }
}
