use anyhow::{Context, Result};
use axum::{extract::{Query, State}, http::{HeaderValue, StatusCode}, routing::get, Json, Router};
use revindex::persist::{load_index, IndexPaths};
use revindex::store::Store;
use revindex::InvertedIndex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Deserialize)]
pub struct FindParams {
    #[serde(default)]
    pub phrase: String,
}

#[derive(Serialize)]
pub struct FindResponse {
    pub phrase: String,
    pub took_s: f64,
    /// Number of titles with at least one hit.
    pub total_hits: usize,
    pub results: HashMap<String, usize>,
}

/// Where queries are answered from.
pub enum Backend {
    Memory(InvertedIndex),
    Store(Store),
}

impl Backend {
    pub fn load_index<P: AsRef<Path>>(index_dir: P) -> Result<Self> {
        let dir = index_dir.as_ref();
        let index = load_index(&IndexPaths::new(dir))
            .with_context(|| format!("cannot load index from {}", dir.display()))?;
        Ok(Backend::Memory(index))
    }

    pub fn open_store<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let store = Store::open(path).with_context(|| format!("cannot open store {}", path.display()))?;
        Ok(Backend::Store(store))
    }

    pub fn find(&self, phrase: &str) -> revindex::Result<HashMap<String, usize>> {
        match self {
            Backend::Memory(index) => Ok(index.find(phrase)),
            Backend::Store(store) => store.find(phrase),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<Backend>,
}

pub fn build_app(backend: Backend) -> Router {
    let app_state = AppState { backend: Arc::new(backend) };

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/find", get(find_handler))
        .with_state(app_state)
        .layer(cors_layer(std::env::var("CORS_ALLOW_ORIGIN").ok().as_deref()))
        .layer(TraceLayer::new_for_http())
}

/// Restrict CORS to a comma-separated origin list; unset, empty or
/// unparsable lists allow any origin.
pub fn cors_layer(allowed: Option<&str>) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| s.parse().ok())
        .collect();
    let allow = if origins.is_empty() { AllowOrigin::any() } else { AllowOrigin::list(origins) };
    CorsLayer::new().allow_origin(allow).allow_methods(Any).allow_headers(Any)
}

pub async fn find_handler(
    State(state): State<AppState>,
    Query(params): Query<FindParams>,
) -> Result<Json<FindResponse>, (StatusCode, String)> {
    let start = std::time::Instant::now();
    let results = state.backend.find(&params.phrase).map_err(|err| {
        tracing::error!(phrase = %params.phrase, error = %err, "find failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "cannot search phrase".to_string())
    })?;
    let elapsed = start.elapsed();
    tracing::info!(phrase = %params.phrase, total_hits = results.len(), "find");
    Ok(Json(FindResponse { phrase: params.phrase, took_s: elapsed.as_secs_f64(), total_hits: results.len(), results }))
}
