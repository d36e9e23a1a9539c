//! Dashboard HTTP API.
//!
//! Read-only JSON endpoints over the snapshot files plus a live search
//! over the workspace. Every request is served in one blocking pass; the
//! snapshots on disk are the only shared state.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/api/activities` | Activity feed from `activities.json` |
//! | `GET`  | `/api/cron` | Job list from `cron-jobs.json` |
//! | `GET`  | `/api/search?q=` | Live substring search over the workspace |
//! | `GET`  | `/health` | Health check (returns version) |
//!
//! # Error Contract
//!
//! Failures stay scoped to the request. List endpoints respond with their
//! usual shape plus a soft `error` field and a 500 status; an absent
//! activities snapshot degrades to an empty list instead.
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted so the dashboard page
//! can be served from anywhere.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

use crate::config::Config;
use crate::models::{ActivityRecord, JobRecord, SearchResult};
use crate::search;
use crate::snapshot;

#[derive(Clone)]
struct AppState {
    config: Arc<Config>,
}

/// Start the dashboard API server. Binds to `[server].bind` and runs until
/// the process is terminated.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let bind_addr = config.server.bind.clone();
    let state = AppState {
        config: Arc::new(config.clone()),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/api/activities", get(handle_activities))
        .route("/api/cron", get(handle_cron))
        .route("/api/search", get(handle_search))
        .route("/health", get(handle_health))
        .layer(cors)
        .with_state(state);

    info!(bind = %bind_addr, "dashboard API listening");

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============ GET /api/activities ============

#[derive(Serialize)]
struct ActivitiesResponse {
    activities: Vec<ActivityRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Activity feed. An absent snapshot is an empty feed (the sync may simply
/// not have run yet); an unreadable or malformed one is a soft 500.
async fn handle_activities(
    State(state): State<AppState>,
) -> (StatusCode, Json<ActivitiesResponse>) {
    let path = state.config.data_path(snapshot::ACTIVITIES_FILE);

    if !path.exists() {
        return (
            StatusCode::OK,
            Json(ActivitiesResponse {
                activities: Vec::new(),
                error: None,
            }),
        );
    }

    match snapshot::load::<Vec<ActivityRecord>>(&path) {
        Ok(activities) => (
            StatusCode::OK,
            Json(ActivitiesResponse {
                activities,
                error: None,
            }),
        ),
        Err(err) => {
            error!(%err, "failed to load activities snapshot");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ActivitiesResponse {
                    activities: Vec::new(),
                    error: Some("Failed to load activities".to_string()),
                }),
            )
        }
    }
}

// ============ GET /api/cron ============

#[derive(Serialize)]
struct JobsResponse {
    jobs: Vec<JobRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

async fn handle_cron(State(state): State<AppState>) -> (StatusCode, Json<JobsResponse>) {
    let path = state.config.data_path(snapshot::JOBS_FILE);

    match snapshot::load::<Vec<JobRecord>>(&path) {
        Ok(jobs) => (StatusCode::OK, Json(JobsResponse { jobs, error: None })),
        Err(err) => {
            error!(%err, "failed to load jobs snapshot");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(JobsResponse {
                    jobs: Vec::new(),
                    error: Some("Failed to load cron jobs".to_string()),
                }),
            )
        }
    }
}

// ============ GET /api/search ============

#[derive(Deserialize)]
struct SearchParams {
    #[serde(default)]
    q: String,
}

#[derive(Serialize)]
struct SearchResponse {
    results: Vec<SearchResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Live search over the workspace files. A blank query is an empty result
/// set, not an error.
async fn handle_search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> (StatusCode, Json<SearchResponse>) {
    match search::search_files(&state.config, &params.q) {
        Ok(results) => (
            StatusCode::OK,
            Json(SearchResponse {
                results,
                error: None,
            }),
        ),
        Err(err) => {
            error!(%err, "search failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(SearchResponse {
                    results: Vec::new(),
                    error: Some("Search failed".to_string()),
                }),
            )
        }
    }
}
