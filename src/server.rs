//! HTTP surface: one page, two figure endpoints, a liveness probe.
//!
//! Handlers are thin adapters from HTTP onto the pure selectors in
//! `select`. Shared state is the immutable bundle plus the prebuilt page;
//! nothing is ever locked or mutated, so any number of sessions can hit the
//! same state concurrently. A failed lookup is logged and answered with an
//! empty figure and status 200 so the page keeps rendering.

use axum::extract::{Query, State};
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::artifact::{ArtifactBundle, DEFAULT_ALGORITHM, DEFAULT_DIMENSIONALITY};
use crate::figures::Figure;
use crate::logging::{log, obj, v_str, Domain, Level};
use crate::select::{self, HoverData};

pub struct AppState {
    pub bundle: ArtifactBundle,
    pub page: String,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/health", get(health))
        .route("/api/manifold", get(manifold))
        .route("/api/seasonality", post(seasonality))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct ManifoldQuery {
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
    #[serde(default = "default_dim")]
    pub dim: String,
}

fn default_algorithm() -> String {
    DEFAULT_ALGORITHM.to_string()
}

fn default_dim() -> String {
    DEFAULT_DIMENSIONALITY.to_string()
}

#[derive(Debug, Serialize)]
pub struct ManifoldResponse {
    pub manifold: Figure,
    pub legend: Figure,
}

async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(state.page.clone())
}

async fn health() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

async fn manifold(
    State(state): State<Arc<AppState>>,
    Query(q): Query<ManifoldQuery>,
) -> Json<ManifoldResponse> {
    log(
        Level::Debug,
        Domain::Http,
        "manifold_request",
        obj(&[("algorithm", v_str(&q.algorithm)), ("dim", v_str(&q.dim))]),
    );
    match select::embedding(&state.bundle, &q.algorithm, &q.dim) {
        Ok((manifold, legend)) => Json(ManifoldResponse { manifold, legend }),
        Err(err) => {
            log(
                Level::Warn,
                Domain::Select,
                "embedding_lookup_failed",
                obj(&[
                    ("error", v_str(&err.to_string())),
                    ("algorithm", v_str(&q.algorithm)),
                    ("dim", v_str(&q.dim)),
                ]),
            );
            Json(ManifoldResponse {
                manifold: Figure::empty(),
                legend: Figure::empty(),
            })
        }
    }
}

async fn seasonality(
    State(state): State<Arc<AppState>>,
    Json(hover): Json<HoverData>,
) -> Json<Figure> {
    log(
        Level::Debug,
        Domain::Http,
        "seasonality_request",
        obj(&[("points", json!(hover.points.len()))]),
    );
    match select::seasonality(&state.bundle, &hover) {
        Ok(fig) => Json(fig),
        Err(err) => {
            log(
                Level::Warn,
                Domain::Select,
                "seasonality_lookup_failed",
                obj(&[("error", v_str(&err.to_string()))]),
            );
            Json(Figure::empty())
        }
    }
}
