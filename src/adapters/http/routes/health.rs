use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::{adapters::http::app_state::AppState, domain::entities::store_kind::StoreKind};

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    store: StoreKind,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// GET /api/health
async fn health_check(State(app_state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        store: app_state.waitlist_use_cases.store_kind(),
    })
}
