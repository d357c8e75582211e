use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    response::IntoResponse,
    routing::post,
};
use serde::{Deserialize, Serialize};

use crate::{
    adapters::http::{app_state::AppState, client_ip::ClientIp},
    app_error::{AppError, AppResult},
    use_cases::waitlist::SignupRequest,
};

pub const INVALID_BODY_MESSAGE: &str = "Invalid request body";

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(join_waitlist))
}

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct JoinWaitlistPayload {
    email: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    phone: Option<String>,
    organization_name: Option<String>,
    organization_size: Option<String>,
    team_challenges: Option<String>,
}

impl From<JoinWaitlistPayload> for SignupRequest {
    fn from(payload: JoinWaitlistPayload) -> Self {
        Self {
            email: payload.email,
            first_name: payload.first_name,
            last_name: payload.last_name,
            phone: payload.phone,
            organization_name: payload.organization_name,
            organization_size: payload.organization_size,
            team_challenges: payload.team_challenges,
        }
    }
}

#[derive(Serialize)]
struct JoinWaitlistResponse {
    success: bool,
    message: &'static str,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/waitlist
async fn join_waitlist(
    State(app_state): State<AppState>,
    ClientIp(ip): ClientIp,
    payload: Result<Json<JoinWaitlistPayload>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(payload) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Unreadable waitlist payload");
        AppError::InvalidInput(INVALID_BODY_MESSAGE.into())
    })?;

    let joined = app_state
        .waitlist_use_cases
        .join(payload.into(), ip)
        .await?;

    Ok(Json(JoinWaitlistResponse {
        success: true,
        message: joined.message(),
    }))
}
