use axum::{
    Json, Router,
    extract::State,
    http::{
        HeaderMap,
        header::{AUTHORIZATION, CONTENT_DISPOSITION, CONTENT_TYPE},
    },
    response::IntoResponse,
    routing::get,
};
use chrono::Utc;

use crate::{adapters::http::app_state::AppState, app_error::AppResult};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/emails", get(list_emails))
        .route("/emails.csv", get(export_emails_csv))
}

/// Token from an `Authorization: Bearer <token>` header.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// GET /api/admin/emails
/// All signups, newest first.
async fn list_emails(
    State(app_state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<impl IntoResponse> {
    let entries = app_state
        .admin_use_cases
        .list_signups(bearer_token(&headers))
        .await?;

    Ok(Json(entries))
}

/// GET /api/admin/emails.csv
/// Same listing as a CSV download named after today's date.
async fn export_emails_csv(
    State(app_state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<impl IntoResponse> {
    let export = app_state
        .admin_use_cases
        .export_csv(bearer_token(&headers), Utc::now().date_naive())
        .await?;

    let disposition = format!("attachment; filename=\"{}\"", export.filename);
    Ok((
        [
            (CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (CONTENT_DISPOSITION, disposition),
        ],
        export.body,
    ))
}
