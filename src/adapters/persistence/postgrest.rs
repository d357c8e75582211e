//! Remote store reached through its PostgREST gateway (`/rest/v1/<table>`).

use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{
    app_error::{AppError, AppResult},
    domain::entities::signup::{NewSignup, SignupRecord, UNKNOWN_IP, WriteOutcome},
};

/// SQLSTATE for `unique_violation`.
pub const UNIQUE_VIOLATION_CODE: &str = "23505";

/// Rows requested per listing call. Matches the hosted gateway's default `max-rows`.
const LIST_PAGE_SIZE: usize = 1000;

pub struct PostgrestStore {
    client: Client,
    endpoint: String,
    key: SecretString,
}

#[derive(Serialize)]
struct InsertRow<'a> {
    email: &'a str,
    first_name: Option<&'a str>,
    last_name: Option<&'a str>,
    phone: Option<&'a str>,
    organization_name: Option<&'a str>,
    organization_size: Option<&'a str>,
    team_challenges: Option<&'a str>,
    ip_address: &'a str,
}

impl<'a> From<&'a NewSignup> for InsertRow<'a> {
    fn from(signup: &'a NewSignup) -> Self {
        Self {
            email: &signup.email,
            first_name: signup.first_name.as_deref(),
            last_name: signup.last_name.as_deref(),
            phone: signup.phone.as_deref(),
            organization_name: signup.organization_name.as_deref(),
            organization_size: signup.organization_size.as_deref(),
            team_challenges: signup.team_challenges.as_deref(),
            ip_address: &signup.ip_address,
        }
    }
}

/// A row as returned by `select=*`. Store-internal columns such as `id` are ignored.
#[derive(Deserialize)]
struct WaitlistRow {
    email: String,
    first_name: Option<String>,
    last_name: Option<String>,
    phone: Option<String>,
    organization_name: Option<String>,
    organization_size: Option<String>,
    team_challenges: Option<String>,
    ip_address: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<WaitlistRow> for SignupRecord {
    fn from(row: WaitlistRow) -> Self {
        Self {
            email: row.email,
            first_name: row.first_name,
            last_name: row.last_name,
            phone: row.phone,
            organization_name: row.organization_name,
            organization_size: row.organization_size,
            team_challenges: row.team_challenges,
            ip_address: row.ip_address.unwrap_or_else(|| UNKNOWN_IP.to_string()),
            created_at: row.created_at,
        }
    }
}

/// Error body returned by the gateway on a rejected request.
#[derive(Debug, Default, Deserialize)]
pub struct PostgrestError {
    pub code: Option<String>,
    pub message: Option<String>,
    pub details: Option<String>,
}

impl PostgrestError {
    fn parse(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }

    fn reason(&self, status: StatusCode, raw_body: &str) -> String {
        match self.message.as_deref() {
            Some(message) => format!("{status}: {message}"),
            None if raw_body.trim().is_empty() => status.to_string(),
            None => format!("{status}: {}", raw_body.trim()),
        }
    }
}

/// Whether a rejected insert means "this email is already stored".
///
/// SQLSTATE 23505 is the typed signal. A 409 only counts when it carries no
/// code at all, since the gateway also answers 409 for foreign-key and
/// exclusion violations. Matching "duplicate"/"unique" in the text covers
/// gateways that drop the code; that wording is not a stable contract across
/// store versions.
pub fn is_unique_violation(status: StatusCode, error: &PostgrestError) -> bool {
    match error.code.as_deref() {
        Some(UNIQUE_VIOLATION_CODE) => return true,
        None if status == StatusCode::CONFLICT => return true,
        _ => {}
    }

    [error.message.as_deref(), error.details.as_deref()]
        .into_iter()
        .flatten()
        .map(str::to_lowercase)
        .any(|text| text.contains("duplicate") || text.contains("unique"))
}

impl PostgrestStore {
    pub fn new(client: Client, base_url: &Url, table: &str, key: SecretString) -> Self {
        let endpoint = format!(
            "{}/rest/v1/{}",
            base_url.as_str().trim_end_matches('/'),
            table
        );
        Self {
            client,
            endpoint,
            key,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn insert(&self, signup: &NewSignup) -> AppResult<WriteOutcome> {
        let key = self.key.expose_secret();
        let response = self
            .client
            .post(&self.endpoint)
            .header("apikey", key)
            .bearer_auth(key)
            .header("Prefer", "return=minimal")
            .json(&InsertRow::from(signup))
            .send()
            .await
            .map_err(|e| AppError::Store(format!("Remote store request failed: {e}")))?;

        let status = response.status();
        if status.is_success() {
            return Ok(WriteOutcome::Created);
        }

        let body = response.text().await.unwrap_or_default();
        let error = PostgrestError::parse(&body);
        if is_unique_violation(status, &error) {
            return Ok(WriteOutcome::AlreadyExists);
        }

        Err(AppError::Store(error.reason(status, &body)))
    }

    /// Every row, newest first.
    ///
    /// The gateway silently truncates responses at its `max-rows` setting, so
    /// pages are requested until one comes back empty. The offset advances by
    /// the rows actually received.
    pub async fn list_newest_first(&self) -> AppResult<Vec<SignupRecord>> {
        let mut records = Vec::new();
        loop {
            let page = self.fetch_page(records.len()).await?;
            if page.is_empty() {
                break;
            }
            records.extend(page.into_iter().map(SignupRecord::from));
        }
        Ok(records)
    }

    async fn fetch_page(&self, offset: usize) -> AppResult<Vec<WaitlistRow>> {
        let key = self.key.expose_secret();
        let limit = LIST_PAGE_SIZE.to_string();
        let offset = offset.to_string();
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("select", "*"),
                ("order", "created_at.desc"),
                ("limit", limit.as_str()),
                ("offset", offset.as_str()),
            ])
            .header("apikey", key)
            .bearer_auth(key)
            .send()
            .await
            .map_err(|e| AppError::Store(format!("Remote store request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Store(
                PostgrestError::parse(&body).reason(status, &body),
            ));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Store(format!("Unexpected remote store response: {e}")))
    }
}
