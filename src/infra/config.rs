use std::{net::SocketAddr, path::PathBuf};

use axum::http::HeaderValue;
use env_helpers::get_env_default;
use secrecy::SecretString;
use url::Url;

use crate::infra::error::InfraError;

pub const DEFAULT_WAITLIST_FILE: &str = "data/waitlist-emails.json";
pub const DEFAULT_WAITLIST_TABLE: &str = "waitlist";

pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub cors_origin: HeaderValue,
    /// Base URL of the hosted store's REST gateway.
    pub store_url: Option<Url>,
    /// Row-restricted credential.
    pub store_anon_key: Option<SecretString>,
    /// Unrestricted credential. Takes priority over the anon key when both are set.
    pub store_service_role_key: Option<SecretString>,
    pub store_table: String,
    /// Local JSON fallback used when no remote credential is configured.
    /// `None` means console-only (degraded) mode.
    pub waitlist_file: Option<PathBuf>,
    /// Whether first and last name are mandatory on signup.
    pub require_names: bool,
    /// Bearer secret for the admin endpoints. Unset locks them.
    pub admin_token: Option<SecretString>,
    /// JSON log sink. `None` logs to the console only.
    pub log_file: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, InfraError> {
        let bind_addr: SocketAddr =
            get_env_default("BIND_ADDR", SocketAddr::from(([127, 0, 0, 1], 3001)));
        let cors_origin = parse_cors_origin(&get_env_default(
            "CORS_ORIGIN",
            String::from("http://localhost:3000"),
        ))?;

        let store_url = parse_store_url(optional_env("SUPABASE_URL"))?;
        let store_anon_key = optional_env("SUPABASE_ANON_KEY").map(secret);
        let store_service_role_key = optional_env("SUPABASE_SERVICE_ROLE_KEY").map(secret);
        let store_table: String =
            get_env_default("WAITLIST_TABLE", DEFAULT_WAITLIST_TABLE.to_string());

        // Present-but-empty disables the file fallback.
        let waitlist_file = match std::env::var("WAITLIST_FILE") {
            Ok(raw) => non_empty(raw).map(PathBuf::from),
            Err(_) => Some(PathBuf::from(DEFAULT_WAITLIST_FILE)),
        };
        let require_names: bool = get_env_default("WAITLIST_REQUIRE_NAMES", true);
        let admin_token = optional_env("ADMIN_TOKEN").map(secret);

        let log_file = match std::env::var("LOG_FILE") {
            Ok(raw) => non_empty(raw).map(PathBuf::from),
            Err(_) => Some(PathBuf::from("app.log")),
        };

        Ok(Self {
            bind_addr,
            cors_origin,
            store_url,
            store_anon_key,
            store_service_role_key,
            store_table,
            waitlist_file,
            require_names,
            admin_token,
            log_file,
        })
    }
}

fn parse_cors_origin(raw: &str) -> Result<HeaderValue, InfraError> {
    raw.parse()
        .map_err(|_| InfraError::ConfigInvalid { var: "CORS_ORIGIN" })
}

fn parse_store_url(raw: Option<String>) -> Result<Option<Url>, InfraError> {
    raw.map(|raw| Url::parse(&raw))
        .transpose()
        .map_err(|_| InfraError::ConfigInvalid { var: "SUPABASE_URL" })
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(non_empty)
}

fn non_empty(raw: String) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn secret(raw: String) -> SecretString {
    SecretString::new(raw.into())
}
