//! Test data factories for creating valid test fixtures.
//!
//! Each factory function creates a complete, valid object with sensible defaults.
//! Use the closure parameter to override specific fields as needed.

use std::net::SocketAddr;

use axum::http::HeaderValue;
use chrono::{DateTime, TimeZone, Utc};

use crate::{
    application::use_cases::waitlist::SignupRequest,
    domain::entities::signup::{NewSignup, SignupRecord},
    infra::config::{AppConfig, DEFAULT_WAITLIST_TABLE},
};

/// Create a raw signup submission with every required field filled in.
pub fn create_test_request(overrides: impl FnOnce(&mut SignupRequest)) -> SignupRequest {
    let mut request = SignupRequest {
        email: Some("ada@example.com".to_string()),
        first_name: Some("Ada".to_string()),
        last_name: Some("Lovelace".to_string()),
        phone: None,
        organization_name: None,
        organization_size: None,
        team_challenges: None,
    };
    overrides(&mut request);
    request
}

/// Create a normalized signup ready for a store.
pub fn create_test_signup(overrides: impl FnOnce(&mut NewSignup)) -> NewSignup {
    let mut signup = NewSignup {
        email: "ada@example.com".to_string(),
        first_name: Some("Ada".to_string()),
        last_name: Some("Lovelace".to_string()),
        phone: Some("+44 20 7946 0000".to_string()),
        organization_name: None,
        organization_size: Some("1-10".to_string()),
        team_challenges: None,
        ip_address: "203.0.113.7".to_string(),
    };
    overrides(&mut signup);
    signup
}

/// Create a stored signup with sensible defaults.
pub fn create_test_record(overrides: impl FnOnce(&mut SignupRecord)) -> SignupRecord {
    let mut record = SignupRecord {
        email: "ada@example.com".to_string(),
        first_name: Some("Ada".to_string()),
        last_name: Some("Lovelace".to_string()),
        phone: None,
        organization_name: Some("Analytical Engines".to_string()),
        organization_size: Some("1-10".to_string()),
        team_challenges: None,
        ip_address: "203.0.113.7".to_string(),
        created_at: test_datetime(),
    };
    overrides(&mut record);
    record
}

/// Config with no store, no admin token, names optional and no log file.
pub fn create_test_config(overrides: impl FnOnce(&mut AppConfig)) -> AppConfig {
    let mut config = AppConfig {
        bind_addr: SocketAddr::from(([127, 0, 0, 1], 3001)),
        cors_origin: HeaderValue::from_static("http://localhost:3000"),
        store_url: None,
        store_anon_key: None,
        store_service_role_key: None,
        store_table: DEFAULT_WAITLIST_TABLE.to_string(),
        waitlist_file: None,
        require_names: false,
        admin_token: None,
        log_file: None,
    };
    overrides(&mut config);
    config
}

/// Fixed timestamp for reproducible tests.
pub fn test_datetime() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap()
}
