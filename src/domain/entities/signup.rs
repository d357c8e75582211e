use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Sentinel stored when the client address cannot be determined.
pub const UNKNOWN_IP: &str = "unknown";

/// A validated, normalized signup ready to be written.
///
/// `email` is lower-cased and trimmed and acts as the unique key. Optional
/// fields are `None` when the client sent nothing or only whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSignup {
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub organization_name: Option<String>,
    pub organization_size: Option<String>,
    pub team_challenges: Option<String>,
    pub ip_address: String,
}

/// A signup as read back from a store. `created_at` is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupRecord {
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub organization_name: Option<String>,
    pub organization_size: Option<String>,
    pub team_challenges: Option<String>,
    pub ip_address: String,
    pub created_at: DateTime<Utc>,
}

impl SignupRecord {
    /// Stamp a new signup with the insertion time.
    pub fn from_new(signup: NewSignup, created_at: DateTime<Utc>) -> Self {
        Self {
            email: signup.email,
            first_name: signup.first_name,
            last_name: signup.last_name,
            phone: signup.phone,
            organization_name: signup.organization_name,
            organization_size: signup.organization_size,
            team_challenges: signup.team_challenges,
            ip_address: signup.ip_address,
            created_at,
        }
    }
}

/// Flat external view of a signup, as returned to admins and written to the
/// local fallback file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupEntry {
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub organization_name: Option<String>,
    pub organization_size: Option<String>,
    pub team_challenges: Option<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(default = "unknown_ip")]
    pub ip: String,
}

fn unknown_ip() -> String {
    UNKNOWN_IP.to_string()
}

impl SignupEntry {
    /// RFC 3339 timestamp with millisecond precision, `Z` suffix.
    pub fn timestamp_string(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

impl From<SignupRecord> for SignupEntry {
    fn from(record: SignupRecord) -> Self {
        Self {
            email: record.email,
            first_name: record.first_name,
            last_name: record.last_name,
            phone: record.phone,
            organization_name: record.organization_name,
            organization_size: record.organization_size,
            team_challenges: record.team_challenges,
            timestamp: record.created_at,
            ip: record.ip_address,
        }
    }
}

impl From<SignupEntry> for SignupRecord {
    fn from(entry: SignupEntry) -> Self {
        Self {
            email: entry.email,
            first_name: entry.first_name,
            last_name: entry.last_name,
            phone: entry.phone,
            organization_name: entry.organization_name,
            organization_size: entry.organization_size,
            team_challenges: entry.team_challenges,
            ip_address: entry.ip,
            created_at: entry.timestamp,
        }
    }
}

/// Result of a write against the active store.
///
/// Store failures are reported through `AppError::Store` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// A new row was persisted.
    Created,
    /// The normalized email was already present; nothing was written.
    AlreadyExists,
    /// No store is configured; the signup was acknowledged but not persisted.
    Pending,
}
