//! In-memory mock implementation of `WaitlistRepo`.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
};

use crate::{
    app_error::{AppError, AppResult},
    application::use_cases::waitlist::WaitlistRepo,
    domain::entities::{
        signup::{NewSignup, SignupRecord, WriteOutcome},
        store_kind::StoreKind,
    },
};

/// In-memory waitlist with the same duplicate and ordering rules as the real
/// stores. Counts every call so tests can assert a store was never touched.
pub struct InMemoryWaitlistRepo {
    records: Mutex<Vec<SignupRecord>>,
    kind: StoreKind,
    failure: Option<String>,
    reads: AtomicUsize,
    writes: AtomicUsize,
}

impl Default for InMemoryWaitlistRepo {
    fn default() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            kind: StoreKind::LocalFallback,
            failure: None,
            reads: AtomicUsize::new(0),
            writes: AtomicUsize::new(0),
        }
    }
}

impl InMemoryWaitlistRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the repo with existing records.
    pub fn with_records(records: Vec<SignupRecord>) -> Self {
        Self {
            records: Mutex::new(records),
            ..Self::default()
        }
    }

    /// Behaves like a deployment with no store configured.
    pub fn unconfigured() -> Self {
        Self {
            kind: StoreKind::Unconfigured,
            ..Self::default()
        }
    }

    /// Every call fails with `AppError::Store(reason)`.
    pub fn failing(reason: &str) -> Self {
        Self {
            kind: StoreKind::PrivilegedRemote,
            failure: Some(reason.to_string()),
            ..Self::default()
        }
    }

    /// Get all records in insertion order (for test assertions).
    pub fn get_all(&self) -> Vec<SignupRecord> {
        self.records.lock().unwrap().clone()
    }

    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WaitlistRepo for InMemoryWaitlistRepo {
    fn kind(&self) -> StoreKind {
        self.kind
    }

    async fn record(&self, signup: &NewSignup) -> AppResult<WriteOutcome> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if let Some(reason) = &self.failure {
            return Err(AppError::Store(reason.clone()));
        }
        if !self.kind.is_persistent() {
            return Ok(WriteOutcome::Pending);
        }

        let mut records = self.records.lock().unwrap();
        if records.iter().any(|r| r.email == signup.email) {
            return Ok(WriteOutcome::AlreadyExists);
        }

        // Strictly increasing so rapid inserts still order deterministically.
        let now = Utc::now();
        let created_at = records
            .iter()
            .map(|r| r.created_at + Duration::milliseconds(1))
            .max()
            .filter(|next| *next > now)
            .unwrap_or(now);

        records.push(SignupRecord::from_new(signup.clone(), created_at));
        Ok(WriteOutcome::Created)
    }

    async fn list_all(&self) -> AppResult<Vec<SignupRecord>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if let Some(reason) = &self.failure {
            return Err(AppError::Store(reason.clone()));
        }

        let mut records = self.get_all();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }
}
