//! Local fallback store: the whole waitlist as one JSON array on disk.
//!
//! Every write rewrites the file through a sibling temp file and a rename.
//! Writers in this process are serialized; separate processes sharing the
//! file can still lose each other's updates.

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::warn;

use crate::{
    app_error::{AppError, AppResult},
    domain::entities::signup::{NewSignup, SignupEntry, SignupRecord, WriteOutcome},
    infra::error::InfraError,
};

pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Open the store, creating the parent directory if needed.
    /// The file itself is created on first write.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, InfraError> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| InfraError::WaitlistDir {
                    path: parent.display().to_string(),
                    source,
                })?;
        }

        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn insert(&self, signup: &NewSignup) -> AppResult<WriteOutcome> {
        let _guard = self.write_lock.lock().await;

        let mut entries = self.load().await;
        if entries.iter().any(|e| e.email == signup.email) {
            return Ok(WriteOutcome::AlreadyExists);
        }

        let record = SignupRecord::from_new(signup.clone(), Utc::now());
        entries.push(SignupEntry::from(record));
        self.persist(&entries).await?;

        Ok(WriteOutcome::Created)
    }

    pub async fn list_newest_first(&self) -> AppResult<Vec<SignupRecord>> {
        let mut entries = self.load().await;
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(entries.into_iter().map(SignupRecord::from).collect())
    }

    /// Missing file reads as empty. An unreadable or corrupt file also reads
    /// as empty, with a warning.
    async fn load(&self) -> Vec<SignupEntry> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Vec::new(),
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "Failed to read waitlist file, treating as empty"
                );
                return Vec::new();
            }
        };

        serde_json::from_str(&content).unwrap_or_else(|err| {
            warn!(
                path = %self.path.display(),
                error = %err,
                "Waitlist file is not valid JSON, treating as empty"
            );
            Vec::new()
        })
    }

    async fn persist(&self, entries: &[SignupEntry]) -> AppResult<()> {
        let content = serde_json::to_string_pretty(entries)
            .map_err(|e| AppError::Internal(format!("Failed to serialize waitlist: {e}")))?;

        let tmp = self.tmp_path();
        if let Err(e) = tokio::fs::write(&tmp, content).await {
            discard(&tmp).await;
            return Err(AppError::Store(format!("Failed to write waitlist file: {e}")));
        }
        if let Err(e) = tokio::fs::rename(&tmp, &self.path).await {
            discard(&tmp).await;
            return Err(AppError::Store(format!("Failed to replace waitlist file: {e}")));
        }

        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

/// Best-effort removal of a temp file left behind by a failed write.
async fn discard(tmp: &Path) {
    if let Err(err) = tokio::fs::remove_file(tmp).await
        && err.kind() != ErrorKind::NotFound
    {
        warn!(path = %tmp.display(), error = %err, "Failed to remove temporary waitlist file");
    }
}
