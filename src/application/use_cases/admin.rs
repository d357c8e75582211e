use std::sync::Arc;

use chrono::NaiveDate;
use secrecy::{ExposeSecret, SecretString};

use crate::{
    app_error::{AppError, AppResult},
    application::{
        csv_export::{export_filename, signups_to_csv},
        use_cases::waitlist::WaitlistRepo,
    },
    domain::entities::signup::SignupEntry,
};

/// A rendered CSV download.
#[derive(Debug, Clone)]
pub struct CsvExport {
    pub filename: String,
    pub body: String,
}

#[derive(Clone)]
pub struct AdminUseCases {
    repo: Arc<dyn WaitlistRepo>,
    admin_token: Option<SecretString>,
}

impl AdminUseCases {
    /// `admin_token` of `None` locks the admin surface entirely.
    pub fn new(repo: Arc<dyn WaitlistRepo>, admin_token: Option<SecretString>) -> Self {
        Self { repo, admin_token }
    }

    /// Exact comparison of the presented bearer token against the configured one.
    pub fn authorize(&self, bearer: Option<&str>) -> AppResult<()> {
        match (&self.admin_token, bearer) {
            (Some(expected), Some(presented)) if presented == expected.expose_secret() => Ok(()),
            _ => Err(AppError::Unauthorized),
        }
    }

    /// All signups, newest first, as flat entries.
    pub async fn list_signups(&self, bearer: Option<&str>) -> AppResult<Vec<SignupEntry>> {
        self.authorize(bearer)?;

        let records = self.repo.list_all().await?;
        Ok(records.into_iter().map(SignupEntry::from).collect())
    }

    /// Same listing rendered as CSV, named after `today`.
    pub async fn export_csv(&self, bearer: Option<&str>, today: NaiveDate) -> AppResult<CsvExport> {
        let entries = self.list_signups(bearer).await?;
        Ok(CsvExport {
            filename: export_filename(today),
            body: signups_to_csv(&entries),
        })
    }
}
