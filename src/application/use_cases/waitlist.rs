use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::{
    app_error::{AppError, AppResult},
    application::validators::{clean_optional, is_plausible_email, normalize_email},
    domain::entities::{
        signup::{NewSignup, SignupRecord, WriteOutcome},
        store_kind::StoreKind,
    },
};

pub const JOINED_MESSAGE: &str = "Successfully joined the waitlist!";
pub const ALREADY_JOINED_MESSAGE: &str = "You're already on the waitlist!";
pub const INVALID_EMAIL_MESSAGE: &str = "Please provide a valid email address";
pub const FIRST_NAME_REQUIRED_MESSAGE: &str = "First name is required";
pub const LAST_NAME_REQUIRED_MESSAGE: &str = "Last name is required";

// ============================================================================
// Repository Trait
// ============================================================================

/// Uniform write/read contract over whichever store the deployment resolved.
#[async_trait]
pub trait WaitlistRepo: Send + Sync {
    fn kind(&self) -> StoreKind;

    /// Insert a signup unless its email is already present.
    async fn record(&self, signup: &NewSignup) -> AppResult<WriteOutcome>;

    /// All signups, newest first. Empty when nothing is stored.
    async fn list_all(&self) -> AppResult<Vec<SignupRecord>>;
}

// ============================================================================
// Request Types
// ============================================================================

/// Raw, untrusted signup submission.
#[derive(Debug, Clone, Default)]
pub struct SignupRequest {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub organization_name: Option<String>,
    pub organization_size: Option<String>,
    pub team_challenges: Option<String>,
}

/// What the caller is told after a successful intake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoinOutcome {
    pub outcome: WriteOutcome,
}

impl JoinOutcome {
    pub fn message(&self) -> &'static str {
        match self.outcome {
            WriteOutcome::AlreadyExists => ALREADY_JOINED_MESSAGE,
            WriteOutcome::Created | WriteOutcome::Pending => JOINED_MESSAGE,
        }
    }
}

// ============================================================================
// Use Cases
// ============================================================================

#[derive(Clone)]
pub struct WaitlistUseCases {
    repo: Arc<dyn WaitlistRepo>,
    require_names: bool,
}

impl WaitlistUseCases {
    pub fn new(repo: Arc<dyn WaitlistRepo>, require_names: bool) -> Self {
        Self {
            repo,
            require_names,
        }
    }

    pub fn store_kind(&self) -> StoreKind {
        self.repo.kind()
    }

    /// Validate, normalize and record a signup.
    ///
    /// A repeated email is a success with `WriteOutcome::AlreadyExists`.
    /// Validation failures return before the store is touched.
    pub async fn join(&self, request: SignupRequest, ip_address: String) -> AppResult<JoinOutcome> {
        let signup = self.normalize(request, ip_address)?;

        // Failures are logged once, where the error becomes a response.
        let outcome = self.repo.record(&signup).await?;

        match outcome {
            WriteOutcome::Created => {
                info!(email = %signup.email, ip = %signup.ip_address, "New waitlist signup");
            }
            WriteOutcome::AlreadyExists => {
                info!(email = %signup.email, "Duplicate waitlist signup");
            }
            WriteOutcome::Pending => {
                warn!(
                    email = %signup.email,
                    "No waitlist store configured, signup accepted but not persisted (pending setup)"
                );
            }
        }

        Ok(JoinOutcome { outcome })
    }

    fn normalize(&self, request: SignupRequest, ip_address: String) -> AppResult<NewSignup> {
        let email = request.email.unwrap_or_default();
        if !is_plausible_email(&email) {
            return Err(AppError::InvalidInput(INVALID_EMAIL_MESSAGE.into()));
        }

        let first_name = clean_optional(request.first_name);
        let last_name = clean_optional(request.last_name);
        if self.require_names {
            if first_name.is_none() {
                return Err(AppError::InvalidInput(FIRST_NAME_REQUIRED_MESSAGE.into()));
            }
            if last_name.is_none() {
                return Err(AppError::InvalidInput(LAST_NAME_REQUIRED_MESSAGE.into()));
            }
        }

        Ok(NewSignup {
            email: normalize_email(&email),
            first_name,
            last_name,
            phone: clean_optional(request.phone),
            organization_name: clean_optional(request.organization_name),
            organization_size: clean_optional(request.organization_size),
            team_challenges: clean_optional(request.team_challenges),
            ip_address,
        })
    }
}
