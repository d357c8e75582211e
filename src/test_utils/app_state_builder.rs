//! Test app state builder for HTTP-level testing.
//!
//! `TestAppStateBuilder` creates a minimal `AppState` backed by an in-memory
//! waitlist so routes can be driven without any real store.

use std::sync::Arc;

use secrecy::SecretString;

use crate::{
    adapters::http::app_state::AppState,
    application::use_cases::{
        admin::AdminUseCases,
        waitlist::{WaitlistRepo, WaitlistUseCases},
    },
    test_utils::{InMemoryWaitlistRepo, create_test_config},
};

/// Builder for creating `AppState` with in-memory mocks for testing.
///
/// # Example
///
/// ```ignore
/// let repo = Arc::new(InMemoryWaitlistRepo::new());
/// let app_state = TestAppStateBuilder::new()
///     .with_repo(repo.clone())
///     .with_admin_token("secret")
///     .build();
/// ```
pub struct TestAppStateBuilder {
    repo: Option<Arc<dyn WaitlistRepo>>,
    admin_token: Option<String>,
    require_names: bool,
}

impl TestAppStateBuilder {
    pub fn new() -> Self {
        Self {
            repo: None,
            admin_token: None,
            require_names: false,
        }
    }

    /// Use a specific repo (keep your own `Arc` for assertions).
    pub fn with_repo(mut self, repo: Arc<dyn WaitlistRepo>) -> Self {
        self.repo = Some(repo);
        self
    }

    pub fn with_admin_token(mut self, token: &str) -> Self {
        self.admin_token = Some(token.to_string());
        self
    }

    pub fn require_names(mut self, require: bool) -> Self {
        self.require_names = require;
        self
    }

    /// Build the AppState with all configured mocks.
    pub fn build(self) -> AppState {
        let repo = self
            .repo
            .unwrap_or_else(|| Arc::new(InMemoryWaitlistRepo::new()) as Arc<dyn WaitlistRepo>);

        let require_names = self.require_names;
        let admin_token = self.admin_token;
        let config = create_test_config(|c| {
            c.require_names = require_names;
            c.admin_token = admin_token
                .as_deref()
                .map(|t| SecretString::new(t.into()));
        });

        let waitlist_use_cases = Arc::new(WaitlistUseCases::new(repo.clone(), require_names));
        let admin_use_cases = Arc::new(AdminUseCases::new(
            repo,
            admin_token.map(|t| SecretString::new(t.into())),
        ));

        AppState {
            config: Arc::new(config),
            waitlist_use_cases,
            admin_use_cases,
        }
    }
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
