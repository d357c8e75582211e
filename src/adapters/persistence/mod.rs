use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use tracing::{info, warn};

use crate::{
    app_error::AppResult,
    application::use_cases::waitlist::WaitlistRepo,
    domain::entities::{
        signup::{NewSignup, SignupRecord, WriteOutcome},
        store_kind::StoreKind,
    },
    infra::{config::AppConfig, error::InfraError, http_client::try_build_client},
};

pub mod json_file;
pub mod postgrest;

use json_file::JsonFileStore;
use postgrest::PostgrestStore;

/// The one backing store a deployment writes to, chosen once at start-up.
pub enum WaitlistStore {
    PrivilegedRemote(PostgrestStore),
    RestrictedRemote(PostgrestStore),
    LocalFallback(JsonFileStore),
    Unconfigured,
}

impl WaitlistStore {
    /// Pick the highest-priority store the configuration allows: service-role
    /// key, then anon key, then the local file, then nothing.
    pub async fn resolve(config: &AppConfig) -> Result<Self, InfraError> {
        let store = Self::select(config).await?;
        let kind = store.kind();
        info!(store = %kind, remote = kind.is_remote(), "Waitlist store selected");
        Ok(store)
    }

    async fn select(config: &AppConfig) -> Result<Self, InfraError> {
        match &config.store_url {
            Some(url) => {
                if let Some(key) = &config.store_service_role_key {
                    let store =
                        PostgrestStore::new(try_build_client()?, url, &config.store_table, owned(key));
                    return Ok(Self::PrivilegedRemote(store));
                }
                if let Some(key) = &config.store_anon_key {
                    let store =
                        PostgrestStore::new(try_build_client()?, url, &config.store_table, owned(key));
                    return Ok(Self::RestrictedRemote(store));
                }
            }
            None => {
                if config.store_service_role_key.is_some() || config.store_anon_key.is_some() {
                    warn!("Remote store key set without SUPABASE_URL, ignoring it");
                }
            }
        }

        if let Some(path) = &config.waitlist_file {
            match JsonFileStore::open(path).await {
                Ok(store) => return Ok(Self::LocalFallback(store)),
                Err(err) => {
                    warn!(error = %err, "Local waitlist file unusable, signups will not be persisted");
                }
            }
        }

        Ok(Self::Unconfigured)
    }
}

fn owned(key: &SecretString) -> SecretString {
    SecretString::new(key.expose_secret().into())
}

#[async_trait]
impl WaitlistRepo for WaitlistStore {
    fn kind(&self) -> StoreKind {
        match self {
            WaitlistStore::PrivilegedRemote(_) => StoreKind::PrivilegedRemote,
            WaitlistStore::RestrictedRemote(_) => StoreKind::RestrictedRemote,
            WaitlistStore::LocalFallback(_) => StoreKind::LocalFallback,
            WaitlistStore::Unconfigured => StoreKind::Unconfigured,
        }
    }

    async fn record(&self, signup: &NewSignup) -> AppResult<WriteOutcome> {
        match self {
            WaitlistStore::PrivilegedRemote(remote) | WaitlistStore::RestrictedRemote(remote) => {
                remote.insert(signup).await
            }
            WaitlistStore::LocalFallback(file) => file.insert(signup).await,
            WaitlistStore::Unconfigured => Ok(WriteOutcome::Pending),
        }
    }

    async fn list_all(&self) -> AppResult<Vec<SignupRecord>> {
        match self {
            WaitlistStore::PrivilegedRemote(remote) | WaitlistStore::RestrictedRemote(remote) => {
                remote.list_newest_first().await
            }
            WaitlistStore::LocalFallback(file) => file.list_newest_first().await,
            WaitlistStore::Unconfigured => Ok(Vec::new()),
        }
    }
}
