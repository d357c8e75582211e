use crate::{
    adapters::{http::app_state::AppState, persistence::WaitlistStore},
    infra::config::AppConfig,
    use_cases::{admin::AdminUseCases, waitlist::WaitlistUseCases},
};
use secrecy::{ExposeSecret, SecretString};
use std::{fs::File, path::Path, sync::Arc};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub async fn init_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let store = Arc::new(WaitlistStore::resolve(&config).await?);

    let waitlist_use_cases = WaitlistUseCases::new(store.clone(), config.require_names);
    let admin_token = config
        .admin_token
        .as_ref()
        .map(|token| SecretString::new(token.expose_secret().into()));
    if admin_token.is_none() {
        tracing::warn!("ADMIN_TOKEN is not set; admin endpoints will reject every request");
    }
    let admin_use_cases = AdminUseCases::new(store, admin_token);

    Ok(AppState {
        config: Arc::new(config),
        waitlist_use_cases: Arc::new(waitlist_use_cases),
        admin_use_cases: Arc::new(admin_use_cases),
    })
}

pub fn init_tracing(log_file: Option<&Path>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "celer_waitlist=debug,tower_http=debug".into());

    // Console (pretty logs)
    let console_layer = fmt::layer().with_target(false).with_level(true).pretty();

    // File (structured JSON logs)
    let mut file_error = None;
    let json_layer = log_file.and_then(|path| match File::create(path) {
        Ok(file) => Some(
            fmt::layer()
                .json()
                .with_writer(file)
                .with_current_span(true)
                .with_span_list(true)
                .boxed(),
        ),
        Err(err) => {
            file_error = Some((path.to_path_buf(), err));
            None
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(json_layer)
        .try_init()
        .ok();

    if let Some((path, err)) = file_error {
        tracing::warn!(path = %path.display(), error = %err, "cannot create log file, logging to console only");
    }
}
