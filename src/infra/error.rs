use thiserror::Error;

/// Infrastructure errors that can occur during application startup.
///
/// Display messages never include credentials; the `#[source]` chain may
/// carry URLs, so log with Display (`%e`) rather than Debug.
#[derive(Error, Debug)]
pub enum InfraError {
    #[error("Configuration error: environment variable {var} is invalid")]
    ConfigInvalid { var: &'static str },

    #[error("HTTP client initialization failed")]
    HttpClient(#[source] reqwest::Error),

    #[error("Waitlist directory {path} could not be created")]
    WaitlistDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("TCP bind failed")]
    TcpBind(#[source] std::io::Error),

    #[error("Server error")]
    Server(#[source] std::io::Error),
}
