//! Startup errors.
//!
//! Request handling never fails: every 500 the service returns is a simulated
//! fault chosen by the dice. The errors here are the real ones that stop the
//! process before or while serving.

use crate::config::ConfigError;
use crate::http::ServerError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Server(#[from] ServerError),

    #[error("Failed to initialize logging: {0}")]
    Logging(#[from] tracing_subscriber::util::TryInitError),
}
