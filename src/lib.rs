//! flaky-health - a health-check stub with randomized fault injection.
//!
//! Serves `/health` and, per request, answers with a 500, a delayed healthy
//! payload, a degraded payload, or a healthy payload. Used to exercise the
//! timeout, retry and classification logic of health-check clients.

pub mod config;
pub mod error;
pub mod fault;
pub mod http;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::AppConfig;
pub use error::AppError;
pub use fault::{Dice, EntropyDice, FixedDice, Outcome, SequenceDice};
pub use routes::create_router;
pub use state::AppState;
