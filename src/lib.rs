//! Diagnoser — narrows candidate medical diagnoses by matching selected
//! symptoms against an inherited diagnosis-symptom hierarchy.
//!
//! The crate is split into the local store (`db`), the plain data records it
//! holds (`models`), the process-local selection state (`session`) and the
//! pure matching engine (`matching`) that derives ranked diagnoses, excess
//! evidence and tag visibility from a store snapshot plus the session.

pub mod config;
pub mod db;
pub mod matching;
pub mod models;
pub mod session;

use tracing_subscriber::EnvFilter;

/// Initialize tracing for the embedding application.
///
/// Honors `RUST_LOG` when set, otherwise falls back to the crate default.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);
}
