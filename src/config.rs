use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Diagnoser";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default filter for `tracing_subscriber` when RUST_LOG is unset
pub fn default_log_filter() -> &'static str {
    "diagnoser=info"
}

/// Get the application data directory
/// ~/Diagnoser/ on all platforms (user-visible)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("Diagnoser")
}

/// Get the default database path
pub fn database_path() -> PathBuf {
    app_data_dir().join("diagnoser.db")
}
