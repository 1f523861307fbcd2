use config::Config;
use sqlx::SqlitePool;

pub mod config;
pub mod database;
pub mod error;
pub mod middleware;
pub mod router;
pub mod routes;
pub mod session;
pub mod utils;
pub mod views;

/// Shared handler context, built once at startup. Holds the only
/// process-wide state: the pool and the config carrying the signing secret.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Config,
}
