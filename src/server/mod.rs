pub mod errors;
pub mod health;
pub mod messages;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod stats;

use crate::repo;

pub struct AppState {
    pub repo: repo::ImplMessageRepo,
    /// Shared webhook secret; empty means not configured, which keeps
    /// readiness unhealthy and rejects all ingest traffic.
    pub webhook_secret: String,
}
