//! Health endpoint: liveness plus a database ping.

use crate::{db, AppState};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Basic health status
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Up,
    Down,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct HealthInfo {
    pub status: HealthStatus,
    pub version: String,
    pub database: HealthStatus,
    pub timestamp: DateTime<Utc>,
}

/// Reports `up` with 200 when the pool answers a ping, otherwise `down` with 503.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let database = match db::check_connection(&state.db).await {
        Ok(()) => HealthStatus::Up,
        Err(e) => {
            warn!(error = %e, "health check: database unreachable");
            HealthStatus::Down
        }
    };

    let status_code = match database {
        HealthStatus::Up => StatusCode::OK,
        HealthStatus::Down => StatusCode::SERVICE_UNAVAILABLE,
    };

    let info = HealthInfo {
        status: database,
        version: env!("CARGO_PKG_VERSION").to_string(),
        database,
        timestamp: Utc::now(),
    };

    (status_code, Json(info))
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
