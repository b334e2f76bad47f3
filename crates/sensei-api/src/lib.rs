//! Backend function layer: stateless domain operations over the store, the
//! role guard, and the axum handlers exposing them.

pub mod ai;
pub mod announcements;
pub mod auth;
pub mod error;
pub mod feed;
pub mod guard;
pub mod messages;
pub mod quiz;
pub mod routes;
pub mod schedule;

use tracing::{error, warn};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};

/// Current time in epoch milliseconds, the unit every `created_at` uses.
pub(crate) fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Parse a stored id, logging and substituting the nil UUID if it is corrupt.
pub(crate) fn parse_id(raw: &str, what: &str) -> Uuid {
    raw.parse().unwrap_or_else(|e| {
        warn!("Corrupt {} '{}': {}", what, raw, e);
        Uuid::default()
    })
}

/// Run blocking store work off the async runtime.
pub(crate) async fn blocking<F, T>(f: F) -> ApiResult<T>
where
    F: FnOnce() -> ApiResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await.map_err(|e| {
        error!("spawn_blocking join error: {}", e);
        ApiError::Internal(anyhow::anyhow!("background task failed: {}", e))
    })?
}
