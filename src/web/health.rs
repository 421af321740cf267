//! Liveness and readiness probes.

use super::AppState;
use crate::task::ports::TaskRepository;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use mockable::Clock;
use serde::Serialize;
use tracing::warn;

/// Probe response body.
#[derive(Debug, Serialize)]
pub(super) struct ProbeStatus {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ProbeStatus {
    const fn healthy(status: &'static str) -> Self {
        Self {
            status,
            error: None,
        }
    }
}

/// `GET /admin/liveness`
pub(super) async fn liveness() -> Json<ProbeStatus> {
    Json(ProbeStatus::healthy("alive"))
}

/// `GET /admin/readiness`
///
/// Fails with 503 when the store does not answer. Error detail is withheld
/// in production.
pub(super) async fn readiness<R, C>(
    State(state): State<AppState<R, C>>,
) -> (StatusCode, Json<ProbeStatus>)
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    match state.service.check_health().await {
        Ok(()) => (StatusCode::OK, Json(ProbeStatus::healthy("ready"))),
        Err(err) => {
            warn!(error = %err, "readiness probe failed");
            let error = (!state.environment.is_production()).then(|| err.to_string());
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ProbeStatus {
                    status: "unavailable",
                    error,
                }),
            )
        }
    }
}
