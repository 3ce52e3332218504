//! `GET /health`: liveness plus a database round trip.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
struct Health {
    status: &'static str,
    version: &'static str,
    db_healthy: bool,
}

impl Health {
    fn new(db_healthy: bool) -> Self {
        Self {
            status: if db_healthy { "ok" } else { "degraded" },
            version: env!("CARGO_PKG_VERSION"),
            db_healthy,
        }
    }
}

impl IntoResponse for Health {
    fn into_response(self) -> Response {
        let code = if self.db_healthy {
            StatusCode::OK
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        };
        (code, Json(self)).into_response()
    }
}

async fn report(State(state): State<AppState>) -> Health {
    match orgboard_db::health_check(&state.pool).await {
        Ok(()) => Health::new(true),
        Err(err) => {
            tracing::warn!(error = %err, "Database unreachable from health check");
            Health::new(false)
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(report))
}
