//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};

use crate::domain::{DelayMap, ScheduleProblem, Train, ValidationError};
use crate::engine::{self, ScheduleResult};
use crate::store::StoreError;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/schedule", post(run_schedule))
        .route("/records/upload", post(upload_record))
        .route("/upload_to_pocketbase", post(upload_record))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Service status.
async fn root() -> Json<StatusResponse> {
    Json(StatusResponse {
        message: "Train Scheduling API is running.",
    })
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Compute base and rescheduled timetables.
async fn run_schedule(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ScheduleResult>, AppError> {
    // Parse JSON manually so we can log the body on failure
    let req: ScheduleRequest = if body.is_empty() {
        ScheduleRequest::default()
    } else {
        serde_json::from_slice(&body).map_err(|e| {
            warn!(error = %e, body = %String::from_utf8_lossy(&body), "rejecting schedule request");
            AppError::BadRequest {
                message: format!("Invalid JSON: {e}"),
            }
        })?
    };

    let headway = req.headway_or(state.config.default_headway)?;

    let (trains, delays) =
        futures::future::try_join(load_trains(&state, &req), load_delays(&state, &req)).await?;

    let problem = ScheduleProblem::new(trains, delays, headway)?;
    Ok(Json(engine::schedule(&problem)))
}

async fn load_trains(state: &AppState, req: &ScheduleRequest) -> Result<Vec<Train>, AppError> {
    match &req.trains {
        Some(specs) => Ok(trains_from_specs(specs)?),
        None => Ok(state.store.trains().await?.as_ref().clone()),
    }
}

async fn load_delays(state: &AppState, req: &ScheduleRequest) -> Result<DelayMap, AppError> {
    match &req.delays {
        Some(delays) => Ok(delays_from_map(delays)?),
        None => Ok(state.store.delays().await?.as_ref().clone()),
    }
}

/// Relay a record to the store.
async fn upload_record(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<serde_json::Value>, AppError> {
    let req: UploadRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, "rejecting upload request");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;

    let created = state.store.upload(&req.collection, &req.data).await?;
    info!(collection = %req.collection, "record uploaded");

    Ok(Json(created))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// The request itself is malformed or describes an invalid timetable
    BadRequest { message: String },
    /// The record store failed or returned unusable data
    BadGateway { message: String },
    /// The record store rejected an upload with this status
    Upstream { status: u16, message: String },
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::BadGateway { .. } => StatusCode::BAD_GATEWAY,
            AppError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
        }
    }

    fn message(&self) -> &str {
        match self {
            AppError::BadRequest { message }
            | AppError::BadGateway { message }
            | AppError::Upstream { message, .. } => message,
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(e: ValidationError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::InvalidCollection(_) => AppError::BadRequest {
                message: e.to_string(),
            },
            StoreError::Api { status, message } => AppError::Upstream { status, message },
            _ => AppError::BadGateway {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(%status, message = self.message(), "request failed");
        } else {
            warn!(%status, message = self.message(), "request rejected");
        }

        let body = Json(ErrorResponse {
            error: self.message().to_string(),
        });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_bad_requests() {
        let err = AppError::from(ValidationError::InvalidHeadway(-1));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.message(),
            "headway must be a non-negative number of minutes, got -1"
        );
    }

    #[test]
    fn store_errors_map_by_cause() {
        let err = AppError::from(StoreError::InvalidCollection("a/b".into()));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let err = AppError::from(StoreError::Api {
            status: 404,
            message: "missing collection".into(),
        });
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.message(), "missing collection");

        let err = AppError::from(StoreError::Json {
            collection: "trains".into(),
            message: "eof".into(),
        });
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);

        // Bad records in the store are not the caller's fault
        let err = AppError::from(StoreError::InvalidRecord(ValidationError::EmptySchedule(
            "T1".into(),
        )));
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn nonsense_upstream_status_becomes_bad_gateway() {
        let err = AppError::Upstream {
            status: 42,
            message: "odd".into(),
        };
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
    }
}
