use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{response::ApiResponse, state::AppState};

#[derive(Serialize, ToSchema)]
pub struct HealthData {
    pub status: String,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "OK", body = ApiResponse<HealthData>),
    ),
        tag = "Health"
)]
pub async fn health_check() -> Json<ApiResponse<HealthData>> {
    let data = HealthData {
        status: "ok".to_string(),
    };

    Json(ApiResponse::success("Health check", data))
}

#[utoipa::path(
    get,
    path = "/health/ready",
    responses(
        (status = 200, description = "Database reachable", body = ApiResponse<HealthData>),
        (status = 503, description = "Database unreachable", body = ApiResponse<HealthData>),
    ),
    tag = "Health"
)]
pub async fn readiness(
    State(state): State<AppState>,
) -> (StatusCode, Json<ApiResponse<HealthData>>) {
    match state.orm.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                "Ready",
                HealthData {
                    status: "ok".to_string(),
                },
            )),
        ),
        Err(err) => {
            tracing::warn!(error = %err, "readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ApiResponse::success(
                    "Not ready",
                    HealthData {
                        status: "unavailable".to_string(),
                    },
                )),
            )
        }
    }
}
