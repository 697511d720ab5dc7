use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::response::ApiResponse;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    /// Request body rejected before parsing (too large, wrong content type).
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },

    #[error("ORM error")]
    OrmError(#[from] sea_orm::DbErr),

    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn not_found(message: impl Into<String>) -> Self {
        AppError::NotFound(message.into())
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        AppError::BadRequest(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Rejected { status, .. } => *status,
            AppError::OrmError(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonSyntaxError(_) | JsonRejection::JsonDataError(_) => {
                AppError::BadRequest(rejection.body_text())
            }
            other => AppError::Rejected {
                status: other.status(),
                message: other.body_text(),
            },
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorData {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = match &self {
            AppError::NotFound(_) | AppError::BadRequest(_) | AppError::Rejected { .. } => {
                self.to_string()
            }
            AppError::OrmError(err) => {
                tracing::error!(error = %err, "database error");
                "Internal server error".to_string()
            }
            AppError::Internal(err) => {
                tracing::error!(error = ?err, "internal error");
                "Internal server error".to_string()
            }
        };

        let message = status.canonical_reason().unwrap_or("Error");
        let body = ApiResponse::success(message, ErrorData { error });

        (status, axum::Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
