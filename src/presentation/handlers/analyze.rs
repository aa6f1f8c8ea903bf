use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use crate::application::services::{AnalysisServiceError, Submission};
use crate::domain::CompanyName;
use crate::presentation::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub company: String,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub(crate) fn error_response(status: StatusCode, error: String) -> axum::response::Response {
    (status, Json(ErrorResponse { error })).into_response()
}

#[tracing::instrument(skip(state, request), fields(company = %request.company))]
pub async fn analyze_handler(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> impl IntoResponse {
    let company = match CompanyName::parse(request.company) {
        Ok(company) => company,
        Err(e) => {
            tracing::warn!("Analysis request with blank company name");
            return error_response(StatusCode::BAD_REQUEST, e.to_string());
        }
    };

    match state.analysis_service.submit(company).await {
        Ok(Submission::Started(job)) => (
            StatusCode::OK,
            Json(MessageResponse {
                message: format!("Analysis started for {}", job.company),
            }),
        )
            .into_response(),
        Ok(Submission::AlreadyInProgress(job)) => (
            StatusCode::OK,
            Json(MessageResponse {
                message: format!("Analysis already in progress for {}", job.company),
            }),
        )
            .into_response(),
        Err(AnalysisServiceError::QueueUnavailable(reason)) => error_response(
            StatusCode::SERVICE_UNAVAILABLE,
            format!("Analysis could not be scheduled: {}", reason),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Failed to submit analysis");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to submit analysis: {}", e),
            )
        }
    }
}

#[tracing::instrument(skip(state))]
pub async fn cancel_handler(
    State(state): State<AppState>,
    Path(company): Path<String>,
) -> impl IntoResponse {
    let Ok(company) = CompanyName::parse(company) else {
        return error_response(StatusCode::NOT_FOUND, "No analysis in progress".to_string());
    };

    match state.analysis_service.cancel(&company).await {
        Ok(Some(_)) => (
            StatusCode::OK,
            Json(MessageResponse {
                message: format!("Analysis cancelled for {}", company),
            }),
        )
            .into_response(),
        Ok(None) => error_response(
            StatusCode::NOT_FOUND,
            format!("No analysis in progress for {}", company),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Failed to cancel analysis");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to cancel analysis: {}", e),
            )
        }
    }
}
