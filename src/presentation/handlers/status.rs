use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::domain::{CompanyName, JobStatus};
use crate::presentation::state::AppState;

use super::analyze::error_response;

#[derive(Serialize)]
pub struct StatusResponse {
    pub status: JobStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[tracing::instrument(skip(state))]
pub async fn status_handler(
    State(state): State<AppState>,
    Path(company): Path<String>,
) -> impl IntoResponse {
    // A blank key can never have been submitted.
    let Ok(company) = CompanyName::parse(company) else {
        return Json(StatusResponse {
            status: JobStatus::NotStarted,
            error: None,
        })
        .into_response();
    };

    match state.analysis_service.status(&company).await {
        Ok(view) => Json(StatusResponse {
            status: view.status,
            error: view
                .error_message
                .filter(|_| view.status == JobStatus::Failed),
        })
        .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch job status");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to fetch status: {}", e),
            )
        }
    }
}
