use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::application::services::{RESULT_PLACEHOLDER, ReportLookup};
use crate::domain::CompanyName;
use crate::presentation::state::AppState;

use super::analyze::error_response;

#[derive(Serialize)]
pub struct ResultResponse {
    pub result: String,
}

fn placeholder() -> axum::response::Response {
    Json(ResultResponse {
        result: RESULT_PLACEHOLDER.to_string(),
    })
    .into_response()
}

#[tracing::instrument(skip(state))]
pub async fn result_handler(
    State(state): State<AppState>,
    Path(company): Path<String>,
) -> impl IntoResponse {
    let Ok(company) = CompanyName::parse(company) else {
        return placeholder();
    };

    match state.analysis_service.result(&company).await {
        Ok(ReportLookup::Ready(report)) => Json(ResultResponse { result: report }).into_response(),
        Ok(ReportLookup::Pending) => placeholder(),
        Ok(ReportLookup::Failed(message)) => error_response(
            StatusCode::CONFLICT,
            format!("Analysis failed for {}: {}", company, message),
        ),
        Ok(ReportLookup::Cancelled) => error_response(
            StatusCode::CONFLICT,
            format!("Analysis cancelled for {}", company),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Failed to read analysis result");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to read result: {}", e),
            )
        }
    }
}
