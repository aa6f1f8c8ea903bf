use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use stock_analyzer::application::ports::{AnalysisApi, AnalysisApiError};
use stock_analyzer::domain::JobStatus;
use stock_analyzer::infrastructure::client::HttpAnalysisApi;

use crate::helpers::company;

#[tokio::test]
async fn given_server_when_submitting_then_posts_company_and_returns_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyze/"))
        .and(body_json(json!({ "company": "Acme" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "message": "Analysis started for Acme" })),
        )
        .expect(1)
        .mount(&server)
        .await;
    let api = HttpAnalysisApi::new(&server.uri()).unwrap();

    let message = api.submit(&company("Acme")).await.unwrap();

    assert_eq!(message, "Analysis started for Acme");
}

#[tokio::test]
async fn given_company_with_spaces_when_checking_status_then_name_is_percent_encoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status/Acme%20Corp"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "In Progress" })))
        .expect(1)
        .mount(&server)
        .await;
    let api = HttpAnalysisApi::new(&server.uri()).unwrap();

    let snapshot = api.status(&company("Acme Corp")).await.unwrap();

    assert_eq!(snapshot.status, JobStatus::InProgress);
    assert!(snapshot.error.is_none());
}

#[tokio::test]
async fn given_failed_job_when_checking_status_then_error_is_decoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status/Acme"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "status": "Failed", "error": "quota exceeded" })),
        )
        .mount(&server)
        .await;
    let api = HttpAnalysisApi::new(&server.uri()).unwrap();

    let snapshot = api.status(&company("Acme")).await.unwrap();

    assert_eq!(snapshot.status, JobStatus::Failed);
    assert_eq!(snapshot.error.as_deref(), Some("quota exceeded"));
}

#[tokio::test]
async fn given_base_url_with_path_when_fetching_result_then_path_is_kept() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/result/Acme"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": "Buy." })))
        .expect(1)
        .mount(&server)
        .await;
    let api = HttpAnalysisApi::new(&format!("{}/api/", server.uri())).unwrap();

    let result = api.result(&company("Acme")).await.unwrap();

    assert_eq!(result, "Buy.");
}

#[tokio::test]
async fn given_error_status_when_fetching_result_then_unexpected_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/result/Acme"))
        .respond_with(
            ResponseTemplate::new(409)
                .set_body_json(json!({ "error": "Analysis failed for Acme: boom" })),
        )
        .mount(&server)
        .await;
    let api = HttpAnalysisApi::new(&server.uri()).unwrap();

    let err = api.result(&company("Acme")).await.unwrap_err();

    match err {
        AnalysisApiError::UnexpectedStatus { status, body } => {
            assert_eq!(status, 409);
            assert!(body.contains("boom"));
        }
        other => panic!("expected unexpected status, got {:?}", other),
    }
}

#[tokio::test]
async fn given_malformed_body_when_checking_status_then_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status/Acme"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;
    let api = HttpAnalysisApi::new(&server.uri()).unwrap();

    let err = api.status(&company("Acme")).await.unwrap_err();

    assert!(matches!(err, AnalysisApiError::InvalidResponse(_)));
}

#[test]
fn given_invalid_base_url_when_creating_client_then_rejected() {
    assert!(matches!(
        HttpAnalysisApi::new("not a url"),
        Err(AnalysisApiError::InvalidBaseUrl(_))
    ));
}
