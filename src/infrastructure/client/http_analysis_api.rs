use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::application::ports::{AnalysisApi, AnalysisApiError, StatusSnapshot};
use crate::domain::CompanyName;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// [`AnalysisApi`] over HTTP, against a running analysis server.
pub struct HttpAnalysisApi {
    client: Client,
    base_url: Url,
}

#[derive(Deserialize)]
struct MessageBody {
    message: String,
}

#[derive(Deserialize)]
struct ResultBody {
    result: String,
}

impl HttpAnalysisApi {
    pub fn new(base_url: &str) -> Result<Self, AnalysisApiError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| AnalysisApiError::InvalidBaseUrl(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(AnalysisApiError::InvalidBaseUrl(base_url.to_string()));
        }

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AnalysisApiError::Transport(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    /// Appends path segments to the base url, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, AnalysisApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AnalysisApiError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, AnalysisApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AnalysisApiError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| AnalysisApiError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl AnalysisApi for HttpAnalysisApi {
    async fn submit(&self, company: &CompanyName) -> Result<String, AnalysisApiError> {
        let url = self.endpoint(&["analyze", ""])?;
        let response = self
            .client
            .post(url)
            .json(&serde_json::json!({ "company": company.as_str() }))
            .send()
            .await
            .map_err(|e| AnalysisApiError::Transport(e.to_string()))?;

        let body: MessageBody = Self::decode(response).await?;
        Ok(body.message)
    }

    async fn status(&self, company: &CompanyName) -> Result<StatusSnapshot, AnalysisApiError> {
        let url = self.endpoint(&["status", company.as_str()])?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AnalysisApiError::Transport(e.to_string()))?;

        Self::decode(response).await
    }

    async fn result(&self, company: &CompanyName) -> Result<String, AnalysisApiError> {
        let url = self.endpoint(&["result", company.as_str()])?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AnalysisApiError::Transport(e.to_string()))?;

        let body: ResultBody = Self::decode(response).await?;
        Ok(body.result)
    }
}
