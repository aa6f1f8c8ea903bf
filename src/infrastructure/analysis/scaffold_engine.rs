use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::{AnalysisEngine, AnalysisEngineError};
use crate::domain::CompanyName;

/// Canned report after a fixed delay. Lets the service run end to end
/// without an LLM.
pub struct ScaffoldAnalysisEngine {
    delay: Duration,
}

impl ScaffoldAnalysisEngine {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl AnalysisEngine for ScaffoldAnalysisEngine {
    async fn analyze(&self, company: &CompanyName) -> Result<String, AnalysisEngineError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(format!(
            "# Stock analysis: {company}\n\n\
             Scaffold mode is enabled, so no model was consulted.\n\
             Configure an LLM API key to get a real analysis of {company}.\n"
        ))
    }
}
