use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{AnalysisEngine, AnalysisEngineError, LlmClient};
use crate::domain::CompanyName;

use super::crew::TASKS;

/// Runs the crew tasks sequentially over one LLM client and assembles the
/// report from their outputs, ending with the recommendation.
pub struct CrewAnalysisEngine<L: ?Sized> {
    llm: Arc<L>,
}

impl<L: LlmClient + ?Sized> CrewAnalysisEngine<L> {
    pub fn new(llm: Arc<L>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl<L: LlmClient + ?Sized> AnalysisEngine for CrewAnalysisEngine<L> {
    #[tracing::instrument(skip_all, fields(company = %company))]
    async fn analyze(&self, company: &CompanyName) -> Result<String, AnalysisEngineError> {
        let mut sections: Vec<(&str, String)> = Vec::with_capacity(TASKS.len());

        for task in &TASKS {
            tracing::debug!(task = task.name, agent = task.agent.role, "Starting crew task");

            let prompt = {
                let previous: Vec<(&str, &str)> = sections
                    .iter()
                    .map(|(heading, output)| (*heading, output.as_str()))
                    .collect();
                task.user_prompt(company.as_str(), &previous)
            };
            let output = self
                .llm
                .complete(&task.agent.system_prompt(), &prompt)
                .await?;

            if output.trim().is_empty() {
                return Err(AnalysisEngineError::EmptyOutput(task.name.to_string()));
            }
            sections.push((task.heading, output));
        }

        let mut report = format!("# Stock analysis: {}\n", company);
        for (heading, output) in &sections {
            report.push_str(&format!("\n## {}\n\n{}\n", heading, output.trim()));
        }
        Ok(report)
    }
}
