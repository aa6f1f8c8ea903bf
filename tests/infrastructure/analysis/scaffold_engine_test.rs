use std::time::Duration;

use stock_analyzer::application::ports::AnalysisEngine;
use stock_analyzer::infrastructure::analysis::ScaffoldAnalysisEngine;

use crate::helpers::company;

#[tokio::test]
async fn given_scaffold_engine_when_analyzing_then_returns_canned_report_for_company() {
    let engine = ScaffoldAnalysisEngine::new(Duration::ZERO);

    let report = engine.analyze(&company("Acme")).await.unwrap();

    assert!(report.starts_with("# Stock analysis: Acme"));
}

#[tokio::test(start_paused = true)]
async fn given_delay_when_analyzing_then_waits_before_reporting() {
    let engine = ScaffoldAnalysisEngine::new(Duration::from_secs(2));
    let started = tokio::time::Instant::now();

    engine.analyze(&company("Acme")).await.unwrap();

    assert!(started.elapsed() >= Duration::from_secs(2));
}
