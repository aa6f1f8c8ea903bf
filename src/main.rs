use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use stock_analyzer::application::ports::{AnalysisEngine, JobRepository, ReportStore};
use stock_analyzer::application::services::{AnalysisService, AnalysisWorker, JobSupervisor};
use stock_analyzer::infrastructure::analysis::{CrewAnalysisEngine, ScaffoldAnalysisEngine};
use stock_analyzer::infrastructure::llm::OpenAiClient;
use stock_analyzer::infrastructure::observability::{TracingConfig, init_tracing};
use stock_analyzer::infrastructure::persistence::InMemoryJobRepository;
use stock_analyzer::infrastructure::storage::LocalReportStore;
use stock_analyzer::presentation::{AppState, Environment, ScaffoldConfig, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("Failed to load settings")?;

    init_tracing(
        TracingConfig::from_settings(&settings.logging, environment),
        settings.server.port,
    )?;

    let job_repository: Arc<dyn JobRepository> = Arc::new(InMemoryJobRepository::new());
    let report_store: Arc<dyn ReportStore> = Arc::new(
        LocalReportStore::new(settings.analysis.reports_dir.clone().into())
            .context("Failed to open report directory")?,
    );
    let engine = build_engine(&settings)?;

    let supervisor = Arc::new(JobSupervisor::new());
    let (sender, receiver) = mpsc::channel(settings.analysis.queue_capacity.max(1));

    let worker = AnalysisWorker::new(
        receiver,
        engine,
        Arc::clone(&job_repository),
        Arc::clone(&report_store),
        Arc::clone(&supervisor),
        settings.analysis.max_concurrent_jobs,
    );
    let worker_task = tokio::spawn(worker.run());

    let analysis_service = Arc::new(AnalysisService::new(
        job_repository,
        report_store,
        sender,
        Arc::clone(&supervisor),
    ));

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server address")?;

    let state = AppState {
        analysis_service,
        settings,
    };
    let router = create_router(state);

    tracing::info!("Listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    supervisor.shutdown().await;
    worker_task.abort();
    tracing::info!("Server stopped");

    Ok(())
}

fn build_engine(settings: &Settings) -> anyhow::Result<Arc<dyn AnalysisEngine>> {
    let scaffold = ScaffoldConfig::from_env();

    if scaffold.is_active(&settings.llm) {
        if !scaffold.enabled {
            tracing::warn!("No LLM api key configured, falling back to scaffold mode");
        }
        tracing::info!(
            delay_ms = scaffold.mock_response_delay_ms,
            "Scaffold mode enabled, serving canned reports"
        );
        return Ok(Arc::new(ScaffoldAnalysisEngine::new(
            scaffold.mock_response_delay(),
        )));
    }

    let llm = Arc::new(OpenAiClient::new(&settings.llm).context("Failed to build LLM client")?);
    tracing::info!(model = %settings.llm.chat_model, "Using LLM analysis crew");
    Ok(Arc::new(CrewAnalysisEngine::new(llm)))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
