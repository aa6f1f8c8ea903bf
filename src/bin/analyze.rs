//! Command-line client: submits a company to a running analysis server,
//! polls until the job finishes and prints the report.

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use stock_analyzer::application::services::{AnalysisPoller, PollPolicy};
use stock_analyzer::domain::CompanyName;
use stock_analyzer::infrastructure::client::HttpAnalysisApi;

/// Run a stock analysis against a running server
///
/// Examples:
///   analyze "Acme Corp"
///   analyze --base-url http://10.0.0.5:8000 --max-attempts 120 Acme
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Company to analyze
    company: String,

    /// Base url of the analysis server
    #[arg(long, default_value = "http://127.0.0.1:8000", env = "ANALYZER_URL")]
    base_url: String,

    /// Status checks before giving up
    #[arg(long, default_value = "600", value_name = "COUNT")]
    max_attempts: u32,

    /// Delay before the second status check; later delays grow from it
    #[arg(long, default_value = "1000", value_name = "MS")]
    initial_interval_ms: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let company = CompanyName::parse(args.company)?;

    let policy = PollPolicy {
        initial_interval: Duration::from_millis(args.initial_interval_ms),
        max_attempts: args.max_attempts,
        ..PollPolicy::default()
    };
    let api = Arc::new(HttpAnalysisApi::new(&args.base_url)?);
    let poller = AnalysisPoller::new(api, policy);

    println!("Analyzing {}...", company);
    match poller.analyze(&company).await {
        Ok(report) => {
            println!("{}", report.status);
            println!();
            println!("{}", report.result);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Analysis did not complete");
            println!("{}", e);
            println!("No result");
            Ok(ExitCode::FAILURE)
        }
    }
}
