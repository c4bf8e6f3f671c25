use anyhow::Result;
use clap::Parser;
use gmail_domain_report::aggregator::InboxAggregator;
use gmail_domain_report::auth::Authenticator;
use gmail_domain_report::cli::{Cli, ProgressReporter};
use gmail_domain_report::client::{build_hub, ApiGmailClient};
use gmail_domain_report::config::Config;
use std::process;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Exit with proper code on error
    if let Err(e) = run().await {
        eprintln!("An error occurred: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Install default crypto provider for rustls
    // On non-Windows platforms, use aws-lc-rs (better performance, FIPS support)
    // On Windows, use ring (better compatibility, no NASM/CMake required)
    #[cfg(not(windows))]
    rustls::crypto::aws_lc_rs::default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("Failed to install default crypto provider"))?;

    #[cfg(windows)]
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("Failed to install default crypto provider"))?;

    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize tracing with level based on verbose flag
    let filter = if cli.verbose {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("gmail_domain_report=debug,info"))
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("gmail_domain_report=info,warn,error"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    tracing::info!("Gmail domain report starting");

    let config = Config::load(&cli.config).await?;

    // Reuse, refresh or re-consent; fails the run if no usable credential
    // can be produced
    let credential = Authenticator::new(&cli.credentials, &cli.token_cache, config.auth.clone())
        .authenticate()
        .await?;

    let hub = build_hub(&credential)?;
    let client = ApiGmailClient::new(hub, config.report.user_id.clone(), config.report.page_size);
    let aggregator = InboxAggregator::new(Box::new(client), config.report.progress_interval);

    let reporter = ProgressReporter::new();
    let spinner = reporter.add_spinner("Fetching unread messages from inbox...");
    let report = aggregator
        .aggregate_with_progress(|processed, total| {
            spinner.set_message(format!("Analyzing messages ({}/{})", processed, total));
        })
        .await?;
    let analyzed: usize = report.entries.iter().map(|e| e.group.count).sum();
    reporter.finish_spinner(&spinner, &format!("Analyzed {} unread messages", analyzed));

    report.render(&mut std::io::stdout())?;

    Ok(())
}
