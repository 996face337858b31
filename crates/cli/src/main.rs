use clap::Parser;
use ferrous_collector_domain::CliOverrides;
use tracing::info;

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "ferrous-collector")]
#[command(version)]
#[command(about = "Ferrous Collector - DNS traffic collector with filtering and pluggable loggers")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Identity attached to every collected message
    #[arg(short = 'i', long)]
    identity: Option<String>,

    /// Write the effective configuration to FILE and exit
    #[arg(long, value_name = "FILE")]
    write_config: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let cli_overrides = CliOverrides {
        log_level: cli.log_level.clone(),
        identity: cli.identity.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    if let Some(path) = cli.write_config.as_deref() {
        config.save(path)?;
        println!("Configuration written to {}", path);
        return Ok(());
    }

    // Initialize logging
    bootstrap::init_logging(&config.logging);

    info!(
        identity = %config.global.identity,
        "Starting Ferrous Collector v{}",
        env!("CARGO_PKG_VERSION")
    );

    // Dependency Injection - sinks, filtering, use case
    let pipeline = di::Pipeline::new(&config).await?;

    let collectors = server::Collectors::start(&config, pipeline.use_case.clone()).await?;

    shutdown_signal().await;
    info!("Shutdown signal received, stopping collectors");

    collectors.stop().await;

    for report in pipeline.dispatcher.shutdown().await {
        info!(
            sink = %report.sink,
            written = report.written,
            failed = report.failed,
            "Sink closed"
        );
    }

    for (kind, count) in pipeline.stats.malformed_by_kind() {
        info!(kind, count, "Malformed payloads dropped");
    }

    let stats = pipeline.stats.snapshot();
    info!(
        received = stats.received,
        dispatched = stats.dispatched,
        filtered = stats.filtered,
        malformed = stats.malformed,
        undelivered = stats.undelivered,
        "Collector shutdown complete"
    );
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
