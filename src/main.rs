use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use engine::Engine;
use rust_decimal::Decimal;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// The main entry point for the ratesense application.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables (e.g. RUST_LOG overrides) from a .env file.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    // The guard must outlive the command so buffered file logs get flushed.
    let _guard = match &cli.command {
        Commands::Serve(args) => init_tracing(args.log_dir.as_deref()),
        Commands::Analyze(_) => init_tracing(None),
    };

    // Execute the appropriate command
    match cli.command {
        Commands::Serve(args) => handle_serve(&cli.config, args).await,
        Commands::Analyze(args) => handle_analyze(&cli.config, args).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Estimates the sensitivity of an insurer's book equity to long-term market rates.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file.
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API server.
    Serve(ServeArgs),

    /// Run a one-shot analysis and print the result as a table.
    Analyze(AnalyzeArgs),
}

#[derive(Parser)]
struct ServeArgs {
    /// Override the port from the configuration file.
    #[arg(long)]
    port: Option<u16>,

    /// Write daily-rolling log files to this directory instead of stderr.
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

#[derive(Parser)]
struct AnalyzeArgs {
    /// The company to analyze (e.g. "samsung").
    #[arg(long)]
    company: String,

    /// Lookback window in years.
    #[arg(long)]
    years: Option<u32>,

    /// Anchor the quarter axis at this date instead of today (format: YYYY-MM-DD).
    #[arg(long)]
    as_of: Option<NaiveDate>,
}

// ==============================================================================
// Command Logic
// ==============================================================================

/// Initializes the tracing subscriber, optionally writing to rolling files.
fn init_tracing(log_dir: Option<&Path>) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "ratesense.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::fmt().with_env_filter(filter).init();
            None
        }
    }
}

async fn handle_serve(config_path: &Path, args: ServeArgs) -> anyhow::Result<()> {
    let mut config = configuration::load_config_from(config_path)
        .with_context(|| format!("failed to load {}", config_path.display()))?;
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("invalid server binding in configuration")?;

    let engine = Engine::from_csv_store(config);
    web_server::run_server(engine, addr).await
}

async fn handle_analyze(config_path: &Path, args: AnalyzeArgs) -> anyhow::Result<()> {
    let config = configuration::load_config_from(config_path)
        .with_context(|| format!("failed to load {}", config_path.display()))?;
    let engine = Engine::from_csv_store(config);

    let report = match args.as_of {
        Some(as_of) => {
            engine
                .analyze_as_of(&args.company, args.years, as_of)
                .await?
        }
        None => engine.analyze(&args.company, args.years).await?,
    };

    println!(
        "{} — book-equity rate sensitivity over {} quarters",
        report.company,
        report.quarters.len()
    );

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let mut header = vec![
        "Quarter".to_string(),
        "Equity".to_string(),
        "Equity QoQ".to_string(),
    ];
    for rate in &report.rates {
        header.push(rate.label.clone());
        header.push(format!("{} Δpp", rate.label));
        header.push(format!("{} duration", rate.label));
    }
    table.set_header(header);

    for (i, quarter) in report.quarters.iter().enumerate() {
        let mut row = vec![
            quarter.to_string(),
            fmt_opt(report.equity_level[i], 1),
            fmt_opt(report.equity_qoq[i], 4),
        ];
        for rate in &report.rates {
            row.push(fmt_opt(rate.level[i], 3));
            row.push(fmt_opt(rate.change[i], 3));
            row.push(fmt_opt(rate.duration.series[i], 2));
        }
        table.add_row(row);
    }

    println!("{table}");

    for rate in &report.rates {
        match rate.duration.summary {
            Some(summary) => {
                println!("{} summary duration: {}", rate.label, summary.round_dp(2))
            }
            None => println!("{} summary duration: n/a", rate.label),
        }
    }

    Ok(())
}

/// Renders an optional value at the given precision, with "-" for gaps.
fn fmt_opt(value: Option<Decimal>, dp: u32) -> String {
    match value {
        Some(v) => v.round_dp(dp).to_string(),
        None => "-".to_string(),
    }
}
