//! Screener CLI binary.
//!
//! Builds equal-weight and momentum portfolios from the S&P 500 and writes
//! them as spreadsheet-style reports.

mod integration;

use chrono::Local;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use integration::pipeline::{build_and_write, equal_weight_report, momentum_report, quote};
use screener::{ChangeWindow, ScreenerConfig};
use screener_data::{
    MarketDataSource, PolygonClient, ProviderConfig, SandboxMarketData, UniverseSource,
    WikiTableClient,
};
use screener_output::{ExportFormat, PortfolioReport};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration as StdDuration;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "screener")]
#[command(about = "Screener: equal-weight and momentum portfolios", long_about = None)]
#[command(version)]
struct Cli {
    /// Use deterministic offline data instead of the live providers
    #[arg(long, global = true)]
    sandbox: bool,

    /// Directory reports are written to
    #[arg(long, global = true, default_value = ".")]
    output_dir: PathBuf,

    /// Report format (csv, json or pretty-json)
    #[arg(long, global = true, default_value = "csv")]
    format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Equal-weight every S&P 500 constituent
    EqualWeight {
        /// Portfolio amount in dollars
        #[arg(long, default_value_t = 10_000_000.0)]
        amount: f64,
    },

    /// Buy the best performers over a change window
    Momentum {
        /// Portfolio amount in dollars
        #[arg(long, default_value_t = 10_000_000.0)]
        amount: f64,

        /// Number of positions
        #[arg(long, default_value_t = 50)]
        size: usize,

        /// Change window (maxChange, 5year, 1year, ytd, 6month, 3month,
        /// 1month, 30day, 15day, 5day, 1day)
        #[arg(long, default_value = "1year")]
        window: ChangeWindow,

        /// Only rank S&P 500 constituents
        #[arg(long)]
        spy_only: bool,
    },

    /// Show the previous session's bar for a symbol
    Quote {
        /// Stock symbol
        symbol: String,
    },

    /// List change windows and the dates they resolve to today
    Windows,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run().await {
        tracing::error!("{e}");
        process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if let Commands::Windows = cli.command {
        list_windows();
        return Ok(());
    }

    if cli.sandbox {
        tracing::info!("using sandbox market data");
        let sandbox = SandboxMarketData::latest();
        dispatch(&sandbox, &sandbox, cli).await
    } else {
        let provider = ProviderConfig::from_env()?;
        let market = PolygonClient::new(&provider)?;
        let universe = WikiTableClient::new(&provider)?;
        dispatch(&market, &universe, cli).await
    }
}

async fn dispatch<M, U>(market: &M, universe: &U, cli: Cli) -> Result<(), Box<dyn std::error::Error>>
where
    M: MarketDataSource,
    U: UniverseSource,
{
    let format: ExportFormat = cli.format.parse()?;
    let today = Local::now().date_naive();

    match cli.command {
        Commands::EqualWeight { amount } => {
            let config = ScreenerConfig {
                portfolio_amount: amount,
                sandbox: cli.sandbox,
                ..Default::default()
            };
            let pb = progress_bar()?;
            let written = build_and_write(
                equal_weight_report(market, universe, &config, today, Some(&pb)),
                &cli.output_dir,
                format,
            )
            .await;
            if written.is_err() {
                pb.abandon();
            }
            let (report, path) = written?;
            print_summary(&report, &path);
        }
        Commands::Momentum {
            amount,
            size,
            window,
            spy_only,
        } => {
            let config = ScreenerConfig {
                portfolio_amount: amount,
                portfolio_size: size,
                change_window: window,
                spy_only,
                sandbox: cli.sandbox,
            };
            let (report, path) = build_and_write(
                momentum_report(market, universe, &config, today),
                &cli.output_dir,
                format,
            )
            .await?;
            print_summary(&report, &path);
        }
        Commands::Quote { symbol } => {
            let symbol = symbol.trim().to_uppercase();
            let bar = quote(market, &symbol).await?;
            println!(
                "{symbol}: low {:.2}  high {:.2}  close {:.2}",
                bar.low, bar.high, bar.close
            );
        }
        Commands::Windows => list_windows(),
    }

    Ok(())
}

fn progress_bar() -> Result<ProgressBar, indicatif::style::TemplateError> {
    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("█▓░"),
    );
    pb.enable_steady_tick(StdDuration::from_millis(100));
    Ok(pb)
}

fn print_summary(report: &PortfolioReport, path: &Path) {
    println!("Positions: {}", report.entries.len());
    println!("Capital invested: {:.2}", report.summary.capital_invested);
    println!("Capital remaining: {:.2}", report.summary.capital_remaining);
    if !report.summary.unavailable.is_empty() {
        println!("Unavailable: {}", report.summary.unavailable.len());
    }
    println!("Wrote {}", path.display());
}

fn list_windows() {
    let today = Local::now().date_naive();
    println!("{:<10} {:<12} {:<12}", "Window", "Past", "Current");
    println!("{}", "-".repeat(36));
    for window in ChangeWindow::ALL {
        match window.resolve(today) {
            Ok(dates) => println!(
                "{:<10} {:<12} {:<12}",
                window.to_string(),
                dates.past_iso(),
                dates.current_iso()
            ),
            Err(e) => println!("{:<10} {e}", window.to_string()),
        }
    }
}
