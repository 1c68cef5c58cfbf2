//! Screening pipelines.
//!
//! Each run performs its collaborator calls strictly in order (universe,
//! price snapshots, per-symbol market caps) and builds the report only after
//! every call has succeeded. Nothing is retried or cached; the first failure
//! aborts the run with the stage it happened in. An empty price snapshot (a
//! closed market, or a provider response without results) is a failure too.

use chrono::NaiveDate;
use derive_more::Display;
use indicatif::ProgressBar;
use screener::{
    IndexUniverse, ScreenError, ScreenerConfig, allocate, equal_weight_candidates, latest_session,
    rank_returns,
};
use screener_data::{MarketDataSource, PriceBar, UniverseSource};
use screener_output::{
    ExportError, ExportFormat, Exporter, PortfolioReport, PortfolioReportBuilder, ReportEntry,
    ReportError, ScreenKind,
};
use std::path::{Path, PathBuf};

/// Pipeline step, used to name the failing stage in diagnostics.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Stage {
    #[display("validating configuration")]
    Config,
    #[display("resolving change window")]
    Window,
    #[display("loading index universe")]
    Universe,
    #[display("fetching current prices")]
    CurrentPrices,
    #[display("fetching past prices")]
    PastPrices,
    #[display("fetching market caps")]
    MarketCaps,
    #[display("ranking returns")]
    Ranking,
    #[display("allocating capital")]
    Allocation,
    #[display("fetching quote")]
    Quote,
}

/// Error type for pipeline runs.
#[derive(Debug, thiserror::Error)]
pub(crate) enum PipelineError {
    /// A screening stage failed.
    #[error("{stage} failed: {source}")]
    Screen {
        stage: Stage,
        #[source]
        source: ScreenError,
    },
    /// The report could not be assembled.
    #[error("building report failed: {0}")]
    Report(#[from] ReportError),
    /// The report could not be written.
    #[error("writing report failed: {0}")]
    Export(#[from] ExportError),
}

impl PipelineError {
    #[cfg(test)]
    pub(crate) const fn stage(&self) -> Option<Stage> {
        match self {
            Self::Screen { stage, .. } => Some(*stage),
            Self::Report(_) | Self::Export(_) => None,
        }
    }
}

trait AtStage<T> {
    fn at(self, stage: Stage) -> Result<T, PipelineError>;
}

impl<T, E: Into<ScreenError>> AtStage<T> for Result<T, E> {
    fn at(self, stage: Stage) -> Result<T, PipelineError> {
        self.map_err(|e| PipelineError::Screen {
            stage,
            source: e.into(),
        })
    }
}

/// Build the equal-weight index report.
///
/// Every constituent priced on the latest session gets the same slice of
/// capital. Constituents missing from the snapshot are listed as
/// unavailable.
pub(crate) async fn equal_weight_report<M, U>(
    market: &M,
    universe_source: &U,
    config: &ScreenerConfig,
    today: NaiveDate,
    progress: Option<&ProgressBar>,
) -> Result<PortfolioReport, PipelineError>
where
    M: MarketDataSource,
    U: UniverseSource,
{
    config.validate().at(Stage::Config)?;

    let universe = IndexUniverse::load(universe_source).await.at(Stage::Universe)?;
    let as_of = latest_session(today);
    let snapshot = market.prices_on_date(as_of).await.at(Stage::CurrentPrices)?;
    if snapshot.is_empty() {
        return Err(ScreenError::NoData(format!("no prices for {as_of}"))).at(Stage::CurrentPrices);
    }

    let candidates = equal_weight_candidates(&universe, &snapshot);
    if candidates.records.is_empty() {
        return Err(ScreenError::NoData(format!(
            "no index constituent priced on {as_of}"
        )))
        .at(Stage::CurrentPrices);
    }
    if !candidates.unavailable.is_empty() {
        tracing::warn!(
            count = candidates.unavailable.len(),
            "constituents missing from current prices"
        );
    }

    if let Some(pb) = progress {
        pb.set_length(candidates.records.len() as u64);
        pb.set_message("Fetching market caps...");
    }
    let mut records = Vec::with_capacity(candidates.records.len());
    for record in candidates.records {
        let market_cap = market.market_cap(&record.symbol).await.at(Stage::MarketCaps)?;
        if let Some(pb) = progress {
            pb.inc(1);
        }
        records.push(record.with_market_cap(market_cap));
    }
    if let Some(pb) = progress {
        pb.finish_with_message(format!("Fetched {} market caps", records.len()));
    }

    let allocation = allocate(&records, config.portfolio_amount, records.len())
        .at(Stage::Allocation)?;

    let entries = records
        .iter()
        .zip(&allocation.shares)
        .map(|(record, &shares)| {
            ReportEntry::new(
                record.symbol.clone(),
                record.price,
                record.market_cap.unwrap_or_default(),
                shares,
            )
        });

    let report = PortfolioReportBuilder::new(ScreenKind::EqualWeight)
        .as_of(as_of)
        .entries(entries)
        .total_capital(config.portfolio_amount)
        .capital_invested(allocation.capital_invested)
        .capital_remaining(allocation.capital_remaining)
        .unavailable(candidates.unavailable)
        .build()?;

    tracing::info!(
        positions = report.entries.len(),
        invested = report.summary.capital_invested,
        "equal-weight report built"
    );
    Ok(report)
}

/// Build the momentum report for the configured change window.
pub(crate) async fn momentum_report<M, U>(
    market: &M,
    universe_source: &U,
    config: &ScreenerConfig,
    today: NaiveDate,
) -> Result<PortfolioReport, PipelineError>
where
    M: MarketDataSource,
    U: UniverseSource,
{
    config.validate().at(Stage::Config)?;
    let window = config.change_window.resolve(today).at(Stage::Window)?;
    tracing::info!(
        window = %window.window,
        current = %window.current_iso(),
        past = %window.past_iso(),
        "resolved change window"
    );

    let universe = if config.spy_only {
        Some(IndexUniverse::load(universe_source).await.at(Stage::Universe)?)
    } else {
        None
    };

    let current = market
        .prices_on_date(window.current)
        .await
        .at(Stage::CurrentPrices)?;
    if current.is_empty() {
        return Err(ScreenError::NoData(format!("no prices for {}", window.current)))
            .at(Stage::CurrentPrices);
    }
    let past = market.prices_on_date(window.past).await.at(Stage::PastPrices)?;
    if past.is_empty() {
        return Err(ScreenError::NoData(format!(
            "no prices for {} (market closed?)",
            window.past
        )))
        .at(Stage::PastPrices);
    }

    let ranking = rank_returns(&current, &past, universe.as_ref(), config.portfolio_size)
        .at(Stage::Ranking)?;
    let allocation = allocate(
        &ranking.entries,
        config.portfolio_amount,
        config.portfolio_size,
    )
    .at(Stage::Allocation)?;

    let entries = ranking
        .entries
        .iter()
        .zip(&allocation.shares)
        .map(|(entry, &shares)| {
            ReportEntry::new(entry.symbol.clone(), entry.price, entry.percent_change, shares)
        });

    let report = PortfolioReportBuilder::new(ScreenKind::momentum(window.window.to_string()))
        .as_of(window.current)
        .entries(entries)
        .total_capital(config.portfolio_amount)
        .capital_invested(allocation.capital_invested)
        .capital_remaining(allocation.capital_remaining)
        .unavailable(ranking.unavailable)
        .build()?;

    tracing::info!(
        positions = report.entries.len(),
        unavailable = report.summary.unavailable_count(),
        invested = report.summary.capital_invested,
        "momentum report built"
    );
    Ok(report)
}

/// Await `report` and write it into `dir`.
///
/// Nothing touches the filesystem until the report has been built, so a
/// failed run leaves no file behind.
pub(crate) async fn build_and_write<F>(
    report: F,
    dir: &Path,
    format: ExportFormat,
) -> Result<(PortfolioReport, PathBuf), PipelineError>
where
    F: Future<Output = Result<PortfolioReport, PipelineError>>,
{
    let report = report.await?;
    std::fs::create_dir_all(dir).map_err(ExportError::from)?;
    let path = report.output_path(dir, format);
    report.export_to_file(&path, format)?;
    tracing::info!(path = %path.display(), "report written");
    Ok((report, path))
}

/// Previous-session bar for one symbol.
pub(crate) async fn quote<M: MarketDataSource>(
    market: &M,
    symbol: &str,
) -> Result<PriceBar, PipelineError> {
    market.previous_close(symbol).await.at(Stage::Quote)
}
