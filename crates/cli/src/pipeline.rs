//! Pipeline runner: universe resolution and the bounded worker group.

use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::sync::Semaphore;

use stock_harvest_core::AppConfig;
use stock_harvest_data::listing;
use stock_harvest_nasdaq::NasdaqLister;

use crate::worker::{self, SymbolOutcome};

/// Tally of a completed run.
#[derive(Debug, Default, Clone)]
pub struct RunSummary {
    /// Symbols with both output files published.
    pub processed: usize,
    /// Symbols abandoned at some stage (or lost to a worker panic).
    pub skipped: usize,
}

impl RunSummary {
    /// Formats a one-line report.
    #[must_use]
    pub fn report(&self) -> String {
        format!("{} processed, {} skipped", self.processed, self.skipped)
    }
}

/// Resolves the symbol universe and runs one worker per symbol.
///
/// Symbols given on the command line are taken literally, order and
/// duplicates preserved. With no symbols, the exchange listing is downloaded
/// fresh and parsed into a deduplicated universe; a listing failure is fatal.
///
/// Workers run concurrently, bounded by `runtime.max_concurrent_symbols`.
/// The call returns only once every worker has finished; per-symbol failures
/// and panics are logged and tallied, never propagated.
///
/// # Errors
/// Returns an error only for startup failures: the listing download or its
/// parse. Per-symbol failures are reported in the summary.
pub async fn run(config: AppConfig, symbols: Vec<String>) -> Result<RunSummary> {
    let universe = if symbols.is_empty() {
        let lister = NasdaqLister::new(
            config.provider.listing_base_url.as_str(),
            config.provider.timeout_secs,
        )?;
        let listing_path = lister
            .download(&config.runtime.exchange, &config.paths.exchange_dir)
            .await
            .context("Exchange listing download failed")?;
        listing::load_symbols(&listing_path)?
    } else {
        symbols
    };

    tracing::info!(
        symbols = universe.len(),
        max_concurrent = config.runtime.max_concurrent_symbols,
        "Starting harvest"
    );

    let semaphore = Arc::new(Semaphore::new(config.runtime.max_concurrent_symbols.max(1)));
    let config = Arc::new(config);

    let mut handles = Vec::with_capacity(universe.len());
    for symbol in universe {
        let semaphore = Arc::clone(&semaphore);
        let config = Arc::clone(&config);
        handles.push(tokio::spawn(async move {
            let _permit = semaphore
                .acquire_owned()
                .await
                .expect("symbol semaphore closed");
            worker::process_symbol(&symbol, &config).await
        }));
    }

    let mut summary = RunSummary::default();
    for handle in handles {
        match handle.await {
            Ok(SymbolOutcome::Processed {
                symbol,
                history_rows,
                options_rows,
            }) => {
                tracing::info!(%symbol, history_rows, options_rows, "Symbol processed");
                summary.processed += 1;
            }
            Ok(SymbolOutcome::Skipped {
                symbol,
                stage,
                reason,
            }) => {
                tracing::warn!(%symbol, %stage, %reason, "Symbol skipped");
                summary.skipped += 1;
            }
            Err(e) => {
                tracing::error!("Worker panicked: {}", e);
                summary.skipped += 1;
            }
        }
    }

    tracing::info!("Harvest complete: {}", summary.report());
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_report() {
        let summary = RunSummary {
            processed: 48,
            skipped: 2,
        };
        assert_eq!(summary.report(), "48 processed, 2 skipped");
    }
}
