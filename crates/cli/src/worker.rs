//! Per-symbol worker.
//!
//! Runs the full fetch-and-write sequence for one ticker: crumb, price
//! history, options chain summary, per-expiration detail, both CSV files,
//! then the external calculator. Any stage failure abandons the symbol with
//! nothing published; a symbol either yields both output files or none.

use std::fmt;

use stock_harvest_core::AppConfig;
use stock_harvest_data::csv_storage::{CsvStorage, OptionsCsvWriter};
use stock_harvest_yahoo::{YahooError, YahooSession, YahooSessionConfig};

use crate::calculator;

/// Where in the sequence a symbol was abandoned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Building the HTTP session.
    Session,
    /// Quote-page fetch or crumb extraction.
    Crumb,
    /// Price-history download.
    History,
    /// Options chain summary (expiration dates).
    OptionSummary,
    /// Per-expiration options detail.
    OptionDetail,
    /// Writing or publishing output files.
    Write,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Session => "session",
            Stage::Crumb => "crumb",
            Stage::History => "history",
            Stage::OptionSummary => "option-summary",
            Stage::OptionDetail => "option-detail",
            Stage::Write => "write",
        };
        f.write_str(name)
    }
}

/// Result of processing one symbol.
#[derive(Debug)]
pub enum SymbolOutcome {
    /// Both files published; the calculator was invoked if configured.
    Processed {
        symbol: String,
        history_rows: usize,
        options_rows: usize,
    },
    /// Abandoned with nothing published.
    Skipped {
        symbol: String,
        stage: Stage,
        reason: String,
    },
}

impl SymbolOutcome {
    fn skipped(symbol: &str, stage: Stage, reason: impl ToString) -> Self {
        SymbolOutcome::Skipped {
            symbol: symbol.to_string(),
            stage,
            reason: reason.to_string(),
        }
    }
}

/// Maps a provider error to the stage it belongs to.
///
/// Network errors are attributed to the fetch stage the caller was in, so
/// this only covers errors with an unambiguous stage of their own.
fn fetch_stage(error: &YahooError, current: Stage) -> Stage {
    match error {
        YahooError::QuotePage { .. }
        | YahooError::CrumbMissing
        | YahooError::CrumbMalformed(_) => Stage::Crumb,
        YahooError::History { .. } => Stage::History,
        YahooError::OptionSummary { .. } => Stage::OptionSummary,
        YahooError::OptionDetail { .. } => Stage::OptionDetail,
        YahooError::Malformed(_) | YahooError::Network(_) => current,
    }
}

/// Processes one symbol end to end.
///
/// Never returns an error: every failure is folded into
/// [`SymbolOutcome::Skipped`] so one symbol can never abort the batch.
pub async fn process_symbol(symbol: &str, config: &AppConfig) -> SymbolOutcome {
    let session_config = YahooSessionConfig::default()
        .with_quote_base_url(config.provider.quote_base_url.as_str())
        .with_query_base_url(config.provider.query_base_url.as_str())
        .with_timeout_secs(config.provider.timeout_secs);

    let session = match YahooSession::new(symbol, session_config) {
        Ok(session) => session,
        Err(e) => return SymbolOutcome::skipped(symbol, Stage::Session, e),
    };

    tracing::debug!(symbol, "Starting worker");

    let crumb = match session.fetch_crumb().await {
        Ok(crumb) => crumb,
        Err(e) => return SymbolOutcome::skipped(symbol, fetch_stage(&e, Stage::Crumb), e),
    };

    let history_csv = match session.fetch_price_history(&crumb).await {
        Ok(body) => body,
        Err(e) => return SymbolOutcome::skipped(symbol, fetch_stage(&e, Stage::History), e),
    };

    let expirations = match session.fetch_option_expirations().await {
        Ok(dates) => dates,
        Err(e) => return SymbolOutcome::skipped(symbol, fetch_stage(&e, Stage::OptionSummary), e),
    };

    let mut options_writer = match OptionsCsvWriter::create(&config.paths.options_dir, symbol) {
        Ok(writer) => writer,
        Err(e) => return SymbolOutcome::skipped(symbol, Stage::Write, e),
    };

    let mut options_rows = 0usize;
    for date in expirations {
        let contracts = match session.fetch_option_chain(date).await {
            Ok(contracts) => contracts,
            Err(e) => {
                return SymbolOutcome::skipped(symbol, fetch_stage(&e, Stage::OptionDetail), e)
            }
        };
        if let Err(e) = options_writer.append(&contracts) {
            return SymbolOutcome::skipped(symbol, Stage::Write, e);
        }
        options_rows += contracts.len();
    }

    let history_path = config.paths.proc_dir.join(format!("{symbol}.csv"));
    let history_rows = match CsvStorage::write_price_history(&history_path, &history_csv) {
        Ok(rows) => rows,
        Err(e) => return SymbolOutcome::skipped(symbol, Stage::Write, e),
    };

    // Options publish comes last so a history failure leaves zero files.
    if let Err(e) = options_writer.publish() {
        if let Err(remove_err) = std::fs::remove_file(&history_path) {
            tracing::warn!(
                symbol,
                path = %history_path.display(),
                "Failed to remove history file after publish failure: {}",
                remove_err
            );
        }
        return SymbolOutcome::skipped(symbol, Stage::Write, e);
    }

    if config.calculator.enabled() {
        calculator::invoke(&config.calculator.executable_dir, symbol).await;
    }

    SymbolOutcome::Processed {
        symbol: symbol.to_string(),
        history_rows,
        options_rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_display() {
        assert_eq!(Stage::Crumb.to_string(), "crumb");
        assert_eq!(Stage::OptionSummary.to_string(), "option-summary");
        assert_eq!(Stage::Write.to_string(), "write");
    }

    #[test]
    fn test_fetch_stage_maps_typed_errors() {
        let e = YahooError::QuotePage { status: 404 };
        assert_eq!(fetch_stage(&e, Stage::History), Stage::Crumb);

        let e = YahooError::OptionDetail {
            date: 1000,
            status: 500,
        };
        assert_eq!(fetch_stage(&e, Stage::OptionDetail), Stage::OptionDetail);

        // Ambiguous errors stay with the stage the caller was in
        let e = YahooError::Malformed("truncated".to_string());
        assert_eq!(fetch_stage(&e, Stage::OptionSummary), Stage::OptionSummary);
    }
}
