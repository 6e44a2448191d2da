//! Error types for the Yahoo Finance integration.
//!
//! Every per-symbol failure path gets its own variant so the pipeline can
//! report which stage abandoned a symbol.

use thiserror::Error;

/// Errors that can occur when fetching data for one symbol.
#[derive(Debug, Error)]
pub enum YahooError {
    /// The quote page came back non-2xx, so no crumb can be scraped.
    #[error("quote page returned status {status}")]
    QuotePage {
        /// HTTP status code.
        status: u16,
    },

    /// The quote page body carries no crumb marker at all.
    #[error("crumb marker not found in quote page")]
    CrumbMissing,

    /// The crumb marker was present but the embedded fragment did not parse.
    #[error("malformed crumb fragment: {0}")]
    CrumbMalformed(String),

    /// The price-history export request failed.
    #[error("price history request returned status {status}")]
    History {
        /// HTTP status code.
        status: u16,
    },

    /// The options chain summary request failed.
    #[error("options summary request returned status {status}")]
    OptionSummary {
        /// HTTP status code.
        status: u16,
    },

    /// A per-expiration options detail request failed.
    #[error("options detail request for date {date} returned status {status}")]
    OptionDetail {
        /// Expiration date (epoch seconds) being fetched.
        date: i64,
        /// HTTP status code.
        status: u16,
    },

    /// A response body did not have the expected shape.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// Transport-level failure.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Convenience alias used throughout this crate.
pub type Result<T, E = YahooError> = std::result::Result<T, E>;
