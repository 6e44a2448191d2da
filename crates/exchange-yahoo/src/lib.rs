//! Yahoo Finance integration for the stock-harvest pipeline.
//!
//! Provides per-symbol sessions that scrape the quote-page crumb and use it
//! to download price history and options chains.

pub mod client;
pub mod crumb;
pub mod error;
mod types;

pub use client::{YahooSession, YahooSessionConfig, YAHOO_QUERY_URL, YAHOO_QUOTE_URL};
pub use crumb::extract_crumb;
pub use error::{Result, YahooError};
