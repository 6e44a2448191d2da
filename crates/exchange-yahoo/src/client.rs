//! Per-symbol Yahoo Finance session.
//!
//! One [`YahooSession`] exists per symbol and owns its own HTTP client with
//! a cookie store: the crumb scraped from the quote page only authorizes
//! data requests made with the cookies that page set, so sessions are never
//! shared across symbols or cached across runs.
//!
//! # Example
//!
//! ```ignore
//! use stock_harvest_yahoo::{YahooSession, YahooSessionConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let session = YahooSession::new("AAPL", YahooSessionConfig::default())?;
//!     let crumb = session.fetch_crumb().await?;
//!     let history = session.fetch_price_history(&crumb).await?;
//!     println!("{} bytes of history", history.len());
//!     Ok(())
//! }
//! ```

use crate::crumb::extract_crumb;
use crate::error::{Result, YahooError};
use crate::types::OptionChainEnvelope;
use chrono::Utc;
use reqwest::Client;
use std::time::Duration;
use stock_harvest_data::models::{OptionContract, OptionSide};

// =============================================================================
// Constants
// =============================================================================

/// Production quote-page host (crumb scraping).
pub const YAHOO_QUOTE_URL: &str = "https://finance.yahoo.com";

/// Production data-export host (history downloads and options chains).
pub const YAHOO_QUERY_URL: &str = "https://query1.finance.yahoo.com";

/// Browser user agent; the quote page serves an empty shell to unknown agents.
const USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Safari/605.1.15";

// =============================================================================
// Configuration
// =============================================================================

/// Configuration for a per-symbol session.
#[derive(Debug, Clone)]
pub struct YahooSessionConfig {
    /// Quote-page host.
    pub quote_base_url: String,

    /// Data-export host.
    pub query_base_url: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for YahooSessionConfig {
    fn default() -> Self {
        Self {
            quote_base_url: YAHOO_QUOTE_URL.to_string(),
            query_base_url: YAHOO_QUERY_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

impl YahooSessionConfig {
    /// Sets the quote-page host.
    #[must_use]
    pub fn with_quote_base_url(mut self, url: impl Into<String>) -> Self {
        self.quote_base_url = url.into();
        self
    }

    /// Sets the data-export host.
    #[must_use]
    pub fn with_query_base_url(mut self, url: impl Into<String>) -> Self {
        self.query_base_url = url.into();
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

// =============================================================================
// Session
// =============================================================================

/// A cookie-holding session scoped to one symbol.
pub struct YahooSession {
    client: Client,
    config: YahooSessionConfig,
    symbol: String,
}

impl YahooSession {
    /// Creates a session for `symbol`.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(symbol: impl Into<String>, config: YahooSessionConfig) -> Result<Self> {
        let client = Client::builder()
            .cookie_store(true)
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            config,
            symbol: symbol.into(),
        })
    }

    /// The symbol this session is scoped to.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Fetches the quote page and extracts the crumb token.
    ///
    /// # Errors
    /// Returns `QuotePage` for a non-2xx response, `CrumbMissing` when the
    /// page carries no marker, and `CrumbMalformed` when the embedded
    /// fragment does not parse.
    pub async fn fetch_crumb(&self) -> Result<String> {
        let url = format!("{}/quote/{}", self.config.quote_base_url, self.symbol);
        let response = self
            .client
            .get(&url)
            .query(&[("p", self.symbol.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(YahooError::QuotePage {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let crumb = extract_crumb(&body)?;
        tracing::debug!(symbol = %self.symbol, "Crumb acquired");
        Ok(crumb)
    }

    /// Downloads the full available daily price history as raw CSV text.
    ///
    /// Covers period1 = epoch 0 through period2 = now, daily interval,
    /// "history" events.
    ///
    /// # Errors
    /// Returns `History` for a non-2xx response.
    pub async fn fetch_price_history(&self, crumb: &str) -> Result<String> {
        let url = format!(
            "{}/v7/finance/download/{}",
            self.config.query_base_url, self.symbol
        );
        let now = Utc::now().timestamp();
        let response = self
            .client
            .get(&url)
            .query(&[
                ("period1", "0"),
                ("period2", &now.to_string()),
                ("interval", "1d"),
                ("events", "history"),
                ("crumb", crumb),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(YahooError::History {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        tracing::debug!(symbol = %self.symbol, bytes = body.len(), "Price history downloaded");
        Ok(body)
    }

    /// Fetches the chain summary and returns the available expiration dates
    /// in the order the API reports them.
    ///
    /// # Errors
    /// Returns `OptionSummary` for a non-2xx response and `Malformed` when
    /// the envelope has no result entry.
    pub async fn fetch_option_expirations(&self) -> Result<Vec<i64>> {
        let url = self.options_url();
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(YahooError::OptionSummary {
                status: status.as_u16(),
            });
        }

        let envelope: OptionChainEnvelope = response
            .json()
            .await
            .map_err(|e| YahooError::Malformed(e.to_string()))?;
        let result = envelope
            .option_chain
            .result
            .into_iter()
            .next()
            .ok_or_else(|| YahooError::Malformed("empty optionChain.result".to_string()))?;

        Ok(result.expiration_dates)
    }

    /// Fetches the contracts for one expiration date, puts before calls.
    ///
    /// # Errors
    /// Returns `OptionDetail` for a non-2xx response and `Malformed` when
    /// the envelope has no result or options entry.
    pub async fn fetch_option_chain(&self, date: i64) -> Result<Vec<OptionContract>> {
        let url = self.options_url();
        let response = self
            .client
            .get(&url)
            .query(&[("date", date.to_string())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(YahooError::OptionDetail {
                date,
                status: status.as_u16(),
            });
        }

        let envelope: OptionChainEnvelope = response
            .json()
            .await
            .map_err(|e| YahooError::Malformed(e.to_string()))?;
        let result = envelope
            .option_chain
            .result
            .into_iter()
            .next()
            .ok_or_else(|| YahooError::Malformed("empty optionChain.result".to_string()))?;
        let group = result
            .options
            .into_iter()
            .next()
            .ok_or_else(|| YahooError::Malformed("empty options group".to_string()))?;

        let mut contracts = Vec::with_capacity(group.puts.len() + group.calls.len());
        for (side, raw_contracts) in [
            (OptionSide::Put, group.puts),
            (OptionSide::Call, group.calls),
        ] {
            for raw in raw_contracts {
                contracts.push(OptionContract {
                    side,
                    expiration: date,
                    strike: raw.strike,
                    bid: raw.bid,
                    ask: raw.ask,
                    implied_volatility: raw.implied_volatility,
                });
            }
        }

        Ok(contracts)
    }

    fn options_url(&self) -> String {
        format!(
            "{}/v7/finance/options/{}",
            self.config.query_base_url, self.symbol
        )
    }
}
