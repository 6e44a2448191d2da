use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub paths: PathsConfig,
    pub provider: ProviderConfig,
    pub runtime: RuntimeConfig,
    pub calculator: CalculatorConfig,
}

/// Output directories. All are created on demand at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Where downloaded exchange listings land (`<exchange>.csv`).
    pub exchange_dir: PathBuf,
    /// Cleaned per-symbol price history (`<symbol>.csv`).
    pub proc_dir: PathBuf,
    /// Per-symbol options chains (`<symbol>.csv`).
    pub options_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Quote-page host (crumb scraping).
    pub quote_base_url: String,
    /// Data-export host (price history downloads, options chains).
    pub query_base_url: String,
    /// Exchange-listing host.
    pub listing_base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Exchange whose listing provides the default symbol universe.
    pub exchange: String,
    /// Upper bound on symbols processed at once.
    pub max_concurrent_symbols: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculatorConfig {
    /// Directory holding the external `calc` binary. Empty disables invocation.
    pub executable_dir: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            paths: PathsConfig {
                exchange_dir: PathBuf::from("data/exchanges"),
                proc_dir: PathBuf::from("data/proc"),
                options_dir: PathBuf::from("data/options"),
            },
            provider: ProviderConfig {
                quote_base_url: "https://finance.yahoo.com".to_string(),
                query_base_url: "https://query1.finance.yahoo.com".to_string(),
                listing_base_url: "https://www.nasdaq.com".to_string(),
                timeout_secs: 30,
            },
            runtime: RuntimeConfig {
                exchange: "nasdaq".to_string(),
                max_concurrent_symbols: 64,
            },
            calculator: CalculatorConfig {
                executable_dir: String::new(),
            },
        }
    }
}

impl CalculatorConfig {
    /// Whether an external calculator is configured at all.
    #[must_use]
    pub fn enabled(&self) -> bool {
        !self.executable_dir.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.runtime.exchange, "nasdaq");
        assert_eq!(config.runtime.max_concurrent_symbols, 64);
        assert_eq!(config.provider.timeout_secs, 30);
        assert!(!config.calculator.enabled());
    }

    #[test]
    fn test_calculator_enabled() {
        let mut config = AppConfig::default();
        config.calculator.executable_dir = "/opt/stocks".to_string();
        assert!(config.calculator.enabled());
    }
}
