//! Exchange-listing downloader.
//!
//! One GET against the screening download endpoint, body streamed to
//! `<exchange_dir>/<exchange>.csv`. The listing seeds the default symbol
//! universe, so any failure here is fatal to the run; there is no retry.

use anyhow::{anyhow, Context, Result};
use futures_util::StreamExt;
use reqwest::Client;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::AsyncWriteExt;

/// Production listing host.
pub const NASDAQ_BASE_URL: &str = "https://www.nasdaq.com";

/// Downloads per-exchange ticker listings.
pub struct NasdaqLister {
    client: Client,
    base_url: String,
}

impl NasdaqLister {
    /// Creates a lister against `base_url`.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Downloads the listing for `exchange` into `exchange_dir`, overwriting
    /// any previous file, and returns the file's path.
    ///
    /// # Errors
    /// Returns an error on any network, HTTP, or filesystem failure.
    pub async fn download(&self, exchange: &str, exchange_dir: &Path) -> Result<PathBuf> {
        let url = format!(
            "{}/screening/companies-by-name.aspx?letter=0&exchange={}&render=download",
            self.base_url, exchange
        );

        tracing::info!(exchange, "Downloading exchange listing");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Listing request failed for exchange {exchange}"))?;
        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!(
                "Listing download for {} returned status {}",
                exchange,
                status
            ));
        }

        tokio::fs::create_dir_all(exchange_dir)
            .await
            .with_context(|| format!("Failed to create {}", exchange_dir.display()))?;
        let path = exchange_dir.join(format!("{exchange}.csv"));
        let mut file = tokio::fs::File::create(&path)
            .await
            .with_context(|| format!("Failed to create {}", path.display()))?;

        let mut stream = response.bytes_stream();
        let mut bytes_written = 0u64;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.context("Listing download interrupted")?;
            file.write_all(&chunk).await?;
            bytes_written += chunk.len() as u64;
        }
        file.flush().await?;

        tracing::info!(exchange, bytes_written, path = %path.display(), "Listing saved");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_download_writes_listing_file() {
        let server = MockServer::start().await;
        let body = "Symbol,Name\nAAPL,Apple\nMSFT,Microsoft\n";
        Mock::given(method("GET"))
            .and(path("/screening/companies-by-name.aspx"))
            .and(query_param("exchange", "nasdaq"))
            .and(query_param("render", "download"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let lister = NasdaqLister::new(server.uri(), 5).unwrap();
        let path = lister.download("nasdaq", dir.path()).await.unwrap();

        assert_eq!(path, dir.path().join("nasdaq.csv"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), body);
    }

    #[tokio::test]
    async fn test_download_overwrites_previous_listing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("Symbol\nAAPL\n"))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let stale = dir.path().join("nasdaq.csv");
        std::fs::write(&stale, "Symbol\nOLD1\nOLD2\nOLD3\n").unwrap();

        let lister = NasdaqLister::new(server.uri(), 5).unwrap();
        lister.download("nasdaq", dir.path()).await.unwrap();

        assert_eq!(std::fs::read_to_string(&stale).unwrap(), "Symbol\nAAPL\n");
    }

    #[tokio::test]
    async fn test_download_http_error_is_fatal() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let lister = NasdaqLister::new(server.uri(), 5).unwrap();
        let err = lister.download("nasdaq", dir.path()).await.unwrap_err();

        assert!(err.to_string().contains("503"));
        assert!(!dir.path().join("nasdaq.csv").exists());
    }
}
