//! CSV output for cleaned price history and options chains.
//!
//! Price history is rewritten in one shot from the provider's export. Options
//! rows accumulate per expiration date into a temporary file and only appear
//! at the published path once the whole chain has been fetched, so a failed
//! symbol never leaves a partial options file behind. Every writer gets its
//! own uniquely named temporary file, so concurrent workers for the same
//! symbol cannot clobber each other mid-publish.

use anyhow::{bail, Context, Result};
use csv::Writer;
use std::fs::File;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::models::{OptionContract, PriceBar};

/// Columns the provider's price-history export must carry.
const HISTORY_COLUMNS: [&str; 7] = ["Date", "Open", "High", "Low", "Close", "Adj Close", "Volume"];

pub struct CsvStorage;

impl CsvStorage {
    /// Rewrites a raw price-history export as a cleaned per-symbol CSV.
    ///
    /// The upstream header row and the `Adj Close` column are dropped; output
    /// rows are `date,open,high,low,close,volume` in upstream order with no
    /// header. Rows that fail to parse (the provider emits `null` bars for
    /// halted days) are skipped with a warning. The file is written to a
    /// uniquely named temporary sibling and renamed into place.
    ///
    /// # Errors
    /// Returns an error if the export is missing an expected column or the
    /// file cannot be written.
    pub fn write_price_history(path: &Path, raw_csv: &str) -> Result<usize> {
        let mut reader = csv::Reader::from_reader(raw_csv.as_bytes());

        let headers = reader.headers().context("Unreadable price-history header")?;
        for column in HISTORY_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                bail!("Price-history export missing column: {}", column);
            }
        }

        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;

        let temp = NamedTempFile::new_in(parent)
            .with_context(|| format!("Failed to create temporary file in {}", parent.display()))?;
        let file = temp
            .reopen()
            .with_context(|| format!("Failed to reopen {}", temp.path().display()))?;
        let mut writer = Writer::from_writer(file);

        let mut written = 0usize;
        for (index, row) in reader.deserialize::<PriceBar>().enumerate() {
            match row {
                Ok(bar) => {
                    writer.write_record(bar.to_record())?;
                    written += 1;
                }
                Err(e) => {
                    tracing::warn!("Skipping unparseable price row {}: {}", index + 1, e);
                }
            }
        }

        writer.flush()?;
        drop(writer);
        temp.persist(path)
            .with_context(|| format!("Failed to publish {}", path.display()))?;

        Ok(written)
    }
}

/// Accumulating writer for one symbol's options chain.
///
/// Rows are appended per expiration date into a uniquely named temporary
/// file; the real path exists only after [`OptionsCsvWriter::publish`].
/// Dropping the writer without publishing removes the temporary file.
pub struct OptionsCsvWriter {
    temp: Option<NamedTempFile>,
    final_path: PathBuf,
    writer: Option<Writer<File>>,
}

impl OptionsCsvWriter {
    /// Opens a fresh temporary options file for `symbol` under `options_dir`.
    ///
    /// # Errors
    /// Returns an error if the directory or file cannot be created.
    pub fn create(options_dir: &Path, symbol: &str) -> Result<Self> {
        std::fs::create_dir_all(options_dir)
            .with_context(|| format!("Failed to create directory {}", options_dir.display()))?;

        let final_path = options_dir.join(format!("{symbol}.csv"));
        let temp = NamedTempFile::new_in(options_dir).with_context(|| {
            format!("Failed to create temporary file in {}", options_dir.display())
        })?;
        let file = temp
            .reopen()
            .with_context(|| format!("Failed to reopen {}", temp.path().display()))?;

        Ok(Self {
            temp: Some(temp),
            final_path,
            writer: Some(Writer::from_writer(file)),
        })
    }

    /// Appends one expiration date's contracts.
    ///
    /// # Errors
    /// Returns an error if a row cannot be written.
    pub fn append(&mut self, contracts: &[OptionContract]) -> Result<()> {
        let writer = self
            .writer
            .as_mut()
            .context("Options writer already published")?;
        for contract in contracts {
            writer.write_record(contract.to_record())?;
        }
        Ok(())
    }

    /// Flushes and atomically renames the temporary file to its final path.
    ///
    /// # Errors
    /// Returns an error if the flush or rename fails.
    pub fn publish(mut self) -> Result<PathBuf> {
        let mut writer = self
            .writer
            .take()
            .context("Options writer already published")?;
        writer.flush().context("Failed to flush options file")?;
        drop(writer);
        let temp = self
            .temp
            .take()
            .context("Options writer already published")?;
        temp.persist(&self.final_path)
            .with_context(|| format!("Failed to publish {}", self.final_path.display()))?;
        Ok(self.final_path.clone())
    }
}
