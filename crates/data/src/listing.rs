//! Exchange-listing parsing and symbol universe resolution.

use anyhow::{bail, Context, Result};
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

/// Extracts the symbol universe from an exchange listing.
///
/// The listing is a header-bearing CSV with at least a `Symbol` column.
/// Symbols are collected in order of first appearance, deduplicated, and any
/// entry containing a space is excluded (the provider pads some listings with
/// display names in the symbol field).
///
/// # Errors
/// Returns an error if the `Symbol` column is absent or a row is unreadable.
pub fn parse_symbols<R: Read>(reader: R) -> Result<Vec<String>> {
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers = csv_reader.headers().context("Unreadable listing header")?;
    let Some(symbol_index) = headers.iter().position(|h| h == "Symbol") else {
        bail!("Exchange listing is missing the Symbol column");
    };

    let mut seen = HashSet::new();
    let mut symbols = Vec::new();
    for record in csv_reader.records() {
        let record = record.context("Unreadable listing row")?;
        let Some(symbol) = record.get(symbol_index) else {
            continue;
        };
        if symbol.is_empty() || symbol.contains(' ') {
            continue;
        }
        if seen.insert(symbol.to_string()) {
            symbols.push(symbol.to_string());
        }
    }

    Ok(symbols)
}

/// Reads a listing file from disk and parses its symbol universe.
///
/// # Errors
/// Returns an error if the file cannot be opened or parsed.
pub fn load_symbols(path: &Path) -> Result<Vec<String>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open exchange listing {}", path.display()))?;
    parse_symbols(file)
}
