//! Nasdaq exchange-listing integration for the stock-harvest pipeline.

pub mod client;

pub use client::{NasdaqLister, NASDAQ_BASE_URL};
