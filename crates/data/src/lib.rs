//! Data models and CSV storage for the stock-harvest pipeline.
//!
//! This crate provides:
//! - Typed models for price bars and option contracts
//! - CSV writers for the cleaned per-symbol output files
//! - Exchange-listing parsing for the default symbol universe

pub mod csv_storage;
pub mod listing;
pub mod models;

pub use csv_storage::{CsvStorage, OptionsCsvWriter};
pub use models::{OptionContract, OptionSide, PriceBar};
