//! Data models for the harvest pipeline.

pub mod option;
pub mod price;

pub use option::{OptionContract, OptionSide};
pub use price::PriceBar;
