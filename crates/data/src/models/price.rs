//! Daily price bar data model.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One daily bar from the provider's CSV price-history export.
///
/// Field names match the upstream header
/// (`Date,Open,High,Low,Close,Adj Close,Volume`). The adjusted close is
/// carried through parsing but dropped from the cleaned output. Price fields
/// deserialize through `Decimal::from_str` so the upstream scale survives
/// the rewrite (`146.0` stays `146.0`, never `146`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBar {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Open", with = "rust_decimal::serde::str")]
    pub open: Decimal,
    #[serde(rename = "High", with = "rust_decimal::serde::str")]
    pub high: Decimal,
    #[serde(rename = "Low", with = "rust_decimal::serde::str")]
    pub low: Decimal,
    #[serde(rename = "Close", with = "rust_decimal::serde::str")]
    pub close: Decimal,
    #[serde(rename = "Adj Close", with = "rust_decimal::serde::str")]
    pub adj_close: Decimal,
    #[serde(rename = "Volume")]
    pub volume: u64,
}

impl PriceBar {
    /// Cleaned output row: date,open,high,low,close,volume.
    #[must_use]
    pub fn to_record(&self) -> [String; 6] {
        [
            self.date.to_string(),
            self.open.to_string(),
            self.high.to_string(),
            self.low.to_string(),
            self.close.to_string(),
            self.volume.to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_to_record_drops_adj_close() {
        let bar = PriceBar {
            date: NaiveDate::from_ymd_opt(2017, 5, 1).unwrap(),
            open: dec!(146.0),
            high: dec!(147.2),
            low: dec!(145.5),
            close: dec!(146.9),
            adj_close: dec!(144.1),
            volume: 33_000_000,
        };

        let record = bar.to_record();
        assert_eq!(record[0], "2017-05-01");
        assert_eq!(record[5], "33000000");
        assert!(!record.contains(&"144.1".to_string()));
    }
}
