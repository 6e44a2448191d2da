//! Option contract data model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which side of the chain a contract sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionSide {
    Put,
    Call,
}

impl OptionSide {
    /// Single-letter tag used in the options CSV.
    #[must_use]
    pub fn as_letter(&self) -> &'static str {
        match self {
            OptionSide::Put => "P",
            OptionSide::Call => "C",
        }
    }
}

/// One put or call contract from the provider's options chain.
///
/// Contracts for every expiration date of a symbol accumulate into one flat
/// file; the expiration is carried on each row rather than partitioning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionContract {
    pub side: OptionSide,
    /// Expiration date as epoch seconds, as reported by the chain summary.
    pub expiration: i64,
    pub strike: Decimal,
    pub bid: Decimal,
    pub ask: Decimal,
    pub implied_volatility: Decimal,
}

impl OptionContract {
    /// Output row: side,expirationDate,strike,bid,ask,impliedVolatility.
    #[must_use]
    pub fn to_record(&self) -> [String; 6] {
        [
            self.side.as_letter().to_string(),
            self.expiration.to_string(),
            self.strike.to_string(),
            self.bid.to_string(),
            self.ask.to_string(),
            self.implied_volatility.to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_side_letters() {
        assert_eq!(OptionSide::Put.as_letter(), "P");
        assert_eq!(OptionSide::Call.as_letter(), "C");
    }

    #[test]
    fn test_to_record_field_order() {
        let contract = OptionContract {
            side: OptionSide::Call,
            expiration: 1_700_000_000,
            strike: dec!(150),
            bid: dec!(4.20),
            ask: dec!(4.35),
            implied_volatility: dec!(0.312),
        };

        assert_eq!(
            contract.to_record(),
            [
                "C".to_string(),
                "1700000000".to_string(),
                "150".to_string(),
                "4.20".to_string(),
                "4.35".to_string(),
                "0.312".to_string(),
            ]
        );
    }
}
