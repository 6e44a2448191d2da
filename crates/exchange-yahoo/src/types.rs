//! Serde envelopes for the options-chain JSON API.
//!
//! The endpoint wraps everything in `optionChain.result[0]`; the summary
//! call populates `expirationDates` and a dated call populates
//! `options[0].{puts,calls}`.

use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct OptionChainEnvelope {
    #[serde(rename = "optionChain")]
    pub option_chain: OptionChain,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OptionChain {
    pub result: Vec<ChainResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ChainResult {
    #[serde(default)]
    pub expiration_dates: Vec<i64>,
    #[serde(default)]
    pub options: Vec<OptionGroup>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OptionGroup {
    #[serde(default)]
    pub puts: Vec<RawContract>,
    #[serde(default)]
    pub calls: Vec<RawContract>,
}

/// One contract as the API reports it. Contracts missing any of these fields
/// fail deserialization, which abandons the symbol.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawContract {
    pub strike: Decimal,
    pub bid: Decimal,
    pub ask: Decimal,
    pub implied_volatility: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_summary_envelope_parses() {
        let json = r#"{
            "optionChain": {
                "result": [
                    { "expirationDates": [1000, 2000], "options": [] }
                ],
                "error": null
            }
        }"#;

        let envelope: OptionChainEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(
            envelope.option_chain.result[0].expiration_dates,
            vec![1000, 2000]
        );
    }

    #[test]
    fn test_detail_envelope_parses_contracts() {
        let json = r#"{
            "optionChain": {
                "result": [{
                    "expirationDates": [1000],
                    "options": [{
                        "puts": [
                            { "strike": 100.0, "bid": 1.5, "ask": 1.7, "impliedVolatility": 0.25, "contractSymbol": "X" }
                        ],
                        "calls": []
                    }]
                }]
            }
        }"#;

        let envelope: OptionChainEnvelope = serde_json::from_str(json).unwrap();
        let puts = &envelope.option_chain.result[0].options[0].puts;
        assert_eq!(puts.len(), 1);
        assert_eq!(puts[0].strike, dec!(100.0));
        assert_eq!(puts[0].implied_volatility, dec!(0.25));
    }

    #[test]
    fn test_contract_missing_field_fails() {
        let json = r#"{ "strike": 100.0, "bid": 1.5 }"#;
        assert!(serde_json::from_str::<RawContract>(json).is_err());
    }
}
