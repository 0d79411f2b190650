pub mod installment;
pub mod mortgage;
pub mod price;
pub mod roi;

use serde::Serialize;
use serde_json::Value;

use realty_calc_core::parse::parse_price;
use realty_calc_core::Money;

/// What a command hands to the output layer: the structured result for the
/// machine formats and the chat report for `--output text`.
pub struct CommandOutput {
    pub value: Value,
    pub report: String,
}

impl CommandOutput {
    pub fn new<T: Serialize>(value: &T, report: String) -> Result<Self, serde_json::Error> {
        Ok(Self {
            value: serde_json::to_value(value)?,
            report,
        })
    }
}

/// Parse a free-text `--price`-style flag, required when no JSON input is given.
pub(crate) fn money_flag(
    text: Option<&str>,
    flag: &str,
) -> Result<Money, Box<dyn std::error::Error>> {
    let text = text.ok_or_else(|| format!("--{flag} is required (or provide --input)"))?;
    Ok(parse_price(text)?)
}
