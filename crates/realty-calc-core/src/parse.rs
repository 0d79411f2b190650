//! Free-text price parsing for amounts typed into a chat.
//!
//! Accepts plain digits ("15000000"), grouped digits ("15 000 000") and the
//! Russian shorthands "млн"/"м" (millions) and "тыс"/"к" (thousands), with
//! either `.` or `,` as the decimal point: "15 млн", "7,5м", "850к".

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::str::FromStr;

use crate::error::CalcError;
use crate::money::truncate;
use crate::types::Money;
use crate::CalcResult;

/// Smallest price the dialogue accepts as a property price.
pub const MIN_PRICE: Money = 100_000;

const MILLION: Decimal = dec!(1_000_000);
const THOUSAND: Decimal = dec!(1_000);

/// Parse a price, truncating any fraction of a currency unit.
pub fn parse_price(text: &str) -> CalcResult<Money> {
    let mut normalized: String = text
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    let multiplier = if normalized.contains("млн") {
        normalized = normalized.replace("млн", "");
        MILLION
    } else if normalized.contains('м') {
        normalized = normalized.replace('м', "");
        MILLION
    } else if normalized.contains("тыс") || normalized.contains('к') {
        normalized = normalized.replace("тыс", "").replace('к', "");
        THOUSAND
    } else {
        Decimal::ONE
    };

    let digits: String = normalized
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    let value = Decimal::from_str(&digits)
        .map_err(|_| CalcError::Parse(format!("'{}' is not an amount", text.trim())))?;
    let amount = value
        .checked_mul(multiplier)
        .ok_or_else(|| CalcError::Overflow {
            context: "price parsing".into(),
        })?;

    truncate(amount, "price parsing")
}

/// Parse a price and reject anything below [`MIN_PRICE`].
pub fn parse_acceptable_price(text: &str) -> CalcResult<Money> {
    let price = parse_price(text)?;
    if price < MIN_PRICE {
        return Err(CalcError::InvalidInput {
            field: "price".into(),
            reason: format!("must be at least {MIN_PRICE}, got {price}"),
        });
    }
    Ok(price)
}
