//! Integer-money arithmetic shared by the calculators.
//!
//! Every currency figure is produced by computing an exact decimal value and
//! truncating it toward zero. Truncation equals floor for the non-negative
//! amounts that valid inputs produce, and keeps out-of-range inputs (a down
//! payment above 100%, say) behaving symmetrically around zero.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::error::CalcError;
use crate::types::{Money, Percent};
use crate::CalcResult;

const HUNDRED: Decimal = dec!(100);

/// Truncate a decimal amount toward zero into whole currency units.
pub fn truncate(value: Decimal, context: &str) -> CalcResult<Money> {
    value.trunc().to_i64().ok_or_else(|| CalcError::Overflow {
        context: context.to_string(),
    })
}

/// `trunc(amount * pct / 100)`
pub fn percent_of(amount: Money, pct: Percent, context: &str) -> CalcResult<Money> {
    let product = Decimal::from(amount)
        .checked_mul(pct)
        .ok_or_else(|| CalcError::Overflow {
            context: context.to_string(),
        })?;
    truncate(product / HUNDRED, context)
}

/// `part / whole * 100`, rounded to one decimal place. Zero when `whole` is zero.
pub fn share_pct(part: Money, whole: Money) -> Percent {
    if whole == 0 {
        return Decimal::ZERO;
    }
    round_tenths(Decimal::from(part) / Decimal::from(whole) * HUNDRED)
}

/// One decimal place, halves away from zero: 5.05 -> 5.1, -5.05 -> -5.1.
pub fn round_tenths(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

/// `a - b`, or [`CalcError::Overflow`] when the difference leaves the money range.
pub fn subtract(a: Money, b: Money, context: &str) -> CalcResult<Money> {
    a.checked_sub(b).ok_or_else(|| CalcError::Overflow {
        context: context.to_string(),
    })
}

/// `a + b`, or [`CalcError::Overflow`] when the sum leaves the money range.
pub fn add(a: Money, b: Money, context: &str) -> CalcResult<Money> {
    a.checked_add(b).ok_or_else(|| CalcError::Overflow {
        context: context.to_string(),
    })
}

/// Integer division truncating toward zero, with a zero-divisor guard.
pub fn divide(amount: Money, divisor: i64, context: &str) -> CalcResult<Money> {
    if divisor == 0 {
        return Err(CalcError::DivisionByZero {
            context: context.to_string(),
        });
    }
    amount.checked_div(divisor).ok_or_else(|| CalcError::Overflow {
        context: context.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_of_truncates() {
        assert_eq!(percent_of(15_000_000, dec!(30), "t").unwrap(), 4_500_000);
        assert_eq!(percent_of(999, dec!(33.3), "t").unwrap(), 332);
    }

    #[test]
    fn test_percent_of_negative_truncates_toward_zero() {
        // -1.5 truncates to -1, not -2
        assert_eq!(percent_of(-3, dec!(50), "t").unwrap(), -1);
    }

    #[test]
    fn test_share_pct_rounds_to_one_decimal() {
        assert_eq!(share_pct(350_000, 10_000_000), dec!(3.5));
        assert_eq!(share_pct(1, 3), dec!(33.3));
        assert_eq!(share_pct(5, 0), Decimal::ZERO);
    }

    #[test]
    fn test_share_pct_rounds_halves_up() {
        // 909_000 / 18_000_000 = 5.05%
        assert_eq!(share_pct(909_000, 18_000_000), dec!(5.1));
        assert_eq!(share_pct(-909_000, 18_000_000), dec!(-5.1));
        assert_eq!(round_tenths(dec!(0.25)), dec!(0.3));
    }

    #[test]
    fn test_checked_money_arithmetic() {
        assert_eq!(subtract(15_000_000, 4_500_000, "t").unwrap(), 10_500_000);
        assert_eq!(add(4_500_000, 10_500_000, "t").unwrap(), 15_000_000);
        assert!(matches!(
            subtract(i64::MAX, -1, "t"),
            Err(CalcError::Overflow { .. })
        ));
        assert!(matches!(add(i64::MAX, 1, "t"), Err(CalcError::Overflow { .. })));
    }

    #[test]
    fn test_divide_by_zero_is_error() {
        let err = divide(10, 0, "installment months").unwrap_err();
        assert!(matches!(err, CalcError::DivisionByZero { .. }));
    }

    #[test]
    fn test_divide_truncates() {
        assert_eq!(divide(10_500_000, 18, "t").unwrap(), 583_333);
        assert_eq!(divide(-7, 2, "t").unwrap(), -3);
    }
}
