//! Rental income against a bank-deposit baseline.
//!
//! The baseline is simple annual interest on the full price at a fixed
//! deposit rate. It reuses the figures of an [`RoiResult`] and does not
//! recompute the rental model.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::money::percent_of;
use crate::roi::RoiResult;
use crate::types::{Money, Percent};
use crate::CalcResult;

/// Annual deposit rate used when the caller does not supply one.
pub const DEFAULT_DEPOSIT_RATE_PCT: Decimal = dec!(20);

/// The better use of the money over one year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BetterOption {
    Rent,
    Deposit,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepositComparison {
    pub deposit_rate_pct: Percent,
    /// trunc(price * rate / 100)
    pub deposit_income: Money,
    /// Annual net rental income from the ROI result
    pub rental_income: Money,
    pub better: BetterOption,
    /// How much more the better option earns per year; never negative
    pub difference: Money,
}

/// Compare annual net rent with deposit interest on the same price.
///
/// Rent wins only when it is strictly greater; a tie goes to the deposit.
pub fn compare_with_deposit(
    roi: &RoiResult,
    deposit_rate_pct: Percent,
) -> CalcResult<DepositComparison> {
    let deposit_income = percent_of(roi.price, deposit_rate_pct, "deposit income")?;

    let (better, difference) = if roi.net_income > deposit_income {
        (BetterOption::Rent, roi.net_income - deposit_income)
    } else {
        (BetterOption::Deposit, deposit_income - roi.net_income)
    };

    Ok(DepositComparison {
        deposit_rate_pct,
        deposit_income,
        rental_income: roi.net_income,
        better,
        difference,
    })
}
