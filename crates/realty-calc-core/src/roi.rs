use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::CalcError;
use crate::money::{add, divide, percent_of, round_tenths, share_pct, subtract};
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::CalcResult;

/// Management company fee, percent of gross income
pub const DEFAULT_UK_PCT: Decimal = dec!(20);
/// Utilities per month, whole currency units
pub const DEFAULT_UTILITIES_MONTHLY: Money = 5_000;
/// Income tax, percent of gross income
pub const DEFAULT_TAX_PCT: Decimal = dec!(4);
/// Typical short-term-rental occupancy
pub const DEFAULT_OCCUPANCY_PCT: Decimal = dec!(70);

/// Payback reported when net income is zero or negative: "never pays back".
///
/// This is a value, not an error. Callers and formatters pass it through
/// untouched; do not replace it with infinity or an `Option`.
pub const PAYBACK_NEVER: Decimal = dec!(999);

const DAYS_PER_YEAR: i64 = 365;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

fn default_occupancy_pct() -> Percent {
    DEFAULT_OCCUPANCY_PCT
}

fn default_uk_pct() -> Percent {
    DEFAULT_UK_PCT
}

fn default_utilities_monthly() -> Money {
    DEFAULT_UTILITIES_MONTHLY
}

fn default_tax_pct() -> Percent {
    DEFAULT_TAX_PCT
}

/// Input parameters for a short-term rental yield estimate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoiInput {
    /// Purchase price
    pub price: Money,
    /// Nightly rent
    pub daily_rent: Money,
    /// Share of the year the unit is let, percent
    #[serde(default = "default_occupancy_pct")]
    pub occupancy_pct: Percent,
    /// Management company fee, percent of gross
    #[serde(default = "default_uk_pct")]
    pub uk_pct: Percent,
    #[serde(default = "default_utilities_monthly")]
    pub utilities_monthly: Money,
    /// Tax, percent of gross
    #[serde(default = "default_tax_pct")]
    pub tax_pct: Percent,
}

impl RoiInput {
    /// Input with the default cost model (20% management, 5 000/month
    /// utilities, 4% tax).
    pub fn new(price: Money, daily_rent: Money, occupancy_pct: Percent) -> Self {
        Self {
            price,
            daily_rent,
            occupancy_pct,
            uk_pct: DEFAULT_UK_PCT,
            utilities_monthly: DEFAULT_UTILITIES_MONTHLY,
            tax_pct: DEFAULT_TAX_PCT,
        }
    }
}

/// Annual operating costs, always reported in this order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpensesBreakdown {
    /// Management company fee
    pub uk_fee: Money,
    /// Utilities for the year
    pub utilities: Money,
    pub tax: Money,
}

impl ExpensesBreakdown {
    pub fn total(&self) -> CalcResult<Money> {
        let subtotal = add(self.uk_fee, self.utilities, "ROI expenses")?;
        add(subtotal, self.tax, "ROI expenses")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoiResult {
    pub price: Money,
    pub daily_rent: Money,
    pub occupancy_pct: Percent,
    pub days_occupied: i64,
    pub gross_income: Money,
    /// Sum of `expenses_breakdown`
    pub expenses: Money,
    pub expenses_breakdown: ExpensesBreakdown,
    /// gross_income - expenses
    pub net_income: Money,
    pub roi_pct: Percent,
    /// Years of net income to recover the price, or [`PAYBACK_NEVER`]
    pub payback_years: Decimal,
    pub monthly_net: Money,
}

impl RoiResult {
    /// True when the property never recovers its price at this net income.
    pub fn never_pays_back(&self) -> bool {
        self.payback_years == PAYBACK_NEVER
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Rental yield, payback period and monthly net income under a fixed
/// operating-cost model.
///
/// When net income is not positive, `payback_years` is [`PAYBACK_NEVER`].
pub fn calc_roi(input: &RoiInput) -> CalcResult<ComputationOutput<RoiResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.occupancy_pct < Decimal::ZERO || input.occupancy_pct > dec!(100) {
        warnings.push(format!(
            "Occupancy {}% is outside 0–100%",
            input.occupancy_pct
        ));
    }

    let days_occupied = percent_of(DAYS_PER_YEAR, input.occupancy_pct, "ROI occupied days")?;
    let gross_income = input
        .daily_rent
        .checked_mul(days_occupied)
        .ok_or_else(|| CalcError::Overflow {
            context: "ROI gross income".into(),
        })?;

    let utilities = input
        .utilities_monthly
        .checked_mul(12)
        .ok_or_else(|| CalcError::Overflow {
            context: "ROI utilities".into(),
        })?;
    let expenses_breakdown = ExpensesBreakdown {
        uk_fee: percent_of(gross_income, input.uk_pct, "ROI management fee")?,
        utilities,
        tax: percent_of(gross_income, input.tax_pct, "ROI tax")?,
    };
    let expenses = expenses_breakdown.total()?;

    let net_income = subtract(gross_income, expenses, "ROI net income")?;
    let roi_pct = share_pct(net_income, input.price);
    let payback_years = payback_years(input.price, net_income);
    let monthly_net = divide(net_income, 12, "ROI monthly net")?;

    if net_income <= 0 {
        warnings.push(format!(
            "Net income {net_income} is not positive; the property does not pay back"
        ));
    }

    tracing::debug!(
        price = input.price,
        gross_income,
        net_income,
        roi_pct = %roi_pct,
        "rental yield computed"
    );

    let output = RoiResult {
        price: input.price,
        daily_rent: input.daily_rent,
        occupancy_pct: input.occupancy_pct,
        days_occupied,
        gross_income,
        expenses,
        expenses_breakdown,
        net_income,
        roi_pct,
        payback_years,
        monthly_net,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Short-term rental yield: occupancy-weighted gross less management, utilities and tax",
        input,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// `price / net_income` to one decimal, or the sentinel when net income is
/// not positive.
fn payback_years(price: Money, net_income: Money) -> Decimal {
    if net_income <= 0 {
        return PAYBACK_NEVER;
    }
    round_tenths(Decimal::from(price) / Decimal::from(net_income))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
