use chrono::{Days, Local, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::CalcError;
use crate::money::{add, divide, percent_of, share_pct, subtract};
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::CalcResult;

/// Spacing between scheduled instalments. Synthetic 30-day steps, not
/// calendar months.
pub const SCHEDULE_INTERVAL_DAYS: u64 = 30;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// What a schedule line pays for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentKind {
    /// Month 0: the down payment
    InitialPayment,
    /// Months 1..=N
    MonthlyPayment,
}

impl PaymentKind {
    pub fn label(&self) -> &'static str {
        match self {
            PaymentKind::InitialPayment => "Первоначальный взнос",
            PaymentKind::MonthlyPayment => "Ежемесячный платёж",
        }
    }
}

/// One line of the payment schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// 0 for the down payment, 1..=months afterwards
    pub month: u32,
    pub date: NaiveDate,
    pub payment: Money,
    pub kind: PaymentKind,
    /// Balance still owed after this payment (never below zero)
    pub remaining: Money,
}

/// Input parameters for an installment plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallmentInput {
    /// Property price in whole currency units
    pub price: Money,
    /// Down payment as a percent of price (30 = 30%)
    pub down_payment_pct: Percent,
    /// Number of monthly instalments, at least 1
    pub months: u32,
    /// Surcharge on the financed remainder, applied once (5 = 5%)
    #[serde(default)]
    pub markup_pct: Percent,
    /// Date of the down payment; today when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
}

impl InstallmentInput {
    pub fn new(price: Money, down_payment_pct: Percent, months: u32) -> Self {
        Self {
            price,
            down_payment_pct,
            months,
            markup_pct: Decimal::ZERO,
            start_date: None,
        }
    }

    pub fn with_markup(mut self, markup_pct: Percent) -> Self {
        self.markup_pct = markup_pct;
        self
    }

    pub fn starting_on(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    /// Pre-fill from a property's negotiated terms: the minimum down
    /// payment, the longest allowed term and the property's markup.
    pub fn from_terms(price: Money, terms: &InstallmentTerms) -> Self {
        Self::new(price, terms.min_down_payment_pct, terms.max_months)
            .with_markup(terms.markup_pct)
    }
}

/// Installment terms a developer offers on a specific property.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallmentTerms {
    /// Smallest accepted down payment percent
    pub min_down_payment_pct: Percent,
    /// Longest accepted term in months
    pub max_months: u32,
    /// Markup applied to the financed remainder
    #[serde(default)]
    pub markup_pct: Percent,
}

/// Complete installment plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallmentResult {
    pub price: Money,
    pub down_payment: Money,
    pub down_payment_pct: Percent,
    /// Financed remainder before markup
    pub remainder: Money,
    /// Financed remainder after markup; what the monthly instalments repay
    pub remainder_with_markup: Money,
    pub months: u32,
    /// Flat instalment for months 1..N-1; the last one balances the plan
    pub monthly_payment: Money,
    pub total_paid: Money,
    pub overpayment: Money,
    pub overpayment_pct: Percent,
    pub schedule: Vec<ScheduleEntry>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Build an installment plan: a down payment followed by equal monthly
/// instalments, the last of which absorbs the truncation remainder so the
/// plan repays exactly `remainder_with_markup`.
///
/// `months == 0` is a precondition violation and returns
/// [`CalcError::DivisionByZero`]. Percentages are not range-checked; a down
/// payment above 100% yields a negative remainder and a warning.
pub fn calc_installment(
    input: &InstallmentInput,
) -> CalcResult<ComputationOutput<InstallmentResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.down_payment_pct < Decimal::ZERO || input.down_payment_pct > dec!(100) {
        warnings.push(format!(
            "Down payment {}% is outside 0–100%",
            input.down_payment_pct
        ));
    }
    if input.markup_pct < Decimal::ZERO {
        warnings.push(format!(
            "Negative markup {}% ignored",
            input.markup_pct
        ));
    }

    let down_payment = percent_of(input.price, input.down_payment_pct, "installment down payment")?;
    let remainder = subtract(input.price, down_payment, "installment remainder")?;

    let remainder_with_markup = if input.markup_pct > Decimal::ZERO {
        let markup = percent_of(remainder, input.markup_pct, "installment markup")?;
        add(remainder, markup, "installment remainder with markup")?
    } else {
        remainder
    };

    let monthly_payment = divide(
        remainder_with_markup,
        i64::from(input.months),
        "installment monthly payment",
    )?;
    let total_paid = add(down_payment, remainder_with_markup, "installment total paid")?;
    let overpayment = subtract(total_paid, input.price, "installment overpayment")?;
    let overpayment_pct = share_pct(overpayment, input.price);

    let first_date = input
        .start_date
        .unwrap_or_else(|| Local::now().date_naive());
    let schedule = build_schedule(
        first_date,
        down_payment,
        remainder_with_markup,
        monthly_payment,
        input.months,
    )?;

    tracing::debug!(
        price = input.price,
        months = input.months,
        monthly_payment,
        overpayment,
        "installment plan computed"
    );

    let output = InstallmentResult {
        price: input.price,
        down_payment,
        down_payment_pct: input.down_payment_pct,
        remainder,
        remainder_with_markup,
        months: input.months,
        monthly_payment,
        total_paid,
        overpayment,
        overpayment_pct,
        schedule,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Installment plan: down payment plus equal monthly instalments, final instalment balancing",
        input,
        warnings,
        elapsed,
        output,
    ))
}

/// Run [`calc_installment`] and flag every way the input departs from the
/// property's negotiated terms. The numbers are computed from `input` as given.
pub fn calc_installment_for_terms(
    input: &InstallmentInput,
    terms: &InstallmentTerms,
) -> CalcResult<ComputationOutput<InstallmentResult>> {
    let mut output = calc_installment(input)?;

    if input.down_payment_pct < terms.min_down_payment_pct {
        output.warnings.push(format!(
            "Down payment {}% is below the property minimum of {}%",
            input.down_payment_pct, terms.min_down_payment_pct
        ));
    }
    if input.months > terms.max_months {
        output.warnings.push(format!(
            "Term of {} months exceeds the property maximum of {} months",
            input.months, terms.max_months
        ));
    }
    if input.markup_pct != terms.markup_pct {
        output.warnings.push(format!(
            "Markup {}% differs from the property's {}%",
            input.markup_pct, terms.markup_pct
        ));
    }

    Ok(output)
}

// ---------------------------------------------------------------------------
// Schedule
// ---------------------------------------------------------------------------

fn build_schedule(
    first_date: NaiveDate,
    down_payment: Money,
    financed: Money,
    monthly_payment: Money,
    months: u32,
) -> CalcResult<Vec<ScheduleEntry>> {
    // The last date must exist before the buffer is sized from `months`.
    schedule_date(first_date, months)?;

    let mut schedule = Vec::with_capacity(months as usize + 1);
    schedule.push(ScheduleEntry {
        month: 0,
        date: first_date,
        payment: down_payment,
        kind: PaymentKind::InitialPayment,
        remaining: financed,
    });

    let mut remaining = financed;
    for month in 1..=months {
        let payment = if month < months {
            monthly_payment
        } else {
            remaining
        };
        remaining -= payment;

        schedule.push(ScheduleEntry {
            month,
            date: schedule_date(first_date, month)?,
            payment,
            kind: PaymentKind::MonthlyPayment,
            remaining: remaining.max(0),
        });
    }

    Ok(schedule)
}

fn schedule_date(first_date: NaiveDate, month: u32) -> CalcResult<NaiveDate> {
    first_date
        .checked_add_days(Days::new(SCHEDULE_INTERVAL_DAYS * u64::from(month)))
        .ok_or_else(|| {
            CalcError::DateError(format!(
                "payment {month} falls outside the supported calendar range"
            ))
        })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
