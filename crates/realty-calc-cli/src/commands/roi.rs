use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use realty_calc_core::deposit::{compare_with_deposit, DEFAULT_DEPOSIT_RATE_PCT};
use realty_calc_core::format::format_roi_with_deposit;
use realty_calc_core::roi::{
    calc_roi, RoiInput, DEFAULT_OCCUPANCY_PCT, DEFAULT_TAX_PCT, DEFAULT_UK_PCT,
    DEFAULT_UTILITIES_MONTHLY,
};
use realty_calc_core::Money;

use super::{money_flag, CommandOutput};
use crate::input;

/// Arguments for a rental yield estimate
#[derive(Args)]
pub struct RoiArgs {
    /// Property price: "15000000", "15 млн"
    #[arg(long)]
    pub price: Option<String>,

    /// Nightly rent: "3500", "3,5к"
    #[arg(long)]
    pub daily_rent: Option<String>,

    /// Occupancy percent (70 = 70% of the year)
    #[arg(long)]
    pub occupancy: Option<Decimal>,

    /// Management company fee, percent of gross income
    #[arg(long)]
    pub uk_pct: Option<Decimal>,

    /// Utilities per month
    #[arg(long)]
    pub utilities_monthly: Option<Money>,

    /// Tax, percent of gross income
    #[arg(long)]
    pub tax_pct: Option<Decimal>,

    /// Deposit rate for the baseline comparison, percent
    #[arg(long)]
    pub deposit_rate: Option<Decimal>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_roi(args: RoiArgs) -> Result<CommandOutput, Box<dyn std::error::Error>> {
    let roi_input: RoiInput = match input::load(args.input.as_deref())? {
        Some(loaded) => loaded,
        None => build_input(&args)?,
    };

    let output = calc_roi(&roi_input)?;
    let deposit = compare_with_deposit(
        &output.result,
        args.deposit_rate.unwrap_or(DEFAULT_DEPOSIT_RATE_PCT),
    )?;

    let report = format_roi_with_deposit(&output.result, &deposit);
    let mut out = CommandOutput::new(&output, report)?;
    if let Value::Object(ref mut envelope) = out.value {
        envelope.insert("deposit_comparison".into(), serde_json::to_value(&deposit)?);
    }
    Ok(out)
}

fn build_input(args: &RoiArgs) -> Result<RoiInput, Box<dyn std::error::Error>> {
    Ok(RoiInput {
        price: money_flag(args.price.as_deref(), "price")?,
        daily_rent: money_flag(args.daily_rent.as_deref(), "daily-rent")?,
        occupancy_pct: args.occupancy.unwrap_or(DEFAULT_OCCUPANCY_PCT),
        uk_pct: args.uk_pct.unwrap_or(DEFAULT_UK_PCT),
        utilities_monthly: args.utilities_monthly.unwrap_or(DEFAULT_UTILITIES_MONTHLY),
        tax_pct: args.tax_pct.unwrap_or(DEFAULT_TAX_PCT),
    })
}
