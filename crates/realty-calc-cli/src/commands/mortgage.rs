use clap::Args;
use rust_decimal::Decimal;

use realty_calc_core::format::{format_mortgage_comparison, format_mortgage_result};
use realty_calc_core::mortgage::{
    calc_mortgage, compare_mortgages, programs, MortgageComparisonInput, MortgageInput,
    MortgageProgram,
};

use super::{money_flag, CommandOutput};
use crate::input;

/// Arguments for a single-program mortgage
#[derive(Args)]
pub struct MortgageArgs {
    /// Property price: "15000000", "15 млн"
    #[arg(long)]
    pub price: Option<String>,

    /// Down payment percent (20 = 20%)
    #[arg(long, alias = "pv")]
    pub down_payment: Option<Decimal>,

    /// Term in years
    #[arg(long)]
    pub years: Option<u32>,

    /// Program: standard, family, it, far_east (anything else means standard)
    #[arg(long, default_value = "standard")]
    pub program: String,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for a program comparison
#[derive(Args)]
pub struct MortgageCompareArgs {
    /// Property price: "15000000", "15 млн"
    #[arg(long)]
    pub price: Option<String>,

    /// Down payment percent (20 = 20%)
    #[arg(long, alias = "pv")]
    pub down_payment: Option<Decimal>,

    /// Term in years
    #[arg(long)]
    pub years: Option<u32>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_mortgage(args: MortgageArgs) -> Result<CommandOutput, Box<dyn std::error::Error>> {
    let mortgage_input: MortgageInput = match input::load(args.input.as_deref())? {
        Some(loaded) => loaded,
        None => MortgageInput {
            price: money_flag(args.price.as_deref(), "price")?,
            down_payment_pct: args
                .down_payment
                .ok_or("--down-payment is required (or provide --input)")?,
            years: args.years.ok_or("--years is required (or provide --input)")?,
            program: args.program,
        },
    };

    let output = calc_mortgage(&mortgage_input)?;
    let report = format_mortgage_result(&output.result);
    Ok(CommandOutput::new(&output, report)?)
}

pub fn run_mortgage_compare(
    args: MortgageCompareArgs,
) -> Result<CommandOutput, Box<dyn std::error::Error>> {
    let compare_input: MortgageComparisonInput = match input::load(args.input.as_deref())? {
        Some(loaded) => loaded,
        None => MortgageComparisonInput {
            price: money_flag(args.price.as_deref(), "price")?,
            down_payment_pct: args
                .down_payment
                .ok_or("--down-payment is required (or provide --input)")?,
            years: args.years.ok_or("--years is required (or provide --input)")?,
        },
    };

    let output = compare_mortgages(&compare_input)?;
    let report = format_mortgage_comparison(&output.result);
    Ok(CommandOutput::new(&output, report)?)
}

pub fn run_programs() -> Result<CommandOutput, Box<dyn std::error::Error>> {
    let table = programs();
    Ok(CommandOutput::new(&table, program_menu(table))?)
}

/// The program menu shown before a user picks a program.
fn program_menu(table: &[MortgageProgram]) -> String {
    let mut text = String::from("Выбери программу ипотеки:");
    for program in table {
        text.push_str(&format!(
            "\n\n• <b>{}</b> — {}%\n  <i>{}</i>",
            program.name, program.rate, program.description
        ));
    }
    text
}
