use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;

use realty_calc_core::format::{format_installment_result, format_schedule};
use realty_calc_core::installment::{
    calc_installment, calc_installment_for_terms, InstallmentInput, InstallmentTerms,
};

use super::{money_flag, CommandOutput};
use crate::input;

/// Arguments for an installment plan
#[derive(Args)]
pub struct InstallmentArgs {
    /// Property price: "15000000", "15 млн", "850к"
    #[arg(long)]
    pub price: Option<String>,

    /// Down payment percent (30 = 30%)
    #[arg(long, alias = "pv")]
    pub down_payment: Option<Decimal>,

    /// Number of monthly instalments
    #[arg(long)]
    pub months: Option<u32>,

    /// Markup on the financed remainder, percent
    #[arg(long)]
    pub markup: Option<Decimal>,

    /// Date of the down payment (YYYY-MM-DD); today when omitted
    #[arg(long)]
    pub start_date: Option<NaiveDate>,

    /// JSON file with the property's installment terms; pre-fills down
    /// payment, months and markup, and flags departures from them
    #[arg(long)]
    pub terms: Option<String>,

    /// Append the payment schedule to the text report
    #[arg(long)]
    pub schedule: bool,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_installment(args: InstallmentArgs) -> Result<CommandOutput, Box<dyn std::error::Error>> {
    let terms: Option<InstallmentTerms> = args
        .terms
        .as_deref()
        .map(input::file::read_json)
        .transpose()?;

    let plan_input: InstallmentInput = match input::load(args.input.as_deref())? {
        Some(loaded) => loaded,
        None => build_input(&args, terms.as_ref())?,
    };

    let output = match &terms {
        Some(terms) => calc_installment_for_terms(&plan_input, terms)?,
        None => calc_installment(&plan_input)?,
    };

    let mut report = format_installment_result(&output.result);
    if args.schedule {
        report.push_str("\n\n");
        report.push_str(&format_schedule(&output.result.schedule));
    }

    Ok(CommandOutput::new(&output, report)?)
}

fn build_input(
    args: &InstallmentArgs,
    terms: Option<&InstallmentTerms>,
) -> Result<InstallmentInput, Box<dyn std::error::Error>> {
    let price = money_flag(args.price.as_deref(), "price")?;

    let mut built = match terms {
        Some(terms) => InstallmentInput::from_terms(price, terms),
        None => InstallmentInput::new(
            price,
            args.down_payment
                .ok_or("--down-payment is required (or provide --terms or --input)")?,
            args.months
                .ok_or("--months is required (or provide --terms or --input)")?,
        ),
    };

    if let Some(pct) = args.down_payment {
        built.down_payment_pct = pct;
    }
    if let Some(months) = args.months {
        built.months = months;
    }
    if let Some(markup) = args.markup {
        built.markup_pct = markup;
    }
    built.start_date = args.start_date;

    Ok(built)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn args() -> InstallmentArgs {
        InstallmentArgs {
            price: Some("15 млн".into()),
            down_payment: Some(dec!(30)),
            months: Some(18),
            markup: None,
            start_date: None,
            terms: None,
            schedule: false,
            input: None,
        }
    }

    #[test]
    fn test_flags_build_input() {
        let built = build_input(&args(), None).unwrap();

        assert_eq!(built.price, 15_000_000);
        assert_eq!(built.down_payment_pct, dec!(30));
        assert_eq!(built.months, 18);
        assert_eq!(built.markup_pct, dec!(0));
    }

    #[test]
    fn test_terms_fill_missing_flags() {
        let terms = InstallmentTerms {
            min_down_payment_pct: dec!(50),
            max_months: 12,
            markup_pct: dec!(3),
        };
        let partial = InstallmentArgs {
            down_payment: None,
            months: Some(10),
            ..args()
        };
        let built = build_input(&partial, Some(&terms)).unwrap();

        assert_eq!(built.down_payment_pct, dec!(50));
        assert_eq!(built.months, 10);
        assert_eq!(built.markup_pct, dec!(3));
    }

    #[test]
    fn test_missing_months_is_an_error() {
        let partial = InstallmentArgs {
            months: None,
            ..args()
        };
        let err = build_input(&partial, None).unwrap_err();
        assert!(err.to_string().contains("--months"));
    }

    #[test]
    fn test_unparseable_price_is_an_error() {
        let bad = InstallmentArgs {
            price: Some("дорого".into()),
            ..args()
        };
        assert!(build_input(&bad, None).is_err());
    }
}
