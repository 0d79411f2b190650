use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;

use crate::error::CalcError;
use crate::money::{divide, percent_of, share_pct, subtract, truncate};
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::CalcResult;

// ---------------------------------------------------------------------------
// Program table
// ---------------------------------------------------------------------------

/// Identity of a mortgage program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgramKey {
    Standard,
    Family,
    It,
    FarEast,
}

impl ProgramKey {
    /// Every program, in table order.
    pub const ALL: [ProgramKey; 4] = [
        ProgramKey::Standard,
        ProgramKey::Family,
        ProgramKey::It,
        ProgramKey::FarEast,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProgramKey::Standard => "standard",
            ProgramKey::Family => "family",
            ProgramKey::It => "it",
            ProgramKey::FarEast => "far_east",
        }
    }

    /// Exact lookup; `None` for anything that is not a known key.
    pub fn lookup(key: &str) -> Option<ProgramKey> {
        ProgramKey::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(key.trim()))
    }

    /// Lenient lookup: unknown keys fall back to [`ProgramKey::Standard`].
    pub fn parse_lenient(key: &str) -> ProgramKey {
        ProgramKey::lookup(key).unwrap_or(ProgramKey::Standard)
    }

    pub fn program(&self) -> &'static MortgageProgram {
        match self {
            ProgramKey::Standard => &PROGRAMS[0],
            ProgramKey::Family => &PROGRAMS[1],
            ProgramKey::It => &PROGRAMS[2],
            ProgramKey::FarEast => &PROGRAMS[3],
        }
    }
}

impl fmt::Display for ProgramKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A mortgage program. `min_down_payment` and `max_years` are advisory:
/// the calculator warns on them but never refuses a calculation.
#[derive(Debug, Clone, Serialize)]
pub struct MortgageProgram {
    pub key: ProgramKey,
    pub name: &'static str,
    /// Annual nominal rate in percent
    pub rate: Percent,
    /// Minimum down payment in percent
    pub min_down_payment: u32,
    pub max_years: u32,
    pub description: &'static str,
}

/// Rates as of January 2025.
static PROGRAMS: [MortgageProgram; 4] = [
    MortgageProgram {
        key: ProgramKey::Standard,
        name: "Стандартная",
        rate: dec!(28.0),
        min_down_payment: 20,
        max_years: 30,
        description: "Базовая программа",
    },
    MortgageProgram {
        key: ProgramKey::Family,
        name: "Семейная",
        rate: dec!(6.0),
        min_down_payment: 20,
        max_years: 30,
        description: "Для семей с детьми до 6 лет",
    },
    MortgageProgram {
        key: ProgramKey::It,
        name: "IT-ипотека",
        rate: dec!(5.0),
        min_down_payment: 20,
        max_years: 30,
        description: "Для сотрудников IT-компаний",
    },
    MortgageProgram {
        key: ProgramKey::FarEast,
        name: "Дальневосточная",
        rate: dec!(2.0),
        min_down_payment: 20,
        max_years: 20,
        description: "Для ДФО, до 35 лет",
    },
];

/// The full program table in declaration order (standard, family, it, far_east).
pub fn programs() -> &'static [MortgageProgram] {
    &PROGRAMS
}

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

fn default_program() -> String {
    ProgramKey::Standard.as_str().to_string()
}

/// Input parameters for a mortgage calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MortgageInput {
    /// Property price in whole currency units
    pub price: Money,
    /// Down payment as a percent of price
    pub down_payment_pct: Percent,
    /// Term in years, at least 1
    pub years: u32,
    /// Program key; unknown keys are treated as `standard`
    #[serde(default = "default_program")]
    pub program: String,
}

impl MortgageInput {
    pub fn new(price: Money, down_payment_pct: Percent, years: u32, program: ProgramKey) -> Self {
        Self {
            price,
            down_payment_pct,
            years,
            program: program.as_str().to_string(),
        }
    }
}

/// Input parameters for a side-by-side program comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MortgageComparisonInput {
    pub price: Money,
    pub down_payment_pct: Percent,
    pub years: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MortgageResult {
    pub price: Money,
    pub down_payment: Money,
    pub down_payment_pct: Percent,
    /// price - down_payment
    pub loan_amount: Money,
    /// Annual rate in percent
    pub rate: Percent,
    pub years: u32,
    pub monthly_payment: Money,
    /// monthly_payment * years * 12 + down_payment
    pub total_paid: Money,
    pub overpayment: Money,
    pub overpayment_pct: Percent,
    pub program: ProgramKey,
    pub program_name: String,
    pub program_description: String,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Fixed-rate annuity mortgage under one program.
///
/// An unknown `program` key is not an error: it is normalised to `standard`
/// and reported in the warnings. `years == 0` returns
/// [`CalcError::DivisionByZero`].
pub fn calc_mortgage(input: &MortgageInput) -> CalcResult<ComputationOutput<MortgageResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let key = match ProgramKey::lookup(&input.program) {
        Some(key) => key,
        None => {
            tracing::warn!(program = %input.program, "unknown mortgage program, using standard");
            warnings.push(format!(
                "Unknown program '{}' — calculated under the standard program",
                input.program
            ));
            ProgramKey::Standard
        }
    };

    let result = compute(input.price, input.down_payment_pct, input.years, key)?;
    warnings.extend(program_warnings(&result, key.program()));

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Fixed-rate annuity mortgage: P * r / (1 - (1+r)^-n)",
        input,
        warnings,
        elapsed,
        result,
    ))
}

/// Run every program in the table and order the results by monthly payment,
/// lowest first. Equal payments keep table order.
pub fn compare_mortgages(
    input: &MortgageComparisonInput,
) -> CalcResult<ComputationOutput<Vec<MortgageResult>>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let mut results = ProgramKey::ALL
        .into_iter()
        .map(|key| compute(input.price, input.down_payment_pct, input.years, key))
        .collect::<CalcResult<Vec<_>>>()?;
    results.sort_by_key(|r| r.monthly_payment);

    for r in &results {
        warnings.extend(program_warnings(r, r.program.program()));
    }

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Mortgage program comparison, ascending by monthly payment",
        input,
        warnings,
        elapsed,
        results,
    ))
}

// ---------------------------------------------------------------------------
// Core computation
// ---------------------------------------------------------------------------

/// Annual percent to monthly fraction: 100 * 12
const PCT_PER_MONTH: Decimal = dec!(1200);

fn compute(
    price: Money,
    down_payment_pct: Percent,
    years: u32,
    key: ProgramKey,
) -> CalcResult<MortgageResult> {
    let program = key.program();

    let down_payment = percent_of(price, down_payment_pct, "mortgage down payment")?;
    let loan_amount = subtract(price, down_payment, "mortgage loan amount")?;

    let total_months = years.checked_mul(12).ok_or_else(|| CalcError::Overflow {
        context: "mortgage term in months".into(),
    })?;

    let monthly_payment = monthly_annuity(loan_amount, program.rate, total_months)?;
    let total_paid = monthly_payment
        .checked_mul(i64::from(total_months))
        .and_then(|paid| paid.checked_add(down_payment))
        .ok_or_else(|| CalcError::Overflow {
            context: "mortgage total paid".into(),
        })?;
    let overpayment = subtract(total_paid, price, "mortgage overpayment")?;

    tracing::debug!(
        program = %key,
        loan_amount,
        monthly_payment,
        overpayment,
        "mortgage computed"
    );

    Ok(MortgageResult {
        price,
        down_payment,
        down_payment_pct,
        loan_amount,
        rate: program.rate,
        years,
        monthly_payment,
        total_paid,
        overpayment,
        overpayment_pct: share_pct(overpayment, price),
        program: key,
        program_name: program.name.to_string(),
        program_description: program.description.to_string(),
    })
}

/// Standard fixed-rate payment `P * r / (1 - (1+r)^-n)` with
/// `r = annual_rate_pct / 1200`, truncated to whole currency units.
/// Straight-line `P / n` when the rate is zero. Long terms converge on `P * r`.
fn monthly_annuity(
    principal: Money,
    annual_rate_pct: Percent,
    total_months: u32,
) -> CalcResult<Money> {
    if annual_rate_pct.is_zero() {
        return divide(
            principal,
            i64::from(total_months),
            "mortgage payment with zero rate",
        );
    }
    if total_months == 0 {
        return Err(CalcError::DivisionByZero {
            context: "mortgage payment over zero years".into(),
        });
    }

    let monthly_rate = annual_rate_pct / PCT_PER_MONTH;
    let denominator = Decimal::ONE - discount(monthly_rate, total_months)?;
    if denominator.is_zero() {
        return Err(CalcError::DivisionByZero {
            context: "mortgage payment denominator".into(),
        });
    }

    // P * pct / 1200 is exact for whole-percent rates
    let payment = Decimal::from(principal)
        .checked_mul(annual_rate_pct)
        .map(|scaled| scaled / PCT_PER_MONTH)
        .and_then(|interest| interest.checked_div(denominator))
        .ok_or_else(|| CalcError::Overflow {
            context: "mortgage monthly payment".into(),
        })?;

    truncate(payment, "mortgage monthly payment")
}

/// (1 + r)^-n via iterative multiplication
fn discount(rate: Decimal, n: u32) -> CalcResult<Decimal> {
    let factor = Decimal::ONE
        .checked_div(Decimal::ONE + rate)
        .ok_or_else(|| CalcError::DivisionByZero {
            context: "mortgage discount factor".into(),
        })?;
    let mut result = Decimal::ONE;
    for _ in 0..n {
        result = result
            .checked_mul(factor)
            .ok_or_else(|| CalcError::Overflow {
                context: format!("discounting {n} periods"),
            })?;
    }
    Ok(result)
}

fn program_warnings(result: &MortgageResult, program: &MortgageProgram) -> Vec<String> {
    let mut warnings = Vec::new();
    if result.down_payment_pct < Decimal::ZERO || result.down_payment_pct > dec!(100) {
        warnings.push(format!(
            "Down payment {}% is outside 0–100%",
            result.down_payment_pct
        ));
    } else if result.down_payment_pct < Decimal::from(program.min_down_payment) {
        warnings.push(format!(
            "{}: down payment {}% is below the program minimum of {}%",
            program.name, result.down_payment_pct, program.min_down_payment
        ));
    }
    if result.years > program.max_years {
        warnings.push(format!(
            "{}: term of {} years exceeds the program maximum of {} years",
            program.name, result.years, program.max_years
        ));
    }
    warnings
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_program_table_rates() {
        let rates: Vec<Percent> = programs().iter().map(|p| p.rate).collect();
        assert_eq!(rates, vec![dec!(28.0), dec!(6.0), dec!(5.0), dec!(2.0)]);
        for (key, program) in ProgramKey::ALL.iter().zip(programs()) {
            assert_eq!(key.program().key, *key);
            assert_eq!(program.key, *key);
        }
    }

    #[test]
    fn test_lookup_is_lenient() {
        assert_eq!(ProgramKey::lookup("far_east"), Some(ProgramKey::FarEast));
        assert_eq!(ProgramKey::lookup(" IT "), Some(ProgramKey::It));
        assert_eq!(ProgramKey::lookup("military"), None);
        assert_eq!(ProgramKey::parse_lenient("military"), ProgramKey::Standard);
    }

    #[test]
    fn test_family_program_payment() {
        let input = MortgageInput::new(15_000_000, dec!(20), 20, ProgramKey::Family);
        let out = calc_mortgage(&input).unwrap();
        let r = &out.result;

        assert_eq!(r.rate, dec!(6.0));
        assert_eq!(r.down_payment, 3_000_000);
        assert_eq!(r.loan_amount, 12_000_000);
        assert_eq!(r.monthly_payment, 85_971);
        assert_eq!(r.total_paid, 85_971 * 240 + 3_000_000);
        assert_eq!(r.overpayment, 8_633_040);
        assert_eq!(r.overpayment_pct, dec!(57.6));
        assert_eq!(r.program_name, "Семейная");
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_standard_program_payment() {
        let input = MortgageInput::new(15_000_000, dec!(20), 20, ProgramKey::Standard);
        let r = calc_mortgage(&input).unwrap().result;

        assert_eq!(r.monthly_payment, 281_108);
        assert_eq!(r.overpayment_pct, dec!(369.8));
    }

    #[test]
    fn test_unknown_program_falls_back_to_standard() {
        let input = MortgageInput {
            price: 15_000_000,
            down_payment_pct: dec!(20),
            years: 20,
            program: "rural".into(),
        };
        let out = calc_mortgage(&input).unwrap();

        assert_eq!(out.result.program, ProgramKey::Standard);
        assert_eq!(out.result.rate, dec!(28.0));
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_zero_rate_is_straight_line() {
        assert_eq!(monthly_annuity(12_000_000, Decimal::ZERO, 240).unwrap(), 50_000);
        assert_eq!(monthly_annuity(1_000, Decimal::ZERO, 3).unwrap(), 333);
    }

    #[test]
    fn test_long_term_converges_on_interest_only() {
        let input = MortgageInput::new(15_000_000, dec!(20), 300, ProgramKey::Standard);
        let out = calc_mortgage(&input).unwrap();

        assert_eq!(out.result.monthly_payment, 280_000);
        assert_eq!(out.result.total_paid, 280_000 * 3_600 + 3_000_000);

        let far_east = MortgageInput::new(15_000_000, dec!(20), 300, ProgramKey::FarEast);
        assert_eq!(calc_mortgage(&far_east).unwrap().result.monthly_payment, 20_049);
    }

    #[test]
    fn test_long_term_comparison_succeeds() {
        let input = MortgageComparisonInput {
            price: 15_000_000,
            down_payment_pct: dec!(20),
            years: 200,
        };
        let results = compare_mortgages(&input).unwrap().result;

        assert_eq!(results.len(), 4);
        assert!(results
            .windows(2)
            .all(|w| w[0].monthly_payment <= w[1].monthly_payment));
        assert_eq!(results[3].program, ProgramKey::Standard);
    }

    #[test]
    fn test_extreme_loan_amount_is_overflow_error() {
        let input = MortgageInput::new(i64::MAX, dec!(-10), 20, ProgramKey::Family);
        let err = calc_mortgage(&input).unwrap_err();
        assert!(matches!(err, CalcError::Overflow { .. }));
    }

    #[test]
    fn test_zero_years_is_division_error() {
        let input = MortgageInput::new(15_000_000, dec!(20), 0, ProgramKey::It);
        let err = calc_mortgage(&input).unwrap_err();
        assert!(matches!(err, CalcError::DivisionByZero { .. }));
    }

    #[test]
    fn test_advisory_limits_warn_without_refusing() {
        let input = MortgageInput::new(15_000_000, dec!(10), 25, ProgramKey::FarEast);
        let out = calc_mortgage(&input).unwrap();

        assert_eq!(out.result.down_payment, 1_500_000);
        assert_eq!(out.warnings.len(), 2);
    }

    #[test]
    fn test_comparison_sorted_by_payment() {
        let input = MortgageComparisonInput {
            price: 15_000_000,
            down_payment_pct: dec!(20),
            years: 20,
        };
        let results = compare_mortgages(&input).unwrap().result;
        let keys: Vec<ProgramKey> = results.iter().map(|r| r.program).collect();

        assert_eq!(
            keys,
            vec![
                ProgramKey::FarEast,
                ProgramKey::It,
                ProgramKey::Family,
                ProgramKey::Standard
            ]
        );
        let payments: Vec<Money> = results.iter().map(|r| r.monthly_payment).collect();
        assert_eq!(payments, vec![60_706, 79_194, 85_971, 281_108]);
    }
}
