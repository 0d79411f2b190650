use chrono::NaiveDate;
use realty_calc_core::installment::{
    calc_installment, calc_installment_for_terms, InstallmentInput, InstallmentTerms, PaymentKind,
};
use realty_calc_core::{CalcError, Money};
use rust_decimal_macros::dec;

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
}

// ===========================================================================
// Reference plan: 15M, 30% down, 18 months, no markup
// ===========================================================================

#[test]
fn test_reference_plan() {
    let input = InstallmentInput::new(15_000_000, dec!(30), 18).starting_on(start());
    let r = calc_installment(&input).unwrap().result;

    assert_eq!(r.down_payment, 4_500_000);
    assert_eq!(r.remainder, 10_500_000);
    assert_eq!(r.monthly_payment, 583_333);
    assert_eq!(r.total_paid, 15_000_000);
    assert_eq!(r.overpayment, 0);
}

#[test]
fn test_schedule_payments_sum_to_total() {
    let input = InstallmentInput::new(15_000_000, dec!(30), 18).starting_on(start());
    let r = calc_installment(&input).unwrap().result;

    let paid: Money = r.schedule.iter().map(|e| e.payment).sum();
    assert_eq!(paid, r.total_paid);
    assert_eq!(r.schedule.last().unwrap().remaining, 0);
}

#[test]
fn test_middle_instalments_are_flat() {
    let input = InstallmentInput::new(15_000_000, dec!(30), 18).starting_on(start());
    let r = calc_installment(&input).unwrap().result;

    for entry in &r.schedule[1..18] {
        assert_eq!(entry.payment, 583_333);
        assert_eq!(entry.kind, PaymentKind::MonthlyPayment);
    }
    // Remaining balance walks down by the flat instalment
    assert_eq!(r.schedule[1].remaining, 10_500_000 - 583_333);
    assert_eq!(r.schedule[17].remaining, 583_339);
}

#[test]
fn test_markup_plan_overpayment() {
    let input = InstallmentInput::new(12_400_000, dec!(20), 24)
        .with_markup(dec!(7.5))
        .starting_on(start());
    let r = calc_installment(&input).unwrap().result;

    // 12.4M * 20% = 2_480_000; remainder 9_920_000; * 1.075 = 10_664_000
    assert_eq!(r.down_payment, 2_480_000);
    assert_eq!(r.remainder, 9_920_000);
    assert_eq!(r.remainder_with_markup, 10_664_000);
    assert_eq!(r.monthly_payment, 444_333);
    assert_eq!(r.total_paid, 13_144_000);
    assert_eq!(r.overpayment, 744_000);
    assert_eq!(r.overpayment_pct, dec!(6.0));
    assert_eq!(r.schedule.last().unwrap().payment, 10_664_000 - 444_333 * 23);
}

#[test]
fn test_fractional_down_payment_truncated() {
    let input = InstallmentInput::new(9_999_999, dec!(33.3), 6).starting_on(start());
    let r = calc_installment(&input).unwrap().result;

    // 9_999_999 * 0.333 = 3_329_999.667
    assert_eq!(r.down_payment, 3_329_999);
    assert_eq!(r.remainder, 6_670_000);
}

#[test]
fn test_zero_months_rejected_as_division_by_zero() {
    let input = InstallmentInput::new(15_000_000, dec!(30), 0);
    assert!(matches!(
        calc_installment(&input),
        Err(CalcError::DivisionByZero { .. })
    ));
}

#[test]
fn test_json_input_defaults() {
    let input: InstallmentInput = serde_json::from_str(
        r#"{"price": 15000000, "down_payment_pct": "30", "months": 18, "start_date": "2025-03-10"}"#,
    )
    .unwrap();

    assert_eq!(input.markup_pct, dec!(0));
    assert_eq!(input.start_date, Some(start()));
}

#[test]
fn test_property_terms_prefill() {
    let terms: InstallmentTerms = serde_json::from_str(
        r#"{"min_down_payment_pct": "50", "max_months": 12, "markup_pct": "5"}"#,
    )
    .unwrap();
    let input = InstallmentInput::from_terms(10_000_000, &terms).starting_on(start());
    let out = calc_installment_for_terms(&input, &terms).unwrap();

    assert!(out.warnings.is_empty());
    assert_eq!(out.result.down_payment, 5_000_000);
    assert_eq!(out.result.remainder_with_markup, 5_250_000);
    assert_eq!(out.result.monthly_payment, 437_500);
}
