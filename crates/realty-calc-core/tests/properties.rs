//! Invariants that must hold for every valid input.

use proptest::prelude::*;
use realty_calc_core::format::format_installment_result;
use realty_calc_core::installment::{calc_installment, InstallmentInput};
use realty_calc_core::mortgage::{
    calc_mortgage, compare_mortgages, MortgageComparisonInput, MortgageInput, ProgramKey,
};
use realty_calc_core::roi::{calc_roi, RoiInput, PAYBACK_NEVER};
use realty_calc_core::Money;
use rust_decimal::Decimal;

/// Percent with one decimal place in 0.0..=100.0
fn percent() -> impl Strategy<Value = Decimal> {
    (0i64..=1000).prop_map(|tenths| Decimal::new(tenths, 1))
}

fn program() -> impl Strategy<Value = ProgramKey> {
    prop::sample::select(ProgramKey::ALL.to_vec())
}

proptest! {
    #[test]
    fn prop_installment_schedule_conserves_total(
        price in 100_000i64..2_000_000_000,
        pct in percent(),
        months in 1u32..=120,
        markup_tenths in 0i64..=500,
    ) {
        let input = InstallmentInput::new(price, pct, months)
            .with_markup(Decimal::new(markup_tenths, 1));
        let r = calc_installment(&input).unwrap().result;

        let paid: Money = r.schedule.iter().map(|e| e.payment).sum();
        prop_assert_eq!(paid, r.total_paid);
        prop_assert_eq!(r.total_paid, r.down_payment + r.remainder_with_markup);
        prop_assert_eq!(r.overpayment, r.total_paid - r.price);
        prop_assert_eq!(r.schedule.len(), months as usize + 1);
        prop_assert_eq!(r.schedule[0].payment, r.down_payment);
        prop_assert_eq!(r.schedule.last().unwrap().remaining, 0);
    }

    #[test]
    fn prop_no_markup_report_omits_overpayment(
        price in 100_000i64..2_000_000_000,
        pct in percent(),
        months in 1u32..=60,
    ) {
        let r = calc_installment(&InstallmentInput::new(price, pct, months)).unwrap().result;

        prop_assert_eq!(r.overpayment, 0);
        prop_assert!(!format_installment_result(&r).to_lowercase().contains("удорожание"));
    }

    #[test]
    fn prop_mortgage_consistency(
        price in 100_000i64..2_000_000_000,
        pct in percent(),
        years in 1u32..=30,
        key in program(),
    ) {
        let r = calc_mortgage(&MortgageInput::new(price, pct, years, key)).unwrap().result;

        prop_assert_eq!(r.loan_amount + r.down_payment, r.price);
        prop_assert_eq!(
            r.total_paid,
            r.monthly_payment * i64::from(years) * 12 + r.down_payment
        );
        prop_assert_eq!(r.program, key);
    }

    #[test]
    fn prop_comparison_sorted_and_complete(
        price in 100_000i64..2_000_000_000,
        pct in percent(),
        years in 1u32..=30,
    ) {
        let input = MortgageComparisonInput { price, down_payment_pct: pct, years };
        let results = compare_mortgages(&input).unwrap().result;

        prop_assert_eq!(results.len(), ProgramKey::ALL.len());
        for key in ProgramKey::ALL {
            prop_assert_eq!(results.iter().filter(|r| r.program == key).count(), 1);
        }
        prop_assert!(results.windows(2).all(|w| w[0].monthly_payment <= w[1].monthly_payment));
    }

    #[test]
    fn prop_roi_sentinel_for_non_positive_income(
        price in 100_000i64..2_000_000_000,
        daily_rent in 0i64..=5_000,
        occupancy in percent(),
    ) {
        let r = calc_roi(&RoiInput::new(price, daily_rent, occupancy)).unwrap().result;

        prop_assert_eq!(r.expenses, r.expenses_breakdown.total().unwrap());
        prop_assert_eq!(r.net_income, r.gross_income - r.expenses);
        if r.net_income <= 0 {
            prop_assert_eq!(r.payback_years, PAYBACK_NEVER);
        } else {
            prop_assert!(r.payback_years > Decimal::ZERO);
        }
    }
}
