//! Chat-ready reports for calculator results.
//!
//! Reports are plain text with `<b>`/`<i>` emphasis; the messaging layer
//! decides how to transport that markup. Line order is fixed.

use rust_decimal::Decimal;

use crate::deposit::{BetterOption, DepositComparison};
use crate::installment::{InstallmentResult, ScheduleEntry};
use crate::mortgage::MortgageResult;
use crate::roi::{RoiResult, PAYBACK_NEVER};
use crate::types::{Money, Percent};

pub const CURRENCY_SYMBOL: &str = "₽";

const DATE_FORMAT: &str = "%d.%m.%Y";

/// `15000000` -> `"15 000 000 ₽"`
pub fn format_money(amount: Money) -> String {
    format!("{} {}", group_digits(amount), CURRENCY_SYMBOL)
}

fn group_digits(amount: Money) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if amount < 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }
    grouped
}

/// At least one decimal place: `30` -> `"30.0"`, `12.35` stays `"12.35"`.
fn format_decimal(value: Decimal) -> String {
    let mut shown = value;
    if shown.scale() == 0 {
        shown.rescale(1);
    }
    shown.to_string()
}

fn format_pct(pct: Percent) -> String {
    format!("{}%", format_decimal(pct))
}

fn format_payback(years: Decimal) -> String {
    if years == PAYBACK_NEVER {
        return PAYBACK_NEVER.to_string();
    }
    format_decimal(years)
}

pub fn format_installment_result(result: &InstallmentResult) -> String {
    let mut lines = vec![
        "📊 <b>Расчёт рассрочки</b>".to_string(),
        String::new(),
        format!("🏠 Стоимость: {}", format_money(result.price)),
        format!(
            "💰 Первый взнос ({}): {}",
            format_pct(result.down_payment_pct),
            format_money(result.down_payment)
        ),
        format!("📅 Срок: {} мес.", result.months),
        String::new(),
        format!(
            "📈 <b>Ежемесячный платёж: {}</b>",
            format_money(result.monthly_payment)
        ),
        String::new(),
        format!("💵 Всего к оплате: {}", format_money(result.total_paid)),
    ];

    // No markup, no line.
    if result.overpayment > 0 {
        lines.push(format!(
            "📍 Удорожание: {} ({})",
            format_money(result.overpayment),
            format_pct(result.overpayment_pct)
        ));
    }

    lines.join("\n")
}

/// One line per schedule entry: `dd.mm.yyyy — payment (label), остаток remaining`.
pub fn format_schedule(schedule: &[ScheduleEntry]) -> String {
    schedule
        .iter()
        .map(|entry| {
            format!(
                "{}. {} — {} ({}), остаток {}",
                entry.month,
                entry.date.format(DATE_FORMAT),
                format_money(entry.payment),
                entry.kind.label(),
                format_money(entry.remaining)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_mortgage_result(result: &MortgageResult) -> String {
    [
        format!("🏦 <b>Ипотека — {}</b>", result.program_name),
        format!("<i>{}</i>", result.program_description),
        String::new(),
        format!("🏠 Стоимость: {}", format_money(result.price)),
        format!(
            "💰 Первый взнос ({}): {}",
            format_pct(result.down_payment_pct),
            format_money(result.down_payment)
        ),
        format!("💳 Сумма кредита: {}", format_money(result.loan_amount)),
        format!("📊 Ставка: {}", format_pct(result.rate)),
        format!("📅 Срок: {} лет", result.years),
        String::new(),
        format!(
            "📈 <b>Ежемесячный платёж: {}</b>",
            format_money(result.monthly_payment)
        ),
        String::new(),
        format!("💵 Всего к оплате: {}", format_money(result.total_paid)),
        format!(
            "📍 Переплата: {} ({})",
            format_money(result.overpayment),
            format_pct(result.overpayment_pct)
        ),
    ]
    .join("\n")
}

/// Summary of a program comparison, rendered in the order given: for
/// [`crate::mortgage::compare_mortgages`] that is cheapest first. The header
/// comes from the first result since every program shares price, down
/// payment and term.
pub fn format_mortgage_comparison(results: &[MortgageResult]) -> String {
    let mut text = String::from("📊 <b>Сравнение ипотечных программ</b>");
    let Some(first) = results.first() else {
        return text;
    };

    text.push_str(&format!("\n\n🏠 Стоимость: {}\n", format_money(first.price)));
    text.push_str(&format!(
        "💰 ПВ ({}): {}\n",
        format_pct(first.down_payment_pct),
        format_money(first.down_payment)
    ));
    text.push_str(&format!("📅 Срок: {} лет", first.years));

    for r in results {
        text.push_str(&format!(
            "\n\n<b>{}</b> ({})\n  Платёж: {}/мес\n  Переплата: {}",
            r.program_name,
            format_pct(r.rate),
            format_money(r.monthly_payment),
            format_money(r.overpayment)
        ));
    }

    text
}

/// Expenses are always listed management fee, utilities, tax. A payback of
/// 999 is printed as is, without a decimal place.
pub fn format_roi_result(result: &RoiResult) -> String {
    [
        "📊 <b>Расчёт доходности</b>".to_string(),
        String::new(),
        format!("🏠 Стоимость: {}", format_money(result.price)),
        format!("🛏 Ставка: {}/сутки", format_money(result.daily_rent)),
        format!(
            "📅 Загрузка: {} ({} дней/год)",
            format_pct(result.occupancy_pct),
            result.days_occupied
        ),
        String::new(),
        format!("💰 Валовый доход: {}/год", format_money(result.gross_income)),
        format!("📉 Расходы: {}/год", format_money(result.expenses)),
        format!("   • УК: {}", format_money(result.expenses_breakdown.uk_fee)),
        format!(
            "   • Коммуналка: {}",
            format_money(result.expenses_breakdown.utilities)
        ),
        format!("   • Налог: {}", format_money(result.expenses_breakdown.tax)),
        String::new(),
        format!(
            "✅ <b>Чистый доход: {}/год</b>",
            format_money(result.net_income)
        ),
        format!("📈 <b>В месяц: {}</b>", format_money(result.monthly_net)),
        String::new(),
        format!("💹 ROI: {} годовых", format_pct(result.roi_pct)),
        format!("⏱ Окупаемость: {} лет", format_payback(result.payback_years)),
    ]
    .join("\n")
}

pub fn format_deposit_comparison(cmp: &DepositComparison) -> String {
    let verdict = match cmp.better {
        BetterOption::Rent => format!("✅ Аренда выгоднее на {}/год", format_money(cmp.difference)),
        BetterOption::Deposit => {
            format!("⚠️ Депозит выгоднее на {}/год", format_money(cmp.difference))
        }
    };
    format!(
        "📊 <b>Для сравнения:</b>\nДепозит ({}%): {}/год\n{}",
        cmp.deposit_rate_pct,
        format_money(cmp.deposit_income),
        verdict
    )
}

/// ROI report followed by the deposit baseline.
pub fn format_roi_with_deposit(result: &RoiResult, cmp: &DepositComparison) -> String {
    format!(
        "{}\n\n{}",
        format_roi_result(result),
        format_deposit_comparison(cmp)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_money_groups_thousands() {
        assert_eq!(format_money(15_000_000), "15 000 000 ₽");
        assert_eq!(format_money(583_333), "583 333 ₽");
        assert_eq!(format_money(3_500), "3 500 ₽");
        assert_eq!(format_money(999), "999 ₽");
        assert_eq!(format_money(0), "0 ₽");
    }

    #[test]
    fn test_format_money_negative() {
        assert_eq!(format_money(-46_168), "-46 168 ₽");
        assert_eq!(format_money(-100), "-100 ₽");
    }

    #[test]
    fn test_whole_percent_gets_one_decimal() {
        assert_eq!(format_pct(dec!(30)), "30.0%");
        assert_eq!(format_pct(dec!(28.0)), "28.0%");
        assert_eq!(format_pct(dec!(12.35)), "12.35%");
        assert_eq!(format_pct(dec!(-5.1)), "-5.1%");
    }

    #[test]
    fn test_payback_display() {
        assert_eq!(format_payback(dec!(10)), "10.0");
        assert_eq!(format_payback(dec!(24.3)), "24.3");
        assert_eq!(format_payback(PAYBACK_NEVER), "999");
    }

    #[test]
    fn test_format_money_extremes() {
        assert_eq!(format_money(i64::MIN), "-9 223 372 036 854 775 808 ₽");
    }
}
