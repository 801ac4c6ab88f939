//! Display formatting for money, percentages and payback periods.

use crate::domain::Decimal;
use crate::engine::Payback;

/// Whole dollars with thousands separators: `$36,540`, `-$1,235`.
pub fn format_currency(value: Decimal) -> String {
    let rounded = value.round_dp(0);
    let digits = rounded.abs().inner().trunc().to_string();
    let sign = if rounded.is_negative() { "-" } else { "" };
    format!("{}${}", sign, group_thousands(&digits))
}

/// One decimal place with a percent sign: `12.3%`.
pub fn format_percent(value: Decimal) -> String {
    format!("{:.1}%", value.round_dp(1).inner())
}

/// Fraction rendered as a percentage: `0.16` -> `16.0%`.
pub fn format_fraction_as_percent(fraction: Decimal) -> String {
    format_percent(fraction * Decimal::hundred())
}

pub fn format_payback(payback: &Payback) -> String {
    match payback {
        Payback::Immediate => "Immediate".to_string(),
        Payback::Months(months) => format!("{:.1} months", months.round_dp(1).inner()),
        Payback::NotRecoverable => "Not recoverable".to_string(),
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
