//! Money helpers shared by the ledger, the tax engine and log output.
//!
//! Every monetary intermediate that feeds a profit or tax figure goes through
//! [`round_money`] before it is combined with another value.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places carried by every monetary value.
pub const MONEY_SCALE: u32 = 2;

/// Round to cents, half away from zero (10.005 -> 10.01, -10.005 -> -10.01).
///
/// # Examples
/// ```
/// use capital_gains::utils::round_money;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(round_money(dec!(13.3333)), dec!(13.33));
/// assert_eq!(round_money(dec!(10.005)), dec!(10.01));
/// ```
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Round to cents and pin the scale to exactly two places, so `0` renders as `0.00`.
pub fn to_money(value: Decimal) -> Decimal {
    let mut rounded = round_money(value);
    rounded.rescale(MONEY_SCALE);
    rounded
}

/// Format as Brazilian Real for log lines: "R$ 1.234,56"
///
/// # Examples
/// ```
/// use capital_gains::utils::format_currency;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_currency(dec!(1234.56)), "R$ 1.234,56");
/// assert_eq!(format_currency(dec!(-500)), "R$ -500,00");
/// ```
pub fn format_currency(value: Decimal) -> String {
    let sign = if value < Decimal::ZERO { "-" } else { "" };
    let formatted = to_money(value.abs()).to_string();
    let (integer_part, decimal_part) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    // Thousands separators (.) on the integer part
    let digits: Vec<char> = integer_part.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(*c);
    }

    format!("R$ {}{},{}", sign, grouped, decimal_part)
}
