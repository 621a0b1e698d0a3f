//! Display formatting in Brazilian conventions
//!
//! `.` groups thousands and `,` separates decimals: `R$ 1.234,56`, `12,50%`.
//! Only the presentation layer formats; the simulator works on raw decimals.

use rust_decimal::{Decimal, RoundingStrategy};

/// Group the integer digits of `value` (rounded half-away to `places`) in
/// threes and join with a decimal comma.
fn format_grouped(value: Decimal, places: u32) -> String {
    let rounded = value.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    let plain = format!("{:.*}", places as usize, rounded.abs());
    let (integer_part, fraction) = match plain.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (plain.as_str(), None),
    };

    let digits = integer_part.len();
    let mut grouped = String::with_capacity(digits + digits / 3);
    for (i, c) in integer_part.chars().enumerate() {
        if i > 0 && (digits - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    match fraction {
        Some(frac) => format!("{sign}{grouped},{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

/// `R$ 1.234,56`; negative values read `-R$ 1.234,56`
pub fn format_currency(value: Decimal) -> String {
    let body = format_grouped(value.abs(), 2);
    if value.round_dp(2).is_sign_negative() && !value.round_dp(2).is_zero() {
        format!("-R$ {body}")
    } else {
        format!("R$ {body}")
    }
}

/// Percent with two decimals: `12,50%`
pub fn format_percent(value: Decimal) -> String {
    format!("{}%", format_grouped(value, 2))
}

/// Plain number with `places` decimals: `1.000,5` for places = 1
pub fn format_decimal_br(value: Decimal, places: u32) -> String {
    format_grouped(value, places)
}

/// Parse a user-typed amount. Accepts `1234.56`, `1234,56` and `1.234,56`.
pub fn parse_decimal_br(input: &str) -> Option<Decimal> {
    let cleaned: String = input
        .trim()
        .trim_start_matches("R$")
        .trim()
        .trim_end_matches('%')
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    let normalized = if cleaned.contains(',') {
        cleaned.replace('.', "").replace(',', ".")
    } else {
        cleaned
    };
    normalized.parse::<Decimal>().ok()
}
