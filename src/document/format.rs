//! Money and date formatting for printed documents.
//!
//! Both formatters are locale independent: the same input prints the same
//! characters on every host.

use chrono::NaiveDateTime;
use rust_decimal::{Decimal, RoundingStrategy};

/// Symbol printed in front of every amount
pub const CURRENCY_SYMBOL: &str = "$";

/// Layout used by [`format_date`]
pub const DATE_FORMAT: &str = "%b %d, %Y %H:%M";

/// Round a money amount to cents, half away from zero.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Format an amount as `$1,234.56`.
///
/// Negative amounts print as `-$1.00`. An amount that rounds to zero is
/// never negative.
///
/// ## Example
///
/// ```
/// use rust_decimal::Decimal;
/// use tillroll::document::format::format_currency;
///
/// assert_eq!(format_currency(Decimal::new(123456, 2)), "$1,234.56");
/// assert_eq!(format_currency(Decimal::new(-1, 0)), "-$1.00");
/// ```
pub fn format_currency(amount: Decimal) -> String {
    let rounded = round_money(amount);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();

    let mut cents = rounded.abs();
    cents.rescale(2);
    let digits = cents.to_string();
    let (whole, frac) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    format!(
        "{}{}{}.{}",
        if negative { "-" } else { "" },
        CURRENCY_SYMBOL,
        group_thousands(whole),
        frac
    )
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

/// Format a timestamp as `Mon DD, YYYY HH:MM` (24-hour clock).
///
/// ```
/// use chrono::NaiveDate;
/// use tillroll::document::format::format_date;
///
/// let at = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap().and_hms_opt(14, 5, 0).unwrap();
/// assert_eq!(format_date(&at), "Mar 07, 2024 14:05");
/// ```
pub fn format_date(date: &NaiveDateTime) -> String {
    date.format(DATE_FORMAT).to_string()
}
