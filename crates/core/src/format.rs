//! Display helpers.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Uppercase the first character, leaving the rest untouched.
///
/// ```
/// use loja_core::format::capitalize_first_letter;
///
/// assert_eq!(capitalize_first_letter("john"), "John");
/// assert_eq!(capitalize_first_letter(""), "");
/// ```
#[must_use]
pub fn capitalize_first_letter(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Format a timestamp as `DD/MM/YYYY`.
#[must_use]
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Format an amount as a dollar price with two decimals.
#[must_use]
pub fn format_price(amount: Decimal) -> String {
    format!("${:.2}", amount.round_dp(2))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_capitalize_unicode() {
        assert_eq!(capitalize_first_letter("érica"), "Érica");
        assert_eq!(capitalize_first_letter("kilcoole"), "Kilcoole");
        assert_eq!(capitalize_first_letter("Ana"), "Ana");
    }

    #[test]
    fn test_format_date() {
        let date = Utc.with_ymd_and_hms(2023, 3, 7, 15, 30, 0).unwrap();
        assert_eq!(format_date(&date), "07/03/2023");
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(Decimal::new(1099, 2)), "$10.99");
        assert_eq!(format_price(Decimal::from(5)), "$5.00");
        assert_eq!(format_price(Decimal::new(12346, 3)), "$12.35");
    }
}
