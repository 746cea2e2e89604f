//! Display-formatting helpers shared by the export surfaces and the UI.
//!
//! These are total functions: any finite number or date string produces a
//! defined output. They do not validate that a record is well-formed.

use chrono::{DateTime, NaiveDate};

/// Display pattern for dates: `01 Mar 2024`.
pub(crate) const DATE_DISPLAY: &str = "%d %b %Y";

/// Renders a monetary amount as Nigerian naira with zero decimal places
/// and thousands grouping, e.g. `₦50,000`.
#[must_use]
pub fn format_currency(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let whole = amount.abs().round() as u64;
    format!("{sign}₦{}", group_thousands(&whole.to_string()))
}

/// Renders an ISO date (`2024-03-01`) or RFC 3339 timestamp as `DD Mon YYYY`.
///
/// Unparseable input is returned verbatim rather than panicking; the domain
/// only ever contains the two forms above.
#[must_use]
pub fn format_date(value: &str) -> String {
    if let Ok(date) = value.parse::<NaiveDate>() {
        return date.format(DATE_DISPLAY).to_string();
    }
    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return instant.date_naive().format(DATE_DISPLAY).to_string();
    }
    value.to_string()
}

/// Renders a number with one decimal place and thousands grouping,
/// the display convention for acreage values.
#[must_use]
pub fn format_number(value: f64) -> String {
    format_number_with(value, 1)
}

/// Renders a number with a fixed decimal-place count and thousands grouping.
#[must_use]
pub fn format_number_with(value: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, value.abs());
    let sign = if value < 0.0 && fixed.chars().any(|c| ('1'..='9').contains(&c)) {
        "-"
    } else {
        ""
    };
    let (whole, frac) = match fixed.split_once('.') {
        Some((whole, frac)) => (whole, Some(frac)),
        None => (fixed.as_str(), None),
    };
    let grouped = group_thousands(whole);
    match frac {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Inserts a comma every three digits from the right. Expects digits only.
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency_groups_and_drops_decimals() {
        assert_eq!(format_currency(50000.0), "₦50,000");
        assert_eq!(format_currency(80000.0), "₦80,000");
        assert_eq!(format_currency(0.0), "₦0");
        assert_eq!(format_currency(999.4), "₦999");
        assert_eq!(format_currency(1234567.0), "₦1,234,567");
    }

    #[test]
    fn test_format_currency_negative() {
        assert_eq!(format_currency(-2500.0), "-₦2,500");
    }

    #[test]
    fn test_format_date_from_plain_date() {
        assert_eq!(format_date("2024-03-01"), "01 Mar 2024");
        assert_eq!(format_date("2024-12-25"), "25 Dec 2024");
    }

    #[test]
    fn test_format_date_from_rfc3339_timestamp() {
        assert_eq!(format_date("2024-05-15T09:30:00.000Z"), "15 May 2024");
    }

    #[test]
    fn test_format_date_passes_through_unparseable_input() {
        assert_eq!(format_date("not a date"), "not a date");
    }

    #[test]
    fn test_format_number_default_one_decimal() {
        assert_eq!(format_number(3.5), "3.5");
        assert_eq!(format_number(2.0), "2.0");
        assert_eq!(format_number(1234.56), "1,234.6");
    }

    #[test]
    fn test_format_number_with_decimals() {
        assert_eq!(format_number_with(1234.5, 0), "1,235");
        assert_eq!(format_number_with(0.128, 2), "0.13");
        assert_eq!(format_number_with(1000000.0, 0), "1,000,000");
    }

    #[test]
    fn test_format_number_negative_rounding_to_zero_drops_sign() {
        assert_eq!(format_number_with(-0.04, 1), "0.0");
        assert_eq!(format_number_with(-1.5, 1), "-1.5");
    }
}
