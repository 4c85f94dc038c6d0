//! Price representation and rendering.

use std::str::FromStr;

use rust_decimal::Decimal;

use super::error::AlertError;

/// Price represented as a Decimal for precision.
pub type Price = Decimal;

/// Parse a user-typed price, tolerating thousands separators.
///
/// # Errors
///
/// Returns [`AlertError::InvalidPrice`] if the text is not a number or the
/// number is not strictly positive.
pub fn parse_price(input: &str) -> Result<Price, AlertError> {
    let cleaned: String = input.trim().chars().filter(|c| *c != ',').collect();
    let price = Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .map_err(|_| AlertError::InvalidPrice(input.trim().to_string()))?;
    if price <= Decimal::ZERO {
        return Err(AlertError::InvalidPrice(input.trim().to_string()));
    }
    Ok(price)
}

/// Render a price without trailing zeros, e.g. `96000` or `0.0421`.
#[must_use]
pub fn format_price(price: Price) -> String {
    price.normalize().to_string()
}

/// Render a price with thousands separators and two decimals, e.g. `96,000.00`.
#[must_use]
pub fn format_price_grouped(price: Price) -> String {
    let rounded = price.round_dp(2);
    let text = format!("{rounded:.2}");
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}{grouped}.{frac_part}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn parses_with_commas() {
        assert_eq!(parse_price("96,000").unwrap(), dec!(96000));
        assert_eq!(parse_price("0.0421").unwrap(), dec!(0.0421));
    }

    #[test]
    fn rejects_non_positive_and_garbage() {
        assert!(parse_price("0").is_err());
        assert!(parse_price("-5").is_err());
        assert!(parse_price("abc").is_err());
    }

    #[test]
    fn formats_without_trailing_zeros() {
        assert_eq!(format_price(dec!(96000.000)), "96000");
        assert_eq!(format_price(dec!(1.2500)), "1.25");
    }

    #[test]
    fn formats_grouped() {
        assert_eq!(format_price_grouped(dec!(96000)), "96,000.00");
        assert_eq!(format_price_grouped(dec!(1234567.891)), "1,234,567.89");
        assert_eq!(format_price_grouped(dec!(0.5)), "0.50");
    }
}
