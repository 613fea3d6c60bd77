//! Pricing
//!
//! Prices are whole kwanzas (the smallest unit the store trades in).

/// Currency suffix shown after every amount.
pub const CURRENCY_SUFFIX: &str = "Kz";

/// Line total for `quantity` units at `unit_price`, saturating on overflow.
pub fn line_total(unit_price: u64, quantity: u32) -> u64 {
    unit_price.saturating_mul(u64::from(quantity))
}

/// Format an amount the way the storefront displays it, e.g. `8 500 Kz`.
///
/// Thousands are grouped with a single space.
pub fn format_kwanza(amount: u64) -> String {
    let digits = amount.to_string();
    let len = digits.len();

    let mut formatted = String::with_capacity(len + len / 3 + CURRENCY_SUFFIX.len() + 1);

    for (position, digit) in digits.chars().enumerate() {
        if position > 0 && (len - position) % 3 == 0 {
            formatted.push(' ');
        }

        formatted.push(digit);
    }

    formatted.push(' ');
    formatted.push_str(CURRENCY_SUFFIX);

    formatted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_kwanza(8500), "8 500 Kz");
        assert_eq!(format_kwanza(12_000), "12 000 Kz");
        assert_eq!(format_kwanza(1_234_567), "1 234 567 Kz");
    }

    #[test]
    fn small_amounts_are_not_grouped() {
        assert_eq!(format_kwanza(0), "0 Kz");
        assert_eq!(format_kwanza(999), "999 Kz");
    }

    #[test]
    fn line_total_saturates() {
        assert_eq!(line_total(12_000, 2), 24_000);
        assert_eq!(line_total(u64::MAX, 2), u64::MAX);
    }
}
