//! Product Fixtures

use serde::Deserialize;

use crate::{
    fixtures::FixtureError,
    pricing::CURRENCY_SUFFIX,
    products::{Product, ProductId},
};

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product id, must be non-zero
    pub id: u64,

    /// Product name
    pub name: String,

    /// Product price (e.g., "8500 Kz")
    pub price: String,

    /// Category name
    pub category: String,

    /// Description
    #[serde(default)]
    pub description: String,

    /// Image URI
    #[serde(default)]
    pub image: String,

    /// "New" badge
    #[serde(default)]
    pub new: bool,

    /// Sold out flag
    #[serde(default)]
    pub sold_out: bool,
}

impl TryFrom<ProductFixture> for Product {
    type Error = FixtureError;

    fn try_from(fixture: ProductFixture) -> Result<Self, Self::Error> {
        if fixture.id == 0 {
            return Err(FixtureError::MissingId(fixture.name));
        }

        Ok(Product {
            id: ProductId::new(fixture.id),
            name: fixture.name,
            price: parse_price(&fixture.price)?,
            category: fixture.category,
            description: fixture.description,
            image: fixture.image,
            is_new: fixture.new,
            sold_out: fixture.sold_out,
        })
    }
}

/// Parse a price string (e.g., "8500 Kz") into whole kwanzas.
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT Kz" or the
/// amount is not a non-negative integer.
pub fn parse_price(s: &str) -> Result<u64, FixtureError> {
    let mut parts = s.split_whitespace();

    let (Some(amount), Some(currency), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT {CURRENCY_SUFFIX}', got: {s}"
        )));
    };

    if currency != CURRENCY_SUFFIX {
        return Err(FixtureError::UnknownCurrency(currency.to_string()));
    }

    amount
        .parse::<u64>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parses_whole_kwanzas() -> TestResult {
        assert_eq!(parse_price("8500 Kz")?, 8500);
        assert_eq!(parse_price("0 Kz")?, 0);

        Ok(())
    }

    #[test]
    fn rejects_other_currencies_and_fractions() {
        assert!(matches!(parse_price("10 EUR"), Err(FixtureError::UnknownCurrency(_))));
        assert!(matches!(parse_price("10.50 Kz"), Err(FixtureError::InvalidPrice(_))));
        assert!(matches!(parse_price("10"), Err(FixtureError::InvalidPrice(_))));
    }
}
