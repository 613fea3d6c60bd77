//! Filter

use crate::{categories::ALL_CATEGORY, products::Product};

/// Category and free-text query selected by the shopper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogFilter {
    /// Exact category to keep, or [`ALL_CATEGORY`] to keep every category
    pub category: String,

    /// Case-insensitive text searched in names and descriptions
    pub query: String,
}

impl Default for CatalogFilter {
    fn default() -> Self {
        Self {
            category: ALL_CATEGORY.to_string(),
            query: String::new(),
        }
    }
}

impl CatalogFilter {
    /// Filter on `category` and `query`.
    pub fn new(category: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            query: query.into(),
        }
    }

    /// Products passing both predicates, in catalog order.
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        filter_products(products, &self.category, &self.query)
    }
}

/// Keep products in `category` (unless it is [`ALL_CATEGORY`]) whose name or
/// description contains `query`, ignoring case. A blank query keeps everything.
pub fn filter_products<'a>(
    products: &'a [Product],
    category: &str,
    query: &str,
) -> Vec<&'a Product> {
    let any_category = category == ALL_CATEGORY;
    let needle = query.trim().to_lowercase();

    products
        .iter()
        .filter(|product| any_category || product.category == category)
        .filter(|product| needle.is_empty() || product.matches_lowercase(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::products::ProductId;

    use super::*;

    fn product(id: u64, name: &str, category: &str, description: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            price: 1000,
            category: category.to_string(),
            description: description.to_string(),
            image: String::new(),
            is_new: false,
            sold_out: false,
        }
    }

    fn catalog() -> Vec<Product> {
        vec![
            product(1, "Conjunto Verão Colorido", "Roupas", "Algodão leve"),
            product(2, "Tênis Infantil Conforto", "Calçados", "Sola antiderrapante"),
            product(3, "Vestido Floral Encanto", "Roupas", "Perfeito para festas"),
            product(4, "Bota de Chuva Colorida", "Calçados", "Impermeável"),
        ]
    }

    fn ids(products: &[&Product]) -> Vec<u64> {
        products.iter().map(|product| product.id.get()).collect()
    }

    #[test]
    fn all_category_and_empty_query_keep_everything_in_order() {
        let products = catalog();

        let visible = filter_products(&products, ALL_CATEGORY, "");

        assert_eq!(ids(&visible), [1, 2, 3, 4]);
    }

    #[test]
    fn category_is_an_exact_match() {
        let products = catalog();

        assert_eq!(ids(&filter_products(&products, "Calçados", "")), [2, 4]);
        assert!(filter_products(&products, "calçados", "").is_empty());
    }

    #[test]
    fn query_matches_name_or_description_ignoring_case() {
        let products = catalog();

        assert_eq!(ids(&filter_products(&products, ALL_CATEGORY, "COLORID")), [1, 4]);
        assert_eq!(ids(&filter_products(&products, ALL_CATEGORY, "festas")), [3]);
    }

    #[test]
    fn category_and_query_combine() {
        let products = catalog();

        let visible = CatalogFilter::new("Calçados", "colorida").apply(&products);

        assert_eq!(ids(&visible), [4]);
    }

    #[test]
    fn unmatched_query_yields_nothing() {
        let products = catalog();

        assert!(filter_products(&products, ALL_CATEGORY, "dinossauro").is_empty());
    }
}
