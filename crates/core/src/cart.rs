//! Cart

use serde::{Deserialize, Serialize};

use crate::{
    pricing::line_total,
    products::{Product, ProductId},
};

/// A product snapshot and how many of it the shopper wants.
///
/// The snapshot freezes the price at the moment the product was added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Product as it was when added
    #[serde(flatten)]
    pub product: Product,

    /// Quantity, always at least one
    pub quantity: u32,
}

impl CartItem {
    /// Id of the product in this line.
    pub fn id(&self) -> ProductId {
        self.product.id
    }

    /// Frozen unit price times quantity.
    pub fn line_total(&self) -> u64 {
        line_total(self.product.price, self.quantity)
    }
}

/// What [`Cart::add`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new line with quantity one was appended.
    Added,

    /// An existing line's quantity went up by one.
    Incremented,

    /// The product is sold out and the cart was left unchanged.
    SoldOut,
}

/// Shopping cart.
///
/// Holds at most one line per product id. Only the methods below mutate it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of `product`.
    pub fn add(&mut self, product: &Product) -> AddOutcome {
        if product.sold_out {
            return AddOutcome::SoldOut;
        }

        if let Some(item) = self.item_mut(product.id) {
            item.quantity = item.quantity.saturating_add(1);

            return AddOutcome::Incremented;
        }

        self.items.push(CartItem {
            product: product.clone(),
            quantity: 1,
        });

        AddOutcome::Added
    }

    /// Drop the line for `id`, if any.
    pub fn remove(&mut self, id: ProductId) {
        self.items.retain(|item| item.id() != id);
    }

    /// Shift the quantity for `id` by `delta`, never going below one.
    ///
    /// Returns `false` when the product is not in the cart.
    pub fn update_quantity(&mut self, id: ProductId, delta: i64) -> bool {
        let Some(item) = self.item_mut(id) else {
            return false;
        };

        let quantity = i64::from(item.quantity).saturating_add(delta).max(1);

        item.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);

        true
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of every line total.
    pub fn total(&self) -> u64 {
        self.items
            .iter()
            .fold(0, |total, item| total.saturating_add(item.line_total()))
    }

    /// Number of units across all lines, for the cart badge.
    pub fn count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Lines in the order they were first added.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Quantity held for `id`, zero when absent.
    pub fn quantity_of(&self, id: ProductId) -> u32 {
        self.items
            .iter()
            .find(|item| item.id() == id)
            .map_or(0, |item| item.quantity)
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn item_mut(&mut self, id: ProductId) -> Option<&mut CartItem> {
        self.items.iter_mut().find(|item| item.id() == id)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn product(id: u64, price: u64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Produto {id}"),
            price,
            category: "Roupas".to_string(),
            description: String::new(),
            image: String::new(),
            is_new: false,
            sold_out: false,
        }
    }

    #[test]
    fn repeated_adds_keep_one_line() {
        let mut cart = Cart::new();
        let shoe = product(1, 12_000);

        assert_eq!(cart.add(&shoe), AddOutcome::Added);

        for _ in 0..4 {
            assert_eq!(cart.add(&shoe), AddOutcome::Incremented);
        }

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.quantity_of(shoe.id), 5);
        assert_eq!(cart.total(), 60_000);
    }

    #[test]
    fn sold_out_products_are_not_added() {
        let mut cart = Cart::new();
        let mut cap = product(8, 4500);
        cap.sold_out = true;

        assert_eq!(cart.add(&cap), AddOutcome::SoldOut);
        assert!(cart.is_empty());
        assert_eq!(cart.total(), 0);
    }

    #[test]
    fn update_quantity_never_drops_below_one() {
        let mut cart = Cart::new();
        let bib = product(6, 3500);

        cart.add(&bib);

        assert!(cart.update_quantity(bib.id, -5));
        assert_eq!(cart.quantity_of(bib.id), 1);

        assert!(cart.update_quantity(bib.id, 3));
        assert_eq!(cart.quantity_of(bib.id), 4);
        assert_eq!(cart.total(), 14_000);
    }

    #[test]
    fn update_quantity_of_missing_product_is_a_no_op() {
        let mut cart = Cart::new();

        assert!(!cart.update_quantity(ProductId::new(99), 1));
        assert!(cart.is_empty());
    }

    #[test]
    fn price_is_frozen_when_added() {
        let mut cart = Cart::new();
        let mut dress = product(4, 10_500);

        cart.add(&dress);
        dress.price = 20_000;
        cart.add(&dress);

        assert_eq!(cart.total(), 21_000);
    }

    #[test]
    fn remove_and_clear() {
        let mut cart = Cart::new();
        let a = product(1, 1000);
        let b = product(2, 2000);

        cart.add(&a);
        cart.add(&b);
        cart.add(&b);

        assert_eq!(cart.count(), 3);

        cart.remove(a.id);
        cart.remove(a.id);

        assert_eq!(cart.count(), 2);
        assert_eq!(cart.total(), 4000);

        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.total(), 0);
    }

    #[test]
    fn cart_item_serializes_product_fields_inline() -> TestResult {
        let item = CartItem {
            product: product(3, 6000),
            quantity: 2,
        };

        let yaml = serde_norway::to_string(&item)?;

        assert!(yaml.contains("price: 6000"), "unexpected yaml: {yaml}");
        assert!(yaml.contains("quantity: 2"), "unexpected yaml: {yaml}");
        assert!(!yaml.contains("product:"), "product should be flattened: {yaml}");

        Ok(())
    }
}
