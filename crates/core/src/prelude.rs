//! Storefront prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{AddOutcome, Cart, CartItem},
    categories::{ALL_CATEGORY, CategoryError, CategorySet, UNCATEGORIZED},
    filter::{CatalogFilter, filter_products},
    fixtures::{Catalog, FixtureError},
    handoff::compose_order_message,
    orders::{
        CustomerDetails, CustomerField, Order, OrderError, OrderReference, OrderStatus,
        sort_newest_first,
    },
    pricing::{format_kwanza, line_total},
    products::{Product, ProductError, ProductId, max_id},
    store::{StoreConfig, StoreConfigError, normalize_contact},
};
