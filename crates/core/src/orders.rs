//! Orders

use std::{
    cmp::Reverse,
    fmt::{Display, Formatter, Result as FmtResult},
};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cart::{Cart, CartItem};

/// Prefix carried by every order reference.
pub const REFERENCE_PREFIX: &str = "MK";

const REFERENCE_SUFFIX_LEN: usize = 4;

/// `36^4`, the number of distinct four character suffixes.
const REFERENCE_SUFFIX_SPACE: u32 = 1_679_616;

/// Customer detail fields that must be filled in before checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerField {
    /// Full name
    Name,

    /// Phone number
    Phone,

    /// Delivery address
    Address,
}

impl Display for CustomerField {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(match self {
            Self::Name => "name",
            Self::Phone => "phone",
            Self::Address => "address",
        })
    }
}

/// Errors raised while building an order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    /// A required customer field is blank.
    #[error("customer {0} is required")]
    MissingField(CustomerField),

    /// Orders need at least one cart line.
    #[error("cart is empty")]
    EmptyCart,
}

/// Order lifecycle state. Checkout only ever creates pending orders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Awaiting payment and delivery
    #[default]
    Pending,

    /// Paid and delivered
    Completed,

    /// Abandoned or refused
    Cancelled,
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        })
    }
}

/// Human-facing order reference, e.g. `MK-M1ABCDEF-7Q2Z`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderReference(String);

impl OrderReference {
    /// Build a reference from the creation time and caller-supplied entropy.
    ///
    /// The millisecond timestamp keeps references ordered and the random
    /// suffix separates orders placed in the same millisecond.
    pub fn generate(created_at: Timestamp, entropy: u32) -> Self {
        let millis = u64::try_from(created_at.as_millisecond()).unwrap_or_default();

        let mut suffix = base36(u64::from(entropy % REFERENCE_SUFFIX_SPACE));

        while suffix.len() < REFERENCE_SUFFIX_LEN {
            suffix.insert(0, '0');
        }

        Self(format!("{REFERENCE_PREFIX}-{}-{suffix}", base36(millis)))
    }

    /// Reference text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for OrderReference {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

impl From<String> for OrderReference {
    fn from(value: String) -> Self {
        Self(value)
    }
}

fn base36(mut value: u64) -> String {
    let mut digits = Vec::new();

    loop {
        let digit = u32::try_from(value % 36)
            .ok()
            .and_then(|digit| char::from_digit(digit, 36))
            .unwrap_or('0');

        digits.push(digit.to_ascii_uppercase());
        value /= 36;

        if value == 0 {
            break;
        }
    }

    digits.iter().rev().collect()
}

/// Who the order is for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDetails {
    /// Full name
    pub name: String,

    /// Phone number, free form
    pub phone: String,

    /// Delivery address
    pub address: String,
}

impl CustomerDetails {
    /// Check every field is filled in.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::MissingField`] naming the first blank field.
    pub fn validate(&self) -> Result<(), OrderError> {
        [
            (CustomerField::Name, &self.name),
            (CustomerField::Phone, &self.phone),
            (CustomerField::Address, &self.address),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map_or(Ok(()), |(field, _)| Err(OrderError::MissingField(field)))
    }
}

/// A placed order. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Order reference
    #[serde(rename = "id")]
    pub reference: OrderReference,

    /// Creation time
    #[serde(rename = "date")]
    pub created_at: Timestamp,

    /// Customer details
    pub customer: CustomerDetails,

    /// Cart lines at checkout, prices frozen
    pub items: Vec<CartItem>,

    /// Sum of line totals
    pub total: u64,

    /// Lifecycle state
    #[serde(default)]
    pub status: OrderStatus,
}

impl Order {
    /// Build a pending order from the current cart.
    ///
    /// # Errors
    ///
    /// Returns an [`OrderError`] when the customer details are incomplete or
    /// the cart is empty.
    pub fn from_cart(
        reference: OrderReference,
        created_at: Timestamp,
        customer: CustomerDetails,
        cart: &Cart,
    ) -> Result<Self, OrderError> {
        if cart.is_empty() {
            return Err(OrderError::EmptyCart);
        }

        customer.validate()?;

        Ok(Self {
            reference,
            created_at,
            customer,
            items: cart.items().to_vec(),
            total: cart.total(),
            status: OrderStatus::Pending,
        })
    }
}

/// Sort orders so the most recent comes first.
pub fn sort_newest_first(orders: &mut [Order]) {
    orders.sort_by_key(|order| Reverse(order.created_at));
}
