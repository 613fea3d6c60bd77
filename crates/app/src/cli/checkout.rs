use std::str::FromStr;

use clap::Args;
use storefront::{
    cart::{AddOutcome, Cart},
    orders::CustomerDetails,
    pricing::format_kwanza,
    products::ProductId,
};
use storefront_app::{checkout::CheckoutError, context::AppContext};

use crate::cli::{ensure_catalog, report};

#[derive(Debug, Args)]
pub(crate) struct CheckoutArgs {
    /// Item to buy as ID or ID:QUANTITY; repeat for more items
    #[arg(long = "item", required = true)]
    items: Vec<ItemArg>,

    /// Customer name
    #[arg(long)]
    name: String,

    /// Customer phone
    #[arg(long)]
    phone: String,

    /// Delivery address
    #[arg(long)]
    address: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ItemArg {
    id: ProductId,
    quantity: u32,
}

impl FromStr for ItemArg {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (id, quantity) = value.split_once(':').unwrap_or((value, "1"));

        let id = id
            .trim()
            .parse::<u64>()
            .map_err(|error| format!("invalid product id {id:?}: {error}"))?;
        let quantity = quantity
            .trim()
            .parse::<u32>()
            .map_err(|error| format!("invalid quantity {quantity:?}: {error}"))?;

        if quantity == 0 {
            return Err("quantity must be at least 1".to_string());
        }

        Ok(Self {
            id: ProductId::new(id),
            quantity,
        })
    }
}

pub(crate) async fn run(context: &AppContext, args: CheckoutArgs) -> Result<(), String> {
    ensure_catalog(context).await?;

    let mut cart = Cart::new();

    for item in &args.items {
        let product = context
            .catalog
            .product(item.id)
            .await
            .ok_or_else(|| format!("product {} not found", item.id))?;

        for _ in 0..item.quantity {
            if cart.add(&product) == AddOutcome::SoldOut {
                println!("skipping sold out product: {}", product.name);
                break;
            }
        }
    }

    let config = context.catalog.config().await;

    let receipt = context
        .checkout
        .checkout(
            &mut cart,
            CustomerDetails {
                name: args.name,
                phone: args.phone,
                address: args.address,
            },
            &config,
        )
        .await
        .map_err(|error| checkout_failure(&error))?;

    println!("order_reference: {}", receipt.reference);
    println!("order_total: {}", format_kwanza(receipt.total));

    Ok(())
}

/// A saved order whose handoff failed still reports its reference so it can
/// be resent instead of placed twice.
fn checkout_failure(error: &CheckoutError) -> String {
    match error {
        CheckoutError::HandoffFailed { reference, .. } => {
            println!("order_reference: {reference}");

            format!(
                "order {reference} is saved; resend it instead of checking out again: {}",
                report(error)
            )
        }
        _ => format!("checkout failed: {}", report(error)),
    }
}
