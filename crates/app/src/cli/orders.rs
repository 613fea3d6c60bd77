use clap::{Args, Subcommand};
use storefront::pricing::format_kwanza;
use storefront_app::context::AppContext;

use crate::cli::{AdminArgs, login, report, table};

#[derive(Debug, Args)]
pub(crate) struct OrdersCommand {
    #[command(subcommand)]
    command: OrdersSubcommand,
}

#[derive(Debug, Subcommand)]
enum OrdersSubcommand {
    /// List orders, newest first
    List(ListOrdersArgs),
}

#[derive(Debug, Args)]
struct ListOrdersArgs {
    #[command(flatten)]
    admin: AdminArgs,
}

pub(crate) async fn run(context: &AppContext, command: OrdersCommand) -> Result<(), String> {
    match command.command {
        OrdersSubcommand::List(args) => list(context, args).await,
    }
}

async fn list(context: &AppContext, args: ListOrdersArgs) -> Result<(), String> {
    login(context, &args.admin)?;

    let orders = context
        .gateway
        .list_orders()
        .await
        .map_err(|error| format!("failed to list orders: {}", report(&error)))?;

    if orders.is_empty() {
        println!("no orders yet");
        return Ok(());
    }

    let rows = orders
        .iter()
        .map(|order| {
            [
                order.reference.to_string(),
                order.created_at.to_string(),
                order.customer.name.clone(),
                order.customer.phone.clone(),
                order.items.iter().map(|item| u64::from(item.quantity)).sum::<u64>().to_string(),
                format_kwanza(order.total),
                order.status.to_string(),
            ]
        })
        .collect();

    println!(
        "{}",
        table::render(
            ["Reference", "Date", "Customer", "Phone", "Items", "Total", "Status"],
            rows,
            &[4, 5]
        )
    );

    Ok(())
}
