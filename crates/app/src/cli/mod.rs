use std::{error::Error, sync::Arc};

use clap::{Args, Parser, Subcommand};
use storefront_app::{
    admin::AdminSession,
    checkout::PrintHandoff,
    config::{AppConfig, logging::LoggingConfig},
    context::AppContext,
};

mod ask;
mod categories;
mod checkout;
mod config;
mod orders;
mod products;
mod reset;
mod table;
mod upload;

#[derive(Debug, Parser)]
#[command(name = "storefront-app", about = "Storefront CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    config: AppConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Browse and edit products
    Products(products::ProductsCommand),

    /// List and edit categories
    Categories(categories::CategoriesCommand),

    /// List placed orders
    Orders(orders::OrdersCommand),

    /// Show and edit store settings
    Config(config::ConfigCommand),

    /// Place an order and print the messaging link
    Checkout(checkout::CheckoutArgs),

    /// Ask the shopping assistant
    Ask(ask::AskArgs),

    /// Upload a product image
    Upload(upload::UploadArgs),

    /// Restore the default catalog and store settings
    Reset(reset::ResetArgs),
}

/// Password flag shared by every admin command.
#[derive(Debug, Args)]
pub(crate) struct AdminArgs {
    /// Admin password
    #[arg(long)]
    password: String,
}

impl Cli {
    pub(crate) fn logging(&self) -> &LoggingConfig {
        &self.config.logging
    }

    pub(crate) async fn run(self) -> Result<(), String> {
        let context = AppContext::from_config(&self.config, Arc::new(PrintHandoff))
            .await
            .map_err(|error| format!("failed to start: {}", report(&error)))?;

        match self.command {
            Commands::Products(command) => products::run(&context, command).await,
            Commands::Categories(command) => categories::run(&context, command).await,
            Commands::Orders(command) => orders::run(&context, command).await,
            Commands::Config(command) => config::run(&context, command).await,
            Commands::Checkout(args) => checkout::run(&context, args).await,
            Commands::Ask(args) => ask::run(&context, args).await,
            Commands::Upload(args) => upload::run(&context, args).await,
            Commands::Reset(args) => reset::run(&context, args).await,
        }
    }
}

pub(crate) fn login(context: &AppContext, args: &AdminArgs) -> Result<AdminSession, String> {
    context
        .admin
        .login(&args.password)
        .map_err(|error| format!("admin login failed: {error}"))
}

/// Load the catalog if startup could not, so commands see fresh data.
pub(crate) async fn ensure_catalog(context: &AppContext) -> Result<(), String> {
    if context.catalog.is_loaded().await {
        return Ok(());
    }

    context
        .catalog
        .load()
        .await
        .map_err(|error| format!("catalog unavailable: {}", report(&error)))
}

/// Error message followed by its sources.
pub(crate) fn report(error: &dyn Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();

    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }

    message
}
