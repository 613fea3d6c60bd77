//! Storefront CLI

use std::process;

use clap::Parser;
use storefront_app::{config::load_dotenv, logging::init_subscriber};

mod cli;

#[tokio::main]
pub async fn main() {
    load_dotenv();

    let cli = cli::Cli::parse();

    if let Err(error) = init_subscriber(cli.logging()) {
        eprintln!("failed to initialise logging: {error}");
    }

    if let Err(error) = cli.run().await {
        eprintln!("{error}");
        process::exit(1);
    }
}
