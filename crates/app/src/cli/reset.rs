use std::path::PathBuf;

use clap::Args;
use storefront::fixtures::Catalog;
use storefront_app::context::AppContext;

use crate::cli::{AdminArgs, login, report};

#[derive(Debug, Args)]
pub(crate) struct ResetArgs {
    #[command(flatten)]
    admin: AdminArgs,

    /// Catalog fixture to restore instead of the built-in one
    #[arg(long)]
    fixture: Option<PathBuf>,
}

pub(crate) async fn run(context: &AppContext, args: ResetArgs) -> Result<(), String> {
    login(context, &args.admin)?;

    let catalog = match &args.fixture {
        Some(path) => Catalog::load(path)
            .map_err(|error| format!("failed to load {}: {}", path.display(), report(&error)))?,
        None => context.defaults.as_ref().clone(),
    };

    context
        .gateway
        .reset_to_defaults(&catalog)
        .await
        .map_err(|error| format!("failed to reset catalog: {}", report(&error)))?;

    context
        .catalog
        .load()
        .await
        .map_err(|error| format!("catalog reset but reload failed: {}", report(&error)))?;

    println!("restored {} products", catalog.products.len());

    Ok(())
}
