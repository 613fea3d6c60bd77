use clap::{Args, Subcommand};
use storefront_app::context::AppContext;

use crate::cli::{AdminArgs, ensure_catalog, login, report};

#[derive(Debug, Args)]
pub(crate) struct CategoriesCommand {
    #[command(subcommand)]
    command: CategoriesSubcommand,
}

#[derive(Debug, Subcommand)]
enum CategoriesSubcommand {
    /// List categories as shown to shoppers
    List,

    /// Add a category
    Add(CategoryArgs),

    /// Remove a category, moving its products to "Outros"
    Remove(CategoryArgs),
}

#[derive(Debug, Args)]
struct CategoryArgs {
    #[command(flatten)]
    admin: AdminArgs,

    /// Category name
    name: String,
}

pub(crate) async fn run(context: &AppContext, command: CategoriesCommand) -> Result<(), String> {
    ensure_catalog(context).await?;

    match command.command {
        CategoriesSubcommand::List => {
            for category in context.catalog.display_categories().await {
                println!("{category}");
            }
        }
        CategoriesSubcommand::Add(args) => {
            let session = login(context, &args.admin)?;

            context
                .catalog
                .add_category(&session, &args.name)
                .await
                .map_err(|error| format!("failed to add category: {}", report(&error)))?;

            println!("added category {}", args.name.trim());
        }
        CategoriesSubcommand::Remove(args) => {
            let session = login(context, &args.admin)?;

            let moved = context
                .catalog
                .remove_category(&session, &args.name)
                .await
                .map_err(|error| format!("failed to remove category: {}", report(&error)))?;

            println!("removed category {}", args.name);
            println!("products moved: {moved}");
        }
    }

    Ok(())
}
