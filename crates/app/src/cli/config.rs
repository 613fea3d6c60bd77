use clap::{Args, Subcommand};
use storefront_app::{catalog::ConfigForm, context::AppContext};

use crate::cli::{AdminArgs, ensure_catalog, login, report};

#[derive(Debug, Args)]
pub(crate) struct ConfigCommand {
    #[command(subcommand)]
    command: ConfigSubcommand,
}

#[derive(Debug, Subcommand)]
enum ConfigSubcommand {
    /// Show store settings
    Show,

    /// Change store settings; omitted fields keep their value
    Set(SetConfigArgs),
}

#[derive(Debug, Args)]
struct SetConfigArgs {
    #[command(flatten)]
    admin: AdminArgs,

    /// Store display name
    #[arg(long)]
    store_name: Option<String>,

    /// Logo URI
    #[arg(long)]
    logo_url: Option<String>,

    /// Messaging contact, e.g. "+244 932 853 435"
    #[arg(long)]
    whatsapp: Option<String>,
}

pub(crate) async fn run(context: &AppContext, command: ConfigCommand) -> Result<(), String> {
    ensure_catalog(context).await?;

    let config = match command.command {
        ConfigSubcommand::Show => context.catalog.config().await,
        ConfigSubcommand::Set(args) => {
            let session = login(context, &args.admin)?;

            context
                .catalog
                .save_config(
                    &session,
                    ConfigForm {
                        store_name: args.store_name,
                        logo_url: args.logo_url,
                        whatsapp_number: args.whatsapp,
                    },
                )
                .await
                .map_err(|error| format!("failed to save settings: {}", report(&error)))?
        }
    };

    println!("store_name: {}", config.store_name);
    println!("logo_url: {}", config.logo_url);
    println!("whatsapp_number: {}", config.whatsapp_number);

    Ok(())
}
