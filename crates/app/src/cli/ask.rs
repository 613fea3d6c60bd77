use clap::Args;
use storefront_app::{advice::ChatSession, context::AppContext};

use crate::cli::ensure_catalog;

#[derive(Debug, Args)]
pub(crate) struct AskArgs {
    /// Question for the assistant
    #[arg(required = true, num_args = 1..)]
    message: Vec<String>,
}

pub(crate) async fn run(context: &AppContext, args: AskArgs) -> Result<(), String> {
    ensure_catalog(context).await?;

    let snapshot = context.catalog.snapshot().await;
    let mut session = ChatSession::new();

    let reply = session
        .ask(
            context.advice.as_ref(),
            &snapshot.config.store_name,
            &snapshot.products,
            &args.message.join(" "),
        )
        .await
        .ok_or("question is empty")?;

    println!("{reply}");

    Ok(())
}
