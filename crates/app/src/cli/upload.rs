use std::path::PathBuf;

use clap::Args;
use storefront_app::{context::AppContext, gateway::blob::ImageUpload};

use crate::cli::{AdminArgs, login, report};

#[derive(Debug, Args)]
pub(crate) struct UploadArgs {
    #[command(flatten)]
    admin: AdminArgs,

    /// Image file to upload
    file: PathBuf,

    /// MIME type; guessed from the file extension when omitted
    #[arg(long)]
    content_type: Option<String>,
}

pub(crate) async fn run(context: &AppContext, args: UploadArgs) -> Result<(), String> {
    let session = login(context, &args.admin)?;

    let bytes = tokio::fs::read(&args.file)
        .await
        .map_err(|error| format!("failed to read {}: {error}", args.file.display()))?;

    let file_name = args
        .file
        .file_name()
        .map_or_else(|| "image".to_string(), |name| name.to_string_lossy().into_owned());

    let content_type = args
        .content_type
        .unwrap_or_else(|| content_type_for(&file_name).to_string());

    let uri = context
        .catalog
        .upload_image(
            &session,
            ImageUpload {
                file_name,
                content_type,
                bytes,
            },
        )
        .await
        .map_err(|error| format!("failed to upload image: {}", report(&error)))?;

    println!("{uri}");

    Ok(())
}

fn content_type_for(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, extension)| extension.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}
