//! Local Store Config

use std::path::PathBuf;

use clap::Args;

/// Local persistence and image storage settings.
#[derive(Debug, Args)]
pub struct LocalStoreConfig {
    /// Directory holding the local JSON collections
    #[arg(long, env = "LOCAL_DATA_DIR", default_value = "./data")]
    pub local_data_dir: PathBuf,

    /// Blob store base URL for product images; images are inlined when unset
    #[arg(long, env = "BLOB_STORE_URL")]
    pub blob_store_url: Option<String>,
}
