use clap::Subcommand;

use super::ListArgs;
use crate::validation::parse_resource_id;

#[derive(Debug, Subcommand)]
pub enum AppsCommand {
    /// List apps
    List {
        /// Filter by bundle ID (e.g. com.example.app)
        #[arg(long)]
        bundle_id: Option<String>,

        /// Filter by app name
        #[arg(long)]
        name: Option<String>,

        /// Filter by SKU
        #[arg(long)]
        sku: Option<String>,

        #[command(flatten)]
        list: ListArgs,
    },

    /// Show one app
    Get {
        /// App ID (the numeric Apple ID)
        #[arg(long, value_parser = parse_resource_id)]
        id: String,
    },
}
