use clap::Subcommand;

use super::ListArgs;
use crate::validation::parse_https_url;
use crate::validation::parse_non_empty;
use crate::validation::parse_resource_id;

#[derive(Debug, Subcommand)]
pub enum MarketplaceCommand {
    /// Webhooks notified about alternative marketplace events
    #[command(subcommand)]
    Webhooks(WebhooksCommand),

    /// Catalog URL used by alternative marketplace search
    #[command(subcommand)]
    SearchDetails(SearchDetailsCommand),
}

#[derive(Debug, Subcommand)]
pub enum WebhooksCommand {
    /// List webhooks
    List {
        #[command(flatten)]
        list: ListArgs,
    },

    /// Register a webhook
    Create {
        /// Endpoint (https only)
        #[arg(long, value_parser = parse_https_url)]
        url: String,

        /// Shared secret used to sign deliveries
        #[arg(long, value_parser = parse_non_empty)]
        secret: String,
    },

    /// Change a webhook's endpoint or secret
    Update {
        #[arg(long, value_parser = parse_resource_id)]
        id: String,

        #[arg(long, value_parser = parse_https_url)]
        url: Option<String>,

        #[arg(long, value_parser = parse_non_empty)]
        secret: Option<String>,
    },

    /// Delete a webhook
    Delete {
        #[arg(long, value_parser = parse_resource_id)]
        id: String,

        /// Confirm the operation
        #[arg(long)]
        confirm: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum SearchDetailsCommand {
    /// Show the search details of an app
    Get {
        /// App ID
        #[arg(long, value_parser = parse_resource_id)]
        app: String,
    },

    /// Set the catalog URL of an app
    Create {
        /// App ID
        #[arg(long, value_parser = parse_resource_id)]
        app: String,

        /// Catalog URL (https only)
        #[arg(long, value_parser = parse_https_url)]
        catalog_url: String,
    },

    /// Change the catalog URL
    Update {
        /// Search detail ID
        #[arg(long, value_parser = parse_resource_id)]
        id: String,

        #[arg(long, value_parser = parse_https_url)]
        catalog_url: String,
    },

    /// Remove the search details
    Delete {
        /// Search detail ID
        #[arg(long, value_parser = parse_resource_id)]
        id: String,

        /// Confirm the operation
        #[arg(long)]
        confirm: bool,
    },
}
