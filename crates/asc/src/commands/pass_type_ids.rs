use clap::Subcommand;

use super::ListArgs;
use crate::validation::parse_non_empty;
use crate::validation::parse_resource_id;
use crate::validation::parse_pass_type_identifier;

#[derive(Debug, Subcommand)]
pub enum PassTypeIdsCommand {
    /// List pass type IDs
    List {
        /// Filter by identifier (pass.com.example.name)
        #[arg(long)]
        identifier: Option<String>,

        /// Filter by description
        #[arg(long)]
        name: Option<String>,

        #[command(flatten)]
        list: ListArgs,
    },

    /// Show one pass type ID
    Get {
        #[arg(long, value_parser = parse_resource_id)]
        id: String,
    },

    /// Register a pass type ID
    Create {
        /// Identifier, e.g. pass.com.example.loyalty
        #[arg(long, value_parser = parse_pass_type_identifier)]
        identifier: String,

        /// Description
        #[arg(long, value_parser = parse_non_empty)]
        name: String,
    },

    /// Rename a pass type ID
    Update {
        #[arg(long, value_parser = parse_resource_id)]
        id: String,

        #[arg(long, value_parser = parse_non_empty)]
        name: String,
    },

    /// Delete a pass type ID
    Delete {
        #[arg(long, value_parser = parse_resource_id)]
        id: String,

        /// Confirm the operation
        #[arg(long)]
        confirm: bool,
    },

    /// List signing certificates of a pass type ID
    Certificates {
        #[arg(long, value_parser = parse_resource_id)]
        id: String,

        #[command(flatten)]
        list: ListArgs,
    },
}
