use chrono::NaiveDate;
use clap::Subcommand;

use super::ListArgs;
use crate::validation::parse_bool;
use crate::validation::parse_code_count;
use crate::validation::parse_date;
use crate::validation::parse_resource_id;

#[derive(Debug, Subcommand)]
pub enum OfferCodesCommand {
    /// List offer codes of a subscription
    List {
        /// Subscription ID
        #[arg(long, value_parser = parse_resource_id)]
        subscription: String,

        #[command(flatten)]
        list: ListArgs,
    },

    /// Show one offer code
    Get {
        #[arg(long, value_parser = parse_resource_id)]
        id: String,
    },

    /// Activate or deactivate an offer code
    Update {
        #[arg(long, value_parser = parse_resource_id)]
        id: String,

        /// true or false
        #[arg(long, value_parser = parse_bool)]
        active: bool,
    },

    /// One-time use codes
    #[command(subcommand)]
    OneTime(OneTimeCodesCommand),

    /// Custom codes
    #[command(subcommand)]
    Custom(CustomCodesCommand),
}

#[derive(Debug, Subcommand)]
pub enum OneTimeCodesCommand {
    /// List batches of one-time use codes
    List {
        /// Offer code ID
        #[arg(long, value_parser = parse_resource_id)]
        id: String,

        #[command(flatten)]
        list: ListArgs,
    },

    /// Generate a batch of one-time use codes
    #[command(long_about = r#"Generate a batch of one-time use codes.

The batch is produced asynchronously by App Store Connect; list the batches
to see when the codes are ready.

EXAMPLES:
    asc offer-codes one-time generate --id OFFER_ID --count 1000 --expiration-date 2026-12-31"#)]
    Generate {
        /// Offer code ID
        #[arg(long, value_parser = parse_resource_id)]
        id: String,

        /// Number of codes (1-10000)
        #[arg(long, value_parser = parse_code_count)]
        count: u32,

        /// Last day the codes can be redeemed (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        expiration_date: NaiveDate,
    },
}

#[derive(Debug, Subcommand)]
pub enum CustomCodesCommand {
    /// List custom codes
    List {
        /// Offer code ID
        #[arg(long, value_parser = parse_resource_id)]
        id: String,

        #[command(flatten)]
        list: ListArgs,
    },
}
