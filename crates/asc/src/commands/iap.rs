use clap::Subcommand;

use super::ListArgs;
use crate::validation::InAppPurchaseType;
use crate::validation::parse_bool;
use crate::validation::parse_non_empty;
use crate::validation::parse_resource_id;

#[derive(Debug, Subcommand)]
pub enum IapCommand {
    /// List in-app purchases of an app
    List {
        /// App ID
        #[arg(long, value_parser = parse_resource_id)]
        app: String,

        /// CONSUMABLE, NON_CONSUMABLE or NON_RENEWING_SUBSCRIPTION
        #[arg(long = "type", value_parser = InAppPurchaseType::parse)]
        iap_type: Option<InAppPurchaseType>,

        #[command(flatten)]
        list: ListArgs,
    },

    /// Show one in-app purchase
    Get {
        #[arg(long, value_parser = parse_resource_id)]
        id: String,
    },

    /// Create an in-app purchase
    #[command(long_about = r#"Create an in-app purchase.

EXAMPLES:
    asc iap create --app 123 --type consumable --ref-name "100 Coins" --product-id com.example.coins100
    asc iap create --app 123 --type non-consumable --ref-name "Pro" --product-id com.example.pro --family-sharable"#)]
    Create {
        /// App ID
        #[arg(long, value_parser = parse_resource_id)]
        app: String,

        #[arg(long = "type", value_parser = InAppPurchaseType::parse)]
        iap_type: InAppPurchaseType,

        /// Reference name (only visible in App Store Connect)
        #[arg(long, value_parser = parse_non_empty)]
        ref_name: String,

        /// Product ID used by StoreKit
        #[arg(long, value_parser = parse_non_empty)]
        product_id: String,

        /// Allow Family Sharing
        #[arg(long)]
        family_sharable: bool,

        /// Note for App Review
        #[arg(long)]
        review_note: Option<String>,
    },

    /// Update an in-app purchase
    Update {
        #[arg(long, value_parser = parse_resource_id)]
        id: String,

        #[arg(long, value_parser = parse_non_empty)]
        ref_name: Option<String>,

        #[arg(long, value_parser = parse_bool, num_args = 0..=1, default_missing_value = "true")]
        family_sharable: Option<bool>,

        #[arg(long)]
        review_note: Option<String>,
    },

    /// Delete an in-app purchase
    Delete {
        #[arg(long, value_parser = parse_resource_id)]
        id: String,

        /// Confirm the operation
        #[arg(long)]
        confirm: bool,
    },

    /// Display names and descriptions per locale
    #[command(subcommand)]
    Localizations(IapLocalizationsCommand),
}

#[derive(Debug, Subcommand)]
pub enum IapLocalizationsCommand {
    /// List localizations of an in-app purchase
    List {
        /// In-app purchase ID
        #[arg(long, value_parser = parse_resource_id)]
        id: String,

        #[command(flatten)]
        list: ListArgs,
    },

    /// Add a localization
    Create {
        /// In-app purchase ID
        #[arg(long, value_parser = parse_resource_id)]
        id: String,

        /// Locale, e.g. en-US
        #[arg(long, value_parser = parse_non_empty)]
        locale: String,

        /// Display name
        #[arg(long, value_parser = parse_non_empty)]
        name: String,

        #[arg(long)]
        description: Option<String>,
    },
}
