use clap::Args;
use clap::Subcommand;

use super::ListArgs;
use crate::validation::EventBadge;
use crate::validation::EventPriority;
use crate::validation::EventPurpose;
use crate::validation::PurchaseRequirement;
use crate::validation::parse_deep_link;
use crate::validation::parse_non_empty;
use crate::validation::parse_resource_id;

#[derive(Debug, Subcommand)]
pub enum AppEventsCommand {
    /// List in-app events of an app
    List {
        /// App ID
        #[arg(long, value_parser = parse_resource_id)]
        app: String,

        #[command(flatten)]
        list: ListArgs,
    },

    /// Show one in-app event
    Get {
        #[arg(long, value_parser = parse_resource_id)]
        id: String,
    },

    /// Create an in-app event
    #[command(long_about = r#"Create an in-app event.

BADGES:
    LIVE_EVENT, PREMIERE, CHALLENGE, COMPETITION, NEW_SEASON, MAJOR_UPDATE,
    SPECIAL_EVENT

EXAMPLES:
    asc app-events create --app 123 --reference-name "Summer Cup" --badge competition
    asc app-events create --app 123 --reference-name "S2" --badge new-season --priority high --deep-link myapp://season/2"#)]
    Create {
        /// App ID
        #[arg(long, value_parser = parse_resource_id)]
        app: String,

        /// Reference name (only visible in App Store Connect)
        #[arg(long, value_parser = parse_non_empty)]
        reference_name: String,

        #[arg(long, value_parser = EventBadge::parse)]
        badge: EventBadge,

        #[command(flatten)]
        fields: EventFields,
    },

    /// Update an in-app event
    Update {
        #[arg(long, value_parser = parse_resource_id)]
        id: String,

        #[arg(long, value_parser = parse_non_empty)]
        reference_name: Option<String>,

        #[arg(long, value_parser = EventBadge::parse)]
        badge: Option<EventBadge>,

        #[command(flatten)]
        fields: EventFields,
    },

    /// Delete an in-app event
    Delete {
        #[arg(long, value_parser = parse_resource_id)]
        id: String,

        /// Confirm the operation
        #[arg(long)]
        confirm: bool,
    },

    /// Event names and descriptions per locale
    #[command(subcommand)]
    Localizations(AppEventLocalizationsCommand),
}

/// Optional event attributes shared by create and update.
#[derive(Debug, Clone, Default, Args)]
pub struct EventFields {
    /// URL opened when the event card is tapped
    #[arg(long, value_parser = parse_deep_link)]
    pub deep_link: Option<String>,

    /// NO_COST_ASSOCIATED, IN_APP_PURCHASE, SUBSCRIPTION, ...
    #[arg(long, value_parser = PurchaseRequirement::parse)]
    pub purchase_requirement: Option<PurchaseRequirement>,

    /// HIGH or NORMAL
    #[arg(long, value_parser = EventPriority::parse)]
    pub priority: Option<EventPriority>,

    /// Audience the event targets
    #[arg(long, value_parser = EventPurpose::parse)]
    pub purpose: Option<EventPurpose>,
}

#[derive(Debug, Subcommand)]
pub enum AppEventLocalizationsCommand {
    /// List localizations of an event
    List {
        /// Event ID
        #[arg(long, value_parser = parse_resource_id)]
        id: String,

        #[command(flatten)]
        list: ListArgs,
    },
}
