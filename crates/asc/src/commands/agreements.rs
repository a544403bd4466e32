use clap::Subcommand;

use super::ListArgs;
use crate::validation::parse_non_empty;
use crate::validation::parse_resource_id;
use crate::validation::parse_territory;

#[derive(Debug, Subcommand)]
pub enum AgreementsCommand {
    /// Show the custom EULA of an app, or one EULA by ID
    Get {
        /// App ID
        #[arg(long, value_parser = parse_resource_id, conflicts_with = "id", required_unless_present = "id")]
        app: Option<String>,

        /// EULA ID
        #[arg(long, value_parser = parse_resource_id)]
        id: Option<String>,
    },

    /// Attach a custom EULA to an app
    #[command(long_about = r#"Attach a custom EULA to an app.

Territories are three-letter codes (USA, GBR, DEU, ...). The agreement
applies only in the listed territories; elsewhere Apple's standard EULA is
used.

EXAMPLES:
    asc agreements create --app 123 --text "$(cat EULA.txt)" --territory USA,CAN"#)]
    Create {
        /// App ID
        #[arg(long, value_parser = parse_resource_id)]
        app: String,

        /// Agreement text
        #[arg(long, value_parser = parse_non_empty)]
        text: String,

        /// Territory code (repeat or comma-separate)
        #[arg(long = "territory", required = true, value_delimiter = ',', value_parser = parse_territory)]
        territories: Vec<String>,
    },

    /// Change the text or territories of an EULA
    Update {
        /// EULA ID
        #[arg(long, value_parser = parse_resource_id)]
        id: String,

        #[arg(long, value_parser = parse_non_empty)]
        text: Option<String>,

        /// Replaces the territory list
        #[arg(long = "territory", value_delimiter = ',', value_parser = parse_territory)]
        territories: Vec<String>,
    },

    /// Remove a custom EULA
    Delete {
        /// EULA ID
        #[arg(long, value_parser = parse_resource_id)]
        id: String,

        /// Confirm the operation
        #[arg(long)]
        confirm: bool,
    },

    /// List territories an EULA applies to
    Territories {
        /// EULA ID
        #[arg(long, value_parser = parse_resource_id)]
        id: String,

        #[command(flatten)]
        list: ListArgs,
    },
}
