use clap::Subcommand;

use super::ListArgs;
use crate::validation::parse_bool;
use crate::validation::parse_email;
use crate::validation::parse_non_empty;
use crate::validation::parse_resource_id;

#[derive(Debug, Subcommand)]
pub enum TestflightCommand {
    /// Beta groups
    #[command(subcommand)]
    BetaGroups(BetaGroupsCommand),

    /// Beta testers
    #[command(subcommand)]
    BetaTesters(BetaTestersCommand),
}

#[derive(Debug, Subcommand)]
pub enum BetaGroupsCommand {
    /// List beta groups of an app
    List {
        /// App ID
        #[arg(long, value_parser = parse_resource_id)]
        app: String,

        /// Filter by group name
        #[arg(long)]
        name: Option<String>,

        #[command(flatten)]
        list: ListArgs,
    },

    /// Show one beta group
    Get {
        #[arg(long, value_parser = parse_resource_id)]
        id: String,
    },

    /// Create a beta group
    #[command(long_about = r#"Create a beta group.

Internal groups hold App Store Connect users and cannot have a public link.

EXAMPLES:
    asc testflight beta-groups create --app 123 --name "QA"
    asc testflight beta-groups create --app 123 --name "Public" --public-link-enabled --public-link-limit 500"#)]
    Create {
        /// App ID
        #[arg(long, value_parser = parse_resource_id)]
        app: String,

        /// Group name
        #[arg(long, value_parser = parse_non_empty)]
        name: String,

        /// Create an internal group
        #[arg(long)]
        internal: bool,

        /// Enable the public TestFlight link
        #[arg(long, value_parser = parse_bool, num_args = 0..=1, default_missing_value = "true")]
        public_link_enabled: Option<bool>,

        /// Maximum testers joining through the public link
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=10000))]
        public_link_limit: Option<u32>,

        /// Let testers send feedback
        #[arg(long, value_parser = parse_bool, num_args = 0..=1, default_missing_value = "true")]
        feedback_enabled: Option<bool>,
    },

    /// Update a beta group
    Update {
        #[arg(long, value_parser = parse_resource_id)]
        id: String,

        #[arg(long, value_parser = parse_non_empty)]
        name: Option<String>,

        #[arg(long, value_parser = parse_bool, num_args = 0..=1, default_missing_value = "true")]
        public_link_enabled: Option<bool>,

        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=10000))]
        public_link_limit: Option<u32>,

        #[arg(long, value_parser = parse_bool, num_args = 0..=1, default_missing_value = "true")]
        feedback_enabled: Option<bool>,
    },

    /// Delete a beta group
    Delete {
        #[arg(long, value_parser = parse_resource_id)]
        id: String,

        /// Confirm the operation
        #[arg(long)]
        confirm: bool,
    },

    /// Add testers to a group
    AddTesters {
        #[arg(long, value_parser = parse_resource_id)]
        id: String,

        /// Beta tester ID (repeat or comma-separate)
        #[arg(long = "tester", required = true, value_delimiter = ',')]
        testers: Vec<String>,
    },

    /// Remove testers from a group
    RemoveTesters {
        #[arg(long, value_parser = parse_resource_id)]
        id: String,

        /// Beta tester ID (repeat or comma-separate)
        #[arg(long = "tester", required = true, value_delimiter = ',')]
        testers: Vec<String>,

        /// Confirm the operation
        #[arg(long)]
        confirm: bool,
    },

    /// List relationship linkages of a group
    Links {
        #[arg(long, value_parser = parse_resource_id)]
        id: String,

        /// Relationship: app, builds, beta-testers
        #[arg(long = "type", value_name = "RELATIONSHIP")]
        relationship: String,

        #[command(flatten)]
        list: ListArgs,
    },
}

#[derive(Debug, Subcommand)]
pub enum BetaTestersCommand {
    /// List beta testers
    List {
        /// Filter by app ID
        #[arg(long)]
        app: Option<String>,

        /// Filter by beta group ID
        #[arg(long)]
        group: Option<String>,

        /// Filter by email
        #[arg(long)]
        email: Option<String>,

        #[command(flatten)]
        list: ListArgs,
    },

    /// Show one beta tester
    Get {
        #[arg(long, value_parser = parse_resource_id)]
        id: String,
    },

    /// Add a tester to one or more beta groups
    Add {
        #[arg(long, value_parser = parse_email)]
        email: String,

        #[arg(long)]
        first_name: Option<String>,

        #[arg(long)]
        last_name: Option<String>,

        /// Beta group ID (repeat or comma-separate)
        #[arg(long = "group", required = true, value_delimiter = ',')]
        groups: Vec<String>,
    },

    /// Remove a tester from all apps
    Remove {
        #[arg(long, value_parser = parse_resource_id)]
        id: String,

        /// Confirm the operation
        #[arg(long)]
        confirm: bool,
    },

    /// Send a TestFlight invitation email
    Invite {
        /// App ID
        #[arg(long, value_parser = parse_resource_id)]
        app: String,

        /// Beta tester ID
        #[arg(long, value_parser = parse_non_empty)]
        tester: String,
    },
}
