use clap::Subcommand;

use super::ListArgs;
use crate::validation::Platform;
use crate::validation::ProcessingState;
use crate::validation::parse_build_sort;
use crate::validation::parse_resource_id;

#[derive(Debug, Subcommand)]
pub enum BuildsCommand {
    /// List builds of an app
    List {
        /// App ID
        #[arg(long, value_parser = parse_resource_id)]
        app: String,

        /// Marketing version (CFBundleShortVersionString), e.g. 2.1.0
        #[arg(long)]
        version: Option<String>,

        /// Platform: IOS, MAC_OS, TV_OS, VISION_OS
        #[arg(long, value_parser = Platform::parse)]
        platform: Option<Platform>,

        /// Processing state: PROCESSING, FAILED, INVALID, VALID
        #[arg(long, value_parser = ProcessingState::parse)]
        processing_state: Option<ProcessingState>,

        /// Sort order (default: -uploadedDate)
        #[arg(long, value_parser = parse_build_sort)]
        sort: Option<String>,

        #[command(flatten)]
        list: ListArgs,
    },

    /// Show one build
    Get {
        /// Build ID
        #[arg(long, value_parser = parse_resource_id)]
        id: String,
    },

    /// Highest build number of an app, across processed builds and uploads
    #[command(long_about = r#"Highest build number of an app.

Looks at processed builds and at uploads that are still waiting or
processing, so a build number that was just uploaded is never handed out
twice. Build numbers compare numerically per dot-separated segment.

With --next the result also carries nextBuildNumber: the latest number with
its last segment incremented, or 1 when the app has no builds yet.

EXAMPLES:
    asc builds latest --app 1234567890
    asc builds latest --app 1234567890 --version 2.1 --platform ios --next"#)]
    Latest {
        /// App ID
        #[arg(long, value_parser = parse_resource_id)]
        app: String,

        /// Marketing version to restrict to
        #[arg(long)]
        version: Option<String>,

        /// Platform to restrict to
        #[arg(long, value_parser = Platform::parse)]
        platform: Option<Platform>,

        /// Also compute the next build number
        #[arg(long)]
        next: bool,
    },

    /// Expire a build so testers can no longer install it
    Expire {
        /// Build ID
        #[arg(long, value_parser = parse_resource_id)]
        id: String,

        /// Confirm the operation
        #[arg(long)]
        confirm: bool,
    },

    /// Add a build to TestFlight beta groups
    AddGroups {
        /// Build ID
        #[arg(long, value_parser = parse_resource_id)]
        id: String,

        /// Beta group ID (repeat or comma-separate)
        #[arg(long = "group", required = true, value_delimiter = ',')]
        groups: Vec<String>,
    },

    /// Remove a build from TestFlight beta groups
    RemoveGroups {
        /// Build ID
        #[arg(long, value_parser = parse_resource_id)]
        id: String,

        /// Beta group ID (repeat or comma-separate)
        #[arg(long = "group", required = true, value_delimiter = ',')]
        groups: Vec<String>,

        /// Confirm the operation
        #[arg(long)]
        confirm: bool,
    },

    /// List relationship linkages of a build
    Links {
        /// Build ID
        #[arg(long, value_parser = parse_resource_id)]
        id: String,

        /// Relationship: app, pre-release-version, beta-groups, individual-testers, ...
        #[arg(long = "type", value_name = "RELATIONSHIP")]
        relationship: String,

        #[command(flatten)]
        list: ListArgs,
    },
}
