use std::path::PathBuf;

use asc_client::ConfigOverrides;
use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
pub use clap_complete::Shell;

use crate::validation::parse_limit;

mod agreements;
mod app_events;
mod apps;
mod builds;
mod iap;
mod marketplace;
mod offer_codes;
mod pass_type_ids;
mod testflight;

pub use agreements::AgreementsCommand;
pub use app_events::AppEventLocalizationsCommand;
pub use app_events::AppEventsCommand;
pub use app_events::EventFields;
pub use apps::AppsCommand;
pub use builds::BuildsCommand;
pub use iap::IapCommand;
pub use iap::IapLocalizationsCommand;
pub use marketplace::MarketplaceCommand;
pub use marketplace::SearchDetailsCommand;
pub use marketplace::WebhooksCommand;
pub use offer_codes::CustomCodesCommand;
pub use offer_codes::OfferCodesCommand;
pub use offer_codes::OneTimeCodesCommand;
pub use pass_type_ids::PassTypeIdsCommand;
pub use testflight::BetaGroupsCommand;
pub use testflight::BetaTestersCommand;
pub use testflight::TestflightCommand;

const LONG_ABOUT: &str = r#"asc is a command-line client for the App Store Connect API.

AUTHENTICATION:
    Requests are signed with an App Store Connect API key. Provide the key ID,
    issuer ID and the .p8 private key through flags, environment variables
    or ~/.asc/config.json:

    ASC_KEY_ID            Key ID shown next to the key in App Store Connect
    ASC_ISSUER_ID         Issuer ID of your team
    ASC_PRIVATE_KEY_PATH  Path to the AuthKey_XXXX.p8 file
    ASC_PRIVATE_KEY       The PEM itself (CI secrets)
    ASC_PRIVATE_KEY_B64   The PEM, base64-encoded

    Run 'asc auth status' to see what was resolved.

OUTPUT:
    JSON by default (compact; add --pretty). Use --output table or
    --output markdown for human-readable tables. List commands return one
    page; pass --paginate to fetch every page, or --next with the URL from
    links.next to continue manually.

EXAMPLES:
    # Newest build number for version 2.1 on iOS, and the one to use next
    asc builds latest --app 1234567890 --version 2.1 --platform ios --next

    # Every beta tester of an app as a markdown table
    asc testflight beta-testers list --app 1234567890 --paginate -o markdown

    # Add a build to two TestFlight groups
    asc builds add-groups --id BUILD_ID --group GROUP_A,GROUP_B

    # Generate 500 one-time offer codes
    asc offer-codes one-time generate --id OFFER_ID --count 500 --expiration-date 2026-12-31"#;

#[derive(Parser)]
#[command(name = "asc")]
#[command(author, version)]
#[command(about = "Command-line client for the App Store Connect API")]
#[command(long_about = LONG_ABOUT)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub output: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Disable colored output (also respects NO_COLOR env var)
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Enable debug logging on stderr (shows every request)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// API key ID (overrides ASC_KEY_ID)
    #[arg(long, global = true)]
    pub key_id: Option<String>,

    /// Issuer ID (overrides ASC_ISSUER_ID)
    #[arg(long, global = true)]
    pub issuer_id: Option<String>,

    /// Path to the .p8 private key (overrides ASC_PRIVATE_KEY_PATH)
    #[arg(long, global = true)]
    pub private_key_path: Option<PathBuf>,

    /// API base URL (overrides ASC_BASE_URL)
    #[arg(long, global = true, hide = true)]
    pub base_url: Option<String>,

    /// Request timeout in seconds (overrides ASC_TIMEOUT)
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Config file (default: ~/.asc/config.json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Configuration values given on the command line.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            key_id: self.key_id.clone(),
            issuer_id: self.issuer_id.clone(),
            private_key_path: self.private_key_path.clone(),
            base_url: self.base_url.clone(),
            timeout_secs: self.timeout,
            config_path: self.config.clone(),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Apps on the account
    #[command(subcommand)]
    Apps(AppsCommand),

    /// Builds: list, inspect, expire, manage TestFlight groups
    #[command(subcommand)]
    Builds(BuildsCommand),

    /// TestFlight beta groups and testers
    #[command(subcommand)]
    Testflight(TestflightCommand),

    /// In-app purchases
    #[command(subcommand)]
    Iap(IapCommand),

    /// Subscription offer codes
    #[command(subcommand)]
    OfferCodes(OfferCodesCommand),

    /// Alternative marketplace webhooks and search details
    #[command(subcommand)]
    Marketplace(MarketplaceCommand),

    /// In-app events
    #[command(subcommand)]
    AppEvents(AppEventsCommand),

    /// Custom end user license agreements (EULA)
    #[command(subcommand)]
    Agreements(AgreementsCommand),

    /// Wallet pass type IDs
    #[command(subcommand)]
    PassTypeIds(PassTypeIdsCommand),

    /// Authentication configuration
    #[command(subcommand)]
    Auth(AuthCommand),

    /// Generate shell completions
    #[command(long_about = r#"Generate shell completion scripts.

EXAMPLES:
    asc completions bash > /etc/bash_completion.d/asc
    asc completions zsh > ~/.zfunc/_asc
    asc completions fish > ~/.config/fish/completions/asc.fish"#)]
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Show version information
    Version,
}

#[derive(Debug, Subcommand)]
pub enum AuthCommand {
    /// Show the resolved configuration (the private key itself is never printed)
    Status,
}

/// Paging flags shared by every list command.
#[derive(Debug, Clone, Default, Args)]
pub struct ListArgs {
    /// Page size (1-200)
    #[arg(long, value_parser = parse_limit)]
    pub limit: Option<u32>,

    /// Continue from a links.next URL of a previous response
    #[arg(long, value_name = "URL")]
    pub next: Option<String>,

    /// Fetch every page and return them as one document
    #[arg(long)]
    pub paginate: bool,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Json,
    Table,
    Markdown,
}
