use asc_client::ClientConfig;
use asc_client::ErrorCategory;
use asc_client::HttpClient;
use asc_client::USER_AGENT;
use asc_common::color_init;
use clap::CommandFactory;
use clap::Parser;
use clap_complete::generate;
use serde_json::json;
use tracing::debug;

use crate::commands::AuthCommand;
use crate::commands::Cli;
use crate::commands::Commands;
use crate::commands::OutputFormat;
use crate::error::CliError;
use crate::handlers;
use crate::handlers::HandlerContext;
use crate::presenter::create_presenter;
use crate::telemetry;

pub const SUCCESS: i32 = 0;

pub struct Application;

impl Default for Application {
    fn default() -> Self {
        Self::new()
    }
}

impl Application {
    pub fn new() -> Self {
        Self
    }

    /// Parses the command line, runs the command and returns the exit code.
    pub fn run(&self) -> i32 {
        let cli = match Cli::try_parse() {
            Ok(cli) => cli,
            Err(err) => {
                // Help and --version also arrive here, on stdout.
                let code = if err.use_stderr() {
                    ErrorCategory::InvalidInput.exit_code()
                } else {
                    SUCCESS
                };
                let _ = err.print();
                return code;
            }
        };
        let _telemetry = telemetry::init_tracing(cli.verbose);
        color_init(cli.no_color);
        debug!(command = ?cli.command, output = ?cli.output, "CLI command parsed");

        let (format, pretty) = (cli.output, cli.pretty);
        match self.execute(cli) {
            Ok(()) => SUCCESS,
            Err(e) => {
                create_presenter(format, pretty).present_error(&e);
                e.exit_code()
            }
        }
    }

    fn execute(&self, cli: Cli) -> Result<(), CliError> {
        if self.handle_standalone_commands(&cli)? {
            return Ok(());
        }

        let config = ClientConfig::load(cli.overrides()).map_err(asc_client::ClientError::from)?;
        let client = HttpClient::new(&config)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        let ctx = HandlerContext::new(&client, cli.output, cli.pretty);
        let result = runtime.block_on(handlers::dispatch(&ctx, cli.command))?;
        ctx.present(&result);
        Ok(())
    }

    /// Commands that run without an API client. Returns `true` when handled.
    fn handle_standalone_commands(&self, cli: &Cli) -> Result<bool, CliError> {
        let presenter = create_presenter(cli.output, cli.pretty);
        match &cli.command {
            Commands::Completions { shell } => {
                let mut cmd = Cli::command();
                generate(*shell, &mut cmd, "asc", &mut std::io::stdout());
                Ok(true)
            }
            Commands::Version => {
                let version = json!({
                    "name": "asc",
                    "version": env!("CARGO_PKG_VERSION"),
                    "userAgent": USER_AGENT,
                });
                if cli.output == OutputFormat::Json {
                    presenter.present(&version);
                } else {
                    println!("asc {}", env!("CARGO_PKG_VERSION"));
                }
                Ok(true)
            }
            Commands::Auth(AuthCommand::Status) => {
                let config =
                    ClientConfig::load(cli.overrides()).map_err(asc_client::ClientError::from)?;
                presenter.present(&config.describe());
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
