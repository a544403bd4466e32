//! Command handlers.
//!
//! Each handler turns parsed flags into one API request (or a paginated
//! series through [`fetch_list`]) and returns the resulting document. The
//! caller presents it.

use asc_client::ApiClient;
use asc_client::ApiRequest;
use asc_client::MAX_PAGE_LIMIT;
use asc_client::document::has_attributes;
use asc_client::fetch_list;
use asc_common::Colors;
use chrono::NaiveDate;
use chrono::Utc;
use serde_json::Value;
use serde_json::json;

use crate::commands::Commands;
use crate::commands::ListArgs;
use crate::commands::OutputFormat;
use crate::error::CliError;
use crate::presenter::Presenter;
use crate::presenter::create_presenter;
use crate::presenter::pagination_hint;

mod agreements;
mod app_events;
mod apps;
mod builds;
mod iap;
mod latest_build;
mod marketplace;
mod offer_codes;
mod pass_type_ids;
mod testflight;

pub use latest_build::LatestBuildQuery;
pub use latest_build::latest_build_number;

pub type HandlerResult = Result<Value, CliError>;

pub struct HandlerContext<'a, C: ApiClient + ?Sized> {
    pub client: &'a C,
    pub format: OutputFormat,
    presenter: Box<dyn Presenter>,
    today: NaiveDate,
}

impl<'a, C: ApiClient + ?Sized> HandlerContext<'a, C> {
    pub fn new(client: &'a C, format: OutputFormat, pretty: bool) -> Self {
        Self {
            client,
            format,
            presenter: create_presenter(format, pretty),
            today: Utc::now().date_naive(),
        }
    }

    /// Pins "today" for date checks.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn presenter(&self) -> &dyn Presenter {
        self.presenter.as_ref()
    }

    pub fn present(&self, value: &Value) {
        self.presenter.present(value);
        if self.format != OutputFormat::Json {
            if let Some(hint) = pagination_hint(value) {
                eprintln!("{}", Colors::dim(&hint));
            }
        }
    }

    pub async fn send(&self, request: ApiRequest) -> HandlerResult {
        Ok(self.client.send(request).await?)
    }

    /// Issues a list request honoring `--limit`, `--next` and `--paginate`.
    ///
    /// `--next` replaces the request entirely; its URL already carries the
    /// original filters. `--paginate` without `--limit` uses the largest page
    /// size.
    pub async fn list(&self, request: ApiRequest, list: &ListArgs) -> HandlerResult {
        let request = match &list.next {
            Some(next) => ApiRequest::get(next.trim()),
            None => {
                let limit = list
                    .limit
                    .or(if list.paginate { Some(MAX_PAGE_LIMIT) } else { None });
                request.limit(limit)
            }
        };
        Ok(fetch_list(self.client, request, list.paginate).await?)
    }
}

/// Runs the handler for an API command. `auth`, `completions` and `version`
/// never reach here; they need no client.
pub async fn dispatch<C: ApiClient + ?Sized>(
    ctx: &HandlerContext<'_, C>,
    command: Commands,
) -> HandlerResult {
    match command {
        Commands::Apps(cmd) => apps::handle(ctx, cmd).await,
        Commands::Builds(cmd) => builds::handle(ctx, cmd).await,
        Commands::Testflight(cmd) => testflight::handle(ctx, cmd).await,
        Commands::Iap(cmd) => iap::handle(ctx, cmd).await,
        Commands::OfferCodes(cmd) => offer_codes::handle(ctx, cmd).await,
        Commands::Marketplace(cmd) => marketplace::handle(ctx, cmd).await,
        Commands::AppEvents(cmd) => app_events::handle(ctx, cmd).await,
        Commands::Agreements(cmd) => agreements::handle(ctx, cmd).await,
        Commands::PassTypeIds(cmd) => pass_type_ids::handle(ctx, cmd).await,
        Commands::Auth(_) | Commands::Completions { .. } | Commands::Version => Err(
            CliError::InvalidInput("command does not talk to the API".to_string()),
        ),
    }
}

/// Rejects update bodies with nothing to change.
pub(crate) fn require_changes(body: &Value, flags: &str) -> Result<(), CliError> {
    if has_attributes(body) || body.pointer("/data/relationships").is_some() {
        Ok(())
    } else {
        Err(CliError::InvalidInput(format!(
            "nothing to update: pass at least one of {}",
            flags
        )))
    }
}

/// Result for relationship add/remove calls, which answer 204 No Content.
pub(crate) fn membership_result(
    resource_type: &str,
    id: &str,
    relationship: &str,
    ids: &[String],
    added: bool,
) -> Value {
    let mut result = json!({
        "type": resource_type,
        "id": id,
        "relationship": relationship,
    });
    result[if added { "added" } else { "removed" }] = json!(ids);
    result
}

#[cfg(test)]
pub(crate) mod test_support {
    use asc_client::MockClient;
    use chrono::NaiveDate;

    use super::HandlerContext;
    use crate::commands::OutputFormat;

    pub fn ctx(mock: &MockClient) -> HandlerContext<'_, MockClient> {
        HandlerContext::new(mock, OutputFormat::Json, false)
            .with_today(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap())
    }
}
