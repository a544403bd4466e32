use asc_client::ApiClient;
use asc_client::ApiRequest;
use asc_client::document::create_document;
use asc_client::document::deleted;
use asc_client::document::relationship_one;
use asc_client::document::update_document;
use serde_json::Value;
use serde_json::json;

use super::HandlerContext;
use super::HandlerResult;
use super::require_changes;
use crate::commands::AppEventLocalizationsCommand;
use crate::commands::AppEventsCommand;
use crate::commands::EventFields;
use crate::validation::EventBadge;
use crate::validation::require_confirm;

fn event_attributes(
    reference_name: Option<String>,
    badge: Option<EventBadge>,
    fields: EventFields,
) -> Value {
    json!({
        "referenceName": reference_name,
        "badge": badge.map(|b| b.as_api_str()),
        "deepLink": fields.deep_link,
        "purchaseRequirement": fields.purchase_requirement.map(|p| p.as_api_str()),
        "priority": fields.priority.map(|p| p.as_api_str()),
        "purpose": fields.purpose.map(|p| p.as_api_str()),
    })
}

pub(super) async fn handle<C: ApiClient + ?Sized>(
    ctx: &HandlerContext<'_, C>,
    command: AppEventsCommand,
) -> HandlerResult {
    match command {
        AppEventsCommand::List { app, list } => {
            ctx.list(ApiRequest::get(format!("/v1/apps/{}/appEvents", app)), &list)
                .await
        }

        AppEventsCommand::Get { id } => {
            ctx.send(ApiRequest::get(format!("/v1/appEvents/{}", id)))
                .await
        }

        AppEventsCommand::Create {
            app,
            reference_name,
            badge,
            fields,
        } => {
            let body = create_document(
                "appEvents",
                event_attributes(Some(reference_name), Some(badge), fields),
                Some(json!({ "app": relationship_one("apps", &app) })),
            );
            ctx.send(ApiRequest::post("/v1/appEvents", body)).await
        }

        AppEventsCommand::Update {
            id,
            reference_name,
            badge,
            fields,
        } => {
            let body = update_document(
                "appEvents",
                &id,
                event_attributes(reference_name, badge, fields),
            );
            require_changes(
                &body,
                "--reference-name, --badge, --deep-link, --purchase-requirement, --priority, --purpose",
            )?;
            ctx.send(ApiRequest::patch(format!("/v1/appEvents/{}", id), body))
                .await
        }

        AppEventsCommand::Delete { id, confirm } => {
            require_confirm(confirm, "delete an in-app event")?;
            ctx.send(ApiRequest::delete(format!("/v1/appEvents/{}", id)))
                .await?;
            Ok(deleted("appEvents", &id))
        }

        AppEventsCommand::Localizations(AppEventLocalizationsCommand::List { id, list }) => {
            ctx.list(
                ApiRequest::get(format!("/v1/appEvents/{}/localizations", id)),
                &list,
            )
            .await
        }
    }
}
