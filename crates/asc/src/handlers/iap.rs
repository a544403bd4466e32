use asc_client::ApiClient;
use asc_client::ApiRequest;
use asc_client::document::create_document;
use asc_client::document::deleted;
use asc_client::document::relationship_one;
use asc_client::document::update_document;
use serde_json::json;

use super::HandlerContext;
use super::HandlerResult;
use super::require_changes;
use crate::commands::IapCommand;
use crate::commands::IapLocalizationsCommand;
use crate::validation::require_confirm;

/// Resource type of the v2 in-app purchase API.
const IAP_TYPE: &str = "inAppPurchases";

pub(super) async fn handle<C: ApiClient + ?Sized>(
    ctx: &HandlerContext<'_, C>,
    command: IapCommand,
) -> HandlerResult {
    match command {
        IapCommand::List {
            app,
            iap_type,
            list,
        } => {
            let request = ApiRequest::get(format!("/v1/apps/{}/inAppPurchasesV2", app))
                .filter_opt("inAppPurchaseType", iap_type.map(|t| t.as_api_str()));
            ctx.list(request, &list).await
        }

        IapCommand::Get { id } => {
            ctx.send(ApiRequest::get(format!("/v2/inAppPurchases/{}", id)))
                .await
        }

        IapCommand::Create {
            app,
            iap_type,
            ref_name,
            product_id,
            family_sharable,
            review_note,
        } => {
            let body = create_document(
                IAP_TYPE,
                json!({
                    "name": ref_name,
                    "productId": product_id,
                    "inAppPurchaseType": iap_type.as_api_str(),
                    "familySharable": family_sharable.then_some(true),
                    "reviewNote": review_note,
                }),
                Some(json!({ "app": relationship_one("apps", &app) })),
            );
            ctx.send(ApiRequest::post("/v2/inAppPurchases", body)).await
        }

        IapCommand::Update {
            id,
            ref_name,
            family_sharable,
            review_note,
        } => {
            let body = update_document(
                IAP_TYPE,
                &id,
                json!({
                    "name": ref_name,
                    "familySharable": family_sharable,
                    "reviewNote": review_note,
                }),
            );
            require_changes(&body, "--ref-name, --family-sharable, --review-note")?;
            ctx.send(ApiRequest::patch(format!("/v2/inAppPurchases/{}", id), body))
                .await
        }

        IapCommand::Delete { id, confirm } => {
            require_confirm(confirm, "delete an in-app purchase")?;
            ctx.send(ApiRequest::delete(format!("/v2/inAppPurchases/{}", id)))
                .await?;
            Ok(deleted(IAP_TYPE, &id))
        }

        IapCommand::Localizations(IapLocalizationsCommand::List { id, list }) => {
            let request =
                ApiRequest::get(format!("/v2/inAppPurchases/{}/inAppPurchaseLocalizations", id));
            ctx.list(request, &list).await
        }

        IapCommand::Localizations(IapLocalizationsCommand::Create {
            id,
            locale,
            name,
            description,
        }) => {
            let body = create_document(
                "inAppPurchaseLocalizations",
                json!({
                    "locale": locale,
                    "name": name,
                    "description": description,
                }),
                Some(json!({ "inAppPurchaseV2": relationship_one(IAP_TYPE, &id) })),
            );
            ctx.send(ApiRequest::post("/v1/inAppPurchaseLocalizations", body))
                .await
        }
    }
}
