use asc_client::ApiClient;
use asc_client::ApiRequest;
use asc_client::document::create_document;
use asc_client::document::relationship_one;
use asc_client::document::update_document;
use serde_json::json;

use super::HandlerContext;
use super::HandlerResult;
use crate::commands::CustomCodesCommand;
use crate::commands::OfferCodesCommand;
use crate::commands::OneTimeCodesCommand;
use crate::validation::require_not_past;

pub(super) async fn handle<C: ApiClient + ?Sized>(
    ctx: &HandlerContext<'_, C>,
    command: OfferCodesCommand,
) -> HandlerResult {
    match command {
        OfferCodesCommand::List { subscription, list } => {
            let request = ApiRequest::get(format!("/v1/subscriptions/{}/offerCodes", subscription));
            ctx.list(request, &list).await
        }

        OfferCodesCommand::Get { id } => {
            ctx.send(ApiRequest::get(format!("/v1/subscriptionOfferCodes/{}", id)))
                .await
        }

        OfferCodesCommand::Update { id, active } => {
            let body = update_document("subscriptionOfferCodes", &id, json!({ "active": active }));
            ctx.send(ApiRequest::patch(
                format!("/v1/subscriptionOfferCodes/{}", id),
                body,
            ))
            .await
        }

        OfferCodesCommand::OneTime(OneTimeCodesCommand::List { id, list }) => {
            let request =
                ApiRequest::get(format!("/v1/subscriptionOfferCodes/{}/oneTimeUseCodes", id));
            ctx.list(request, &list).await
        }

        OfferCodesCommand::OneTime(OneTimeCodesCommand::Generate {
            id,
            count,
            expiration_date,
        }) => {
            require_not_past(expiration_date, ctx.today(), "--expiration-date")?;
            let body = create_document(
                "subscriptionOfferCodeOneTimeUseCodes",
                json!({
                    "numberOfCodes": count,
                    "expirationDate": expiration_date.format("%Y-%m-%d").to_string(),
                }),
                Some(json!({
                    "offerCode": relationship_one("subscriptionOfferCodes", &id),
                })),
            );
            ctx.send(ApiRequest::post(
                "/v1/subscriptionOfferCodeOneTimeUseCodes",
                body,
            ))
            .await
        }

        OfferCodesCommand::Custom(CustomCodesCommand::List { id, list }) => {
            let request = ApiRequest::get(format!("/v1/subscriptionOfferCodes/{}/customCodes", id));
            ctx.list(request, &list).await
        }
    }
}
