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
use crate::commands::MarketplaceCommand;
use crate::commands::SearchDetailsCommand;
use crate::commands::WebhooksCommand;
use crate::validation::require_confirm;

pub(super) async fn handle<C: ApiClient + ?Sized>(
    ctx: &HandlerContext<'_, C>,
    command: MarketplaceCommand,
) -> HandlerResult {
    match command {
        MarketplaceCommand::Webhooks(cmd) => webhooks(ctx, cmd).await,
        MarketplaceCommand::SearchDetails(cmd) => search_details(ctx, cmd).await,
    }
}

async fn webhooks<C: ApiClient + ?Sized>(
    ctx: &HandlerContext<'_, C>,
    command: WebhooksCommand,
) -> HandlerResult {
    match command {
        WebhooksCommand::List { list } => {
            ctx.list(ApiRequest::get("/v1/marketplaceWebhooks"), &list)
                .await
        }

        WebhooksCommand::Create { url, secret } => {
            let body = create_document(
                "marketplaceWebhooks",
                json!({ "endpointUrl": url, "secret": secret }),
                None,
            );
            ctx.send(ApiRequest::post("/v1/marketplaceWebhooks", body))
                .await
        }

        WebhooksCommand::Update { id, url, secret } => {
            let body = update_document(
                "marketplaceWebhooks",
                &id,
                json!({ "endpointUrl": url, "secret": secret }),
            );
            require_changes(&body, "--url, --secret")?;
            ctx.send(ApiRequest::patch(
                format!("/v1/marketplaceWebhooks/{}", id),
                body,
            ))
            .await
        }

        WebhooksCommand::Delete { id, confirm } => {
            require_confirm(confirm, "delete a webhook")?;
            ctx.send(ApiRequest::delete(format!("/v1/marketplaceWebhooks/{}", id)))
                .await?;
            Ok(deleted("marketplaceWebhooks", &id))
        }
    }
}

async fn search_details<C: ApiClient + ?Sized>(
    ctx: &HandlerContext<'_, C>,
    command: SearchDetailsCommand,
) -> HandlerResult {
    match command {
        SearchDetailsCommand::Get { app } => {
            ctx.send(ApiRequest::get(format!(
                "/v1/apps/{}/marketplaceSearchDetail",
                app
            )))
            .await
        }

        SearchDetailsCommand::Create { app, catalog_url } => {
            let body = create_document(
                "marketplaceSearchDetails",
                json!({ "catalogUrl": catalog_url }),
                Some(json!({ "app": relationship_one("apps", &app) })),
            );
            ctx.send(ApiRequest::post("/v1/marketplaceSearchDetails", body))
                .await
        }

        SearchDetailsCommand::Update { id, catalog_url } => {
            let body = update_document(
                "marketplaceSearchDetails",
                &id,
                json!({ "catalogUrl": catalog_url }),
            );
            ctx.send(ApiRequest::patch(
                format!("/v1/marketplaceSearchDetails/{}", id),
                body,
            ))
            .await
        }

        SearchDetailsCommand::Delete { id, confirm } => {
            require_confirm(confirm, "delete marketplace search details")?;
            ctx.send(ApiRequest::delete(format!(
                "/v1/marketplaceSearchDetails/{}",
                id
            )))
            .await?;
            Ok(deleted("marketplaceSearchDetails", &id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::ctx;
    use asc_client::Method;
    use asc_client::MockClient;
    use serde_json::Value;

    #[tokio::test]
    async fn test_create_webhook_body() {
        let mock = MockClient::new();
        webhooks(
            &ctx(&mock),
            WebhooksCommand::Create {
                url: "https://example.com/hook".into(),
                secret: "s3cret".into(),
            },
        )
        .await
        .unwrap();
        let body = mock
            .last_call(Method::Post, "/v1/marketplaceWebhooks")
            .unwrap()
            .body
            .unwrap();
        assert_eq!(
            body,
            json!({ "data": {
                "type": "marketplaceWebhooks",
                "attributes": { "endpointUrl": "https://example.com/hook", "secret": "s3cret" }
            }})
        );
    }

    #[tokio::test]
    async fn test_update_webhook_only_sends_given_fields() {
        let mock = MockClient::new();
        webhooks(
            &ctx(&mock),
            WebhooksCommand::Update {
                id: "w1".into(),
                url: None,
                secret: Some("rotated".into()),
            },
        )
        .await
        .unwrap();
        let body = mock
            .last_call(Method::Patch, "/v1/marketplaceWebhooks/w1")
            .unwrap()
            .body
            .unwrap();
        assert_eq!(body["data"]["attributes"], json!({ "secret": "rotated" }));
    }

    #[tokio::test]
    async fn test_delete_search_details() {
        let mock = MockClient::new();
        mock.set_response(Method::Delete, "/v1/marketplaceSearchDetails/s1", Value::Null);
        let result = search_details(
            &ctx(&mock),
            SearchDetailsCommand::Delete {
                id: "s1".into(),
                confirm: true,
            },
        )
        .await
        .unwrap();
        assert_eq!(result["deleted"], true);
    }
}
