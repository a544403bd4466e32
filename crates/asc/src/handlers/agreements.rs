use asc_client::ApiClient;
use asc_client::ApiRequest;
use asc_client::document::create_document;
use asc_client::document::deleted;
use asc_client::document::relationship_many;
use asc_client::document::relationship_one;
use asc_client::document::update_document;
use serde_json::json;

use super::HandlerContext;
use super::HandlerResult;
use super::require_changes;
use crate::commands::AgreementsCommand;
use crate::error::CliError;
use crate::validation::clean_list;
use crate::validation::require_confirm;
use crate::validation::require_list;

const EULA_TYPE: &str = "endUserLicenseAgreements";

pub(super) async fn handle<C: ApiClient + ?Sized>(
    ctx: &HandlerContext<'_, C>,
    command: AgreementsCommand,
) -> HandlerResult {
    match command {
        AgreementsCommand::Get { app, id } => {
            let path = match (app, id) {
                (_, Some(id)) => format!("/v1/endUserLicenseAgreements/{}", id.trim()),
                (Some(app), None) => format!("/v1/apps/{}/endUserLicenseAgreement", app.trim()),
                (None, None) => {
                    return Err(CliError::InvalidInput(
                        "pass --app or --id".to_string(),
                    ));
                }
            };
            ctx.send(ApiRequest::get(path)).await
        }

        AgreementsCommand::Create {
            app,
            text,
            territories,
        } => {
            let territories = require_list(&territories, "--territory")?;
            let body = create_document(
                EULA_TYPE,
                json!({ "agreementText": text }),
                Some(json!({
                    "app": relationship_one("apps", &app),
                    "territories": relationship_many("territories", &territories),
                })),
            );
            ctx.send(ApiRequest::post("/v1/endUserLicenseAgreements", body))
                .await
        }

        AgreementsCommand::Update {
            id,
            text,
            territories,
        } => {
            let territories = clean_list(&territories);
            let mut body = update_document(EULA_TYPE, &id, json!({ "agreementText": text }));
            if !territories.is_empty() {
                body["data"]["relationships"] =
                    json!({ "territories": relationship_many("territories", &territories) });
            }
            require_changes(&body, "--text, --territory")?;
            ctx.send(ApiRequest::patch(
                format!("/v1/endUserLicenseAgreements/{}", id),
                body,
            ))
            .await
        }

        AgreementsCommand::Delete { id, confirm } => {
            require_confirm(confirm, "delete a license agreement")?;
            ctx.send(ApiRequest::delete(format!(
                "/v1/endUserLicenseAgreements/{}",
                id
            )))
            .await?;
            Ok(deleted(EULA_TYPE, &id))
        }

        AgreementsCommand::Territories { id, list } => {
            let request = ApiRequest::get(format!("/v1/endUserLicenseAgreements/{}/territories", id));
            ctx.list(request, &list).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::ctx;
    use asc_client::Method;
    use asc_client::MockClient;

    #[tokio::test]
    async fn test_get_by_app_or_id() {
        let mock = MockClient::new();
        handle(
            &ctx(&mock),
            AgreementsCommand::Get {
                app: Some("app1".into()),
                id: None,
            },
        )
        .await
        .unwrap();
        handle(
            &ctx(&mock),
            AgreementsCommand::Get {
                app: None,
                id: Some("eula1".into()),
            },
        )
        .await
        .unwrap();
        assert_eq!(mock.call_count(Method::Get, "/v1/apps/app1/endUserLicenseAgreement"), 1);
        assert_eq!(mock.call_count(Method::Get, "/v1/endUserLicenseAgreements/eula1"), 1);
    }

    #[tokio::test]
    async fn test_create_links_territories() {
        let mock = MockClient::new();
        handle(
            &ctx(&mock),
            AgreementsCommand::Create {
                app: "app1".into(),
                text: "Terms".into(),
                territories: vec!["USA".into(), "CAN".into()],
            },
        )
        .await
        .unwrap();
        let body = mock
            .last_call(Method::Post, "/v1/endUserLicenseAgreements")
            .unwrap()
            .body
            .unwrap();
        assert_eq!(body["data"]["attributes"]["agreementText"], "Terms");
        assert_eq!(
            body["data"]["relationships"]["territories"]["data"],
            json!([
                { "type": "territories", "id": "USA" },
                { "type": "territories", "id": "CAN" }
            ])
        );
    }

    #[tokio::test]
    async fn test_update_territories_only() {
        let mock = MockClient::new();
        handle(
            &ctx(&mock),
            AgreementsCommand::Update {
                id: "eula1".into(),
                text: None,
                territories: vec!["GBR".into()],
            },
        )
        .await
        .unwrap();
        let body = mock
            .last_call(Method::Patch, "/v1/endUserLicenseAgreements/eula1")
            .unwrap()
            .body
            .unwrap();
        assert!(body["data"].get("attributes").is_none());
        assert_eq!(body["data"]["relationships"]["territories"]["data"][0]["id"], "GBR");
    }

    #[tokio::test]
    async fn test_update_without_changes_is_rejected() {
        let mock = MockClient::new();
        let err = handle(
            &ctx(&mock),
            AgreementsCommand::Update {
                id: "eula1".into(),
                text: None,
                territories: vec![],
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, CliError::InvalidInput(_)));
    }
}
