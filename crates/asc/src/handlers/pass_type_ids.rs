use asc_client::ApiClient;
use asc_client::ApiRequest;
use asc_client::document::create_document;
use asc_client::document::deleted;
use asc_client::document::update_document;
use serde_json::json;

use super::HandlerContext;
use super::HandlerResult;
use crate::commands::PassTypeIdsCommand;
use crate::validation::require_confirm;

pub(super) async fn handle<C: ApiClient + ?Sized>(
    ctx: &HandlerContext<'_, C>,
    command: PassTypeIdsCommand,
) -> HandlerResult {
    match command {
        PassTypeIdsCommand::List {
            identifier,
            name,
            list,
        } => {
            let request = ApiRequest::get("/v1/passTypeIds")
                .filter_opt("identifier", identifier)
                .filter_opt("name", name);
            ctx.list(request, &list).await
        }

        PassTypeIdsCommand::Get { id } => {
            ctx.send(ApiRequest::get(format!("/v1/passTypeIds/{}", id)))
                .await
        }

        PassTypeIdsCommand::Create { identifier, name } => {
            let body = create_document(
                "passTypeIds",
                json!({ "identifier": identifier, "name": name }),
                None,
            );
            ctx.send(ApiRequest::post("/v1/passTypeIds", body)).await
        }

        PassTypeIdsCommand::Update { id, name } => {
            let body = update_document("passTypeIds", &id, json!({ "name": name }));
            ctx.send(ApiRequest::patch(format!("/v1/passTypeIds/{}", id), body))
                .await
        }

        PassTypeIdsCommand::Delete { id, confirm } => {
            require_confirm(confirm, "delete a pass type ID")?;
            ctx.send(ApiRequest::delete(format!("/v1/passTypeIds/{}", id)))
                .await?;
            Ok(deleted("passTypeIds", &id))
        }

        PassTypeIdsCommand::Certificates { id, list } => {
            ctx.list(
                ApiRequest::get(format!("/v1/passTypeIds/{}/certificates", id)),
                &list,
            )
            .await
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
    async fn test_create_body() {
        let mock = MockClient::new();
        handle(
            &ctx(&mock),
            PassTypeIdsCommand::Create {
                identifier: "pass.com.example.loyalty".into(),
                name: "Loyalty".into(),
            },
        )
        .await
        .unwrap();
        let body = mock
            .last_call(Method::Post, "/v1/passTypeIds")
            .unwrap()
            .body
            .unwrap();
        assert_eq!(
            body["data"]["attributes"],
            json!({ "identifier": "pass.com.example.loyalty", "name": "Loyalty" })
        );
    }

    #[tokio::test]
    async fn test_delete_requires_confirm() {
        let mock = MockClient::new();
        let err = handle(
            &ctx(&mock),
            PassTypeIdsCommand::Delete {
                id: "p1".into(),
                confirm: false,
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.to_string(), "--confirm is required to delete a pass type ID");
    }

    #[tokio::test]
    async fn test_certificates_paginate() {
        let mock = MockClient::new();
        let next = "https://api.appstoreconnect.apple.com/v1/passTypeIds/p1/certificates?cursor=2";
        mock.set_response(
            Method::Get,
            "/v1/passTypeIds/p1/certificates",
            json!({ "data": [{ "type": "certificates", "id": "c1" }], "links": { "next": next } }),
        );
        mock.set_response(
            Method::Get,
            next,
            json!({ "data": [{ "type": "certificates", "id": "c2" }], "links": {} }),
        );
        let result = handle(
            &ctx(&mock),
            PassTypeIdsCommand::Certificates {
                id: "p1".into(),
                list: crate::commands::ListArgs {
                    paginate: true,
                    ..Default::default()
                },
            },
        )
        .await
        .unwrap();
        assert_eq!(result["data"].as_array().unwrap().len(), 2);
        assert!(result["links"].get("next").is_none());
    }
}
