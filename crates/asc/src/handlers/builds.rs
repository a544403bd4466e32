use asc_client::ApiClient;
use asc_client::ApiRequest;
use asc_client::Method;
use asc_client::document::linkage_list;
use asc_client::document::update_document;
use asc_client::linkage;
use serde_json::json;

use super::HandlerContext;
use super::HandlerResult;
use super::LatestBuildQuery;
use super::latest_build_number;
use super::membership_result;
use crate::commands::BuildsCommand;
use crate::validation::require_confirm;
use crate::validation::require_list;

const FAMILY: &str = "builds";

pub(super) async fn handle<C: ApiClient + ?Sized>(
    ctx: &HandlerContext<'_, C>,
    command: BuildsCommand,
) -> HandlerResult {
    match command {
        BuildsCommand::List {
            app,
            version,
            platform,
            processing_state,
            sort,
            list,
        } => {
            let request = ApiRequest::get("/v1/builds")
                .filter("app", app)
                .filter_opt("preReleaseVersion.version", version)
                .filter_opt(
                    "preReleaseVersion.platform",
                    platform.map(|p| p.as_api_str()),
                )
                .filter_opt("processingState", processing_state.map(|s| s.as_api_str()))
                .sort(Some(sort.unwrap_or_else(|| "-uploadedDate".to_string())));
            ctx.list(request, &list).await
        }

        BuildsCommand::Get { id } => ctx.send(ApiRequest::get(format!("/v1/builds/{}", id))).await,

        BuildsCommand::Latest {
            app,
            version,
            platform,
            next,
        } => {
            let query = LatestBuildQuery {
                app,
                version: version.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()),
                platform,
                next,
            };
            latest_build_number(ctx.client, &query).await
        }

        BuildsCommand::Expire { id, confirm } => {
            require_confirm(confirm, "expire a build")?;
            let body = update_document("builds", &id, json!({ "expired": true }));
            ctx.send(ApiRequest::patch(format!("/v1/builds/{}", id), body))
                .await
        }

        BuildsCommand::AddGroups { id, groups } => {
            let groups = require_list(&groups, "--group")?;
            change_groups(ctx, &id, &groups, Method::Post).await
        }

        BuildsCommand::RemoveGroups {
            id,
            groups,
            confirm,
        } => {
            let groups = require_list(&groups, "--group")?;
            require_confirm(confirm, "remove a build from beta groups")?;
            change_groups(ctx, &id, &groups, Method::Delete).await
        }

        BuildsCommand::Links {
            id,
            relationship,
            list,
        } => {
            let path = linkage::linkage_path(FAMILY, &relationship, &id)?;
            ctx.list(ApiRequest::get(path), &list).await
        }
    }
}

async fn change_groups<C: ApiClient + ?Sized>(
    ctx: &HandlerContext<'_, C>,
    id: &str,
    groups: &[String],
    method: Method,
) -> HandlerResult {
    let link = linkage::find(FAMILY, "beta-groups")?;
    let request =
        ApiRequest::new(method, link.path_for(id)).json(linkage_list(link.resource_type, groups));
    ctx.send(request).await?;
    Ok(membership_result(
        "builds",
        id,
        "betaGroups",
        groups,
        method == Method::Post,
    ))
}
