use asc_client::ApiClient;
use asc_client::ApiRequest;
use asc_client::Method;
use asc_client::document::create_document;
use asc_client::document::deleted;
use asc_client::document::linkage_list;
use asc_client::document::relationship_many;
use asc_client::document::relationship_one;
use asc_client::document::update_document;
use asc_client::linkage;
use serde_json::json;

use super::HandlerContext;
use super::HandlerResult;
use super::membership_result;
use super::require_changes;
use crate::commands::BetaGroupsCommand;
use crate::commands::BetaTestersCommand;
use crate::commands::TestflightCommand;
use crate::error::CliError;
use crate::validation::require_confirm;
use crate::validation::require_list;

pub(super) async fn handle<C: ApiClient + ?Sized>(
    ctx: &HandlerContext<'_, C>,
    command: TestflightCommand,
) -> HandlerResult {
    match command {
        TestflightCommand::BetaGroups(cmd) => beta_groups(ctx, cmd).await,
        TestflightCommand::BetaTesters(cmd) => beta_testers(ctx, cmd).await,
    }
}

fn check_public_link(
    internal: bool,
    public_link_enabled: Option<bool>,
    public_link_limit: Option<u32>,
) -> Result<(), CliError> {
    if internal && (public_link_enabled == Some(true) || public_link_limit.is_some()) {
        return Err(CliError::InvalidInput(
            "internal beta groups cannot have a public link".to_string(),
        ));
    }
    Ok(())
}

async fn beta_groups<C: ApiClient + ?Sized>(
    ctx: &HandlerContext<'_, C>,
    command: BetaGroupsCommand,
) -> HandlerResult {
    match command {
        BetaGroupsCommand::List { app, name, list } => {
            let request = ApiRequest::get("/v1/betaGroups")
                .filter("app", app)
                .filter_opt("name", name);
            ctx.list(request, &list).await
        }

        BetaGroupsCommand::Get { id } => {
            ctx.send(ApiRequest::get(format!("/v1/betaGroups/{}", id)))
                .await
        }

        BetaGroupsCommand::Create {
            app,
            name,
            internal,
            public_link_enabled,
            public_link_limit,
            feedback_enabled,
        } => {
            check_public_link(internal, public_link_enabled, public_link_limit)?;
            let body = create_document(
                "betaGroups",
                json!({
                    "name": name,
                    "isInternalGroup": internal,
                    "publicLinkEnabled": public_link_enabled,
                    "publicLinkLimit": public_link_limit,
                    "publicLinkLimitEnabled": public_link_limit.map(|_| true),
                    "feedbackEnabled": feedback_enabled,
                }),
                Some(json!({ "app": relationship_one("apps", &app) })),
            );
            ctx.send(ApiRequest::post("/v1/betaGroups", body)).await
        }

        BetaGroupsCommand::Update {
            id,
            name,
            public_link_enabled,
            public_link_limit,
            feedback_enabled,
        } => {
            let body = update_document(
                "betaGroups",
                &id,
                json!({
                    "name": name,
                    "publicLinkEnabled": public_link_enabled,
                    "publicLinkLimit": public_link_limit,
                    "publicLinkLimitEnabled": public_link_limit.map(|_| true),
                    "feedbackEnabled": feedback_enabled,
                }),
            );
            require_changes(
                &body,
                "--name, --public-link-enabled, --public-link-limit, --feedback-enabled",
            )?;
            ctx.send(ApiRequest::patch(format!("/v1/betaGroups/{}", id), body))
                .await
        }

        BetaGroupsCommand::Delete { id, confirm } => {
            require_confirm(confirm, "delete a beta group")?;
            ctx.send(ApiRequest::delete(format!("/v1/betaGroups/{}", id)))
                .await?;
            Ok(deleted("betaGroups", &id))
        }

        BetaGroupsCommand::AddTesters { id, testers } => {
            let testers = require_list(&testers, "--tester")?;
            change_testers(ctx, &id, &testers, Method::Post).await
        }

        BetaGroupsCommand::RemoveTesters {
            id,
            testers,
            confirm,
        } => {
            let testers = require_list(&testers, "--tester")?;
            require_confirm(confirm, "remove testers from a beta group")?;
            change_testers(ctx, &id, &testers, Method::Delete).await
        }

        BetaGroupsCommand::Links {
            id,
            relationship,
            list,
        } => {
            let path = linkage::linkage_path("beta-groups", &relationship, &id)?;
            ctx.list(ApiRequest::get(path), &list).await
        }
    }
}

async fn change_testers<C: ApiClient + ?Sized>(
    ctx: &HandlerContext<'_, C>,
    group: &str,
    testers: &[String],
    method: Method,
) -> HandlerResult {
    let link = linkage::find("beta-groups", "beta-testers")?;
    let request = ApiRequest::new(method, link.path_for(group))
        .json(linkage_list(link.resource_type, testers));
    ctx.send(request).await?;
    Ok(membership_result(
        "betaGroups",
        group,
        "betaTesters",
        testers,
        method == Method::Post,
    ))
}

async fn beta_testers<C: ApiClient + ?Sized>(
    ctx: &HandlerContext<'_, C>,
    command: BetaTestersCommand,
) -> HandlerResult {
    match command {
        BetaTestersCommand::List {
            app,
            group,
            email,
            list,
        } => {
            let request = ApiRequest::get("/v1/betaTesters")
                .filter_opt("apps", app)
                .filter_opt("betaGroups", group)
                .filter_opt("email", email);
            ctx.list(request, &list).await
        }

        BetaTestersCommand::Get { id } => {
            ctx.send(ApiRequest::get(format!("/v1/betaTesters/{}", id)))
                .await
        }

        BetaTestersCommand::Add {
            email,
            first_name,
            last_name,
            groups,
        } => {
            let groups = require_list(&groups, "--group")?;
            let body = create_document(
                "betaTesters",
                json!({
                    "email": email,
                    "firstName": first_name,
                    "lastName": last_name,
                }),
                Some(json!({ "betaGroups": relationship_many("betaGroups", &groups) })),
            );
            ctx.send(ApiRequest::post("/v1/betaTesters", body)).await
        }

        BetaTestersCommand::Remove { id, confirm } => {
            require_confirm(confirm, "remove a beta tester")?;
            ctx.send(ApiRequest::delete(format!("/v1/betaTesters/{}", id)))
                .await?;
            Ok(deleted("betaTesters", &id))
        }

        BetaTestersCommand::Invite { app, tester } => {
            let body = create_document(
                "betaTesterInvitations",
                json!({}),
                Some(json!({
                    "app": relationship_one("apps", &app),
                    "betaTester": relationship_one("betaTesters", &tester),
                })),
            );
            ctx.send(ApiRequest::post("/v1/betaTesterInvitations", body))
                .await
        }
    }
}
