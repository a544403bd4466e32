use asc_client::ApiClient;
use asc_client::ApiRequest;

use super::HandlerContext;
use super::HandlerResult;
use crate::commands::AppsCommand;

pub(super) async fn handle<C: ApiClient + ?Sized>(
    ctx: &HandlerContext<'_, C>,
    command: AppsCommand,
) -> HandlerResult {
    match command {
        AppsCommand::List {
            bundle_id,
            name,
            sku,
            list,
        } => {
            let request = ApiRequest::get("/v1/apps")
                .filter_opt("bundleId", bundle_id)
                .filter_opt("name", name)
                .filter_opt("sku", sku);
            ctx.list(request, &list).await
        }
        AppsCommand::Get { id } => ctx.send(ApiRequest::get(format!("/v1/apps/{}", id))).await,
    }
}
