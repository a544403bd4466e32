//! `builds latest`: the highest build number across processed builds and
//! in-flight uploads.

use asc_client::ApiClient;
use asc_client::ApiRequest;
use asc_client::ClientError;
use asc_client::MAX_PAGE_LIMIT;
use asc_client::document::attribute;
use asc_client::document::data_items;
use asc_client::error_codes;
use serde_json::Value;
use serde_json::json;

use crate::build_number::BuildNumber;
use crate::error::CliError;
use crate::validation::Platform;

/// Upload states that may still turn into a build.
const IN_FLIGHT_UPLOAD_STATES: &str = "AWAITING_UPLOAD,PROCESSING";

#[derive(Debug, Clone)]
pub struct LatestBuildQuery {
    pub app: String,
    pub version: Option<String>,
    pub platform: Option<Platform>,
    pub next: bool,
}

struct Candidate {
    number: BuildNumber,
    id: Option<String>,
}

/// Highest numbered resource in `document`, reading the build number from
/// `field` of each resource's attributes.
fn highest(document: &Value, field: &str) -> Option<Candidate> {
    data_items(document)
        .into_iter()
        .filter_map(|resource| {
            let raw = attribute(resource, field)?.as_str()?;
            let number = BuildNumber::parse(raw);
            if number.as_str().is_empty() {
                return None;
            }
            Some(Candidate {
                number,
                id: resource.get("id").and_then(Value::as_str).map(str::to_string),
            })
        })
        .fold(None, |best: Option<Candidate>, candidate| match best {
            Some(best) if best.number >= candidate.number => Some(best),
            _ => Some(candidate),
        })
}

async fn processed_builds<C: ApiClient + ?Sized>(
    client: &C,
    query: &LatestBuildQuery,
) -> Result<Value, ClientError> {
    let request = ApiRequest::get("/v1/builds")
        .filter("app", query.app.as_str())
        .filter_opt("preReleaseVersion.version", query.version.as_deref())
        .filter_opt(
            "preReleaseVersion.platform",
            query.platform.map(Platform::as_api_str),
        )
        .sort(Some("-uploadedDate"))
        .limit(Some(MAX_PAGE_LIMIT));
    client.send(request).await
}

/// In-flight uploads. Accounts without access to build uploads answer 404;
/// that counts as "no uploads".
async fn pending_uploads<C: ApiClient + ?Sized>(
    client: &C,
    query: &LatestBuildQuery,
) -> Result<Value, ClientError> {
    let request = ApiRequest::get(format!("/v1/apps/{}/buildUploads", query.app))
        .filter("state", IN_FLIGHT_UPLOAD_STATES)
        .filter_opt("cfBundleShortVersionString", query.version.as_deref())
        .filter_opt("platform", query.platform.map(Platform::as_api_str))
        .limit(Some(MAX_PAGE_LIMIT));
    match client.send(request).await {
        Err(err) if err.status() == Some(error_codes::NOT_FOUND) => {
            tracing::warn!(app = %query.app, "build uploads unavailable, using processed builds only");
            Ok(json!({ "data": [] }))
        }
        other => other,
    }
}

fn describe_scope(query: &LatestBuildQuery) -> String {
    let mut scope = format!("app {}", query.app);
    if let Some(version) = &query.version {
        scope.push_str(&format!(" version {}", version));
    }
    if let Some(platform) = query.platform {
        scope.push_str(&format!(" on {}", platform));
    }
    scope
}

pub async fn latest_build_number<C: ApiClient + ?Sized>(
    client: &C,
    query: &LatestBuildQuery,
) -> Result<Value, CliError> {
    let builds = processed_builds(client, query).await?;
    let uploads = pending_uploads(client, query).await?;

    let build = highest(&builds, "version");
    let upload = highest(&uploads, "cfBundleVersion");
    tracing::debug!(
        build = build.as_ref().map(|c| c.number.as_str()),
        upload = upload.as_ref().map(|c| c.number.as_str()),
        "latest build candidates"
    );

    let (latest, source) = match (&build, &upload) {
        (Some(b), Some(u)) if u.number > b.number => (Some(u), Some("upload")),
        (Some(b), _) => (Some(b), Some("build")),
        (None, Some(u)) => (Some(u), Some("upload")),
        (None, None) => (None, None),
    };

    if latest.is_none() && !query.next {
        return Err(CliError::NotFound(format!(
            "no builds or uploads found for {}",
            describe_scope(query)
        )));
    }

    let mut result = json!({
        "app": query.app,
        "version": query.version,
        "platform": query.platform.map(Platform::as_api_str),
        "latestProcessedBuildNumber": build.as_ref().map(|c| c.number.to_string()),
        "latestUploadBuildNumber": upload.as_ref().map(|c| c.number.to_string()),
        "latestBuildNumber": latest.map(|c| c.number.to_string()),
        "source": source,
        "buildId": latest.and_then(|c| c.id.clone()),
    });

    if query.next {
        let next = BuildNumber::next_after(latest.map(|c| &c.number))?;
        result["nextBuildNumber"] = json!(next.to_string());
    }

    Ok(result)
}
