//! Cursor pagination over `links.next`.

use std::collections::HashSet;

use asc_common::ValueExt;
use serde_json::Value;

use crate::client::ApiClient;
use crate::document::next_link;
use crate::error::ClientError;
use crate::request::ApiRequest;

fn take_array(page: &mut Value, field: &str) -> Result<Vec<Value>, ClientError> {
    match page.get_mut(field).map(Value::take) {
        Some(Value::Array(items)) => Ok(items),
        Some(Value::Null) | None if field == "included" => Ok(Vec::new()),
        _ => Err(ClientError::InvalidResponse(format!(
            "expected '{}' to be an array on a paginated page",
            field
        ))),
    }
}

fn resource_key(resource: &Value) -> Option<(String, String)> {
    Some((
        resource.get("type")?.as_str()?.to_string(),
        resource.get("id")?.as_str()?.to_string(),
    ))
}

struct IncludedSet {
    items: Vec<Value>,
    seen: HashSet<(String, String)>,
}

impl IncludedSet {
    fn new() -> Self {
        Self {
            items: Vec::new(),
            seen: HashSet::new(),
        }
    }

    fn extend(&mut self, resources: Vec<Value>) {
        for resource in resources {
            if let Some(key) = resource_key(&resource) {
                if !self.seen.insert(key) {
                    continue;
                }
            }
            self.items.push(resource);
        }
    }
}

/// Follows `links.next` from `first_page` until it runs out and returns one
/// document holding every page's `data`.
///
/// `included` resources are merged without duplicates. The result keeps the
/// first page's `links.self` and `meta` and has no `links.next`. A next link
/// that was already fetched is reported as [`ClientError::PaginationLoop`].
pub async fn paginate_all<C>(client: &C, first_page: Value) -> Result<Value, ClientError>
where
    C: ApiClient + ?Sized,
{
    let Some(first_next) = next_link(&first_page).map(str::to_string) else {
        return Ok(first_page);
    };

    let mut aggregate = first_page;
    let mut data = take_array(&mut aggregate, "data")?;
    let mut included = IncludedSet::new();
    included.extend(take_array(&mut aggregate, "included")?);

    let mut visited: HashSet<String> = HashSet::new();
    if let Some(self_link) = aggregate.non_empty_str_at(&["links", "self"]) {
        visited.insert(self_link.to_string());
    }

    let mut next = Some(first_next);
    let mut pages = 1usize;
    while let Some(url) = next.take() {
        if !visited.insert(url.clone()) {
            return Err(ClientError::PaginationLoop(url));
        }

        let mut page = client.send(ApiRequest::get(url)).await?;
        data.extend(take_array(&mut page, "data")?);
        included.extend(take_array(&mut page, "included")?);
        next = next_link(&page).map(str::to_string);
        pages += 1;
        tracing::debug!(pages, items = data.len(), "fetched page");
    }

    if let Some(object) = aggregate.as_object_mut() {
        object.insert("data".to_string(), Value::Array(data));
        if included.items.is_empty() {
            object.remove("included");
        } else {
            object.insert("included".to_string(), Value::Array(included.items));
        }
    }
    if let Some(links) = aggregate.get_mut("links").and_then(Value::as_object_mut) {
        links.remove("next");
    }
    Ok(aggregate)
}

/// Issues a list request and, when `paginate` is set, aggregates every page.
pub async fn fetch_list<C>(
    client: &C,
    request: ApiRequest,
    paginate: bool,
) -> Result<Value, ClientError>
where
    C: ApiClient + ?Sized,
{
    let first = client.send(request).await?;
    if paginate {
        paginate_all(client, first).await
    } else {
        Ok(first)
    }
}
