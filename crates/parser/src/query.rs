//! Lookups and search over a canonical specification

use apicanon_common::{ApiSpec, CanonError, Endpoint, HttpMethod, Result, SchemaNode};

/// Find an endpoint by its `"{METHOD} {path}"` identity
pub fn find_endpoint<'a>(spec: &'a ApiSpec, id: &str) -> Result<&'a Endpoint> {
    spec.endpoints
        .iter()
        .find(|endpoint| endpoint.id == id)
        .ok_or_else(|| CanonError::EndpointNotFound(id.to_string()))
}

/// Find a reusable schema by its component name
pub fn find_schema<'a>(spec: &'a ApiSpec, name: &str) -> Result<&'a SchemaNode> {
    spec.schemas
        .get(name)
        .ok_or_else(|| CanonError::SchemaNotFound(name.to_string()))
}

/// Composable endpoint filters; empty filter matches everything
#[derive(Debug, Clone, Default)]
pub struct EndpointFilter {
    /// Case-insensitive free-text match over path, summary, description,
    /// operationId, and tags
    pub query: Option<String>,

    pub method: Option<HttpMethod>,

    /// Exact tag membership
    pub tag: Option<String>,
}

/// Search endpoints, preserving specification order
pub fn search_endpoints<'a>(spec: &'a ApiSpec, filter: &EndpointFilter) -> Vec<&'a Endpoint> {
    let query = filter.query.as_ref().map(|q| q.to_lowercase());

    spec.endpoints
        .iter()
        .filter(|endpoint| {
            if let Some(method) = filter.method {
                if endpoint.method != method {
                    return false;
                }
            }

            if let Some(ref tag) = filter.tag {
                if !endpoint.tags.iter().any(|t| t == tag) {
                    return false;
                }
            }

            if let Some(ref query) = query {
                return matches_query(endpoint, query);
            }

            true
        })
        .collect()
}

fn matches_query(endpoint: &Endpoint, query: &str) -> bool {
    let contains = |field: &Option<String>| {
        field
            .as_ref()
            .is_some_and(|value| value.to_lowercase().contains(query))
    };

    endpoint.path.to_lowercase().contains(query)
        || contains(&endpoint.summary)
        || contains(&endpoint.description)
        || contains(&endpoint.operation_id)
        || endpoint
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(query))
}
