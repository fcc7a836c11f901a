//! Converts a raw OpenAPI document into the canonical `ApiSpec`

use super::types::{
    Document, Operation, PathItem, RawContact, RawMediaType, RawParameter, RawRequestBody,
    RawServer, SecurityRequirementMap,
};
use crate::schema::normalize_opt;
use crate::security;
use apicanon_common::{
    ApiSpec, Contact, Endpoint, HttpMethod, Parameter, ParameterLocation, RequestBody, Response,
    Result, SecurityRequirement, Server, ServerVariable, SpecSummary, Tag,
};
use indexmap::IndexMap;
use std::collections::BTreeMap;

/// Build the canonical specification from a dereferenced document
///
/// Builds atomically: any failure surfaces before a specification exists, so
/// callers never observe a partial result.
pub fn canonicalize(doc: &Document) -> Result<ApiSpec> {
    let servers = extract_servers(doc);
    let default_security = extract_global_security(doc);
    let endpoints = extract_endpoints(doc, &servers, &default_security);
    let schemas = extract_schemas(doc);
    let tags = build_tag_index(doc, &endpoints);
    let summary = build_summary(&endpoints);

    Ok(ApiSpec {
        title: doc.info.title.clone(),
        version: doc.info.version.clone(),
        description: doc.info.description.clone(),
        terms_of_service: doc.info.terms_of_service.clone(),
        contact: doc.info.contact.as_ref().map(convert_contact),
        servers,
        default_security,
        endpoints,
        schemas,
        tags,
        summary,
    })
}

/// Declared servers, or exactly one placeholder when none are declared
fn extract_servers(doc: &Document) -> Vec<Server> {
    if doc.servers.is_empty() {
        return vec![Server {
            url: "https://api.example.com".to_string(),
            description: Some("Default server".to_string()),
            variables: None,
        }];
    }

    doc.servers.iter().map(convert_server).collect()
}

fn convert_server(server: &RawServer) -> Server {
    Server {
        url: server.url.clone(),
        description: server.description.clone(),
        variables: server.variables.as_ref().map(|vars| {
            vars.iter()
                .map(|(name, var)| {
                    (
                        name.clone(),
                        ServerVariable {
                            default: var.default.clone(),
                            enum_values: var.enum_values.clone(),
                            description: var.description.clone(),
                        },
                    )
                })
                .collect()
        }),
    }
}

fn convert_contact(contact: &RawContact) -> Contact {
    Contact {
        name: contact.name.clone(),
        url: contact.url.clone(),
        email: contact.email.clone(),
    }
}

/// Resolve the document's top-level security requirement
///
/// The requirement list is an OR of AND-groups; only the first AND-group is
/// consulted. Documents offering alternative auth methods will only surface
/// the first alternative.
fn extract_global_security(doc: &Document) -> Vec<SecurityRequirement> {
    match doc.security.as_ref().and_then(|groups| groups.first()) {
        Some(group) => resolve_group(doc, group),
        None => vec![],
    }
}

/// Resolve every named scheme in one AND-group against the document's
/// security-scheme table; names without a matching declaration are skipped
fn resolve_group(doc: &Document, group: &SecurityRequirementMap) -> Vec<SecurityRequirement> {
    let schemes = doc
        .components
        .as_ref()
        .map(|components| &components.security_schemes);

    group
        .iter()
        .filter_map(|(name, scopes)| {
            schemes
                .and_then(|table| table.get(name))
                .map(|scheme| security::resolve(scheme, name, scopes))
        })
        .collect()
}

/// One endpoint per path/verb pair, in document traversal order:
/// paths in declaration order, verbs in the fixed scan order
fn extract_endpoints(
    doc: &Document,
    servers: &[Server],
    default_security: &[SecurityRequirement],
) -> Vec<Endpoint> {
    let mut endpoints = Vec::new();

    for (path, path_item) in &doc.paths {
        for method in HttpMethod::ALL {
            if let Some(operation) = path_item.operation(method) {
                endpoints.push(convert_operation(
                    doc,
                    method,
                    path,
                    operation,
                    path_item,
                    servers,
                    default_security,
                ));
            }
        }
    }

    endpoints
}

#[allow(clippy::too_many_arguments)]
fn convert_operation(
    doc: &Document,
    method: HttpMethod,
    path: &str,
    operation: &Operation,
    path_item: &PathItem,
    servers: &[Server],
    default_security: &[SecurityRequirement],
) -> Endpoint {
    // Path-level parameters first, then operation-level; duplicates by
    // name+location are kept as declared, not deduplicated
    let parameters = path_item
        .parameters
        .iter()
        .chain(operation.parameters.iter())
        .map(convert_parameter)
        .collect();

    let security = resolve_operation_security(doc, operation, default_security);

    Endpoint {
        id: format!("{} {}", method, path),
        method,
        path: path.to_string(),
        operation_id: operation.operation_id.clone(),
        summary: operation.summary.clone(),
        description: operation.description.clone(),
        tags: operation.tags.clone(),
        security,
        parameters,
        request_body: operation.request_body.as_ref().map(convert_request_body),
        responses: convert_responses(operation),
        deprecated: operation.deprecated,
        servers: servers.iter().map(|s| s.url.clone()).collect(),
    }
}

/// Operation-level security semantics:
/// - absent: inherit the document default
/// - present and empty: explicitly no auth
/// - present and non-empty: the operation's own named schemes, resolved
///   against the security-scheme table like global security
fn resolve_operation_security(
    doc: &Document,
    operation: &Operation,
    default_security: &[SecurityRequirement],
) -> Vec<SecurityRequirement> {
    match operation.security.as_ref() {
        None => default_security.to_vec(),
        Some(groups) if groups.is_empty() => vec![SecurityRequirement::none()],
        Some(groups) => resolve_group(doc, &groups[0]),
    }
}

fn convert_parameter(param: &RawParameter) -> Parameter {
    Parameter {
        name: param.name.clone(),
        location: param.location,
        description: param.description.clone(),
        // Path parameters are required regardless of the declared value
        required: param.required || param.location == ParameterLocation::Path,
        schema: normalize_opt(param.schema.as_ref()),
        example: param.example.clone(),
        examples: param.examples.clone(),
    }
}

fn convert_request_body(body: &RawRequestBody) -> RequestBody {
    let content_types: Vec<String> = body.content.keys().cloned().collect();
    let primary = body.content.values().next();

    RequestBody {
        description: body.description.clone(),
        required: body.required,
        content_types,
        schema: normalize_opt(primary.and_then(|media| media.schema.as_ref())),
        examples: primary.and_then(|media| media.examples.clone()),
    }
}

fn convert_responses(operation: &Operation) -> Vec<Response> {
    operation
        .responses
        .iter()
        .map(|(status_code, response)| {
            let content_types: Vec<String> = response.content.keys().cloned().collect();
            let primary: Option<&RawMediaType> = response.content.values().next();

            Response {
                status_code: status_code.clone(),
                description: response.description.clone(),
                content_types,
                schema: primary
                    .and_then(|media| media.schema.as_ref())
                    .map(|schema| normalize_opt(Some(schema))),
                examples: primary.and_then(|media| media.examples.clone()),
            }
        })
        .collect()
}

/// Normalize every named schema under the shared component section
fn extract_schemas(doc: &Document) -> BTreeMap<String, apicanon_common::SchemaNode> {
    let mut schemas = BTreeMap::new();

    if let Some(ref components) = doc.components {
        for (name, schema) in &components.schemas {
            schemas.insert(name.clone(), normalize_opt(Some(schema)));
        }
    }

    schemas
}

/// Union of declared tags and tags discovered on endpoints; member lists are
/// built in endpoint discovery order
fn build_tag_index(doc: &Document, endpoints: &[Endpoint]) -> Vec<Tag> {
    let mut index: IndexMap<String, Tag> = IndexMap::new();

    for declared in &doc.tags {
        index.insert(
            declared.name.clone(),
            Tag {
                name: declared.name.clone(),
                description: declared.description.clone(),
                endpoints: vec![],
            },
        );
    }

    for endpoint in endpoints {
        for tag_name in &endpoint.tags {
            index
                .entry(tag_name.clone())
                .or_insert_with(|| Tag {
                    name: tag_name.clone(),
                    description: None,
                    endpoints: vec![],
                })
                .endpoints
                .push(endpoint.id.clone());
        }
    }

    index.into_values().collect()
}

/// Single pass accumulating method counts and the distinct security and
/// content types seen
fn build_summary(endpoints: &[Endpoint]) -> SpecSummary {
    let mut endpoints_by_method: BTreeMap<String, usize> = BTreeMap::new();
    let mut authentication_types: Vec<String> = Vec::new();
    let mut common_content_types: Vec<String> = Vec::new();

    let mut record = |seen: &mut Vec<String>, value: &str| {
        if !seen.iter().any(|v| v == value) {
            seen.push(value.to_string());
        }
    };

    for endpoint in endpoints {
        *endpoints_by_method
            .entry(endpoint.method.to_string())
            .or_insert(0) += 1;

        for sec in &endpoint.security {
            record(&mut authentication_types, sec.type_name());
        }

        if let Some(ref body) = endpoint.request_body {
            for content_type in &body.content_types {
                record(&mut common_content_types, content_type);
            }
        }

        for response in &endpoint.responses {
            for content_type in &response.content_types {
                record(&mut common_content_types, content_type);
            }
        }
    }

    SpecSummary {
        total_endpoints: endpoints.len(),
        endpoints_by_method,
        authentication_types,
        common_content_types,
    }
}
