//! Canonical API model
//!
//! The normalized, dereferenced, in-memory representation of an API produced
//! by the canonicalizer. Field names are part of the serialization contract:
//! consumers (including the resource-listing layer) expose this model
//! verbatim as JSON.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// The eight standard HTTP verbs recognized in path items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Options,
    Head,
    Trace,
}

impl HttpMethod {
    /// All verbs in the order they are scanned under a path item
    pub const ALL: [HttpMethod; 8] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Patch,
        HttpMethod::Delete,
        HttpMethod::Options,
        HttpMethod::Head,
        HttpMethod::Trace,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
            HttpMethod::Trace => "TRACE",
        }
    }

    /// Parse a method name, case-insensitively
    pub fn parse(s: &str) -> Option<HttpMethod> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Some(HttpMethod::Get),
            "POST" => Some(HttpMethod::Post),
            "PUT" => Some(HttpMethod::Put),
            "PATCH" => Some(HttpMethod::Patch),
            "DELETE" => Some(HttpMethod::Delete),
            "OPTIONS" => Some(HttpMethod::Options),
            "HEAD" => Some(HttpMethod::Head),
            "TRACE" => Some(HttpMethod::Trace),
            _ => None,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a parameter lives in the request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Cookie,
}

impl ParameterLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterLocation::Path => "path",
            ParameterLocation::Query => "query",
            ParameterLocation::Header => "header",
            ParameterLocation::Cookie => "cookie",
        }
    }
}

/// Where an API key is carried
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiKeyLocation {
    Header,
    Query,
    Cookie,
}

impl ApiKeyLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiKeyLocation::Header => "header",
            ApiKeyLocation::Query => "query",
            ApiKeyLocation::Cookie => "cookie",
        }
    }
}

/// Canonical description of one authentication mechanism
///
/// Every variant carries a generated human-readable `instruction` string that
/// is the queryable explanation of how to authenticate; consumers use it
/// verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SecurityRequirement {
    #[serde(rename = "apiKey")]
    ApiKey {
        /// Header/query/cookie parameter name
        name: String,
        #[serde(rename = "in")]
        location: ApiKeyLocation,
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        instruction: String,
    },

    #[serde(rename = "http")]
    Http {
        /// HTTP auth scheme: basic, bearer, digest, ...
        scheme: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        instruction: String,
    },

    #[serde(rename = "oauth2")]
    OAuth2 {
        flows: Vec<OAuthFlow>,
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        instruction: String,
    },

    #[serde(rename = "openIdConnect")]
    OpenIdConnect {
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        instruction: String,
    },

    #[serde(rename = "none")]
    None { instruction: String },
}

impl SecurityRequirement {
    /// The explicit "no authentication" requirement
    pub fn none() -> Self {
        SecurityRequirement::None {
            instruction: "No authentication required".to_string(),
        }
    }

    /// Discriminant name as it appears in serialized output
    pub fn type_name(&self) -> &'static str {
        match self {
            SecurityRequirement::ApiKey { .. } => "apiKey",
            SecurityRequirement::Http { .. } => "http",
            SecurityRequirement::OAuth2 { .. } => "oauth2",
            SecurityRequirement::OpenIdConnect { .. } => "openIdConnect",
            SecurityRequirement::None { .. } => "none",
        }
    }

    pub fn instruction(&self) -> &str {
        match self {
            SecurityRequirement::ApiKey { instruction, .. }
            | SecurityRequirement::Http { instruction, .. }
            | SecurityRequirement::OAuth2 { instruction, .. }
            | SecurityRequirement::OpenIdConnect { instruction, .. }
            | SecurityRequirement::None { instruction } => instruction,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, SecurityRequirement::None { .. })
    }
}

/// One OAuth2 flow with the URLs relevant to its kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OAuthFlow {
    #[serde(rename = "implicit")]
    Implicit {
        #[serde(rename = "authorizationUrl")]
        authorization_url: String,
        scopes: Vec<String>,
    },

    #[serde(rename = "password")]
    Password {
        #[serde(rename = "tokenUrl")]
        token_url: String,
        scopes: Vec<String>,
    },

    #[serde(rename = "clientCredentials")]
    ClientCredentials {
        #[serde(rename = "tokenUrl")]
        token_url: String,
        scopes: Vec<String>,
    },

    #[serde(rename = "authorizationCode")]
    AuthorizationCode {
        #[serde(rename = "authorizationUrl")]
        authorization_url: String,
        #[serde(rename = "tokenUrl")]
        token_url: String,
        scopes: Vec<String>,
    },
}

/// Type tag of a schema node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
    Null,
    #[default]
    Any,
}

impl SchemaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaType::String => "string",
            SchemaType::Number => "number",
            SchemaType::Integer => "integer",
            SchemaType::Boolean => "boolean",
            SchemaType::Array => "array",
            SchemaType::Object => "object",
            SchemaType::Null => "null",
            SchemaType::Any => "any",
        }
    }
}

/// Recursive structural description of a JSON value's shape and constraints
///
/// Finite by construction: inputs are reference-free, so normalization
/// terminates without a depth limit. Validation facets and literal
/// example/default values are copied verbatim from the source document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SchemaNode {
    #[serde(rename = "type")]
    pub schema_type: SchemaType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Required property names, for object nodes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,

    /// Declared properties, for object nodes; `Some` with an empty map when
    /// the source object declares no properties
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, SchemaNode>>,

    /// Element schema, for array nodes; unset means "array of unknown"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaNode>>,

    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    #[serde(rename = "minLength", default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,

    #[serde(rename = "maxLength", default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,

    #[serde(rename = "oneOf", default, skip_serializing_if = "Option::is_none")]
    pub one_of: Option<Vec<SchemaNode>>,

    #[serde(rename = "anyOf", default, skip_serializing_if = "Option::is_none")]
    pub any_of: Option<Vec<SchemaNode>>,

    #[serde(rename = "allOf", default, skip_serializing_if = "Option::is_none")]
    pub all_of: Option<Vec<SchemaNode>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,

    #[serde(rename = "default", default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nullable: Option<bool>,

    #[serde(rename = "readOnly", default, skip_serializing_if = "Option::is_none")]
    pub read_only: Option<bool>,

    #[serde(rename = "writeOnly", default, skip_serializing_if = "Option::is_none")]
    pub write_only: Option<bool>,
}

impl SchemaNode {
    /// A node with no known shape
    pub fn any() -> Self {
        SchemaNode::default()
    }
}

/// One request parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,

    #[serde(rename = "in")]
    pub location: ParameterLocation,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Path parameters are always required regardless of the declared value
    pub required: bool,

    pub schema: SchemaNode,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub examples: Option<BTreeMap<String, Value>>,
}

/// Request body of an endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub required: bool,

    /// Declared content types in declaration order; the first is primary
    #[serde(rename = "contentTypes")]
    pub content_types: Vec<String>,

    /// Schema of the primary content type
    pub schema: SchemaNode,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub examples: Option<BTreeMap<String, Value>>,
}

/// One declared response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// Status code as declared, including the literal "default"
    #[serde(rename = "statusCode")]
    pub status_code: String,

    pub description: String,

    #[serde(rename = "contentTypes")]
    pub content_types: Vec<String>,

    /// Schema of the primary content type, if any content is declared
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaNode>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub examples: Option<BTreeMap<String, Value>>,
}

/// One method+path operation with its parameters, body, responses, and security
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Endpoint {
    /// Identity: `"{METHOD} {path}"`, unique within a specification
    pub id: String,

    pub method: HttpMethod,

    /// Path template, e.g. `/users/{id}`
    pub path: String,

    #[serde(
        rename = "operationId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub operation_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Operation-level security, already resolved; overrides the global list
    pub security: Vec<SecurityRequirement>,

    /// Path-level and operation-level parameters merged, path-level first
    pub parameters: Vec<Parameter>,

    #[serde(
        rename = "requestBody",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub request_body: Option<RequestBody>,

    pub responses: Vec<Response>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub deprecated: bool,

    /// Server URLs in scope for this endpoint
    pub servers: Vec<String>,
}

/// Contact information from the document's info block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Contact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// One server the API is reachable at
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Server {
    pub url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<BTreeMap<String, ServerVariable>>,
}

/// A templated variable in a server URL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerVariable {
    pub default: String,

    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A tag with the endpoints that reference it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Member endpoint ids in endpoint discovery order
    pub endpoints: Vec<String>,
}

/// Aggregate statistics over all endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SpecSummary {
    #[serde(rename = "totalEndpoints")]
    pub total_endpoints: usize,

    #[serde(rename = "endpointsByMethod")]
    pub endpoints_by_method: BTreeMap<String, usize>,

    /// Distinct security types seen, in discovery order
    #[serde(rename = "authenticationTypes")]
    pub authentication_types: Vec<String>,

    /// Distinct request/response content types seen, in discovery order
    #[serde(rename = "commonContentTypes")]
    pub common_content_types: Vec<String>,
}

/// Canonical API specification
///
/// Built once, atomically, from a single input document and never mutated
/// afterward. Owns every endpoint, parameter, and schema node exclusively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiSpec {
    pub title: String,

    pub version: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(
        rename = "termsOfService",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub terms_of_service: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,

    /// Never empty: a placeholder server is synthesized when the document
    /// declares none
    pub servers: Vec<Server>,

    #[serde(rename = "defaultSecurity")]
    pub default_security: Vec<SecurityRequirement>,

    /// Endpoints in document traversal order: path, then method
    pub endpoints: Vec<Endpoint>,

    /// Reusable schemas from the document's component section
    pub schemas: BTreeMap<String, SchemaNode>,

    pub tags: Vec<Tag>,

    pub summary: SpecSummary,
}
