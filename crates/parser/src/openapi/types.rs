//! Raw OpenAPI 3.x type definitions
//!
//! Serde representation of a dereferenced document. Path, content, and
//! response maps preserve declaration order (`IndexMap`) because endpoint
//! order and primary content types are defined by it. Unknown fields,
//! including any leftover `$ref` or Swagger v2 keys, are carried in the
//! flattened extension maps and otherwise ignored.

use apicanon_common::{HttpMethod, ParameterLocation};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A security requirement group: AND-combined scheme names with their scopes
pub type SecurityRequirementMap = IndexMap<String, Vec<String>>;

/// OpenAPI document root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// OpenAPI version string (e.g. "3.0.3")
    #[serde(default)]
    pub openapi: Option<String>,

    /// API metadata; `title` and `version` are mandatory
    pub info: Info,

    #[serde(default)]
    pub servers: Vec<RawServer>,

    /// Paths in declaration order
    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,

    #[serde(default)]
    pub components: Option<Components>,

    /// Top-level security: OR of AND-groups
    #[serde(default)]
    pub security: Option<Vec<SecurityRequirementMap>>,

    #[serde(default)]
    pub tags: Vec<RawTag>,
}

/// API information block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Info {
    pub title: String,

    pub version: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(rename = "termsOfService", default)]
    pub terms_of_service: Option<String>,

    #[serde(default)]
    pub contact: Option<RawContact>,
}

/// Contact object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawContact {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub email: Option<String>,
}

/// Server entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawServer {
    pub url: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub variables: Option<BTreeMap<String, RawServerVariable>>,
}

/// Templated server URL variable
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawServerVariable {
    pub default: String,

    #[serde(rename = "enum", default)]
    pub enum_values: Option<Vec<String>>,

    #[serde(default)]
    pub description: Option<String>,
}

/// Declared tag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawTag {
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,
}

/// Operations for one path
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PathItem {
    #[serde(default)]
    pub get: Option<Operation>,

    #[serde(default)]
    pub post: Option<Operation>,

    #[serde(default)]
    pub put: Option<Operation>,

    #[serde(default)]
    pub patch: Option<Operation>,

    #[serde(default)]
    pub delete: Option<Operation>,

    #[serde(default)]
    pub options: Option<Operation>,

    #[serde(default)]
    pub head: Option<Operation>,

    #[serde(default)]
    pub trace: Option<Operation>,

    /// Parameters shared by every operation under this path
    #[serde(default)]
    pub parameters: Vec<RawParameter>,
}

impl PathItem {
    /// Operation declared for a verb, if any
    pub fn operation(&self, method: HttpMethod) -> Option<&Operation> {
        match method {
            HttpMethod::Get => self.get.as_ref(),
            HttpMethod::Post => self.post.as_ref(),
            HttpMethod::Put => self.put.as_ref(),
            HttpMethod::Patch => self.patch.as_ref(),
            HttpMethod::Delete => self.delete.as_ref(),
            HttpMethod::Options => self.options.as_ref(),
            HttpMethod::Head => self.head.as_ref(),
            HttpMethod::Trace => self.trace.as_ref(),
        }
    }
}

/// One HTTP operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Operation {
    #[serde(rename = "operationId", default)]
    pub operation_id: Option<String>,

    #[serde(default)]
    pub summary: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub parameters: Vec<RawParameter>,

    #[serde(rename = "requestBody", default)]
    pub request_body: Option<RawRequestBody>,

    /// Responses in declaration order, keyed by status code or "default"
    #[serde(default)]
    pub responses: IndexMap<String, RawResponse>,

    /// Operation-level security; `Some(vec![])` means explicitly no auth,
    /// `None` means inherit the document default
    #[serde(default)]
    pub security: Option<Vec<SecurityRequirementMap>>,

    #[serde(default)]
    pub deprecated: bool,
}

/// Parameter definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawParameter {
    pub name: String,

    #[serde(rename = "in")]
    pub location: ParameterLocation,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub required: bool,

    #[serde(default)]
    pub schema: Option<RawSchema>,

    #[serde(default)]
    pub example: Option<Value>,

    #[serde(default)]
    pub examples: Option<BTreeMap<String, Value>>,
}

/// Request body definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRequestBody {
    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub required: bool,

    /// Media types in declaration order; the first is primary
    #[serde(default)]
    pub content: IndexMap<String, RawMediaType>,
}

/// Response definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawResponse {
    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub content: IndexMap<String, RawMediaType>,
}

/// Media type entry
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RawMediaType {
    #[serde(default)]
    pub schema: Option<RawSchema>,

    #[serde(default)]
    pub examples: Option<BTreeMap<String, Value>>,
}

/// JSON-Schema-like node as it appears in the document
///
/// `properties: None` and `properties: Some({})` are distinct: the former is
/// an object with no declared properties map, the latter an explicitly empty
/// one. Both normalize to an empty property map.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RawSchema {
    #[serde(rename = "type", default)]
    pub schema_type: Option<String>,

    #[serde(default)]
    pub format: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub properties: Option<IndexMap<String, RawSchema>>,

    #[serde(default)]
    pub required: Vec<String>,

    #[serde(default)]
    pub items: Option<Box<RawSchema>>,

    #[serde(rename = "enum", default)]
    pub enum_values: Option<Vec<Value>>,

    #[serde(default)]
    pub pattern: Option<String>,

    #[serde(rename = "minLength", default)]
    pub min_length: Option<u64>,

    #[serde(rename = "maxLength", default)]
    pub max_length: Option<u64>,

    #[serde(default)]
    pub minimum: Option<f64>,

    #[serde(default)]
    pub maximum: Option<f64>,

    #[serde(rename = "oneOf", default)]
    pub one_of: Option<Vec<RawSchema>>,

    #[serde(rename = "anyOf", default)]
    pub any_of: Option<Vec<RawSchema>>,

    #[serde(rename = "allOf", default)]
    pub all_of: Option<Vec<RawSchema>>,

    #[serde(default)]
    pub example: Option<Value>,

    #[serde(rename = "default", default)]
    pub default_value: Option<Value>,

    #[serde(default)]
    pub nullable: Option<bool>,

    #[serde(rename = "readOnly", default)]
    pub read_only: Option<bool>,

    #[serde(rename = "writeOnly", default)]
    pub write_only: Option<bool>,

    /// Anything else ($ref leftovers, vendor extensions, v2 keys)
    #[serde(flatten)]
    pub extensions: BTreeMap<String, Value>,
}

/// Reusable components
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Components {
    #[serde(default)]
    pub schemas: IndexMap<String, RawSchema>,

    #[serde(rename = "securitySchemes", default)]
    pub security_schemes: IndexMap<String, RawSecurityScheme>,
}

/// Security scheme declaration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSecurityScheme {
    /// apiKey, http, oauth2, openIdConnect, or anything else
    #[serde(rename = "type", default)]
    pub scheme_type: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Parameter name, for apiKey
    #[serde(default)]
    pub name: Option<String>,

    /// Parameter location, for apiKey
    #[serde(rename = "in", default)]
    pub location: Option<String>,

    /// HTTP auth scheme: basic, bearer, ...
    #[serde(default)]
    pub scheme: Option<String>,

    /// OAuth2 flows
    #[serde(default)]
    pub flows: Option<RawOAuthFlows>,

    #[serde(rename = "openIdConnectUrl", default)]
    pub open_id_connect_url: Option<String>,
}

/// The four known OAuth2 flow kinds
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RawOAuthFlows {
    #[serde(default)]
    pub implicit: Option<RawOAuthFlow>,

    #[serde(default)]
    pub password: Option<RawOAuthFlow>,

    #[serde(rename = "clientCredentials", default)]
    pub client_credentials: Option<RawOAuthFlow>,

    #[serde(rename = "authorizationCode", default)]
    pub authorization_code: Option<RawOAuthFlow>,
}

/// One OAuth2 flow declaration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RawOAuthFlow {
    #[serde(rename = "authorizationUrl", default)]
    pub authorization_url: Option<String>,

    #[serde(rename = "tokenUrl", default)]
    pub token_url: Option<String>,

    #[serde(default)]
    pub scopes: IndexMap<String, String>,
}
