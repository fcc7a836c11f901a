//! Request artifact generation
//!
//! Produces curl commands, raw HTTP requests, and JavaScript/Python snippets
//! for one canonical endpoint, plus plain-language step-by-step
//! instructions and an aggregate execution guide.

use crate::example::{ExampleGenerator, OptionalFieldPolicy};
use crate::templates;
use apicanon_common::{
    ApiKeyLocation, CanonError, Endpoint, Parameter, ParameterLocation, Result,
    SecurityRequirement,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tera::{Context, Tera};
use url::Url;

/// Supported code targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeTarget {
    Curl,
    Http,
    JavaScript,
    Python,
}

impl CodeTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            CodeTarget::Curl => "curl",
            CodeTarget::Http => "http",
            CodeTarget::JavaScript => "javascript",
            CodeTarget::Python => "python",
        }
    }
}

/// How path/query placeholders are filled in a built URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UrlMode {
    /// `{name}` placeholders, for display
    Templated,
    /// Parameter example values where present, placeholders otherwise
    Example,
}

/// One assembled request header
#[derive(Debug, Clone, Serialize)]
struct Header {
    name: String,
    value: String,
}

/// Per-language code examples for one endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeExamples {
    pub javascript: String,
    pub python: String,
    pub curl: String,
}

/// Everything a caller needs to execute one endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionGuide {
    pub endpoint: Endpoint,

    #[serde(rename = "curlExample")]
    pub curl_example: String,

    #[serde(rename = "httpRequestExample")]
    pub http_request_example: String,

    #[serde(rename = "codeExamples")]
    pub code_examples: CodeExamples,

    #[serde(rename = "stepByStepInstructions")]
    pub step_by_step_instructions: Vec<String>,
}

/// Request artifact generator
///
/// Pure over its inputs: the same endpoint, base URL, and optional-field
/// policy always produce the same output.
pub struct RequestGenerator {
    tera: Tera,
    examples: ExampleGenerator,
}

impl RequestGenerator {
    pub fn new() -> Result<Self> {
        Self::with_policy(OptionalFieldPolicy::default())
    }

    pub fn with_policy(policy: OptionalFieldPolicy) -> Result<Self> {
        let tera = templates::load_templates()?;
        Ok(Self {
            tera,
            examples: ExampleGenerator::new(policy),
        })
    }

    /// Generate one artifact for the selected target
    pub fn generate(&self, endpoint: &Endpoint, base_url: &str, target: CodeTarget) -> Result<String> {
        match target {
            CodeTarget::Curl => self.curl(endpoint, base_url),
            CodeTarget::Http => self.http_request(endpoint, base_url),
            CodeTarget::JavaScript => self.javascript(endpoint, base_url),
            CodeTarget::Python => self.python(endpoint, base_url),
        }
    }

    /// Generate the complete execution guide for an endpoint
    pub fn execution_guide(&self, endpoint: &Endpoint, base_url: &str) -> Result<ExecutionGuide> {
        Ok(ExecutionGuide {
            endpoint: endpoint.clone(),
            curl_example: self.curl(endpoint, base_url)?,
            http_request_example: self.http_request(endpoint, base_url)?,
            code_examples: CodeExamples {
                javascript: self.javascript(endpoint, base_url)?,
                python: self.python(endpoint, base_url)?,
                curl: self.curl(endpoint, base_url)?,
            },
            step_by_step_instructions: self.step_by_step(endpoint),
        })
    }

    /// Shell command with templated URL, headers, and an example body
    pub fn curl(&self, endpoint: &Endpoint, base_url: &str) -> Result<String> {
        let mut context = Context::new();
        context.insert("method", endpoint.method.as_str());
        context.insert("url", &self.build_url(endpoint, base_url, UrlMode::Templated));
        context.insert("headers", &self.headers(endpoint));
        self.insert_body(endpoint, &mut context);

        self.render("curl", &context)
    }

    /// Raw wire text: request line, Host, headers, blank line, body
    pub fn http_request(&self, endpoint: &Endpoint, base_url: &str) -> Result<String> {
        let parsed = Url::parse(base_url)
            .map_err(|e| CanonError::Generation(format!("Invalid base URL {}: {}", base_url, e)))?;

        let host = match parsed.port() {
            Some(port) => format!("{}:{}", parsed.host_str().unwrap_or_default(), port),
            None => parsed.host_str().unwrap_or_default().to_string(),
        };
        let base_path = parsed.path().trim_end_matches('/');
        let path_and_query = format!(
            "{}{}",
            base_path,
            self.build_path(endpoint, UrlMode::Templated)
        );

        let mut context = Context::new();
        context.insert("method", endpoint.method.as_str());
        context.insert("path_and_query", &path_and_query);
        context.insert("host", &host);
        context.insert("headers", &self.headers(endpoint));
        self.insert_body(endpoint, &mut context);

        self.render("http", &context)
    }

    /// fetch-based JavaScript snippet with example parameter values
    pub fn javascript(&self, endpoint: &Endpoint, base_url: &str) -> Result<String> {
        let mut context = Context::new();
        context.insert("method", endpoint.method.as_str());
        context.insert("url", &self.build_url(endpoint, base_url, UrlMode::Example));
        context.insert("headers", &self.headers(endpoint));
        self.insert_body(endpoint, &mut context);

        self.render("javascript", &context)
    }

    /// requests-based Python snippet with example parameter values
    pub fn python(&self, endpoint: &Endpoint, base_url: &str) -> Result<String> {
        let headers = self.headers(endpoint);
        let url = self.build_url(endpoint, base_url, UrlMode::Example);
        let has_body = endpoint.request_body.is_some();

        let mut request_args = vec![format!("'{}'", url)];
        if !headers.is_empty() {
            request_args.push("headers=headers".to_string());
        }
        if has_body {
            request_args.push("json=data".to_string());
        }

        let mut context = Context::new();
        context.insert("method_lower", &endpoint.method.as_str().to_lowercase());
        context.insert("headers", &headers);
        context.insert("request_args", &request_args.join(", "));
        self.insert_body(endpoint, &mut context);

        self.render("python", &context)
    }

    /// Ordered plain-language instructions for calling the endpoint
    pub fn step_by_step(&self, endpoint: &Endpoint) -> Vec<String> {
        let mut steps = Vec::new();

        steps.push(format!(
            "Send a {} request to endpoint: {}",
            endpoint.method, endpoint.path
        ));

        if let Some(first) = endpoint.security.first() {
            if !first.is_none() {
                steps.push(format!("Authentication: {}", first.instruction()));
            }
        }

        let path_params = params_in(endpoint, ParameterLocation::Path);
        if !path_params.is_empty() {
            let guidance: Vec<String> = path_params
                .iter()
                .map(|p| {
                    format!(
                        "{{{}}} with your {}",
                        p.name,
                        p.description.as_deref().unwrap_or(&p.name)
                    )
                })
                .collect();
            steps.push(format!("Replace path parameters: {}", guidance.join(", ")));
        }

        let query_params = params_in(endpoint, ParameterLocation::Query);
        let describe = |params: &[&Parameter]| -> String {
            params
                .iter()
                .map(|p| format!("{} ({})", p.name, p.schema.schema_type.as_str()))
                .collect::<Vec<_>>()
                .join(", ")
        };

        let required: Vec<&Parameter> = query_params.iter().copied().filter(|p| p.required).collect();
        if !required.is_empty() {
            steps.push(format!("Required query parameters: {}", describe(&required)));
        }
        let optional: Vec<&Parameter> = query_params.iter().copied().filter(|p| !p.required).collect();
        if !optional.is_empty() {
            steps.push(format!("Optional query parameters: {}", describe(&optional)));
        }

        if let Some(ref body) = endpoint.request_body {
            let content_type = body
                .content_types
                .first()
                .map(String::as_str)
                .unwrap_or("application/json");
            steps.push(format!("Set Content-Type header to: {}", content_type));

            let fields = if body.schema.required.is_empty() {
                "see schema".to_string()
            } else {
                body.schema.required.join(", ")
            };
            steps.push(format!("Include request body with required fields: {}", fields));
        }

        let success = endpoint
            .responses
            .iter()
            .find(|r| r.status_code.starts_with('2') || r.status_code == "default");
        if let Some(response) = success {
            steps.push(format!(
                "Expected success response: {} - {}",
                response.status_code, response.description
            ));
        }

        steps
    }

    fn render(&self, template: &str, context: &Context) -> Result<String> {
        self.tera
            .render(template, context)
            .map_err(|e| CanonError::Generation(format!("Template error: {}", e)))
    }

    fn insert_body(&self, endpoint: &Endpoint, context: &mut Context) {
        match endpoint.request_body {
            Some(ref body) => {
                let example = self.examples.generate(&body.schema);
                let pretty =
                    serde_json::to_string_pretty(&example).unwrap_or_else(|_| "null".to_string());
                context.insert("has_body", &true);
                context.insert("body", &pretty);
            }
            None => context.insert("has_body", &false),
        }
    }

    /// Base URL (trailing slash trimmed) plus the substituted path and query
    fn build_url(&self, endpoint: &Endpoint, base_url: &str, mode: UrlMode) -> String {
        format!(
            "{}{}",
            base_url.trim_end_matches('/'),
            self.build_path(endpoint, mode)
        )
    }

    fn build_path(&self, endpoint: &Endpoint, mode: UrlMode) -> String {
        let mut path = endpoint.path.clone();

        for param in params_in(endpoint, ParameterLocation::Path) {
            let placeholder = format!("{{{}}}", param.name);
            let value = match mode {
                UrlMode::Templated => placeholder.clone(),
                UrlMode::Example => param
                    .example
                    .as_ref()
                    .map(plain_value)
                    .unwrap_or_else(|| placeholder.clone()),
            };
            path = path.replace(&placeholder, &value);
        }

        let query_params = params_in(endpoint, ParameterLocation::Query);
        if !query_params.is_empty() {
            let query: Vec<String> = query_params
                .iter()
                .map(|p| match mode {
                    UrlMode::Templated => format!("{}={{{}}}", p.name, p.name),
                    UrlMode::Example => format!(
                        "{}={}",
                        p.name,
                        p.example
                            .as_ref()
                            .map(plain_value)
                            .unwrap_or_else(|| "value".to_string())
                    ),
                })
                .collect();
            path.push('?');
            path.push_str(&query.join("&"));
        }

        path
    }

    /// Content-Type, header parameters, then the auth header last
    fn headers(&self, endpoint: &Endpoint) -> Vec<Header> {
        let mut headers = Vec::new();

        if let Some(ref body) = endpoint.request_body {
            headers.push(Header {
                name: "Content-Type".to_string(),
                value: body
                    .content_types
                    .first()
                    .cloned()
                    .unwrap_or_else(|| "application/json".to_string()),
            });
        }

        for param in params_in(endpoint, ParameterLocation::Header) {
            headers.push(Header {
                name: param.name.clone(),
                value: param
                    .example
                    .as_ref()
                    .map(plain_value)
                    .unwrap_or_else(|| format!("{{{}}}", param.name)),
            });
        }

        if let Some(auth) = auth_header(endpoint) {
            headers.push(auth);
        }

        headers
    }
}

/// Auth header derived from the endpoint's first security requirement only
fn auth_header(endpoint: &Endpoint) -> Option<Header> {
    match endpoint.security.first()? {
        SecurityRequirement::ApiKey { name, location, .. }
            if *location == ApiKeyLocation::Header =>
        {
            Some(Header {
                name: name.clone(),
                value: "{YOUR_API_KEY}".to_string(),
            })
        }

        SecurityRequirement::Http { scheme, .. } if scheme == "bearer" => Some(Header {
            name: "Authorization".to_string(),
            value: "Bearer {YOUR_TOKEN}".to_string(),
        }),

        SecurityRequirement::Http { scheme, .. } if scheme == "basic" => Some(Header {
            name: "Authorization".to_string(),
            value: "Basic {BASE64_CREDENTIALS}".to_string(),
        }),

        _ => None,
    }
}

fn params_in(endpoint: &Endpoint, location: ParameterLocation) -> Vec<&Parameter> {
    endpoint
        .parameters
        .iter()
        .filter(|p| p.location == location)
        .collect()
}

/// Example values render as their bare string content; everything else as JSON
fn plain_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
