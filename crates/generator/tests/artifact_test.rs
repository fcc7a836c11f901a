//! Integration tests for request artifact generation

use apicanon_common::{
    Endpoint, HttpMethod, Parameter, ParameterLocation, RequestBody, Response, SchemaNode,
    SchemaType, SecurityRequirement,
};
use apicanon_generator::{CodeTarget, OptionalFieldPolicy, RequestGenerator};
use serde_json::json;
use std::collections::BTreeMap;

const BASE_URL: &str = "https://api.example.com";

fn string_schema() -> SchemaNode {
    SchemaNode {
        schema_type: SchemaType::String,
        ..SchemaNode::default()
    }
}

fn endpoint(method: HttpMethod, path: &str) -> Endpoint {
    Endpoint {
        id: format!("{} {}", method, path),
        method,
        path: path.to_string(),
        operation_id: None,
        summary: None,
        description: None,
        tags: Vec::new(),
        security: Vec::new(),
        parameters: Vec::new(),
        request_body: None,
        responses: Vec::new(),
        deprecated: false,
        servers: Vec::new(),
    }
}

fn bearer() -> SecurityRequirement {
    SecurityRequirement::Http {
        scheme: "bearer".to_string(),
        description: None,
        instruction: "Include bearer token in Authorization header: \"Bearer <token>\""
            .to_string(),
    }
}

fn get_pet() -> Endpoint {
    let mut ep = endpoint(HttpMethod::Get, "/pets/{id}");
    ep.security = vec![bearer()];
    ep.parameters.push(Parameter {
        name: "id".to_string(),
        location: ParameterLocation::Path,
        description: Some("pet identifier".to_string()),
        required: true,
        schema: string_schema(),
        example: Some(json!("pet-42")),
        examples: None,
    });
    ep.responses.push(Response {
        status_code: "200".to_string(),
        description: "A pet".to_string(),
        content_types: vec!["application/json".to_string()],
        schema: None,
        examples: None,
    });
    ep
}

fn create_pet() -> Endpoint {
    let mut properties = BTreeMap::new();
    properties.insert("name".to_string(), string_schema());
    properties.insert("nickname".to_string(), string_schema());

    let mut ep = endpoint(HttpMethod::Post, "/pets");
    ep.security = vec![bearer()];
    ep.request_body = Some(RequestBody {
        description: None,
        required: true,
        content_types: vec!["application/json".to_string()],
        schema: SchemaNode {
            schema_type: SchemaType::Object,
            required: vec!["name".to_string()],
            properties: Some(properties),
            ..SchemaNode::default()
        },
        examples: None,
    });
    ep.responses.push(Response {
        status_code: "201".to_string(),
        description: "Created".to_string(),
        content_types: vec!["application/json".to_string()],
        schema: None,
        examples: None,
    });
    ep
}

#[test]
fn test_curl_templated_url_and_auth_header() {
    let generator = RequestGenerator::new().unwrap();
    let curl = generator.curl(&get_pet(), BASE_URL).unwrap();

    assert!(curl.contains("curl -X GET 'https://api.example.com/pets/{id}'"));
    assert!(curl.contains("-H 'Authorization: Bearer {YOUR_TOKEN}'"));
    assert!(!curl.contains("-d"));
}

#[test]
fn test_curl_body_includes_required_fields() {
    let generator = RequestGenerator::with_policy(OptionalFieldPolicy::Omit).unwrap();
    let curl = generator.curl(&create_pet(), BASE_URL).unwrap();

    assert!(curl.contains("-H 'Content-Type: application/json'"));
    assert!(curl.contains("\"name\""));
    assert!(!curl.contains("\"nickname\""));
}

#[test]
fn test_optional_fields_included_by_default() {
    let generator = RequestGenerator::new().unwrap();
    let curl = generator.curl(&create_pet(), BASE_URL).unwrap();

    assert!(curl.contains("\"name\""));
    assert!(curl.contains("\"nickname\""));
}

#[test]
fn test_http_request_wire_format() {
    let generator = RequestGenerator::new().unwrap();
    let raw = generator.http_request(&create_pet(), BASE_URL).unwrap();

    assert!(raw.starts_with("POST /pets HTTP/1.1"));
    assert!(raw.contains("Host: api.example.com"));
    assert!(raw.contains("Content-Type: application/json"));
    assert!(raw.contains("Authorization: Bearer {YOUR_TOKEN}"));
    assert!(raw.contains("\"name\""));
}

#[test]
fn test_http_request_base_path_and_port() {
    let generator = RequestGenerator::new().unwrap();
    let raw = generator
        .http_request(&get_pet(), "https://api.example.com:8443/v2/")
        .unwrap();

    assert!(raw.starts_with("GET /v2/pets/{id} HTTP/1.1"));
    assert!(raw.contains("Host: api.example.com:8443"));
}

#[test]
fn test_javascript_uses_example_values() {
    let generator = RequestGenerator::new().unwrap();
    let js = generator.javascript(&get_pet(), BASE_URL).unwrap();

    assert!(js.contains("await fetch('https://api.example.com/pets/pet-42'"));
    assert!(js.contains("method: 'GET'"));
    assert!(js.contains("'Authorization': 'Bearer {YOUR_TOKEN}'"));
}

#[test]
fn test_python_request_args() {
    let generator = RequestGenerator::new().unwrap();
    let py = generator.python(&create_pet(), BASE_URL).unwrap();

    assert!(py.contains("import requests"));
    assert!(py.contains(
        "response = requests.post('https://api.example.com/pets', headers=headers, json=data)"
    ));
    assert!(py.contains("'Authorization': 'Bearer {YOUR_TOKEN}'"));
}

#[test]
fn test_query_parameters_in_url() {
    let mut ep = endpoint(HttpMethod::Get, "/pets");
    ep.parameters.push(Parameter {
        name: "limit".to_string(),
        location: ParameterLocation::Query,
        description: None,
        required: true,
        schema: SchemaNode {
            schema_type: SchemaType::Integer,
            ..SchemaNode::default()
        },
        example: Some(json!(25)),
        examples: None,
    });
    ep.parameters.push(Parameter {
        name: "status".to_string(),
        location: ParameterLocation::Query,
        description: None,
        required: false,
        schema: string_schema(),
        example: None,
        examples: None,
    });

    let generator = RequestGenerator::new().unwrap();

    let curl = generator.curl(&ep, BASE_URL).unwrap();
    assert!(curl.contains("'https://api.example.com/pets?limit={limit}&status={status}'"));

    let js = generator.javascript(&ep, BASE_URL).unwrap();
    assert!(js.contains("'https://api.example.com/pets?limit=25&status=value'"));
}

#[test]
fn test_step_by_step_instructions() {
    let generator = RequestGenerator::new().unwrap();
    let steps = generator.step_by_step(&create_pet());

    assert_eq!(steps[0], "Send a POST request to endpoint: /pets");
    assert!(steps.contains(&format!(
        "Authentication: {}",
        "Include bearer token in Authorization header: \"Bearer <token>\""
    )));
    assert!(steps.contains(&"Set Content-Type header to: application/json".to_string()));
    assert!(steps.contains(&"Include request body with required fields: name".to_string()));
    assert!(steps.contains(&"Expected success response: 201 - Created".to_string()));
}

#[test]
fn test_step_by_step_path_parameters() {
    let generator = RequestGenerator::new().unwrap();
    let steps = generator.step_by_step(&get_pet());

    assert!(steps.contains(&"Replace path parameters: {id} with your pet identifier".to_string()));
}

#[test]
fn test_generate_dispatches_by_target() {
    let generator = RequestGenerator::new().unwrap();
    let ep = get_pet();

    for target in [
        CodeTarget::Curl,
        CodeTarget::Http,
        CodeTarget::JavaScript,
        CodeTarget::Python,
    ] {
        let artifact = generator.generate(&ep, BASE_URL, target).unwrap();
        assert!(!artifact.is_empty(), "empty artifact for {}", target.as_str());
    }
}

#[test]
fn test_execution_guide_serialization() {
    let generator = RequestGenerator::new().unwrap();
    let guide = generator.execution_guide(&create_pet(), BASE_URL).unwrap();

    let json = serde_json::to_value(&guide).unwrap();
    assert!(json["curlExample"].is_string());
    assert!(json["httpRequestExample"].is_string());
    assert!(json["codeExamples"]["javascript"].is_string());
    assert!(json["codeExamples"]["python"].is_string());
    assert!(json["codeExamples"]["curl"].is_string());
    assert!(json["stepByStepInstructions"].is_array());
    assert_eq!(json["endpoint"]["id"], "POST /pets");
}

#[test]
fn test_invalid_base_url_is_reported() {
    let generator = RequestGenerator::new().unwrap();
    let err = generator.http_request(&get_pet(), "not a url").unwrap_err();

    assert!(err.to_string().contains("Invalid base URL"));
}
