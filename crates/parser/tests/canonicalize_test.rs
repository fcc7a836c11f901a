//! Integration tests for the canonicalizer

use apicanon_common::{
    ApiSpec, HttpMethod, ParameterLocation, SchemaType, SecurityRequirement,
};
use apicanon_parser::OpenApiParser;

const PETSTORE: &str = r##"{
    "openapi": "3.0.0",
    "info": {
        "title": "Petstore",
        "version": "1.2.3",
        "description": "A sample pet store",
        "contact": {"name": "API Support", "email": "support@example.com"}
    },
    "tags": [
        {"name": "pets", "description": "Pet operations"}
    ],
    "security": [
        {"bearerAuth": []},
        {"apiKeyAuth": []}
    ],
    "paths": {
        "/pets": {
            "parameters": [
                {"name": "X-Tenant", "in": "header", "schema": {"type": "string"}}
            ],
            "get": {
                "operationId": "listPets",
                "summary": "List all pets",
                "tags": ["pets"],
                "parameters": [
                    {"name": "limit", "in": "query", "schema": {"type": "integer"}}
                ],
                "responses": {
                    "200": {
                        "description": "A list of pets",
                        "content": {
                            "application/json": {
                                "schema": {
                                    "type": "array",
                                    "items": {"type": "object"}
                                }
                            }
                        }
                    }
                }
            },
            "post": {
                "operationId": "createPet",
                "tags": ["pets"],
                "requestBody": {
                    "required": true,
                    "content": {
                        "application/json": {
                            "schema": {
                                "type": "object",
                                "required": ["name"],
                                "properties": {
                                    "name": {"type": "string"},
                                    "age": {"type": "integer"}
                                }
                            }
                        },
                        "application/xml": {
                            "schema": {"type": "object"}
                        }
                    }
                },
                "responses": {
                    "201": {"description": "Created"}
                }
            }
        },
        "/pets/{id}": {
            "get": {
                "operationId": "getPet",
                "tags": ["pets"],
                "parameters": [
                    {"name": "id", "in": "path", "schema": {"type": "integer"}}
                ],
                "responses": {
                    "200": {"description": "A pet"},
                    "404": {"description": "Not found"}
                }
            },
            "delete": {
                "operationId": "deletePet",
                "security": [],
                "parameters": [
                    {"name": "id", "in": "path", "required": true, "schema": {"type": "integer"}}
                ],
                "responses": {
                    "204": {"description": "Deleted"}
                }
            }
        },
        "/health": {
            "get": {
                "operationId": "health",
                "security": [{"apiKeyAuth": []}],
                "responses": {
                    "200": {"description": "OK"}
                }
            }
        }
    },
    "components": {
        "securitySchemes": {
            "bearerAuth": {"type": "http", "scheme": "bearer"},
            "apiKeyAuth": {"type": "apiKey", "name": "X-Api-Key", "in": "header"}
        },
        "schemas": {
            "Pet": {
                "type": "object",
                "required": ["name"],
                "properties": {
                    "name": {"type": "string"},
                    "tag": {"type": "string"}
                }
            }
        }
    }
}"##;

fn canonicalize(json: &str) -> ApiSpec {
    OpenApiParser::from_json(json).unwrap().canonicalize().unwrap()
}

#[test]
fn test_metadata_and_contact() {
    let spec = canonicalize(PETSTORE);

    assert_eq!(spec.title, "Petstore");
    assert_eq!(spec.version, "1.2.3");
    assert_eq!(spec.description.as_deref(), Some("A sample pet store"));
    assert_eq!(
        spec.contact.as_ref().unwrap().email.as_deref(),
        Some("support@example.com")
    );
}

#[test]
fn test_endpoints_in_traversal_order_with_unique_ids() {
    let spec = canonicalize(PETSTORE);

    let ids: Vec<&str> = spec.endpoints.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "GET /pets",
            "POST /pets",
            "GET /pets/{id}",
            "DELETE /pets/{id}",
            "GET /health"
        ]
    );

    let mut unique = ids.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), ids.len());
}

#[test]
fn test_canonicalization_is_deterministic() {
    let first = canonicalize(PETSTORE);
    let second = canonicalize(PETSTORE);

    assert_eq!(first.endpoints, second.endpoints);
    assert_eq!(first.tags, second.tags);
    assert_eq!(first.summary, second.summary);
}

#[test]
fn test_global_security_uses_first_and_group_only() {
    let spec = canonicalize(PETSTORE);

    // bearerAuth is the first OR-alternative; apiKeyAuth must not leak in
    assert_eq!(spec.default_security.len(), 1);
    assert!(matches!(
        spec.default_security[0],
        SecurityRequirement::Http { ref scheme, .. } if scheme == "bearer"
    ));
}

#[test]
fn test_operation_security_semantics() {
    let spec = canonicalize(PETSTORE);

    // Absent: inherits global
    let list = spec.endpoints.iter().find(|e| e.id == "GET /pets").unwrap();
    assert_eq!(list.security, spec.default_security);

    // Present and empty: explicitly no auth
    let delete = spec
        .endpoints
        .iter()
        .find(|e| e.id == "DELETE /pets/{id}")
        .unwrap();
    assert_eq!(delete.security, vec![SecurityRequirement::none()]);

    // Present and non-empty: resolved against the scheme table, not the
    // global default
    let health = spec.endpoints.iter().find(|e| e.id == "GET /health").unwrap();
    assert_eq!(health.security.len(), 1);
    match &health.security[0] {
        SecurityRequirement::ApiKey {
            name, instruction, ..
        } => {
            assert_eq!(name, "X-Api-Key");
            assert_eq!(
                instruction,
                "Provide API key in header parameter \"X-Api-Key\""
            );
        }
        other => panic!("expected apiKey override, got {:?}", other),
    }
}

#[test]
fn test_path_level_parameters_merged_first() {
    let spec = canonicalize(PETSTORE);
    let list = spec.endpoints.iter().find(|e| e.id == "GET /pets").unwrap();

    assert_eq!(list.parameters.len(), 2);
    assert_eq!(list.parameters[0].name, "X-Tenant");
    assert_eq!(list.parameters[0].location, ParameterLocation::Header);
    assert_eq!(list.parameters[1].name, "limit");
}

#[test]
fn test_path_parameters_forced_required() {
    let spec = canonicalize(PETSTORE);
    let get_pet = spec
        .endpoints
        .iter()
        .find(|e| e.id == "GET /pets/{id}")
        .unwrap();

    // Declared without "required": true, coerced by location
    let id_param = &get_pet.parameters[0];
    assert_eq!(id_param.location, ParameterLocation::Path);
    assert!(id_param.required);
}

#[test]
fn test_request_body_primary_content_type() {
    let spec = canonicalize(PETSTORE);
    let create = spec.endpoints.iter().find(|e| e.id == "POST /pets").unwrap();

    let body = create.request_body.as_ref().unwrap();
    assert!(body.required);
    assert_eq!(body.content_types, vec!["application/json", "application/xml"]);
    assert_eq!(body.schema.schema_type, SchemaType::Object);
    assert_eq!(body.schema.required, vec!["name"]);
}

#[test]
fn test_responses_in_declaration_order() {
    let spec = canonicalize(PETSTORE);
    let get_pet = spec
        .endpoints
        .iter()
        .find(|e| e.id == "GET /pets/{id}")
        .unwrap();

    let codes: Vec<&str> = get_pet
        .responses
        .iter()
        .map(|r| r.status_code.as_str())
        .collect();
    assert_eq!(codes, vec!["200", "404"]);
}

#[test]
fn test_default_server_synthesized() {
    let json = r#"{
        "openapi": "3.0.0",
        "info": {"title": "T", "version": "1"},
        "paths": {}
    }"#;

    let spec = canonicalize(json);
    assert_eq!(spec.servers.len(), 1);
    assert_eq!(spec.servers[0].url, "https://api.example.com");
    assert_eq!(spec.servers[0].description.as_deref(), Some("Default server"));
}

#[test]
fn test_declared_servers_pass_through() {
    let json = r#"{
        "openapi": "3.0.0",
        "info": {"title": "T", "version": "1"},
        "servers": [
            {"url": "https://prod.example.com", "description": "Production"},
            {"url": "https://{region}.example.com",
             "variables": {"region": {"default": "eu", "enum": ["eu", "us"]}}}
        ],
        "paths": {}
    }"#;

    let spec = canonicalize(json);
    assert_eq!(spec.servers.len(), 2);
    assert_eq!(spec.servers[0].url, "https://prod.example.com");
    let variables = spec.servers[1].variables.as_ref().unwrap();
    assert_eq!(variables["region"].default, "eu");
}

#[test]
fn test_tag_index_declared_then_discovered() {
    let spec = canonicalize(PETSTORE);

    // "pets" is declared in doc.tags with a description; every endpoint
    // referencing it is listed in discovery order
    let pets = spec.tags.iter().find(|t| t.name == "pets").unwrap();
    assert_eq!(pets.description.as_deref(), Some("Pet operations"));
    assert_eq!(
        pets.endpoints,
        vec!["GET /pets", "POST /pets", "GET /pets/{id}"]
    );
}

#[test]
fn test_discovered_tag_without_declaration() {
    let json = r#"{
        "openapi": "3.0.0",
        "info": {"title": "T", "version": "1"},
        "paths": {
            "/a": {"get": {"tags": ["undeclared"], "responses": {"200": {"description": "OK"}}}}
        }
    }"#;

    let spec = canonicalize(json);
    assert_eq!(spec.tags.len(), 1);
    assert_eq!(spec.tags[0].name, "undeclared");
    assert!(spec.tags[0].description.is_none());
    assert_eq!(spec.tags[0].endpoints, vec!["GET /a"]);
}

#[test]
fn test_summary_statistics() {
    let spec = canonicalize(PETSTORE);

    assert_eq!(spec.summary.total_endpoints, 5);
    assert_eq!(spec.summary.endpoints_by_method["GET"], 3);
    assert_eq!(spec.summary.endpoints_by_method["POST"], 1);
    assert_eq!(spec.summary.endpoints_by_method["DELETE"], 1);

    // http from the global default, none from the explicit override,
    // apiKey from the per-operation schemes
    assert!(spec.summary.authentication_types.contains(&"http".to_string()));
    assert!(spec.summary.authentication_types.contains(&"none".to_string()));
    assert!(spec
        .summary
        .authentication_types
        .contains(&"apiKey".to_string()));

    assert!(spec
        .summary
        .common_content_types
        .contains(&"application/json".to_string()));
    assert!(spec
        .summary
        .common_content_types
        .contains(&"application/xml".to_string()));
}

#[test]
fn test_reusable_schemas_normalized() {
    let spec = canonicalize(PETSTORE);

    let pet = &spec.schemas["Pet"];
    assert_eq!(pet.schema_type, SchemaType::Object);
    assert_eq!(pet.required, vec!["name"]);
    assert_eq!(
        pet.properties.as_ref().unwrap()["tag"].schema_type,
        SchemaType::String
    );
}

#[test]
fn test_serialized_contract_key_names() {
    let spec = canonicalize(PETSTORE);
    let json = serde_json::to_value(&spec).unwrap();

    assert!(json.get("defaultSecurity").is_some());
    assert_eq!(json["endpoints"][0]["id"], "GET /pets");
    assert_eq!(json["endpoints"][0]["operationId"], "listPets");
    assert_eq!(json["endpoints"][0]["method"], "GET");
    assert_eq!(json["endpoints"][0]["parameters"][0]["in"], "header");
    assert_eq!(json["endpoints"][0]["responses"][0]["statusCode"], "200");
    assert_eq!(
        json["endpoints"][1]["requestBody"]["contentTypes"][0],
        "application/json"
    );
    assert_eq!(json["summary"]["totalEndpoints"], 5);
}

#[test]
fn test_malformed_document_fails_without_partial_result() {
    let missing_version = r#"{"openapi": "3.0.0", "info": {"title": "T"}, "paths": {}}"#;
    assert!(OpenApiParser::from_json(missing_version).is_err());

    let not_json = "not even json";
    assert!(OpenApiParser::from_json(not_json).is_err());
}

#[test]
fn test_method_enum_matches_eight_verbs() {
    assert_eq!(HttpMethod::ALL.len(), 8);
}
