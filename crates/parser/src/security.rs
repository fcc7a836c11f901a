//! Security scheme resolution
//!
//! Maps OpenAPI security-scheme declarations to canonical
//! `SecurityRequirement`s. Instruction strings are deterministic templates,
//! parameterized only by scheme name/location, and are part of the output
//! contract: consumers use them verbatim.

use crate::openapi::RawSecurityScheme;
use apicanon_common::{ApiKeyLocation, OAuthFlow, SecurityRequirement};

/// Resolve one declared scheme into a canonical requirement
///
/// `name` is the scheme's key in the security-schemes table, used as a
/// fallback when an apiKey scheme omits its parameter name. Unknown scheme
/// types resolve to the explicit `none` requirement.
pub fn resolve(scheme: &RawSecurityScheme, name: &str, scopes: &[String]) -> SecurityRequirement {
    match scheme.scheme_type.as_str() {
        "apiKey" => {
            let key_name = scheme.name.clone().unwrap_or_else(|| name.to_string());
            let location = api_key_location(scheme.location.as_deref());
            SecurityRequirement::ApiKey {
                instruction: format!(
                    "Provide API key in {} parameter \"{}\"",
                    location.as_str(),
                    key_name
                ),
                name: key_name,
                location,
                description: scheme.description.clone(),
            }
        }

        "http" => {
            let http_scheme = scheme.scheme.clone().unwrap_or_default();
            let instruction = match http_scheme.as_str() {
                "bearer" => {
                    "Include bearer token in Authorization header: \"Bearer <token>\"".to_string()
                }
                "basic" => {
                    "Include basic auth in Authorization header: \"Basic <base64(username:password)>\""
                        .to_string()
                }
                other => format!("Use HTTP {} authentication", other),
            };
            SecurityRequirement::Http {
                scheme: http_scheme,
                description: scheme.description.clone(),
                instruction,
            }
        }

        "oauth2" => SecurityRequirement::OAuth2 {
            flows: resolve_flows(scheme, scopes),
            description: scheme.description.clone(),
            instruction: format!(
                "OAuth2 authentication required. Scopes: {}",
                scopes.join(", ")
            ),
        },

        "openIdConnect" => SecurityRequirement::OpenIdConnect {
            description: scheme.description.clone(),
            instruction: "OpenID Connect authentication required".to_string(),
        },

        _ => SecurityRequirement::none(),
    }
}

/// Emit one flow entry per flow kind present, in the fixed order
/// implicit, password, clientCredentials, authorizationCode
fn resolve_flows(scheme: &RawSecurityScheme, scopes: &[String]) -> Vec<OAuthFlow> {
    let mut resolved = Vec::new();

    let Some(ref flows) = scheme.flows else {
        return resolved;
    };

    if let Some(ref flow) = flows.implicit {
        resolved.push(OAuthFlow::Implicit {
            authorization_url: flow.authorization_url.clone().unwrap_or_default(),
            scopes: scopes.to_vec(),
        });
    }
    if let Some(ref flow) = flows.password {
        resolved.push(OAuthFlow::Password {
            token_url: flow.token_url.clone().unwrap_or_default(),
            scopes: scopes.to_vec(),
        });
    }
    if let Some(ref flow) = flows.client_credentials {
        resolved.push(OAuthFlow::ClientCredentials {
            token_url: flow.token_url.clone().unwrap_or_default(),
            scopes: scopes.to_vec(),
        });
    }
    if let Some(ref flow) = flows.authorization_code {
        resolved.push(OAuthFlow::AuthorizationCode {
            authorization_url: flow.authorization_url.clone().unwrap_or_default(),
            token_url: flow.token_url.clone().unwrap_or_default(),
            scopes: scopes.to_vec(),
        });
    }

    resolved
}

fn api_key_location(location: Option<&str>) -> ApiKeyLocation {
    match location {
        Some("query") => ApiKeyLocation::Query,
        Some("cookie") => ApiKeyLocation::Cookie,
        _ => ApiKeyLocation::Header,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheme(json: serde_json::Value) -> RawSecurityScheme {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_api_key_instruction_exact() {
        let sec = resolve(
            &scheme(serde_json::json!({
                "type": "apiKey",
                "name": "X-Api-Key",
                "in": "header"
            })),
            "apiKeyAuth",
            &[],
        );

        assert_eq!(
            sec.instruction(),
            "Provide API key in header parameter \"X-Api-Key\""
        );
        match sec {
            SecurityRequirement::ApiKey { name, location, .. } => {
                assert_eq!(name, "X-Api-Key");
                assert_eq!(location, ApiKeyLocation::Header);
            }
            other => panic!("expected apiKey, got {:?}", other),
        }
    }

    #[test]
    fn test_http_bearer_and_basic_instructions() {
        let bearer = resolve(
            &scheme(serde_json::json!({"type": "http", "scheme": "bearer"})),
            "auth",
            &[],
        );
        assert_eq!(
            bearer.instruction(),
            "Include bearer token in Authorization header: \"Bearer <token>\""
        );

        let basic = resolve(
            &scheme(serde_json::json!({"type": "http", "scheme": "basic"})),
            "auth",
            &[],
        );
        assert_eq!(
            basic.instruction(),
            "Include basic auth in Authorization header: \"Basic <base64(username:password)>\""
        );

        let digest = resolve(
            &scheme(serde_json::json!({"type": "http", "scheme": "digest"})),
            "auth",
            &[],
        );
        assert_eq!(digest.instruction(), "Use HTTP digest authentication");
    }

    #[test]
    fn test_oauth2_flows_emitted_in_fixed_order() {
        let scopes = vec!["read:pets".to_string(), "write:pets".to_string()];
        let sec = resolve(
            &scheme(serde_json::json!({
                "type": "oauth2",
                "flows": {
                    "authorizationCode": {
                        "authorizationUrl": "https://auth.example.com/authorize",
                        "tokenUrl": "https://auth.example.com/token",
                        "scopes": {}
                    },
                    "implicit": {
                        "authorizationUrl": "https://auth.example.com/authorize",
                        "scopes": {}
                    }
                }
            })),
            "oauth",
            &scopes,
        );

        assert_eq!(
            sec.instruction(),
            "OAuth2 authentication required. Scopes: read:pets, write:pets"
        );
        let SecurityRequirement::OAuth2 { flows, .. } = sec else {
            panic!("expected oauth2");
        };
        assert_eq!(flows.len(), 2);
        assert!(matches!(flows[0], OAuthFlow::Implicit { .. }));
        assert!(matches!(flows[1], OAuthFlow::AuthorizationCode { .. }));
    }

    #[test]
    fn test_unknown_scheme_type_resolves_to_none() {
        let sec = resolve(
            &scheme(serde_json::json!({"type": "mutualTLS"})),
            "mtls",
            &[],
        );

        assert!(sec.is_none());
        assert_eq!(sec.instruction(), "No authentication required");
    }

    #[test]
    fn test_open_id_connect_instruction() {
        let sec = resolve(
            &scheme(serde_json::json!({
                "type": "openIdConnect",
                "openIdConnectUrl": "https://auth.example.com/.well-known/openid-configuration"
            })),
            "oidc",
            &[],
        );

        assert_eq!(sec.instruction(), "OpenID Connect authentication required");
    }
}
