//! Automation workflow generation
//!
//! Synthesizes n8n-compatible HTTP Request node configurations and linear
//! workflows from canonical endpoints. Path, query, header, and body values
//! are bound with n8n expression syntax so each node reads its inputs from
//! the incoming item (`={{$json["name"]}}`).

use apicanon_common::{Endpoint, ParameterLocation, SecurityRequirement};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// One workflow node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowNode {
    pub id: String,

    pub name: String,

    #[serde(rename = "type")]
    pub node_type: String,

    #[serde(rename = "typeVersion")]
    pub type_version: f64,

    pub position: [i64; 2],

    pub parameters: Value,
}

/// A complete workflow: nodes plus the connection map
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowConfig {
    pub name: String,
    pub nodes: Vec<WorkflowNode>,
    pub connections: Value,
    pub settings: Value,
}

/// Automation node/workflow generator
///
/// Node ids come from a per-generator sequential counter, so output is
/// reproducible for the same inputs on a fresh generator.
#[derive(Debug, Default)]
pub struct AutomationGenerator {
    next_id: u64,
}

impl AutomationGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate an HTTP Request node for one endpoint
    pub fn http_request_node(
        &mut self,
        endpoint: &Endpoint,
        base_url: &str,
        position: [i64; 2],
    ) -> WorkflowNode {
        let mut parameters = Map::new();
        parameters.insert("method".to_string(), json!(endpoint.method.as_str()));
        parameters.insert("url".to_string(), json!(build_url(endpoint, base_url)));
        parameters.insert("sendBody".to_string(), json!(endpoint.request_body.is_some()));

        if let Some(first) = endpoint.security.first() {
            let generic = matches!(
                first,
                SecurityRequirement::ApiKey { .. } | SecurityRequirement::Http { .. }
            );
            if generic {
                parameters.insert("authentication".to_string(), json!("genericCredentialType"));
                parameters.insert("genericAuthType".to_string(), json!("httpHeaderAuth"));
            }
        }

        let mut options = Map::new();

        let header_entries = binding_entries(endpoint, ParameterLocation::Header);
        if !header_entries.is_empty() {
            options.insert("headers".to_string(), json!({ "entries": header_entries }));
        }

        let query_entries = binding_entries(endpoint, ParameterLocation::Query);
        if !query_entries.is_empty() {
            options.insert(
                "queryParameters".to_string(),
                json!({ "entries": query_entries }),
            );
        }

        parameters.insert("options".to_string(), Value::Object(options));

        if let Some(ref body) = endpoint.request_body {
            let fields: Vec<Value> = body
                .schema
                .properties
                .iter()
                .flatten()
                .map(|(name, _)| json!({ "name": name, "value": expression(name) }))
                .collect();
            parameters.insert(
                "bodyParametersUi".to_string(),
                json!({ "parameter": fields }),
            );
        }

        WorkflowNode {
            id: self.generate_node_id(),
            name: endpoint
                .summary
                .clone()
                .unwrap_or_else(|| format!("{} {}", endpoint.method, endpoint.path)),
            node_type: "n8n-nodes-base.httpRequest".to_string(),
            type_version: 4.2,
            position,
            parameters: Value::Object(parameters),
        }
    }

    /// Generate a linear workflow: one manual trigger, then one HTTP Request
    /// node per endpoint in input order, each connected to its predecessor
    pub fn workflow(
        &mut self,
        workflow_name: &str,
        endpoints: &[Endpoint],
        base_url: &str,
    ) -> WorkflowConfig {
        let mut nodes = Vec::new();
        let mut connections = Map::new();

        let trigger_id = self.generate_node_id();
        nodes.push(WorkflowNode {
            id: trigger_id.clone(),
            name: "Manual Trigger".to_string(),
            node_type: "n8n-nodes-base.manualTrigger".to_string(),
            type_version: 1.0,
            position: [250, 150],
            parameters: json!({}),
        });

        let mut y_position = 300;
        let mut previous_node_id = trigger_id;

        for endpoint in endpoints {
            let node = self.http_request_node(endpoint, base_url, [250, y_position]);

            connections.insert(
                previous_node_id,
                json!({
                    "main": [[{ "node": node.name, "type": "main", "index": 0 }]]
                }),
            );

            previous_node_id = node.id.clone();
            y_position += 150;
            nodes.push(node);
        }

        WorkflowConfig {
            name: workflow_name.to_string(),
            nodes,
            connections: Value::Object(connections),
            settings: json!({ "executionOrder": "v1" }),
        }
    }

    fn generate_node_id(&mut self) -> String {
        self.next_id += 1;
        format!("node_{}", self.next_id)
    }
}

/// Path parameters become inbound-field expressions in the URL
fn build_url(endpoint: &Endpoint, base_url: &str) -> String {
    let mut path = endpoint.path.clone();

    for param in endpoint
        .parameters
        .iter()
        .filter(|p| p.location == ParameterLocation::Path)
    {
        path = path.replace(&format!("{{{}}}", param.name), &expression(&param.name));
    }

    format!("{}{}", base_url.trim_end_matches('/'), path)
}

fn binding_entries(endpoint: &Endpoint, location: ParameterLocation) -> Vec<Value> {
    endpoint
        .parameters
        .iter()
        .filter(|p| p.location == location)
        .map(|p| json!({ "name": p.name, "value": expression(&p.name) }))
        .collect()
}

/// n8n expression referencing an inbound field by name
fn expression(name: &str) -> String {
    format!("={{{{$json[\"{}\"]}}}}", name)
}
