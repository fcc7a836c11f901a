//! Pagination pattern detection
//!
//! Scans query-parameter names over GET endpoints (or a single endpoint by
//! id) for the common page-based, offset-based, and cursor-based schemes and
//! emits usage recommendations.

use crate::query::find_endpoint;
use apicanon_common::{ApiSpec, Endpoint, HttpMethod, Parameter, ParameterLocation, Result};
use serde::{Deserialize, Serialize};

/// Recognized pagination scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaginationKind {
    #[serde(rename = "page-based")]
    PageBased,

    #[serde(rename = "offset-based")]
    OffsetBased,

    #[serde(rename = "cursor-based")]
    CursorBased,
}

/// One detected pattern on one endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectedPagination {
    /// Endpoint id the pattern was found on
    pub endpoint: String,

    #[serde(rename = "type")]
    pub kind: PaginationKind,

    /// The query parameters participating in the pattern
    pub parameters: Vec<Parameter>,
}

/// Detection results plus plain-language recommendations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationReport {
    pub detected: Vec<DetectedPagination>,
    pub recommendations: Vec<String>,
}

const PAGE_MARKERS: &[&str] = &["page", "page_number"];
const PAGE_PARAMS: &[&str] = &["page", "page_number", "per_page", "page_size", "limit"];
const OFFSET_MARKERS: &[&str] = &["offset", "skip"];
const OFFSET_PARAMS: &[&str] = &["offset", "skip", "limit", "take"];
const CURSOR_MARKERS: &[&str] = &["cursor", "next_token"];
const CURSOR_PARAMS: &[&str] = &["cursor", "next_token", "page_token"];

/// Analyze pagination over the whole spec's GET endpoints, or over one
/// endpoint when an id is given
pub fn analyze_pagination(spec: &ApiSpec, endpoint_id: Option<&str>) -> Result<PaginationReport> {
    let endpoints: Vec<&Endpoint> = match endpoint_id {
        Some(id) => vec![find_endpoint(spec, id)?],
        None => spec
            .endpoints
            .iter()
            .filter(|e| e.method == HttpMethod::Get)
            .collect(),
    };

    let mut detected = Vec::new();

    for endpoint in endpoints {
        let query_params: Vec<&Parameter> = endpoint
            .parameters
            .iter()
            .filter(|p| p.location == ParameterLocation::Query)
            .collect();
        let names: Vec<String> = query_params
            .iter()
            .map(|p| p.name.to_lowercase())
            .collect();

        let mut detect = |markers: &[&str], params: &[&str], kind: PaginationKind| {
            if names.iter().any(|n| markers.contains(&n.as_str())) {
                detected.push(DetectedPagination {
                    endpoint: endpoint.id.clone(),
                    kind,
                    parameters: query_params
                        .iter()
                        .filter(|p| params.contains(&p.name.to_lowercase().as_str()))
                        .map(|p| (*p).clone())
                        .collect(),
                });
            }
        };

        detect(PAGE_MARKERS, PAGE_PARAMS, PaginationKind::PageBased);
        detect(OFFSET_MARKERS, OFFSET_PARAMS, PaginationKind::OffsetBased);
        detect(CURSOR_MARKERS, CURSOR_PARAMS, PaginationKind::CursorBased);
    }

    let recommendations = vec![match detected.first().map(|d| d.kind) {
        Some(PaginationKind::PageBased) => {
            "Implement page-based pagination by incrementing the page parameter until no more results are returned."
        }
        Some(PaginationKind::OffsetBased) => {
            "Implement offset-based pagination by incrementing the offset by the limit value on each request."
        }
        Some(PaginationKind::CursorBased) => {
            "Implement cursor-based pagination by using the cursor/token from the previous response in the next request."
        }
        None => {
            "No standard pagination pattern detected. Check the response schema for links or metadata indicating pagination."
        }
    }
    .to_string()];

    Ok(PaginationReport {
        detected,
        recommendations,
    })
}
