//! OpenAPI document entry point

use super::types::Document;
use apicanon_common::{ApiSpec, CanonError, Result};

/// OpenAPI specification parser
///
/// Holds a deserialized, already dereferenced document and produces the
/// canonical `ApiSpec`. Loading bytes from a file or URL is the caller's
/// responsibility; this type only ever sees in-memory text or values.
#[derive(Debug)]
pub struct OpenApiParser {
    document: Document,
}

impl OpenApiParser {
    /// Parse a document from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let document: Document = serde_json::from_str(json)
            .map_err(|e| CanonError::Parse(format!("Failed to parse OpenAPI JSON: {}", e)))?;

        Ok(Self { document })
    }

    /// Parse a document from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let document: Document = serde_yaml::from_str(yaml)
            .map_err(|e| CanonError::Parse(format!("Failed to parse OpenAPI YAML: {}", e)))?;

        Ok(Self { document })
    }

    /// Parse a document from an in-memory JSON value
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let document: Document = serde_json::from_value(value)
            .map_err(|e| CanonError::Parse(format!("Failed to parse OpenAPI document: {}", e)))?;

        Ok(Self { document })
    }

    /// Canonicalize the document into an `ApiSpec`
    pub fn canonicalize(&self) -> Result<ApiSpec> {
        super::converter::canonicalize(&self.document)
    }

    /// Reference to the underlying raw document
    pub fn document(&self) -> &Document {
        &self.document
    }
}
