//! OpenAPI canonicalization for Apicanon
//!
//! This crate turns a fully dereferenced OpenAPI v3 document into the
//! canonical `ApiSpec` model (`apicanon-common`).
//!
//! ## Canonicalization steps
//!
//! 1. Servers (a placeholder is synthesized when none are declared)
//! 2. Global security requirements (first OR-alternative only)
//! 3. Endpoints, one per path/method pair, in document traversal order
//! 4. Reusable component schemas
//! 5. Tag index (declared tags first, then discovered)
//! 6. Summary statistics
//!
//! Inputs must already be reference-free: `$ref` resolution belongs to an
//! upstream dereferencing step. Unresolved references are passed through
//! untouched, never resolved here.

pub mod openapi;
pub mod pagination;
pub mod query;
pub mod schema;
pub mod security;

pub use openapi::{OpenApiParser, canonicalize};
pub use pagination::{analyze_pagination, PaginationKind, PaginationReport};
pub use query::{find_endpoint, find_schema, search_endpoints, EndpointFilter};
