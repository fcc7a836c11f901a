//! OpenAPI 3.x document handling
//!
//! Raw serde types for the (already dereferenced) document, the entry-point
//! parser, and the converter that produces the canonical `ApiSpec`.
//!
//! ## Usage
//! ```rust,ignore
//! use apicanon_parser::OpenApiParser;
//!
//! let parser = OpenApiParser::from_json(&json)?;
//! let spec = parser.canonicalize()?;
//! ```

mod converter;
mod parser;
mod types;

pub use converter::canonicalize;
pub use parser::OpenApiParser;
pub use types::*;
