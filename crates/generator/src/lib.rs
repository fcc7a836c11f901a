//! Artifact generation for Apicanon
//!
//! This crate transforms canonical endpoints into executable artifacts:
//! curl commands, raw HTTP requests, JavaScript/Python snippets, example
//! request bodies, step-by-step instructions, and n8n-style automation
//! node/workflow configurations.
//!
//! Every generator is a pure function of the endpoint descriptor and a base
//! URL: no I/O, no shared state. Generated code is illustrative, not
//! guaranteed to compile or run as-is.

mod automation;
mod example;
mod request;
mod templates;

pub use automation::{AutomationGenerator, WorkflowConfig, WorkflowNode};
pub use example::{ExampleGenerator, OptionalFieldPolicy};
pub use request::{CodeExamples, CodeTarget, ExecutionGuide, RequestGenerator};
