//! Spec store capability
//!
//! Loaded specifications are cached by an opaque id so generators can be
//! invoked repeatedly without re-canonicalizing. The core only ever sees this
//! narrow get/put surface; ownership of the actual cache belongs to the
//! caller.

use crate::ApiSpec;
use std::collections::HashMap;

/// Narrow key-value access to cached specifications
pub trait SpecStore {
    /// Store a specification under an opaque id, replacing any previous entry
    fn put(&mut self, id: String, spec: ApiSpec);

    /// Look up a specification by id
    fn get(&self, id: &str) -> Option<&ApiSpec>;

    /// Ids of all stored specifications
    fn ids(&self) -> Vec<&str>;
}

/// In-memory spec store backed by a HashMap
#[derive(Debug, Default)]
pub struct MemorySpecStore {
    specs: HashMap<String, ApiSpec>,
}

impl MemorySpecStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SpecStore for MemorySpecStore {
    fn put(&mut self, id: String, spec: ApiSpec) {
        self.specs.insert(id, spec);
    }

    fn get(&self, id: &str) -> Option<&ApiSpec> {
        self.specs.get(id)
    }

    fn ids(&self) -> Vec<&str> {
        self.specs.keys().map(|k| k.as_str()).collect()
    }
}
