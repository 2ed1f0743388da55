//! Registered data sources.
//!
//! A wizard is bound to the data source that feeds it quals. The binding is
//! checked once, at construction.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A named feed of qual batches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSource {
    pub name: String,
}

impl DataSource {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Data sources known to the application, by name.
#[derive(Debug, Clone, Default)]
pub struct DataSourceRegistry {
    sources: HashMap<String, DataSource>,
}

impl DataSourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a source, returning the one it replaces.
    pub fn register(&mut self, source: DataSource) -> Option<DataSource> {
        self.sources.insert(source.name.clone(), source)
    }

    pub fn get(&self, name: &str) -> Option<&DataSource> {
        self.sources.get(name)
    }

    /// Like `get`, but a miss is a construction error.
    pub fn resolve(&self, name: &str) -> Result<&DataSource> {
        self.get(name)
            .ok_or_else(|| Error::ContentSourceNotFound(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl FromIterator<DataSource> for DataSourceRegistry {
    fn from_iter<I: IntoIterator<Item = DataSource>>(iter: I) -> Self {
        let mut registry = Self::new();
        for source in iter {
            registry.register(source);
        }
        registry
    }
}
