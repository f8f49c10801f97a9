//! Process-wide property store
//!
//! Backs the system-property resolution strategy. Seeded from the
//! `[properties]` configuration table and mutable at runtime; blank values
//! read as absent.

use dashmap::DashMap;
use tracing::debug;
use wsspi_domain::PropertySource;

#[derive(Debug, Default)]
pub struct SystemProperties {
    values: DashMap<String, String>,
}

impl SystemProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `initial`
    pub fn from_pairs<I, K, V>(initial: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let properties = Self::new();
        for (name, value) in initial {
            properties.set(name, value);
        }
        properties
    }

    /// Set `name`, returning the previous value
    pub fn set<K: Into<String>, V: Into<String>>(&self, name: K, value: V) -> Option<String> {
        let name = name.into();
        debug!(property = %name, "Property set");
        self.values.insert(name, value.into())
    }

    /// Remove `name`, returning its value
    pub fn remove(&self, name: &str) -> Option<String> {
        self.values.remove(name).map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl PropertySource for SystemProperties {
    fn property(&self, name: &str) -> Option<String> {
        self.values
            .get(name)
            .map(|value| value.value().clone())
            .filter(|value| !value.trim().is_empty())
    }
}
