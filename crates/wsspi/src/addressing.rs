//! Message addressing properties
//!
//! The stack supplies a [`MapBuilderFactory`] registered under
//! [`MAP_BUILDER_FACTORY_SERVICE`]. There is no built-in default: when no
//! stack is deployed the lookup yields `None`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use wsspi_application::ServiceLoader;
use wsspi_domain::{ContextRef, Result};

use crate::global::service_loader;

/// Service name of the addressing builder factory
pub const MAP_BUILDER_FACTORY_SERVICE: &str = "org.jboss.ws.api.addressing.MAPBuilderFactory";

/// Stack entry point for addressing support
pub trait MapBuilderFactory: Send + Sync {
    fn builder_instance(&self) -> Arc<dyn MapBuilder>;
}

/// Creates addressing property sets and their parts
pub trait MapBuilder: Send + Sync {
    fn new_map(&self) -> Map;

    fn new_endpoint(&self, address: &str) -> MapEndpoint {
        MapEndpoint::new(address)
    }

    fn new_relates_to(&self, message_id: &str, relationship: Option<&str>) -> MapRelatesTo {
        MapRelatesTo {
            message_id: message_id.to_string(),
            relationship: relationship.map(str::to_string),
        }
    }
}

/// Message addressing properties of one message
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Map {
    pub to: Option<String>,
    pub from: Option<MapEndpoint>,
    pub message_id: Option<String>,
    pub action: Option<String>,
    pub reply_to: Option<MapEndpoint>,
    pub fault_to: Option<MapEndpoint>,
    pub relates_to: Option<MapRelatesTo>,
    pub reference_parameters: Vec<String>,
}

impl Map {
    /// Address replies to the endpoint `epr`, carrying its reference parameters
    pub fn initialize_as_destination(&mut self, epr: &MapEndpoint) {
        self.to = Some(epr.address.clone());
        self.reference_parameters
            .extend(epr.reference_parameters.iter().cloned());
    }
}

/// An endpoint reference
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapEndpoint {
    pub address: String,
    pub reference_parameters: Vec<String>,
}

impl MapEndpoint {
    pub fn new<S: Into<String>>(address: S) -> Self {
        Self {
            address: address.into(),
            reference_parameters: Vec::new(),
        }
    }
}

/// Relationship to a previous message
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapRelatesTo {
    pub message_id: String,
    pub relationship: Option<String>,
}

/// Resolve the stack's factory through the process-wide loader
///
/// Without a context the thread-current context is used.
pub fn map_builder_factory(
    context: Option<ContextRef>,
) -> Result<Option<Arc<dyn MapBuilderFactory>>> {
    map_builder_factory_with(&*service_loader()?, context)
}

/// Resolve the stack's factory through `loader`
pub fn map_builder_factory_with(
    loader: &ServiceLoader,
    context: Option<ContextRef>,
) -> Result<Option<Arc<dyn MapBuilderFactory>>> {
    loader.load(MAP_BUILDER_FACTORY_SERVICE, None, context)
}
