//! Named audio node factories and declarative descriptors
//!
//! Level data can describe sound roles by factory name. A [`NodeRegistry`]
//! turns such a [`DescriptorConfig`] into a [`SoundDescriptor`]; hooks are
//! attached in code afterwards.

use crate::descriptor::{
    DestinationEntry, FactorySlot, NodeFactory, SoundDescriptor, SourceEntry, TransformEntry,
};
use crate::error::{Result, SoundError};
use crate::node::NodeRef;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One role entry in declarative form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleConfig {
    /// Registered factory name
    pub audio_node: Option<String>,
}

impl RoleConfig {
    /// Entry naming a factory
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            audio_node: Some(name.into()),
        }
    }
}

/// Declarative sound descriptor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DescriptorConfig {
    pub source: Option<RoleConfig>,
    pub transform: Option<RoleConfig>,
    pub destination: Option<RoleConfig>,
    /// Explicit proximity radius
    pub radius: Option<f32>,
}

impl DescriptorConfig {
    /// Parse from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        if let Some(radius) = config.radius {
            if !radius.is_finite() || radius < 0.0 {
                return Err(SoundError::InvalidConfig(format!(
                    "radius must be a non-negative finite number, got {}",
                    radius
                )));
            }
        }
        Ok(config)
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Audio node factories by name
#[derive(Debug, Default, Clone)]
pub struct NodeRegistry {
    factories: HashMap<String, NodeFactory>,
}

impl NodeRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory under `name`
    pub fn register(&mut self, name: impl Into<String>, factory: NodeFactory) -> Result<()> {
        let name = name.into();
        if self.factories.contains_key(&name) {
            return Err(SoundError::DuplicateFactory(name));
        }
        log::debug!("Registered audio node factory '{}'", name);
        self.factories.insert(name, factory);
        Ok(())
    }

    /// Register a closure as a factory
    pub fn register_fn<F>(&mut self, name: impl Into<String>, f: F) -> Result<()>
    where
        F: Fn() -> NodeRef + Send + Sync + 'static,
    {
        self.register(name, NodeFactory::new(f))
    }

    /// Remove a factory, returning it if present
    pub fn unregister(&mut self, name: &str) -> Option<NodeFactory> {
        self.factories.remove(name)
    }

    /// Look up a factory
    pub fn get(&self, name: &str) -> Option<&NodeFactory> {
        self.factories.get(name)
    }

    /// Check if a name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Resolve a role entry's factory name.
    ///
    /// Unknown names stay in the slot as [`FactorySlot::Unresolved`] so that
    /// classification can report them.
    pub fn resolve(&self, role: &RoleConfig) -> FactorySlot {
        match &role.audio_node {
            None => FactorySlot::Missing,
            Some(name) => match self.factories.get(name) {
                Some(factory) => FactorySlot::Factory(factory.clone()),
                None => FactorySlot::Unresolved(name.clone()),
            },
        }
    }

    /// Build a descriptor without hooks
    pub fn build_descriptor(&self, config: &DescriptorConfig) -> SoundDescriptor {
        SoundDescriptor {
            source: config.source.as_ref().map(|r| SourceEntry::new(self.resolve(r))),
            transform: config.transform.as_ref().map(|r| TransformEntry::new(self.resolve(r))),
            destination: config
                .destination
                .as_ref()
                .map(|r| DestinationEntry::new(self.resolve(r))),
            radius: config.radius,
        }
    }

    /// Parse a JSON descriptor and resolve it
    pub fn descriptor_from_json(&self, json: &str) -> Result<SoundDescriptor> {
        Ok(self.build_descriptor(&DescriptorConfig::from_json(json)?))
    }
}
