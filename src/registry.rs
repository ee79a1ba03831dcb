use indexmap::IndexMap;
use slotmap::{SlotMap, new_key_type};

use crate::{config::Config, plugin::Plugin, spec::PluginSpec};

new_key_type! {
    /// Handle to one live plugin instance inside a registry.
    pub struct PluginKey;
}

#[derive(Debug, Clone, PartialEq)]
pub enum RegistryError {
    DuplicateName(String),
    PluginNotFound(String),
    BuildFailed(String),
}

/// The plugin definitions an adapter bootstrap knows about, plus the
/// instances built from them.
///
/// Specs keep registration order because hosts enumerate plugins by
/// position; instances live behind keys with an explicit create/destroy
/// lifecycle. Nothing here is global: whoever boots the adapters owns the
/// registry.
#[derive(Default)]
pub struct PluginRegistry {
    specs: IndexMap<String, PluginSpec>,
    instances: SlotMap<PluginKey, Box<dyn Plugin>>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a definition. Names are the host-facing identity, so a second
    /// spec under an existing name is rejected rather than replacing it.
    pub fn register(&mut self, spec: PluginSpec) -> Result<(), RegistryError> {
        if self.specs.contains_key(&spec.name) {
            return Err(RegistryError::DuplicateName(spec.name));
        }

        self.specs.insert(spec.name.clone(), spec);
        Ok(())
    }

    pub fn spec(&self, name: &str) -> Option<&PluginSpec> {
        self.specs.get(name)
    }

    /// Definition at one enumeration position, registration order.
    pub fn spec_at(&self, index: usize) -> Option<&PluginSpec> {
        self.specs.get_index(index).map(|(_, spec)| spec)
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub fn iter_specs(&self) -> impl Iterator<Item = &PluginSpec> {
        self.specs.values()
    }

    /// Build and prepare one instance of a named definition.
    pub fn instantiate(&mut self, name: &str, config: &Config) -> Result<PluginKey, RegistryError> {
        let spec = self
            .specs
            .get(name)
            .ok_or_else(|| RegistryError::PluginNotFound(name.to_owned()))?;

        let mut plugin = (spec.build)(config)?;
        plugin.prepare(config);

        Ok(self.instances.insert(plugin))
    }

    pub fn instance(&self, key: PluginKey) -> Option<&dyn Plugin> {
        self.instances.get(key).map(|plugin| plugin.as_ref())
    }

    pub fn instance_mut(&mut self, key: PluginKey) -> Option<&mut (dyn Plugin + 'static)> {
        self.instances.get_mut(key).map(|plugin| plugin.as_mut())
    }

    /// Drop one instance. Returns whether the key was live.
    pub fn destroy(&mut self, key: PluginKey) -> bool {
        self.instances.remove(key).is_some()
    }

    #[inline(always)]
    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }
}
