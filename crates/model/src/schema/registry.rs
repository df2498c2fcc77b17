use crate::{
    errors::{ConfigurationError, RegistryError},
    schema::{config::SchemaConfig, model_schema::ModelSchema},
};
use std::{
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock},
};
use tracing::info;

/// Model name -> schema. Populated at configuration time and only read
/// afterwards; a reload builds a fresh registry and swaps it in through a
/// [`RegistryHandle`].
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    models: HashMap<String, Arc<ModelSchema>>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: SchemaConfig) -> Result<Self, ConfigurationError> {
        let mut registry = Self::new();
        for (name, schema) in config.into_model_schemas()? {
            registry.register(name, schema)?;
        }
        Ok(registry)
    }

    pub fn register(
        &mut self,
        model_name: impl Into<String>,
        schema: ModelSchema,
    ) -> Result<(), ConfigurationError> {
        let model_name = model_name.into();
        if self.models.contains_key(&model_name) {
            return Err(ConfigurationError::DuplicateModel(model_name));
        }

        info!(
            "Registered filter schema for model '{}' ({} fields)",
            model_name,
            schema.len()
        );
        self.models.insert(model_name, Arc::new(schema));
        Ok(())
    }

    pub fn lookup(&self, model_name: &str) -> Result<Arc<ModelSchema>, RegistryError> {
        self.models
            .get(model_name)
            .cloned()
            .ok_or_else(|| RegistryError::UnknownModel(model_name.to_string()))
    }

    pub fn model_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.models.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

/// Shared, swappable access to the active registry.
///
/// Readers take a snapshot with [`RegistryHandle::current`] and keep using it
/// even if a reload happens meanwhile.
#[derive(Debug, Clone)]
pub struct RegistryHandle {
    inner: Arc<RwLock<Arc<SchemaRegistry>>>,
}

impl RegistryHandle {
    pub fn new(registry: SchemaRegistry) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(registry))),
        }
    }

    pub fn current(&self) -> Arc<SchemaRegistry> {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    pub fn lookup(&self, model_name: &str) -> Result<Arc<ModelSchema>, RegistryError> {
        self.current().lookup(model_name)
    }

    /// Atomically replaces the whole registry, returning the previous one.
    pub fn replace(&self, registry: SchemaRegistry) -> Arc<SchemaRegistry> {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        info!("Reloading filter schema registry ({} models)", registry.len());
        std::mem::replace(&mut *guard, Arc::new(registry))
    }
}
