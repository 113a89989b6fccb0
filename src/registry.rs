//! Named collection of models, and the process-wide instance of it.
//!
//! A registry is filled once at startup and only read afterwards.
//! The process-wide registry is installed with [`install`] and
//! read with [`global`]; reads need no synchronization.
use log::{info, warn};

use crate::classifier::Classifier;
use crate::config::{ModelSource, RegistryConfig};
use crate::error::{Result, TreeError};
use crate::tree::{Label, TreeArrays, TreeModel, TreeModelBuilder};

use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};


static GLOBAL: OnceLock<ModelRegistry> = OnceLock::new();


/// A map from model name to model.
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    models: BTreeMap<String, Arc<TreeModel>>,
}


impl ModelRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }


    /// A registry holding the built-in models `A` and `B`.
    pub fn builtin() -> Result<Self> {
        Self::from_config(&RegistryConfig::default())
    }


    /// Loads every model listed in `config`.
    pub fn from_config(config: &RegistryConfig) -> Result<Self> {
        let mut registry = Self::new();
        for source in &config.models {
            let model = load(source, config.collapse_redundant)?;
            registry.register(model)?;
        }
        info!("loaded models {:?}", registry.names());
        Ok(registry)
    }


    /// Adds `model` under its own name.
    pub fn register(&mut self, model: TreeModel) -> Result<Arc<TreeModel>> {
        let name = model.name().to_string();
        if self.models.contains_key(&name) {
            warn!("model {name} is already registered");
            return Err(TreeError::DuplicateModel(name));
        }
        let model = Arc::new(model);
        self.models.insert(name, Arc::clone(&model));
        Ok(model)
    }


    pub fn get(&self, name: &str) -> Option<&Arc<TreeModel>> {
        self.models.get(name)
    }


    /// Same as [`ModelRegistry::get`],
    /// but fails with [`TreeError::UnknownModel`].
    pub fn model(&self, name: &str) -> Result<&Arc<TreeModel>> {
        self.get(name)
            .ok_or_else(|| TreeError::UnknownModel(name.to_string()))
    }


    /// Names of the registered models, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.models.keys().map(String::as_str).collect()
    }


    #[inline]
    pub fn len(&self) -> usize {
        self.models.len()
    }


    #[inline]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }


    /// Evaluates the model `name` on `features`.
    pub fn predict(&self, name: &str, features: &[f64]) -> Result<Label> {
        self.model(name)?.predict(features)
    }
}


fn load(source: &ModelSource, collapse_redundant: bool) -> Result<TreeModel> {
    match source {
        ModelSource::Builtin { model } => {
            model.build(collapse_redundant)
        },
        ModelSource::File { path } => {
            info!("loading model from {}", path.display());
            let arrays = TreeArrays::from_json_file(path)?;
            TreeModelBuilder::from_arrays(arrays)
                .collapse_redundant(collapse_redundant)
                .build()
        },
    }
}


/// Installs the process-wide registry.
/// Only the first call succeeds.
pub fn install(registry: ModelRegistry) -> Result<&'static ModelRegistry> {
    GLOBAL.set(registry)
        .map_err(|_| TreeError::RegistryAlreadyInstalled)?;
    info!("installed the global model registry");
    global().ok_or(TreeError::RegistryAlreadyInstalled)
}


/// Returns the process-wide registry, if one was installed.
pub fn global() -> Option<&'static ModelRegistry> {
    GLOBAL.get()
}


/// Installs a registry of the built-in models unless one is installed,
/// and returns the process-wide registry.
pub fn global_or_builtin() -> Result<&'static ModelRegistry> {
    if let Some(registry) = global() {
        return Ok(registry);
    }
    let registry = ModelRegistry::builtin()?;
    // Another thread may have won the race; its registry is kept.
    let _ = GLOBAL.set(registry);
    global().ok_or(TreeError::RegistryAlreadyInstalled)
}
