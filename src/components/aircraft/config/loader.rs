use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use bevy::prelude::*;
use serde::Deserialize;
use thiserror::Error;

use crate::components::aircraft::config::PlaneModel;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileError(#[from] std::io::Error),
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),
    #[error("Invalid aircraft configuration: {0}")]
    ValidationError(String),
    #[error("Unknown plane model: {0}")]
    UnknownModel(String),
}

/// On-disk layout of a plane catalog: a list of models under `models`.
#[derive(Debug, Deserialize)]
struct RawPlaneCatalog {
    models: Vec<PlaneModel>,
}

/// Named collection of validated plane models.
#[derive(Resource, Debug, Clone, Default)]
pub struct PlaneCatalog {
    models: BTreeMap<String, Arc<PlaneModel>>,
}

impl PlaneCatalog {
    /// Catalog holding every built-in model.
    pub fn built_in() -> Self {
        let mut catalog = Self::default();
        let cessna = PlaneModel::cessna_172();
        catalog.models.insert(cessna.name.clone(), Arc::new(cessna));
        catalog
    }

    /// Loads a catalog from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let file_contents = std::fs::read_to_string(path)?;
        let catalog = Self::from_yaml_str(&file_contents)?;
        info!(
            "Loaded {} plane model(s) from {}",
            catalog.models.len(),
            path.display()
        );
        Ok(catalog)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let raw: RawPlaneCatalog = serde_yaml::from_str(yaml)?;
        let mut catalog = Self::default();
        for model in raw.models {
            model.validate()?;
            if catalog.models.contains_key(&model.name) {
                return Err(ConfigError::ValidationError(format!(
                    "duplicate plane model '{}'",
                    model.name
                )));
            }
            catalog.models.insert(model.name.clone(), Arc::new(model));
        }
        Ok(catalog)
    }

    pub fn get(&self, name: &str) -> Result<Arc<PlaneModel>, ConfigError> {
        self.models
            .get(name)
            .cloned()
            .ok_or_else(|| ConfigError::UnknownModel(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.models.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
