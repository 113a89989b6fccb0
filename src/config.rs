use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::BuiltinModel;

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};


/// Which models a [`ModelRegistry`](crate::ModelRegistry) loads.
///
/// ```json
/// {
///     "collapse_redundant": true,
///     "models": [
///         { "source": "builtin", "model": "A" },
///         { "source": "file", "path": "trees/tree_c.json" }
///     ]
/// }
/// ```
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct RegistryConfig {
    /// Drop redundant splits while loading. Predictions are unchanged.
    #[serde(default)]
    pub collapse_redundant: bool,

    pub models: Vec<ModelSource>,
}


/// Where a model comes from.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum ModelSource {
    /// A tree shipped with this crate.
    Builtin { model: BuiltinModel },
    /// A JSON `TreeArrays` file.
    File { path: PathBuf },
}


impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            collapse_redundant: false,
            models: BuiltinModel::ALL.iter()
                .map(|&model| ModelSource::from(model))
                .collect(),
        }
    }
}


impl From<BuiltinModel> for ModelSource {
    fn from(model: BuiltinModel) -> Self {
        ModelSource::Builtin { model }
    }
}


impl RegistryConfig {
    pub fn new(collapse_redundant: bool, models: Vec<ModelSource>) -> Self {
        Self { collapse_redundant, models, }
    }


    /// Reads a configuration from a JSON file.
    pub fn from_json_file<P>(path: P) -> Result<Self>
        where P: AsRef<Path>
    {
        let file = File::open(path)?;
        let config = serde_json::from_reader(BufReader::new(file))?;
        Ok(config)
    }
}
