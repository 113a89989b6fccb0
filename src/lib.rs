//! 
//! A crate that evaluates trained decision trees
//! for the intra block-size decision of a video encoder.
//! 
//! Each tree maps the feature vector of a coding block
//! (position, size, QP, residual statistics, transform cost, ...)
//! to a class index: `0` for block size 10, `1` for block size 20.
//! 
//! - [`TreeModel`]
//!     An immutable binary tree stored in a flat arena.
//!     It is validated once at construction and
//!     can be evaluated concurrently without locking.
//! 
//! - [`Classifier`]
//!     The evaluation interface.
//!     `predict` walks from the root to a leaf;
//!     a feature value equal to a threshold goes to the left branch.
//! 
//! - [`ModelRegistry`]
//!     Maps model names (`"A"`, `"B"`, ...) to models.
//! 
//! - [`ClassificationReport`]
//!     Scores a model on a labelled [`Sample`]
//!     with a confusion matrix and per-class precision and recall.
//! 
//! # Example
//! ```
//! use minitrees::prelude::*;
//! 
//! let registry = ModelRegistry::builtin().unwrap();
//! 
//! let mut features = vec![0.0; 26];
//! features[22] = 1e8;
//! let label = registry.predict("B", &features).unwrap();
//! assert_eq!(BlockSizeDecision::from_label(label), Some(BlockSizeDecision::Size10));
//! ```

pub mod error;
pub mod tree;
pub mod classifier;
pub mod models;
pub mod registry;
pub mod decision;
pub mod config;
pub mod sample;
pub mod evaluation;
pub mod prelude;


pub use error::{Result, TreeError};
pub use tree::{
    TreeModel,
    TreeModelBuilder,
    TreeArrays,
    NodeSpec,
    Label,
};
pub use classifier::Classifier;
pub use models::BuiltinModel;
pub use registry::ModelRegistry;
pub use decision::BlockSizeDecision;
pub use config::{RegistryConfig, ModelSource};
pub use sample::{Sample, SampleReader};
pub use evaluation::{ConfusionMatrix, ClassificationReport};
