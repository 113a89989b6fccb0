//! Exports the model types, the evaluation trait, and the helpers
//! needed to build and run trees.
//! 
pub use crate::tree::{
    // Model
    TreeModel,
    TreeModelBuilder,
    TreeArrays,


    // Nested description
    NodeSpec,
    branch,
    leaf,


    // Arena
    Node,
    NodeId,
    Label,
    Splitter,
    LeftRight,
    ROOT,
    MAX_DEPTH,
};


pub use crate::classifier::Classifier;


pub use crate::models::{
    BuiltinModel,
    FEATURES_A,
    FEATURES_B,
    CLASS_NAMES,
};


pub use crate::registry::ModelRegistry;
pub use crate::decision::BlockSizeDecision;
pub use crate::config::{RegistryConfig, ModelSource};
pub use crate::sample::{Sample, SampleReader, CLIP_BOUND};
pub use crate::evaluation::{ConfusionMatrix, ClassificationReport};
pub use crate::error::TreeError;
