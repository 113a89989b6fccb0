use log::debug;

use crate::error::{Result, TreeError};
use super::arrays::TreeArrays;
use super::model::TreeModel;
use super::node::NodeSpec;


/// The tree structure handed to [`TreeModelBuilder`].
#[derive(Debug, Clone)]
enum Source {
    Spec(NodeSpec),
    Arrays(TreeArrays),
}


/// A struct that builds [`TreeModel`].
///
/// # Example
///
/// ```
/// use minitrees::prelude::*;
///
/// let model = TreeModelBuilder::new("stump")
///     .feature_names(["x"])
///     .class_names(["10", "20"])
///     .root(branch(0, 0.5, leaf(0), leaf(1)))
///     .build()
///     .unwrap();
///
/// assert_eq!(model.arity(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct TreeModelBuilder {
    name:               String,
    feature_names:      Vec<String>,
    class_names:        Vec<String>,
    source:             Option<Source>,
    collapse_redundant: bool,
}


impl TreeModelBuilder {
    /// Construct a new instance of [`TreeModelBuilder`].
    /// By default, redundant splits are kept.
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name:               name.into(),
            feature_names:      Vec::new(),
            class_names:        Vec::new(),
            source:             None,
            collapse_redundant: false,
        }
    }


    /// Starts from a parallel-array description.
    /// Name, feature names, and class names are taken from `arrays`.
    pub fn from_arrays(arrays: TreeArrays) -> Self {
        Self {
            name:               arrays.name.clone(),
            feature_names:      arrays.feature_names.clone(),
            class_names:        arrays.class_names.clone(),
            source:             Some(Source::Arrays(arrays)),
            collapse_redundant: false,
        }
    }


    /// Set the feature names. Their number is the arity of the model.
    pub fn feature_names<I, S>(mut self, names: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>,
    {
        self.feature_names = names.into_iter().map(Into::into).collect();
        self
    }


    /// Set the external names of the classes, indexed by label.
    pub fn class_names<I, S>(mut self, names: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>,
    {
        self.class_names = names.into_iter().map(Into::into).collect();
        self
    }


    /// Set the nested description of the tree.
    pub fn root(mut self, root: NodeSpec) -> Self {
        self.source = Some(Source::Spec(root));
        self
    }


    /// Collapse splits whose subtrees are identical.
    /// The predictions are unchanged.
    pub fn collapse_redundant(mut self, flag: bool) -> Self {
        self.collapse_redundant = flag;
        self
    }


    /// Validates the description and builds the model.
    pub fn build(self) -> Result<TreeModel> {
        let Self {
            name,
            feature_names,
            class_names,
            source,
            collapse_redundant,
        } = self;

        let model = match source {
            Some(Source::Spec(root)) => {
                TreeModel::from_spec(name, feature_names, class_names, &root)?
            },
            Some(Source::Arrays(mut arrays)) => {
                arrays.name = name;
                arrays.feature_names = feature_names;
                arrays.class_names = class_names;
                TreeModel::try_from(arrays)?
            },
            None => {
                return Err(TreeError::malformed(format!(
                    "model {name} has no tree"
                )));
            },
        };

        if collapse_redundant {
            debug!("collapsing redundant splits of model {}", model.name());
            model.collapsed()
        } else {
            Ok(model)
        }
    }
}
