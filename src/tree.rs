//! The files in `tree/` directory define
//! the decision tree model and the ways to construct it.

/// Defines the nodes of a tree.
pub mod node;
/// Defines the immutable tree model.
pub mod model;
/// Defines the parallel-array description.
pub mod arrays;
/// Defines [`TreeModelBuilder`].
pub mod builder;
mod export;
mod simplify;


pub use node::{
    branch,
    leaf,
    Label,
    LeftRight,
    Node,
    NodeId,
    NodeSpec,
    Splitter,
};
pub use model::{TreeModel, ROOT, MAX_DEPTH};
pub use arrays::TreeArrays;
pub use builder::TreeModelBuilder;
