//! Defines the nodes of a decision tree:
//! the flat arena node [`Node`] used for evaluation and
//! the nested description [`NodeSpec`] used to write trees by hand.
use serde::{Serialize, Deserialize};

use crate::error::{Result, TreeError};

/// Index of a node inside the arena of a `TreeModel`.
pub type NodeId = usize;

/// Class index stored in a leaf.
pub type Label = usize;


/// The output of [`Splitter::split`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeftRight {
    /// `value <= threshold`
    Left,
    /// `value > threshold`, or the value is NaN.
    Right,
}


/// A threshold test on one feature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Splitter {
    /// Position of the tested feature in the feature vector.
    pub feature: usize,
    /// Values less than or equal to this go left.
    pub threshold: f64,
}


impl Splitter {
    #[inline]
    pub fn new(feature: usize, threshold: f64) -> Self {
        Self { feature, threshold }
    }


    /// Decides the branch for `features`.
    /// Ties go to the left branch.
    #[inline]
    pub fn split(&self, features: &[f64]) -> Result<LeftRight> {
        let value = features.get(self.feature)
            .ok_or(TreeError::FeatureIndexOutOfRange {
                index: self.feature,
                len: features.len(),
            })?;

        if *value <= self.threshold {
            Ok(LeftRight::Left)
        } else {
            Ok(LeftRight::Right)
        }
    }
}


/// A node of the arena.
/// Children are referenced by their index in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Node {
    /// A node that has two children.
    Branch {
        splitter: Splitter,
        left:     NodeId,
        right:    NodeId,
    },
    /// A node that predicts a class.
    Leaf {
        class: Label,
    },
}


impl Node {
    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf { .. })
    }


    /// Points the `side` child of a branch at `child`.
    /// Leaves are left unchanged.
    #[inline]
    pub(crate) fn set_child(&mut self, side: LeftRight, child: NodeId) {
        if let Self::Branch { left, right, .. } = self {
            match side {
                LeftRight::Left  => *left  = child,
                LeftRight::Right => *right = child,
            }
        }
    }
}


/// Nested, owned description of a tree.
/// Each child is exclusively owned by its parent,
/// so a `NodeSpec` can neither share nodes nor contain cycles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeSpec {
    Branch {
        feature:   usize,
        threshold: f64,
        left:      Box<NodeSpec>,
        right:     Box<NodeSpec>,
    },
    Leaf {
        class: Label,
    },
}


impl NodeSpec {
    /// Number of nodes in this subtree.
    pub fn n_nodes(&self) -> usize {
        let mut n_nodes = 0;
        let mut stack = vec![self];
        while let Some(spec) = stack.pop() {
            n_nodes += 1;
            if let Self::Branch { left, right, .. } = spec {
                stack.push(&**right);
                stack.push(&**left);
            }
        }
        n_nodes
    }
}


/// Returns a branch node testing `feature <= threshold`.
#[inline]
pub fn branch(
    feature:   usize,
    threshold: f64,
    left:      NodeSpec,
    right:     NodeSpec,
) -> NodeSpec
{
    NodeSpec::Branch {
        feature,
        threshold,
        left:  Box::new(left),
        right: Box::new(right),
    }
}


/// Returns a leaf node predicting `class`.
#[inline]
pub fn leaf(class: Label) -> NodeSpec {
    NodeSpec::Leaf { class }
}
