//! Removes splits whose two branches lead to the same prediction.
//!
//! A generated tree may contain a branch whose subtrees are identical
//! (both sides returning the same class, for instance).
//! Replacing such a branch by one of its subtrees never changes the
//! label of any input, NaN values included.
use log::debug;

use crate::error::Result;
use super::model::{TreeModel, ROOT};
use super::node::*;

use std::collections::HashMap;


/// A subtree up to structural equality.
/// Children are referred to by the id of their own shape.
#[derive(Debug, PartialEq, Eq, Hash)]
enum Shape {
    Leaf(Label),
    Branch {
        feature:   usize,
        threshold: u64,
        left:      usize,
        right:     usize,
    },
}


impl TreeModel {
    /// Returns an equivalent model without redundant splits.
    ///
    /// Works bottom-up: every branch whose subtrees are structurally
    /// identical, once collapsed themselves, is replaced by its left
    /// subtree. The result is laid out in pre-order.
    pub fn collapsed(&self) -> Result<Self> {
        let nodes = collapse_nodes(self.nodes(), &self.post_order());
        let model = Self::from_nodes(
            self.name(),
            self.feature_names().to_vec(),
            self.class_names().to_vec(),
            nodes,
        )?;

        debug!(
            "collapsed {} redundant nodes of model {}",
            self.n_nodes() - model.n_nodes(),
            self.name(),
        );
        Ok(model)
    }
}


fn collapse_nodes(nodes: &[Node], post_order: &[NodeId]) -> Vec<Node> {
    let mut shapes = HashMap::new();
    // Shape of each subtree, and the node that stands for it.
    let mut shape = vec![0_usize; nodes.len()];
    let mut keep = (0..nodes.len()).collect::<Vec<NodeId>>();

    for &id in post_order {
        let key = match nodes[id] {
            Node::Branch { left, right, .. } if shape[left] == shape[right] => {
                shape[id] = shape[left];
                keep[id] = keep[left];
                continue;
            },
            Node::Branch { splitter, left, right } => Shape::Branch {
                feature:   splitter.feature,
                threshold: threshold_bits(splitter.threshold),
                left:      shape[left],
                right:     shape[right],
            },
            Node::Leaf { class } => Shape::Leaf(class),
        };
        let next = shapes.len();
        shape[id] = *shapes.entry(key).or_insert(next);
    }

    let mut collapsed: Vec<Node> = Vec::new();
    let mut stack = vec![(keep[ROOT], None)];
    while let Some((old, parent)) = stack.pop() {
        let id = collapsed.len();
        collapsed.push(nodes[old]);
        if let Node::Branch { left, right, .. } = nodes[old] {
            stack.push((keep[right], Some((id, LeftRight::Right))));
            stack.push((keep[left], Some((id, LeftRight::Left))));
        }
        if let Some((parent, side)) = parent {
            collapsed[parent].set_child(side, id);
        }
    }
    collapsed
}


/// `0.0` and `-0.0` compare equal, so they share one key.
#[inline]
fn threshold_bits(threshold: f64) -> u64 {
    if threshold == 0.0 { 0 } else { threshold.to_bits() }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn collapse(spec: NodeSpec) -> NodeSpec {
        let names = ["f0", "f1", "f2"].map(String::from).to_vec();
        let classes = ["10", "20"].map(String::from).to_vec();
        TreeModel::from_spec("t", names, classes, &spec)
            .unwrap()
            .collapsed()
            .unwrap()
            .to_spec()
    }

    #[test]
    fn identical_leaves_collapse() {
        let spec = branch(0, 1.0, leaf(1), leaf(1));
        assert_eq!(collapse(spec), leaf(1));
    }

    #[test]
    fn collapse_propagates_upwards() {
        // Both subtrees become `leaf(0)` once collapsed.
        let spec = branch(
            0, 1.0,
            branch(1, 2.0, leaf(0), leaf(0)),
            branch(2, 3.0, leaf(0), leaf(0)),
        );
        assert_eq!(collapse(spec), leaf(0));
    }

    #[test]
    fn identical_subtrees_collapse() {
        let sub = branch(1, 2.0, leaf(0), leaf(1));
        let spec = branch(0, 1.0, sub.clone(), sub.clone());
        assert_eq!(collapse(spec), sub);
    }

    #[test]
    fn distinct_children_are_kept() {
        let spec = branch(0, 1.0, leaf(0), branch(1, 2.0, leaf(1), leaf(1)));
        assert_eq!(collapse(spec), branch(0, 1.0, leaf(0), leaf(1)));

        let spec = branch(0, 1.0, branch(1, 2.0, leaf(0), leaf(1)), branch(1, 2.5, leaf(0), leaf(1)));
        assert_eq!(collapse(spec.clone()), spec);
    }

    #[test]
    fn signed_zero_thresholds_match() {
        let spec = branch(0, 1.0, branch(1, 0.0, leaf(0), leaf(1)), branch(1, -0.0, leaf(0), leaf(1)));
        assert_eq!(collapse(spec), branch(1, 0.0, leaf(0), leaf(1)));
    }
}
