//! Parallel-array description of a tree.
//!
//! The layout follows the `tree_` attribute of scikit-learn:
//! entry `i` of every array describes node `i`, node `0` is the root,
//! and a node whose children are both [`TREE_LEAF`] is a leaf.
//! This is the on-disk (JSON) form of a [`TreeModel`](super::TreeModel).
use serde::{Serialize, Deserialize};

use crate::error::{Result, TreeError};
use super::node::*;

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;


/// Child sentinel of a leaf.
pub const TREE_LEAF: i64 = -1;
/// Feature sentinel of a leaf.
pub const TREE_UNDEFINED: i64 = -2;
/// Threshold stored for a leaf.
pub const LEAF_THRESHOLD: f64 = -2.0;
/// Class stored for a branch.
pub const BRANCH_CLASS: i64 = -1;


/// A tree described by parallel arrays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeArrays {
    pub name:           String,
    pub feature_names:  Vec<String>,
    pub class_names:    Vec<String>,
    pub children_left:  Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature:        Vec<i64>,
    pub threshold:      Vec<f64>,
    pub class:          Vec<i64>,
}


impl TreeArrays {
    /// Reads a JSON description from `path`.
    /// The arrays are not validated until they are turned into a model.
    pub fn from_json_file<P>(path: P) -> Result<Self>
        where P: AsRef<Path>
    {
        let file = File::open(path)?;
        let arrays = serde_json::from_reader(BufReader::new(file))?;
        Ok(arrays)
    }


    /// Writes this description to `path` as JSON.
    pub fn to_json_file<P>(&self, path: P) -> Result<()>
        where P: AsRef<Path>
    {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }


    /// Number of nodes described.
    #[inline]
    pub fn len(&self) -> usize {
        self.children_left.len()
    }


    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }


    pub(crate) fn from_nodes(
        name:          String,
        feature_names: Vec<String>,
        class_names:   Vec<String>,
        nodes:         &[Node],
    ) -> Self
    {
        let n_nodes = nodes.len();
        let mut arrays = Self {
            name,
            feature_names,
            class_names,
            children_left:  Vec::with_capacity(n_nodes),
            children_right: Vec::with_capacity(n_nodes),
            feature:        Vec::with_capacity(n_nodes),
            threshold:      Vec::with_capacity(n_nodes),
            class:          Vec::with_capacity(n_nodes),
        };

        for node in nodes {
            match *node {
                Node::Branch { splitter, left, right } => {
                    arrays.children_left.push(left as i64);
                    arrays.children_right.push(right as i64);
                    arrays.feature.push(splitter.feature as i64);
                    arrays.threshold.push(splitter.threshold);
                    arrays.class.push(BRANCH_CLASS);
                },
                Node::Leaf { class } => {
                    arrays.children_left.push(TREE_LEAF);
                    arrays.children_right.push(TREE_LEAF);
                    arrays.feature.push(TREE_UNDEFINED);
                    arrays.threshold.push(LEAF_THRESHOLD);
                    arrays.class.push(class as i64);
                },
            }
        }
        arrays
    }


    /// Decodes the arrays into arena nodes.
    /// Only the per-node encoding is checked here;
    /// the tree shape is checked by `TreeModel::from_nodes`.
    pub(crate) fn nodes(&self) -> Result<Vec<Node>> {
        let n_nodes = self.len();
        let lengths = [
            self.children_right.len(),
            self.feature.len(),
            self.threshold.len(),
            self.class.len(),
        ];
        if lengths.iter().any(|&len| len != n_nodes) {
            return Err(TreeError::malformed(format!(
                "model {}: parallel arrays have different lengths",
                self.name,
            )));
        }

        (0..n_nodes).map(|id| self.node(id)).collect()
    }


    fn node(&self, id: usize) -> Result<Node> {
        let name = &self.name;
        let left  = self.children_left[id];
        let right = self.children_right[id];

        match (left, right) {
            (TREE_LEAF, TREE_LEAF) => {
                let class = usize::try_from(self.class[id])
                    .map_err(|_| TreeError::malformed(format!(
                        "model {name}: leaf {id} has class {}",
                        self.class[id],
                    )))?;
                Ok(Node::Leaf { class })
            },
            (TREE_LEAF, _) | (_, TREE_LEAF) => {
                Err(TreeError::malformed(format!(
                    "model {name}: node {id} has a single child"
                )))
            },
            _ => {
                let left  = to_index(name, id, "child", left)?;
                let right = to_index(name, id, "child", right)?;
                let feature = to_index(name, id, "feature", self.feature[id])?;
                let threshold = self.threshold[id];
                Ok(Node::Branch {
                    splitter: Splitter::new(feature, threshold),
                    left,
                    right,
                })
            },
        }
    }
}


fn to_index(name: &str, id: usize, what: &str, value: i64) -> Result<usize> {
    usize::try_from(value)
        .map_err(|_| TreeError::malformed(format!(
            "model {name}: node {id} has {what} index {value}"
        )))
}


#[cfg(test)]
mod tests {
    use super::*;

    fn stump() -> TreeArrays {
        TreeArrays {
            name:           "stump".to_string(),
            feature_names:  vec!["x".to_string()],
            class_names:    vec!["10".to_string(), "20".to_string()],
            children_left:  vec![1, TREE_LEAF, TREE_LEAF],
            children_right: vec![2, TREE_LEAF, TREE_LEAF],
            feature:        vec![0, TREE_UNDEFINED, TREE_UNDEFINED],
            threshold:      vec![0.5, LEAF_THRESHOLD, LEAF_THRESHOLD],
            class:          vec![BRANCH_CLASS, 0, 1],
        }
    }

    #[test]
    fn decodes_branch_and_leaves() {
        let nodes = stump().nodes().unwrap();
        assert_eq!(
            nodes,
            vec![
                Node::Branch { splitter: Splitter::new(0, 0.5), left: 1, right: 2 },
                Node::Leaf { class: 0 },
                Node::Leaf { class: 1 },
            ],
        );
    }

    #[test]
    fn single_child_is_rejected() {
        let mut arrays = stump();
        arrays.children_right[0] = TREE_LEAF;
        assert!(arrays.nodes().unwrap_err().is_malformed_model());
    }

    #[test]
    fn length_mismatch_is_rejected() {
        let mut arrays = stump();
        arrays.threshold.pop();
        assert!(arrays.nodes().unwrap_err().is_malformed_model());
    }

    #[test]
    fn negative_class_is_rejected() {
        let mut arrays = stump();
        arrays.class[2] = -3;
        assert!(arrays.nodes().unwrap_err().is_malformed_model());
    }

    #[test]
    fn nodes_round_trip() {
        let arrays = stump();
        let nodes = arrays.nodes().unwrap();
        let back = TreeArrays::from_nodes(
            arrays.name.clone(),
            arrays.feature_names.clone(),
            arrays.class_names.clone(),
            &nodes,
        );
        assert_eq!(back, arrays);
    }
}
