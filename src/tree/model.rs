//! Defines the immutable decision tree model.
use log::debug;
use serde::{Serialize, Deserialize};

use crate::classifier::Classifier;
use crate::error::{Result, TreeError};
use super::arrays::TreeArrays;
use super::node::*;

use std::fmt;
use std::mem;


/// The root of every tree sits at the front of the arena.
pub const ROOT: NodeId = 0;


/// Longest root-to-leaf path, in branches, a model may have.
/// Trained block-size trees are a few dozen levels deep at most.
pub const MAX_DEPTH: usize = 4096;


/// A trained decision tree.
///
/// The nodes live in a flat arena with the root at index [`ROOT`];
/// branches refer to their children by index.
/// A `TreeModel` is validated once at construction and
/// never changes afterwards, so it can be shared across threads
/// (e.g. behind an `Arc`) and evaluated concurrently without locking.
///
/// # Example
/// ```
/// use minitrees::prelude::*;
///
/// let model = TreeModel::from_spec(
///     "toy",
///     vec!["x".to_string(), "y".to_string()],
///     vec!["10".to_string(), "20".to_string()],
///     &branch(0, 0.5, leaf(0), branch(1, 3.0, leaf(1), leaf(0))),
/// ).unwrap();
///
/// assert_eq!(model.predict(&[0.5, 9.0]).unwrap(), 0);
/// assert_eq!(model.predict(&[1.0, 2.0]).unwrap(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TreeArrays", into = "TreeArrays")]
pub struct TreeModel {
    name:          String,
    feature_names: Vec<String>,
    class_names:   Vec<String>,
    nodes:         Vec<Node>,
}


impl TreeModel {
    /// Builds a model from a nested description.
    /// The nodes are laid out in pre-order.
    pub fn from_spec<S>(
        name:          S,
        feature_names: Vec<String>,
        class_names:   Vec<String>,
        root:          &NodeSpec,
    ) -> Result<Self>
        where S: Into<String>
    {
        let nodes = flatten(root);
        Self::from_nodes(name, feature_names, class_names, nodes)
    }


    /// Builds a model from an arena whose root is at index [`ROOT`].
    /// Fails with [`TreeError::MalformedModel`] unless the arena
    /// forms a single finite binary tree over valid features and classes,
    /// at most [`MAX_DEPTH`] branches deep.
    pub fn from_nodes<S>(
        name:          S,
        feature_names: Vec<String>,
        class_names:   Vec<String>,
        nodes:         Vec<Node>,
    ) -> Result<Self>
        where S: Into<String>
    {
        let name = name.into();
        validate(&name, feature_names.len(), class_names.len(), &nodes)?;

        let model = Self { name, feature_names, class_names, nodes, };
        debug!(
            "built tree model {}: {} nodes, {} leaves, depth {}",
            model.name, model.n_nodes(), model.n_leaves(), model.depth(),
        );
        Ok(model)
    }


    /// The name that identifies this model in a registry.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }


    /// Names of the features, in positional order.
    #[inline]
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }


    /// External names of the classes, indexed by label.
    #[inline]
    pub fn class_names(&self) -> &[String] {
        &self.class_names
    }


    /// The required length of a feature vector.
    #[inline]
    pub fn arity(&self) -> usize {
        self.feature_names.len()
    }


    /// The arena. The root is `nodes()[ROOT]`.
    #[inline]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }


    #[inline]
    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }


    pub fn n_leaves(&self) -> usize {
        self.nodes.iter()
            .filter(|node| node.is_leaf())
            .count()
    }


    /// Number of branches on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut stack = vec![(ROOT, 0_usize)];
        while let Some((id, d)) = stack.pop() {
            match self.nodes[id] {
                Node::Branch { left, right, .. } => {
                    stack.push((left, d + 1));
                    stack.push((right, d + 1));
                },
                Node::Leaf { .. } => {
                    depth = depth.max(d);
                },
            }
        }
        depth
    }


    /// Returns the ids of the nodes visited by `features`,
    /// from the root to the leaf that decides the label.
    pub fn decision_path(&self, features: &[f64]) -> Result<Vec<NodeId>> {
        let mut path = Vec::new();
        self.walk(features, |id| path.push(id))?;
        Ok(path)
    }


    /// Returns the parallel-array description of this model.
    pub fn to_arrays(&self) -> TreeArrays {
        TreeArrays::from_nodes(
            self.name.clone(),
            self.feature_names.clone(),
            self.class_names.clone(),
            &self.nodes,
        )
    }


    /// Converts the arena back into a nested description.
    pub fn to_spec(&self) -> NodeSpec {
        let mut specs = vec![leaf(0); self.nodes.len()];
        for id in self.post_order() {
            specs[id] = match self.nodes[id] {
                Node::Branch { splitter, left, right } => {
                    let left  = mem::replace(&mut specs[left], leaf(0));
                    let right = mem::replace(&mut specs[right], leaf(0));
                    branch(splitter.feature, splitter.threshold, left, right)
                },
                Node::Leaf { class } => leaf(class),
            };
        }
        specs.swap_remove(ROOT)
    }


    /// Node ids with every child listed before its parent.
    pub(crate) fn post_order(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![(ROOT, false)];
        while let Some((id, expanded)) = stack.pop() {
            match self.nodes[id] {
                Node::Branch { left, right, .. } if !expanded => {
                    stack.push((id, true));
                    stack.push((right, false));
                    stack.push((left, false));
                },
                _ => order.push(id),
            }
        }
        order
    }


    /// Walks from the root to a leaf, calling `visit` on every node.
    #[inline]
    fn walk<F>(&self, features: &[f64], mut visit: F) -> Result<Label>
        where F: FnMut(NodeId)
    {
        if features.len() != self.arity() {
            return Err(TreeError::InvalidFeatureVector {
                expected: self.arity(),
                got:      features.len(),
            });
        }

        let mut id = ROOT;
        loop {
            visit(id);
            match self.nodes[id] {
                Node::Leaf { class } => {
                    return Ok(class);
                },
                Node::Branch { splitter, left, right } => {
                    id = match splitter.split(features)? {
                        LeftRight::Left  => left,
                        LeftRight::Right => right,
                    };
                },
            }
        }
    }
}


impl Classifier for TreeModel {
    #[inline]
    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }


    #[inline]
    fn predict(&self, features: &[f64]) -> Result<Label> {
        self.walk(features, |_| {})
    }
}


impl fmt::Display for TreeModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TreeModel {name} ({arity} features, {n_classes} classes): \
             {n_nodes} nodes, {n_leaves} leaves, depth {depth}",
            name      = self.name,
            arity     = self.arity(),
            n_classes = self.class_names.len(),
            n_nodes   = self.n_nodes(),
            n_leaves  = self.n_leaves(),
            depth     = self.depth(),
        )
    }
}


impl TryFrom<TreeArrays> for TreeModel {
    type Error = TreeError;
    fn try_from(arrays: TreeArrays) -> Result<Self> {
        let nodes = arrays.nodes()?;
        let TreeArrays { name, feature_names, class_names, .. } = arrays;
        Self::from_nodes(name, feature_names, class_names, nodes)
    }
}


impl From<TreeModel> for TreeArrays {
    fn from(model: TreeModel) -> Self {
        model.to_arrays()
    }
}


/// Lays `root` out in pre-order.
fn flatten(root: &NodeSpec) -> Vec<Node> {
    let mut nodes: Vec<Node> = Vec::new();
    let mut stack = vec![(root, None)];
    while let Some((spec, parent)) = stack.pop() {
        let id = nodes.len();
        match spec {
            NodeSpec::Leaf { class } => {
                nodes.push(Node::Leaf { class: *class });
            },
            NodeSpec::Branch { feature, threshold, left, right } => {
                // Children are attached once they get their ids.
                nodes.push(Node::Branch {
                    splitter: Splitter::new(*feature, *threshold),
                    left:     id,
                    right:    id,
                });
                stack.push((&**right, Some((id, LeftRight::Right))));
                stack.push((&**left, Some((id, LeftRight::Left))));
            },
        }
        if let Some((parent, side)) = parent {
            nodes[parent].set_child(side, id);
        }
    }
    nodes
}


/// Checks that `nodes` is a single binary tree rooted at `ROOT`.
fn validate(
    name:      &str,
    arity:     usize,
    n_classes: usize,
    nodes:     &[Node],
) -> Result<()>
{
    if nodes.is_empty() {
        return Err(TreeError::malformed(format!(
            "model {name} has no nodes"
        )));
    }
    if n_classes == 0 {
        return Err(TreeError::malformed(format!(
            "model {name} declares no classes"
        )));
    }

    for (id, node) in nodes.iter().enumerate() {
        match *node {
            Node::Branch { splitter, left, right } => {
                if splitter.feature >= arity {
                    return Err(TreeError::malformed(format!(
                        "model {name}: node {id} tests feature {} \
                         but the model has {arity} features",
                        splitter.feature,
                    )));
                }
                if !splitter.threshold.is_finite() {
                    return Err(TreeError::malformed(format!(
                        "model {name}: node {id} has threshold {}",
                        splitter.threshold,
                    )));
                }
                for child in [left, right] {
                    if child >= nodes.len() {
                        return Err(TreeError::malformed(format!(
                            "model {name}: node {id} points to node {child} \
                             but only {} nodes exist",
                            nodes.len(),
                        )));
                    }
                }
            },
            Node::Leaf { class } => {
                if class >= n_classes {
                    return Err(TreeError::malformed(format!(
                        "model {name}: leaf {id} predicts class {class} \
                         but the model has {n_classes} classes",
                    )));
                }
            },
        }
    }

    // Every node must be reached exactly once from the root.
    let mut seen = vec![false; nodes.len()];
    let mut stack = vec![(ROOT, 0_usize)];
    while let Some((id, depth)) = stack.pop() {
        if seen[id] {
            return Err(TreeError::malformed(format!(
                "model {name}: node {id} is shared or part of a cycle"
            )));
        }
        seen[id] = true;
        if let Node::Branch { left, right, .. } = nodes[id] {
            if depth == MAX_DEPTH {
                return Err(TreeError::malformed(format!(
                    "model {name} is deeper than {MAX_DEPTH} levels"
                )));
            }
            stack.push((right, depth + 1));
            stack.push((left, depth + 1));
        }
    }

    if let Some(id) = seen.iter().position(|s| !s) {
        return Err(TreeError::malformed(format!(
            "model {name}: node {id} is unreachable from the root"
        )));
    }

    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;

    fn names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("f{i}")).collect()
    }

    fn classes() -> Vec<String> {
        vec!["10".to_string(), "20".to_string()]
    }

    #[test]
    fn flatten_is_pre_order() {
        let spec = branch(0, 1.0, branch(1, 2.0, leaf(0), leaf(1)), leaf(1));
        let model = TreeModel::from_spec("t", names(2), classes(), &spec)
            .unwrap();

        assert_eq!(model.n_nodes(), 5);
        assert_eq!(
            model.nodes()[ROOT],
            Node::Branch { splitter: Splitter::new(0, 1.0), left: 1, right: 4 },
        );
        assert_eq!(
            model.nodes()[1],
            Node::Branch { splitter: Splitter::new(1, 2.0), left: 2, right: 3 },
        );
        assert_eq!(model.to_spec(), spec);
    }

    #[test]
    fn single_leaf_model_ignores_features() {
        let model = TreeModel::from_spec("t", names(3), classes(), &leaf(1))
            .unwrap();
        assert_eq!(model.depth(), 0);
        assert_eq!(model.predict(&[f64::NAN, 1.0, -1.0]).unwrap(), 1);
        assert_eq!(model.decision_path(&[0.0; 3]).unwrap(), vec![ROOT]);
    }

    #[test]
    fn shared_child_is_rejected() {
        let nodes = vec![
            Node::Branch { splitter: Splitter::new(0, 1.0), left: 1, right: 1 },
            Node::Leaf { class: 0 },
        ];
        let err = TreeModel::from_nodes("t", names(1), classes(), nodes)
            .unwrap_err();
        assert!(err.is_malformed_model());
    }

    #[test]
    fn cycle_is_rejected() {
        let nodes = vec![
            Node::Branch { splitter: Splitter::new(0, 1.0), left: 1, right: 2 },
            Node::Branch { splitter: Splitter::new(0, 0.0), left: 0, right: 2 },
            Node::Leaf { class: 0 },
        ];
        let err = TreeModel::from_nodes("t", names(1), classes(), nodes)
            .unwrap_err();
        assert!(err.is_malformed_model());
    }

    #[test]
    fn post_order_lists_children_first() {
        let spec = branch(0, 1.0, branch(1, 2.0, leaf(0), leaf(1)), leaf(1));
        let model = TreeModel::from_spec("t", names(2), classes(), &spec)
            .unwrap();
        assert_eq!(model.post_order(), vec![2, 3, 1, 4, 0]);
    }

    #[test]
    fn depth_is_bounded() {
        let mut spec = leaf(0);
        for _ in 0..=MAX_DEPTH {
            spec = branch(0, 1.0, leaf(1), spec);
        }
        let err = TreeModel::from_spec("t", names(1), classes(), &spec)
            .unwrap_err();
        assert!(format!("{err}").contains("deeper than"));
    }

    #[test]
    fn unreachable_node_is_rejected() {
        let nodes = vec![
            Node::Leaf { class: 0 },
            Node::Leaf { class: 1 },
        ];
        let err = TreeModel::from_nodes("t", names(1), classes(), nodes)
            .unwrap_err();
        assert!(format!("{err}").contains("unreachable"));
    }
}
