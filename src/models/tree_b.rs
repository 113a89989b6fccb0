//! Tree B: block-size decision over the extended feature set,
//! which adds encoder state and frame geometry to the features of tree A.
//! Reads the 26 features of [`FEATURES_B`](super::FEATURES_B).
use crate::tree::{branch, leaf, NodeSpec};


/// Returns the trained tree B.
pub fn tree_b() -> NodeSpec {
    branch(22, 95769868.0,
        branch(6, 192.0,
            branch(13, 34.5,
                branch(0, 215.5,
                    leaf(0),
                    leaf(0),
                ),
                leaf(1),
            ),
            branch(3, 24.0,
                leaf(1),
                leaf(1),
            ),
        ),
        leaf(0),
    )
}
