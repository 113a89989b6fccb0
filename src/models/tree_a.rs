//! Tree A: decides the block size for every intra block.
//! Reads the 18 features of [`FEATURES_A`](super::FEATURES_A).
use crate::tree::{branch, leaf, NodeSpec};


/// Returns the trained tree A.
///
/// The tree keeps the redundant splits it was trained with;
/// build it with `collapse_redundant(true)` to drop them.
pub fn tree_a() -> NodeSpec {
    branch(10, 35.5,
        branch(17, 4.999999921591263e17,
            branch(7, 71402528.0,
                leaf(0),
                leaf(0),
            ),
            leaf(1),
        ),
        branch(17, 4.999999935734331e17,
            branch(17, 31971794.0,
                branch(11, 200.5,
                    branch(6, 48.0,
                        branch(10, 334.5,
                            branch(0, 115.5,
                                leaf(0),
                                branch(9, 28.5,
                                    leaf(1),
                                    leaf(1),
                                ),
                            ),
                            branch(13, 0.5,
                                leaf(1),
                                leaf(1),
                            ),
                        ),
                        branch(5, 12.0,
                            leaf(0),
                            branch(12, 65.5,
                                branch(6, 96.0,
                                    leaf(0),
                                    branch(15, -0.5,
                                        leaf(1),
                                        branch(6, 192.0,
                                            leaf(1),
                                            leaf(1),
                                        ),
                                    ),
                                ),
                                branch(17, 2382364.5,
                                    branch(16, -4.5,
                                        leaf(1),
                                        leaf(1),
                                    ),
                                    branch(14, 6.5,
                                        branch(10, 1612.5,
                                            branch(14, 1.5,
                                                branch(3, 6.0,
                                                    leaf(0),
                                                    leaf(0),
                                                ),
                                                leaf(1),
                                            ),
                                            branch(13, -1.5,
                                                leaf(0),
                                                leaf(1),
                                            ),
                                        ),
                                        leaf(0),
                                    ),
                                ),
                            ),
                        ),
                    ),
                    branch(10, 2215.0,
                        branch(7, 2215457.0,
                            branch(0, 146.0,
                                leaf(1),
                                leaf(0),
                            ),
                            branch(16, -4.5,
                                leaf(1),
                                leaf(1),
                            ),
                        ),
                        branch(12, 750.0,
                            branch(2, 1526.0,
                                branch(9, 32.0,
                                    branch(9, 0.5,
                                        leaf(1),
                                        leaf(1),
                                    ),
                                    leaf(1),
                                ),
                                leaf(1),
                            ),
                            leaf(1),
                        ),
                    ),
                ),
                leaf(0),
            ),
            leaf(1),
        ),
    )
}
