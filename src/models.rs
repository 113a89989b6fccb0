//! The two trained block-size classifiers shipped with this crate.
//!
//! Both trees return class `0` for block size 10 and class `1`
//! for block size 20 (see [`BlockSizeDecision`](crate::BlockSizeDecision)).
//! Their thresholds were fit against the positional feature order below,
//! so callers must fill the feature vectors in exactly this order.

mod tree_a;
mod tree_b;

pub use tree_a::tree_a;
pub use tree_b::tree_b;

use serde::{Serialize, Deserialize};

use crate::error::Result;
use crate::tree::{TreeModel, TreeModelBuilder};

use std::fmt;
use std::str::FromStr;


/// Features of tree A, in positional order.
pub const FEATURES_A: [&str; 18] = [
    "frame",
    "x",
    "y",
    "Width",
    "Height",
    "BlockSize",
    "Area",
    "splitSeries",
    "cuQP",
    "IntraMode",
    "AbsSumResidual",
    "AbsSumUltimaLinha",
    "AbsSumUltimaColuna",
    "lefTopResidual",
    "leftBottomResidual",
    "rightTopResidual",
    "rightBottomResidual",
    "DCT2_DCT2cost",
];


/// Features of tree B, in positional order.
pub const FEATURES_B: [&str; 26] = [
    "frame",
    "x",
    "y",
    "Width",
    "Height",
    "BlockSize",
    "Area",
    "depth",
    "CurrQP",
    "splitSeries",
    "BitDepth",
    "cuQP",
    "isMIP",
    "IntraMode",
    "multiRefIdx",
    "AbsSumResidual",
    "AbsSumUltimaLinha",
    "AbsSumUltimaColuna",
    "lefTopResidual",
    "leftBottomResidual",
    "rightTopResidual",
    "rightBottomResidual",
    "DCT2_DCT2cost",
    "BorderContact",
    "FrameWidth",
    "FrameHeight",
];


/// External names of the classes: label `0` is block size 10,
/// label `1` is block size 20.
pub const CLASS_NAMES: [&str; 2] = ["10", "20"];


/// The trees shipped with this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuiltinModel {
    A,
    B,
}


impl BuiltinModel {
    /// Every built-in model.
    pub const ALL: [Self; 2] = [Self::A, Self::B];


    /// The registry name of this model.
    pub fn name(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
        }
    }


    pub fn feature_names(&self) -> &'static [&'static str] {
        match self {
            Self::A => &FEATURES_A,
            Self::B => &FEATURES_B,
        }
    }


    #[inline]
    pub fn arity(&self) -> usize {
        self.feature_names().len()
    }


    /// Builds the model, optionally collapsing its redundant splits.
    pub fn build(&self, collapse_redundant: bool) -> Result<TreeModel> {
        let root = match self {
            Self::A => tree_a(),
            Self::B => tree_b(),
        };

        TreeModelBuilder::new(self.name())
            .feature_names(self.feature_names().iter().copied())
            .class_names(CLASS_NAMES)
            .root(root)
            .collapse_redundant(collapse_redundant)
            .build()
    }
}


impl fmt::Display for BuiltinModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}


impl FromStr for BuiltinModel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "a" => Ok(Self::A),
            "b" => Ok(Self::B),
            _ => Err(format!(
                "Unknown built-in model: {s}. Available models are A and B"
            )),
        }
    }
}
