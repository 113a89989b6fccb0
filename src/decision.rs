//! Maps class labels to the block-size decision they stand for.
//! Models never apply this mapping themselves.
use serde::{Serialize, Deserialize};

use crate::tree::Label;

use std::fmt;


/// The coding decision predicted for a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockSizeDecision {
    /// Label `0`.
    Size10,
    /// Label `1`.
    Size20,
}


impl BlockSizeDecision {
    /// Returns the decision for `label`, or `None` for labels
    /// the built-in models never produce.
    #[inline]
    pub fn from_label(label: Label) -> Option<Self> {
        match label {
            0 => Some(Self::Size10),
            1 => Some(Self::Size20),
            _ => None,
        }
    }


    #[inline]
    pub fn label(&self) -> Label {
        match self {
            Self::Size10 => 0,
            Self::Size20 => 1,
        }
    }


    /// The block size, `10` or `20`.
    #[inline]
    pub fn block_size(&self) -> u32 {
        match self {
            Self::Size10 => 10,
            Self::Size20 => 20,
        }
    }
}


impl TryFrom<Label> for BlockSizeDecision {
    type Error = Label;
    fn try_from(label: Label) -> Result<Self, Self::Error> {
        Self::from_label(label).ok_or(label)
    }
}


impl fmt::Display for BlockSizeDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.block_size())
    }
}
