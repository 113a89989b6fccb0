//! Batches of block feature vectors.
//!
//! A [`Sample`] stores one row per coding block.
//! Columns are named after the header of the file they were read from,
//! so they can be matched with the feature names of a model
//! regardless of their order.
//! A sample may also carry the true class of every row,
//! taken from one of its columns (see [`Sample::set_target`]).

/// Defines [`SampleReader`].
pub mod reader;

pub use reader::{SampleReader, CLIP_BOUND};

use log::debug;

use crate::error::{Result, TreeError};
use crate::tree::Label;

use std::collections::{HashMap, HashSet};


/// A batch of feature vectors.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    names:     Vec<String>,
    has_names: bool,
    rows:      Vec<Vec<f64>>,
    target:    Option<Vec<Label>>,
}


impl Sample {
    /// Construct a sample whose columns are named by `names`.
    /// Fails if two columns share a name
    /// or a row does not have one value per name.
    pub fn new(names: Vec<String>, rows: Vec<Vec<f64>>) -> Result<Self> {
        if let Some(name) = first_duplicate(&names) {
            return Err(TreeError::DuplicateColumn(name.to_string()));
        }
        check_rows(names.len(), &rows)?;
        Ok(Self { names, has_names: true, rows, target: None, })
    }


    /// Construct a sample without column names.
    /// Columns get the default names `Feat. [0]`, `Feat. [1]`, ...
    /// and are matched with model features by position.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let n_columns = rows.first().map_or(0, Vec::len);
        check_rows(n_columns, &rows)?;
        let names = (0..n_columns).map(|i| format!("Feat. [{i}]"))
            .collect();
        Ok(Self { names, has_names: false, rows, target: None, })
    }


    /// Returns the pair of the number of rows and columns.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.names.len())
    }


    #[inline]
    pub fn names(&self) -> &[String] {
        &self.names
    }


    /// Returns `true` if the column names come from a header.
    #[inline]
    pub fn has_names(&self) -> bool {
        self.has_names
    }


    #[inline]
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }


    /// The true class of every row, if a target column was set.
    #[inline]
    pub fn target(&self) -> Option<&[Label]> {
        self.target.as_deref()
    }


    /// Moves the column named `column` out of the features
    /// and uses it as the true class of every row.
    /// Every value of the column must be a non-negative integer.
    pub fn set_target(mut self, column: &str) -> Result<Self> {
        let j = self.names.iter()
            .position(|name| name == column)
            .ok_or_else(|| TreeError::MissingFeature(column.to_string()))?;

        let target = self.rows.iter_mut()
            .enumerate()
            .map(|(row, values)| {
                let value = values.remove(j);
                if value >= 0.0 && value.fract() == 0.0 && value <= u32::MAX as f64 {
                    Ok(value as Label)
                } else {
                    Err(TreeError::InvalidValue {
                        row,
                        column: j,
                        value:  value.to_string(),
                    })
                }
            })
            .collect::<Result<Vec<_>>>()?;

        self.names.remove(j);
        self.target = Some(target);
        Ok(self)
    }


    /// Returns the `i`-th row, if any.
    #[inline]
    pub fn row(&self, i: usize) -> Option<&[f64]> {
        self.rows.get(i).map(Vec::as_slice)
    }


    /// Clamps every value into `[lower, upper]`
    /// and returns the number of changed cells.
    /// NaN values are left untouched.
    pub fn clip(&mut self, lower: f64, upper: f64) -> usize {
        let mut n_clipped = 0;
        self.rows.iter_mut()
            .flat_map(|row| row.iter_mut())
            .for_each(|value| {
                if *value < lower {
                    *value = lower;
                    n_clipped += 1;
                } else if *value > upper {
                    *value = upper;
                    n_clipped += 1;
                }
            });
        n_clipped
    }


    /// Reorders the columns into the order of `feature_names`.
    ///
    /// Named columns are looked up by name; extra columns are dropped.
    /// Unnamed columns are taken as they are and
    /// their number must equal the number of features.
    pub fn project(&self, feature_names: &[String]) -> Result<Vec<Vec<f64>>> {
        if !self.has_names {
            // Without rows there is no column count to check.
            if self.rows.is_empty() {
                return Ok(Vec::new());
            }
            let n_columns = self.names.len();
            if n_columns != feature_names.len() {
                return Err(TreeError::InvalidFeatureVector {
                    expected: feature_names.len(),
                    got:      n_columns,
                });
            }
            return Ok(self.rows.clone());
        }

        let name_to_index = self.names.iter()
            .enumerate()
            .map(|(i, name)| (name.as_str(), i))
            .collect::<HashMap<_, _>>();

        let columns = feature_names.iter()
            .map(|name| {
                name_to_index.get(name.as_str())
                    .copied()
                    .ok_or_else(|| TreeError::MissingFeature(name.clone()))
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(
            "projecting {} rows onto {} of {} columns",
            self.rows.len(), columns.len(), self.names.len(),
        );

        let rows = self.rows.iter()
            .map(|row| columns.iter().map(|&j| row[j]).collect())
            .collect();
        Ok(rows)
    }
}


fn first_duplicate(names: &[String]) -> Option<&str> {
    let mut seen = HashSet::with_capacity(names.len());
    names.iter()
        .map(String::as_str)
        .find(|&name| !seen.insert(name))
}


fn check_rows(n_columns: usize, rows: &[Vec<f64>]) -> Result<()> {
    match rows.iter().find(|row| row.len() != n_columns) {
        Some(row) => Err(TreeError::InvalidFeatureVector {
            expected: n_columns,
            got:      row.len(),
        }),
        None => Ok(()),
    }
}
