//! The evaluation interface shared by every model of this crate.
use rayon::prelude::*;

use crate::error::Result;
use crate::sample::Sample;
use crate::tree::Label;


/// A trait that defines the behavior of a classifier
/// over fixed-arity feature vectors.
/// You only need to implement `feature_names` and `predict`.
pub trait Classifier {
    /// Names of the features, in the positional order
    /// `predict` expects them.
    fn feature_names(&self) -> &[String];


    /// The required length of a feature vector.
    fn arity(&self) -> usize {
        self.feature_names().len()
    }


    /// Predicts the class index of one feature vector.
    /// Fails if `features.len() != self.arity()`.
    fn predict(&self, features: &[f64]) -> Result<Label>;


    /// Predicts the class index of every row of `sample`.
    /// The columns of `sample` are matched to the features by name
    /// and the rows are evaluated in parallel.
    fn predict_all(&self, sample: &Sample) -> Result<Vec<Label>>
        where Self: Sync
    {
        let rows = sample.project(self.feature_names())?;
        rows.par_iter()
            .map(|row| self.predict(row))
            .collect()
    }
}
