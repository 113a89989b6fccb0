//! Scores predictions against the true classes of a labelled sample.
//!
//! [`TreeModel::evaluate`] predicts every row of a [`Sample`] that carries
//! a target column, then tallies a [`ConfusionMatrix`] and logs a
//! per-class precision / recall report.
use log::info;
use serde::Serialize;

use crate::classifier::Classifier;
use crate::error::{Result, TreeError};
use crate::sample::Sample;
use crate::tree::{Label, TreeModel};

use std::fmt;


/// Counts of (true class, predicted class) pairs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfusionMatrix {
    /// `counts[actual][predicted]`
    counts: Vec<Vec<usize>>,
}


impl ConfusionMatrix {
    /// An empty matrix over `n_classes` classes.
    pub fn new(n_classes: usize) -> Self {
        Self { counts: vec![vec![0; n_classes]; n_classes] }
    }


    /// Tallies `actual[i]` against `predicted[i]` for every `i`.
    pub fn from_labels(
        n_classes: usize,
        actual:    &[Label],
        predicted: &[Label],
    ) -> Result<Self>
    {
        if actual.len() != predicted.len() {
            return Err(TreeError::LabelCountMismatch {
                actual:    actual.len(),
                predicted: predicted.len(),
            });
        }

        let mut matrix = Self::new(n_classes);
        for (row, (&a, &p)) in actual.iter().zip(predicted).enumerate() {
            if let Some(class) = [a, p].into_iter().find(|&c| c >= n_classes) {
                return Err(TreeError::UnknownClass { row, class });
            }
            matrix.counts[a][p] += 1;
        }
        Ok(matrix)
    }


    #[inline]
    pub fn n_classes(&self) -> usize {
        self.counts.len()
    }


    /// Rows are true classes, columns are predicted classes.
    #[inline]
    pub fn counts(&self) -> &[Vec<usize>] {
        &self.counts
    }


    /// Number of rows of class `actual` predicted as `predicted`.
    pub fn count(&self, actual: Label, predicted: Label) -> usize {
        self.counts.get(actual)
            .and_then(|row| row.get(predicted))
            .copied()
            .unwrap_or(0)
    }


    /// Number of scored rows.
    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }


    /// Number of rows whose true class is `class`.
    pub fn support(&self, class: Label) -> usize {
        self.counts.get(class).map_or(0, |row| row.iter().sum())
    }


    fn n_predicted(&self, class: Label) -> usize {
        self.counts.iter()
            .filter_map(|row| row.get(class))
            .sum()
    }


    /// Fraction of rows predicted correctly.
    /// `None` for an empty matrix.
    pub fn accuracy(&self) -> Option<f64> {
        let correct = (0..self.n_classes())
            .map(|class| self.count(class, class))
            .sum();
        ratio(correct, self.total())
    }


    /// Computes precision as TP / (TP + FP).
    /// `None` if `class` was never predicted.
    pub fn precision(&self, class: Label) -> Option<f64> {
        ratio(self.count(class, class), self.n_predicted(class))
    }


    /// Computes recall as TP / (TP + FN).
    /// `None` if `class` never occurs.
    pub fn recall(&self, class: Label) -> Option<f64> {
        ratio(self.count(class, class), self.support(class))
    }


    /// Harmonic mean of precision and recall.
    pub fn f1(&self, class: Label) -> Option<f64> {
        let p = self.precision(class)?;
        let r = self.recall(class)?;
        if p + r > 0.0 {
            Some(2.0 * p * r / (p + r))
        } else {
            Some(0.0)
        }
    }
}


#[inline]
fn ratio(numerator: usize, denominator: usize) -> Option<f64> {
    if denominator > 0 {
        Some(numerator as f64 / denominator as f64)
    } else {
        None
    }
}


/// A confusion matrix together with the names of its classes.
/// `Display` prints the per-class precision, recall, f1-score and support;
/// undefined scores are printed as zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationReport {
    class_names: Vec<String>,
    matrix:      ConfusionMatrix,
}


impl ClassificationReport {
    pub fn new(class_names: Vec<String>, matrix: ConfusionMatrix) -> Self {
        Self { class_names, matrix }
    }


    #[inline]
    pub fn class_names(&self) -> &[String] {
        &self.class_names
    }


    #[inline]
    pub fn matrix(&self) -> &ConfusionMatrix {
        &self.matrix
    }


    #[inline]
    pub fn accuracy(&self) -> Option<f64> {
        self.matrix.accuracy()
    }
}


impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const ACCURACY: &str = "accuracy";
        let width = self.class_names.iter()
            .map(String::len)
            .chain([ACCURACY.len()])
            .max()
            .unwrap_or(0);

        writeln!(
            f, "{:>width$} {:>9} {:>9} {:>9} {:>9}",
            "", "precision", "recall", "f1-score", "support",
        )?;
        writeln!(f)?;
        for (class, name) in self.class_names.iter().enumerate() {
            writeln!(
                f, "{name:>width$} {:>9.2} {:>9.2} {:>9.2} {:>9}",
                self.matrix.precision(class).unwrap_or(0.0),
                self.matrix.recall(class).unwrap_or(0.0),
                self.matrix.f1(class).unwrap_or(0.0),
                self.matrix.support(class),
            )?;
        }
        writeln!(f)?;
        write!(
            f, "{ACCURACY:>width$} {:>9} {:>9} {:>9.2} {:>9}",
            "", "",
            self.accuracy().unwrap_or(0.0),
            self.matrix.total(),
        )
    }
}


impl TreeModel {
    /// Predicts every row of `sample` and scores the predictions
    /// against its target column.
    pub fn evaluate(&self, sample: &Sample) -> Result<ClassificationReport> {
        let target = sample.target().ok_or(TreeError::MissingTarget)?;
        let predicted = self.predict_all(sample)?;
        let matrix = ConfusionMatrix::from_labels(
            self.class_names().len(), target, &predicted,
        )?;
        let report = ClassificationReport::new(self.class_names().to_vec(), matrix);

        info!("classification report of model {}:\n{report}", self.name());
        info!("confusion matrix of model {}: {:?}", self.name(), report.matrix().counts());
        Ok(report)
    }
}
