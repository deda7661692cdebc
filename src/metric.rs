//! Metrics
//!
//! Classification performance over a labeled instance set.
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Counts of (actual, predicted) label pairs. Undecidable predictions count
/// towards the total but never towards a cell, so they are always wrong.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct ConfusionMatrix {
    counts: HashMap<String, HashMap<String, usize>>,
    actual: HashMap<String, usize>,
    class_labels: BTreeSet<String>,
    undecided: usize,
    total: usize,
}

impl ConfusionMatrix {
    pub fn new() -> Self {
        ConfusionMatrix::default()
    }

    pub fn classify(&mut self, actual: &str, predicted: Option<&str>) {
        self.total += 1;
        self.class_labels.insert(actual.to_string());
        *self.actual.entry(actual.to_string()).or_insert(0) += 1;
        match predicted {
            Some(p) => {
                self.class_labels.insert(p.to_string());
                *self
                    .counts
                    .entry(actual.to_string())
                    .or_default()
                    .entry(p.to_string())
                    .or_insert(0) += 1;
            }
            None => self.undecided += 1,
        }
    }

    pub fn get(&self, actual: &str, predicted: &str) -> usize {
        self.counts
            .get(actual)
            .and_then(|row| row.get(predicted))
            .copied()
            .unwrap_or(0)
    }

    pub fn class_labels(&self) -> impl Iterator<Item = &str> {
        self.class_labels.iter().map(|l| l.as_str())
    }

    /// Number of classified instances, including undecided ones.
    pub fn sum_of_elements(&self) -> usize {
        self.total
    }

    pub fn undecided(&self) -> usize {
        self.undecided
    }

    /// Number of correctly classified instances.
    pub fn trace(&self) -> usize {
        self.class_labels.iter().map(|l| self.get(l, l)).sum()
    }

    fn column_sum(&self, predicted: &str) -> usize {
        self.counts.values().filter_map(|row| row.get(predicted)).sum()
    }

    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.trace() as f64 / self.total as f64
        }
    }

    pub fn precision(&self, label: &str) -> f64 {
        let predicted = self.column_sum(label);
        if predicted == 0 {
            0.0
        } else {
            self.get(label, label) as f64 / predicted as f64
        }
    }

    /// Recall over the instances whose actual label is `label`, undecided ones included.
    pub fn recall(&self, label: &str) -> f64 {
        let actual = self.actual_count(label);
        if actual == 0 {
            0.0
        } else {
            self.get(label, label) as f64 / actual as f64
        }
    }

    pub fn f_measure(&self, label: &str) -> f64 {
        let (p, r) = (self.precision(label), self.recall(label));
        if p + r == 0.0 {
            0.0
        } else {
            2.0 * p * r / (p + r)
        }
    }

    /// F-measure averaged over the labels, weighted by their actual frequency.
    pub fn weighted_f_measure(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.class_labels
            .iter()
            .map(|l| self.f_measure(l) * self.actual_count(l) as f64)
            .sum::<f64>()
            / self.total as f64
    }

    fn actual_count(&self, label: &str) -> usize {
        self.actual.get(label).copied().unwrap_or(0)
    }
}

/// Summary of testing a classifier on a labeled set.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ClassificationPerformance {
    pub accuracy: f64,
    pub error_rate: f64,
    pub confusion_matrix: ConfusionMatrix,
}

impl ClassificationPerformance {
    pub fn new(confusion_matrix: ConfusionMatrix) -> Self {
        let accuracy = confusion_matrix.accuracy();
        ClassificationPerformance {
            accuracy,
            error_rate: 1.0 - accuracy,
            confusion_matrix,
        }
    }

    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }
}

impl fmt::Display for ClassificationPerformance {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "accuracy={:.4},error_rate={:.4},weighted_f_measure={:.4},n={},undecided={}",
            self.accuracy,
            self.error_rate,
            self.confusion_matrix.weighted_f_measure(),
            self.confusion_matrix.sum_of_elements(),
            self.confusion_matrix.undecided()
        )
    }
}
