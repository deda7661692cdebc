//! Discrete Distribution
//!
//! Class label counts observed at a tree node.
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mapping from class label to the number of training instances with that label.
///
/// Labels are kept sorted so iteration, serialization and tie breaking are deterministic.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct DiscreteDistribution {
    counts: BTreeMap<String, usize>,
    sum: usize,
}

impl DiscreteDistribution {
    pub fn new() -> Self {
        DiscreteDistribution::default()
    }

    /// Build a distribution by counting every label in `labels`.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut distribution = DiscreteDistribution::new();
        for label in labels {
            distribution.add_item(label);
        }
        distribution
    }

    /// Build a distribution from `(label, count)` pairs.
    pub fn from_counts<I, S>(counts: I) -> Self
    where
        I: IntoIterator<Item = (S, usize)>,
        S: Into<String>,
    {
        let mut distribution = DiscreteDistribution::new();
        for (label, count) in counts {
            distribution.add_count(label, count);
        }
        distribution
    }

    pub fn add_item(&mut self, label: impl Into<String>) {
        self.add_count(label, 1);
    }

    pub fn add_count(&mut self, label: impl Into<String>, count: usize) {
        *self.counts.entry(label.into()).or_insert(0) += count;
        self.sum += count;
    }

    pub fn count(&self, label: &str) -> usize {
        self.counts.get(label).copied().unwrap_or(0)
    }

    /// Total number of observations.
    pub fn sum(&self) -> usize {
        self.sum
    }

    /// Number of distinct labels.
    pub fn size(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn probability(&self, label: &str) -> f64 {
        if self.sum == 0 {
            0.0
        } else {
            self.count(label) as f64 / self.sum as f64
        }
    }

    /// Normalized distribution over every observed label.
    ///
    /// Labels are weighted uniformly when all counts are zero, so a
    /// non-empty result always sums to one.
    pub fn probability_distribution(&self) -> HashMap<String, f64> {
        if self.sum == 0 {
            let n = self.counts.len() as f64;
            return self.counts.keys().map(|k| (k.clone(), 1.0 / n)).collect();
        }
        self.counts
            .iter()
            .map(|(k, v)| (k.clone(), *v as f64 / self.sum as f64))
            .collect()
    }

    /// Label with the highest count, the smallest label wins a tie.
    pub fn max_item(&self) -> Option<&str> {
        let mut best: Option<(&str, usize)> = None;
        for (k, v) in self.counts.iter() {
            match best {
                Some((_, c)) if c >= *v => {}
                _ => best = Some((k.as_str(), *v)),
            }
        }
        best.map(|(k, _)| k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::precision_round;

    #[test]
    fn test_counts() {
        let d = DiscreteDistribution::from_labels(["play", "play", "no-play"]);
        assert_eq!(d.sum(), 3);
        assert_eq!(d.size(), 2);
        assert_eq!(d.count("play"), 2);
        assert_eq!(d.count("unknown"), 0);
        assert_eq!(d.max_item(), Some("play"));
    }

    #[test]
    fn test_probability_distribution_sums_to_one() {
        let d = DiscreteDistribution::from_counts([("a", 3), ("b", 5), ("c", 2)]);
        let p = d.probability_distribution();
        let total: f64 = p.values().sum();
        assert_eq!(precision_round(total, 10), 1.0);
        assert_eq!(p["b"], 0.5);
        assert_eq!(d.probability("c"), 0.2);
    }

    #[test]
    fn test_zero_counts() {
        let d = DiscreteDistribution::from_counts([("a", 0), ("b", 0)]);
        let p = d.probability_distribution();
        assert_eq!(p["a"], 0.5);
        assert_eq!(d.probability("a"), 0.0);
        assert!(DiscreteDistribution::new().probability_distribution().is_empty());
    }

    #[test]
    fn test_max_item_ties() {
        let d = DiscreteDistribution::from_counts([("b", 2), ("a", 2), ("c", 1)]);
        assert_eq!(d.max_item(), Some("a"));
        assert_eq!(DiscreteDistribution::new().max_item(), None);
    }
}
