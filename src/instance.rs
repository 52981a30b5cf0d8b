//! Labeled instances and the weighted views handed to base learners.
//!
//! Instances are immutable once they arrive. Weights are never stored on the
//! instance itself: every call site that needs a weight pairs it with a
//! borrowed instance through [`Weighted`].

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A labeled feature vector.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Instance {
    features: Vec<f64>,
    label: usize,
}

impl Instance {
    pub fn new(features: Vec<f64>, label: usize) -> Self {
        Self { features, label }
    }

    pub fn features(&self) -> &[f64] {
        &self.features
    }

    pub fn label(&self) -> usize {
        self.label
    }

    /// Number of attributes, class excluded
    pub fn num_attributes(&self) -> usize {
        self.features.len()
    }
}

/// An instance borrowed together with the weight it carries for one call.
#[derive(Clone, Copy, Debug)]
pub struct Weighted<'a> {
    pub instance: &'a Instance,
    pub weight: f64,
}

impl<'a> Weighted<'a> {
    pub fn new(instance: &'a Instance, weight: f64) -> Self {
        Self { instance, weight }
    }

    pub fn unit(instance: &'a Instance) -> Self {
        Self::new(instance, 1.0)
    }
}

/// Pair every instance with unit weight.
pub fn unit_weighted<'a, I>(instances: I) -> Vec<Weighted<'a>>
where
    I: IntoIterator<Item = &'a Instance>,
{
    instances.into_iter().map(Weighted::unit).collect()
}

/// Euclidean distance between two feature vectors.
///
/// Returns `None` when the vectors differ in length.
pub fn euclidean(a: &[f64], b: &[f64]) -> Option<f64> {
    if a.len() != b.len() {
        return None;
    }
    let sum: f64 = a.iter().zip(b).map(|(x, y)| (x - y).powi(2)).sum();
    Some(sum.sqrt())
}

/// Index of the largest vote, lowest index on ties, 0 for an empty vector.
pub fn argmax(votes: &[f64]) -> usize {
    let mut best = 0;
    let mut best_value = f64::NEG_INFINITY;
    for (i, &v) in votes.iter().enumerate() {
        if v > best_value {
            best = i;
            best_value = v;
        }
    }
    best
}

/// One-hot vote vector for a class index.
pub fn one_hot(class: usize) -> Vec<f64> {
    let mut votes = vec![0.0; class + 1];
    votes[class] = 1.0;
    votes
}

/// Reject `instance` unless it has `expected` attributes. Any width passes
/// while `expected` is unset.
pub(crate) fn check_width(expected: Option<usize>, instance: &Instance) -> Result<()> {
    match expected {
        Some(expected) if expected != instance.num_attributes() => Err(Error::DimensionMismatch {
            expected,
            actual: instance.num_attributes(),
        }),
        _ => Ok(()),
    }
}
