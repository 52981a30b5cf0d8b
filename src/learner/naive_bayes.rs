//! Weighted Gaussian naive Bayes.
//!
//! Per class and attribute, a weighted running mean and variance are kept
//! (West's weighted variant of Welford's update), so the learner folds new
//! batches in without revisiting old ones.

use super::BaseLearner;
use crate::error::LearnerError;
use crate::instance::{Instance, Weighted};

/// Variance floor so a constant attribute does not collapse a likelihood
const MIN_VARIANCE: f64 = 1e-9;

#[derive(Clone, Debug, Default)]
struct GaussianEstimator {
    weight_sum: f64,
    mean: f64,
    m2: f64,
}

impl GaussianEstimator {
    fn update(&mut self, value: f64, weight: f64) {
        if weight <= 0.0 {
            return;
        }
        self.weight_sum += weight;
        let delta = value - self.mean;
        self.mean += delta * weight / self.weight_sum;
        self.m2 += weight * delta * (value - self.mean);
    }

    fn variance(&self) -> f64 {
        if self.weight_sum <= 0.0 {
            return 1.0;
        }
        (self.m2 / self.weight_sum).max(MIN_VARIANCE)
    }

    fn log_density(&self, value: f64) -> f64 {
        let var = self.variance();
        -0.5 * ((value - self.mean).powi(2) / var + (2.0 * std::f64::consts::PI * var).ln())
    }
}

#[derive(Clone, Debug, Default)]
struct ClassModel {
    weight: f64,
    attributes: Vec<GaussianEstimator>,
}

#[derive(Clone, Debug, Default)]
pub struct GaussianNaiveBayes {
    classes: Vec<ClassModel>,
    num_attributes: Option<usize>,
}

impl GaussianNaiveBayes {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BaseLearner for GaussianNaiveBayes {
    fn reset(&mut self) {
        self.classes.clear();
        self.num_attributes = None;
    }

    fn train(&mut self, batch: &[Weighted<'_>]) -> Result<(), LearnerError> {
        let Some(first) = batch.first() else {
            return Ok(());
        };
        let width = self
            .num_attributes
            .unwrap_or_else(|| first.instance.num_attributes());

        for w in batch {
            if w.instance.num_attributes() != width {
                return Err(LearnerError::DimensionMismatch {
                    expected: width,
                    actual: w.instance.num_attributes(),
                });
            }
            if !w.weight.is_finite() || w.weight < 0.0 {
                return Err(LearnerError::Training(format!(
                    "invalid instance weight {}",
                    w.weight
                )));
            }
        }

        self.num_attributes = Some(width);
        for w in batch {
            let label = w.instance.label();
            if label >= self.classes.len() {
                self.classes.resize_with(label + 1, || ClassModel {
                    weight: 0.0,
                    attributes: vec![GaussianEstimator::default(); width],
                });
            }
            let class = &mut self.classes[label];
            class.weight += w.weight;
            for (est, &value) in class.attributes.iter_mut().zip(w.instance.features()) {
                est.update(value, w.weight);
            }
        }
        Ok(())
    }

    fn votes(&self, instance: &Instance) -> Result<Vec<f64>, LearnerError> {
        let Some(width) = self.num_attributes else {
            return Ok(Vec::new());
        };
        if instance.num_attributes() != width {
            return Err(LearnerError::DimensionMismatch {
                expected: width,
                actual: instance.num_attributes(),
            });
        }

        let total: f64 = self.classes.iter().map(|c| c.weight).sum();
        if total <= 0.0 {
            return Ok(vec![0.0; self.classes.len()]);
        }

        let log_posteriors: Vec<Option<f64>> = self
            .classes
            .iter()
            .map(|class| {
                if class.weight <= 0.0 {
                    return None;
                }
                let prior = (class.weight / total).ln();
                let likelihood: f64 = class
                    .attributes
                    .iter()
                    .zip(instance.features())
                    .map(|(est, &value)| est.log_density(value))
                    .sum();
                Some(prior + likelihood)
            })
            .collect();

        let max = log_posteriors
            .iter()
            .flatten()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);

        Ok(log_posteriors
            .iter()
            .map(|lp| lp.map_or(0.0, |lp| (lp - max).exp()))
            .collect())
    }
}
