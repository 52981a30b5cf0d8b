//! Weighted majority-class learner.

use super::BaseLearner;
use crate::error::LearnerError;
use crate::instance::{Instance, Weighted};

#[derive(Clone, Debug, Default)]
pub struct MajorityClass {
    class_weights: Vec<f64>,
}

impl MajorityClass {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BaseLearner for MajorityClass {
    fn reset(&mut self) {
        self.class_weights.clear();
    }

    fn train(&mut self, batch: &[Weighted<'_>]) -> Result<(), LearnerError> {
        if let Some(bad) = batch.iter().find(|w| !w.weight.is_finite() || w.weight < 0.0) {
            return Err(LearnerError::Training(format!(
                "invalid instance weight {}",
                bad.weight
            )));
        }
        for w in batch {
            let label = w.instance.label();
            if label >= self.class_weights.len() {
                self.class_weights.resize(label + 1, 0.0);
            }
            self.class_weights[label] += w.weight;
        }
        Ok(())
    }

    fn votes(&self, _instance: &Instance) -> Result<Vec<f64>, LearnerError> {
        Ok(self.class_weights.clone())
    }
}
