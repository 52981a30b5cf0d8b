//! Weighted k-nearest-neighbor learner.
//!
//! Keeps every training instance and votes with the weights of the k closest
//! stored instances.

use super::BaseLearner;
use crate::error::LearnerError;
use crate::instance::{Instance, Weighted, euclidean};

const DEFAULT_NEIGHBORS: usize = 3;

#[derive(Clone, Debug)]
pub struct KNearest {
    k: usize,
    memory: Vec<(Instance, f64)>,
    num_classes: usize,
}

impl KNearest {
    pub fn new(k: usize) -> Self {
        Self {
            k: k.max(1),
            memory: Vec::new(),
            num_classes: 0,
        }
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn len(&self) -> usize {
        self.memory.len()
    }

    pub fn is_empty(&self) -> bool {
        self.memory.is_empty()
    }
}

impl Default for KNearest {
    fn default() -> Self {
        Self::new(DEFAULT_NEIGHBORS)
    }
}

impl BaseLearner for KNearest {
    fn reset(&mut self) {
        self.memory.clear();
        self.num_classes = 0;
    }

    fn train(&mut self, batch: &[Weighted<'_>]) -> Result<(), LearnerError> {
        let width = self
            .memory
            .first()
            .map(|(inst, _)| inst.num_attributes())
            .or_else(|| batch.first().map(|w| w.instance.num_attributes()));

        if let Some(width) = width {
            if let Some(bad) = batch
                .iter()
                .find(|w| w.instance.num_attributes() != width)
            {
                return Err(LearnerError::DimensionMismatch {
                    expected: width,
                    actual: bad.instance.num_attributes(),
                });
            }
        }

        for w in batch {
            if !w.weight.is_finite() || w.weight < 0.0 {
                return Err(LearnerError::Training(format!(
                    "invalid instance weight {}",
                    w.weight
                )));
            }
        }

        self.memory.reserve(batch.len());
        for w in batch {
            self.num_classes = self.num_classes.max(w.instance.label() + 1);
            self.memory.push((w.instance.clone(), w.weight));
        }
        Ok(())
    }

    fn votes(&self, instance: &Instance) -> Result<Vec<f64>, LearnerError> {
        if self.memory.is_empty() {
            return Ok(Vec::new());
        }

        let mut distances = Vec::with_capacity(self.memory.len());
        for (idx, (stored, _)) in self.memory.iter().enumerate() {
            let d = euclidean(stored.features(), instance.features()).ok_or(
                LearnerError::DimensionMismatch {
                    expected: stored.num_attributes(),
                    actual: instance.num_attributes(),
                },
            )?;
            distances.push((d, idx));
        }

        let k = self.k.min(distances.len());
        // Stable ordering keeps earlier-stored neighbors first on equal distance
        distances.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

        let mut votes = vec![0.0; self.num_classes];
        for &(_, idx) in distances.iter().take(k) {
            let (stored, weight) = &self.memory[idx];
            votes[stored.label()] += weight;
        }
        Ok(votes)
    }

    fn set_neighbor_count(&mut self, k: usize) -> bool {
        self.k = k.max(1);
        true
    }
}
