use super::StreamGenerator;
use drift_core::Instance;
use rand::prelude::*;

/// Thresholds cycled through at each drift point
const SEA_THRESHOLDS: [f64; 4] = [8.0, 9.0, 7.0, 9.5];

/// SEA concepts: three uniform features in [0, 10], only the first two
/// relevant. Label 1 when `f1 + f2 <= theta`, with `theta` switching
/// abruptly every `drift_every` instances.
pub struct SeaConcepts {
    rng: StdRng,
    pub drift_every: u64,
    pub noise: f64,
    produced: u64,
}

impl SeaConcepts {
    pub fn new(seed: u64, drift_every: u64, noise: f64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            drift_every: drift_every.max(1),
            noise: noise.clamp(0.0, 1.0),
            produced: 0,
        }
    }

    /// Threshold of the concept active for the next instance
    pub fn threshold(&self) -> f64 {
        let concept = (self.produced / self.drift_every) as usize % SEA_THRESHOLDS.len();
        SEA_THRESHOLDS[concept]
    }
}

impl StreamGenerator for SeaConcepts {
    fn name(&self) -> &str {
        "SEA Concepts"
    }

    fn num_attributes(&self) -> usize {
        3
    }

    fn num_classes(&self) -> usize {
        2
    }

    fn next_instance(&mut self) -> Instance {
        let theta = self.threshold();
        let features: Vec<f64> = (0..3).map(|_| self.rng.random_range(0.0..=10.0)).collect();
        let mut label = usize::from(features[0] + features[1] <= theta);
        if self.rng.random_bool(self.noise) {
            label = 1 - label;
        }
        self.produced += 1;
        Instance::new(features, label)
    }
}
