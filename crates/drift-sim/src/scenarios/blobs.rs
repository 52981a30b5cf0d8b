use super::StreamGenerator;
use drift_core::Instance;
use rand::prelude::*;
use rand_distr::StandardNormal;

const CLASS_MEANS: [[f64; 2]; 2] = [[0.0, 0.0], [3.0, 3.0]];

/// Two Gaussian clusters in the plane. After `drift_at` instances the
/// clusters trade labels, so every previously learned association flips.
pub struct SwappingBlobs {
    rng: StdRng,
    pub drift_at: u64,
    pub std_dev: f64,
    produced: u64,
}

impl SwappingBlobs {
    pub fn new(seed: u64, drift_at: u64, std_dev: f64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            drift_at,
            std_dev: std_dev.abs(),
            produced: 0,
        }
    }

    pub fn swapped(&self) -> bool {
        self.produced >= self.drift_at
    }
}

impl StreamGenerator for SwappingBlobs {
    fn name(&self) -> &str {
        "Swapping Blobs"
    }

    fn num_attributes(&self) -> usize {
        2
    }

    fn num_classes(&self) -> usize {
        2
    }

    fn next_instance(&mut self) -> Instance {
        let label = usize::from(self.rng.random_bool(0.5));
        let cluster = if self.swapped() { 1 - label } else { label };
        let features: Vec<f64> = CLASS_MEANS[cluster]
            .iter()
            .map(|mean| {
                let z: f64 = self.rng.sample(StandardNormal);
                mean + z * self.std_dev
            })
            .collect();
        self.produced += 1;
        Instance::new(features, label)
    }
}
