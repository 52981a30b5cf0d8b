use super::StreamGenerator;
use drift_core::Instance;
use rand::prelude::*;

/// Rotating hyperplane over `[0, 1]^d`.
///
/// Label 1 when `sum(w_i * x_i) >= sum(w_i) / 2`. Every weight moves by
/// `magnitude` per instance and reverses direction at the edges of `[0, 1]`,
/// so the boundary drifts continuously.
pub struct RotatingHyperplane {
    rng: StdRng,
    weights: Vec<f64>,
    directions: Vec<f64>,
    pub magnitude: f64,
    pub noise: f64,
}

impl RotatingHyperplane {
    pub fn new(seed: u64, dimensions: usize, magnitude: f64, noise: f64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let dimensions = dimensions.max(1);
        let weights = (0..dimensions).map(|_| rng.random_range(0.0..1.0)).collect();
        let directions = (0..dimensions)
            .map(|_| if rng.random_bool(0.5) { 1.0 } else { -1.0 })
            .collect();
        Self {
            rng,
            weights,
            directions,
            magnitude,
            noise: noise.clamp(0.0, 1.0),
        }
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    fn rotate(&mut self) {
        for (w, dir) in self.weights.iter_mut().zip(self.directions.iter_mut()) {
            *w += *dir * self.magnitude;
            if !(0.0..=1.0).contains(w) {
                *dir = -*dir;
                *w = w.clamp(0.0, 1.0);
            }
        }
    }
}

impl StreamGenerator for RotatingHyperplane {
    fn name(&self) -> &str {
        "Rotating Hyperplane"
    }

    fn num_attributes(&self) -> usize {
        self.weights.len()
    }

    fn num_classes(&self) -> usize {
        2
    }

    fn next_instance(&mut self) -> Instance {
        let features: Vec<f64> = (0..self.weights.len())
            .map(|_| self.rng.random_range(0.0..1.0))
            .collect();
        let dot: f64 = features.iter().zip(&self.weights).map(|(x, w)| x * w).sum();
        let half: f64 = self.weights.iter().sum::<f64>() / 2.0;
        let mut label = usize::from(dot >= half);
        if self.rng.random_bool(self.noise) {
            label = 1 - label;
        }
        self.rotate();
        Instance::new(features, label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_stay_in_unit_interval() {
        let mut plane = RotatingHyperplane::new(1, 4, 0.3, 0.0);
        let start = plane.weights().to_vec();
        plane.take_instances(50);
        assert!(plane.weights().iter().all(|w| (0.0..=1.0).contains(w)));
        assert_ne!(plane.weights(), start.as_slice());
    }

    #[test]
    fn test_both_classes_appear() {
        let mut plane = RotatingHyperplane::new(2, 5, 0.001, 0.0);
        let labels: Vec<usize> = plane.take_instances(200).iter().map(|i| i.label()).collect();
        assert!(labels.contains(&0));
        assert!(labels.contains(&1));
    }
}
