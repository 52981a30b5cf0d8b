//! Prequential (test-then-train) evaluation.
//!
//! Each instance is first classified, then used for training. Accuracy is
//! reported overall and per tumbling window of `window` instances so drift
//! recovery is visible in the output.

use crate::scenarios::StreamGenerator;
use drift_core::StreamClassifier;
use serde::Serialize;
use std::time::Instant;
use tracing::{info, warn};

/// Accuracy over one window of the stream
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct WindowPoint {
    /// Instances seen when the window closed
    pub end: u64,
    pub accuracy: f64,
}

#[derive(Serialize, Clone, Debug)]
pub struct EvaluationReport {
    pub algorithm: String,
    pub stream: String,
    pub instances: u64,
    pub correct: u64,
    pub accuracy: f64,
    /// Calls to `predict` or `train_on` that returned an error
    pub failures: u64,
    pub windows: Vec<WindowPoint>,
    pub elapsed_ms: f64,
}

/// Test-then-train runner
#[derive(Clone, Copy, Debug)]
pub struct Prequential {
    window: u64,
}

impl Prequential {
    pub fn new(window: u64) -> Self {
        Self {
            window: window.max(1),
        }
    }

    pub fn window(&self) -> u64 {
        self.window
    }

    /// Run `classifier` over `instances` instances drawn from `stream`.
    ///
    /// A failed prediction counts as a miss. A failed training step leaves
    /// the classifier as it was and the run continues.
    pub fn run<C: StreamClassifier + ?Sized>(
        &self,
        algorithm: &str,
        classifier: &mut C,
        stream: &mut dyn StreamGenerator,
        instances: u64,
    ) -> EvaluationReport {
        let start = Instant::now();
        let mut correct = 0u64;
        let mut failures = 0u64;
        let mut window_correct = 0u64;
        let mut windows = Vec::new();

        for seen in 1..=instances {
            let inst = stream.next_instance();

            match classifier.classify(&inst) {
                Ok(class) if class == inst.label() => {
                    correct += 1;
                    window_correct += 1;
                }
                Ok(_) => {}
                Err(e) => {
                    failures += 1;
                    warn!(instance = seen, error = %e, "Prediction failed");
                }
            }

            if let Err(e) = classifier.train_on(&inst) {
                failures += 1;
                warn!(instance = seen, error = %e, "Training failed");
            }

            if seen % self.window == 0 {
                let accuracy = window_correct as f64 / self.window as f64;
                windows.push(WindowPoint {
                    end: seen,
                    accuracy,
                });
                info!(instance = seen, accuracy, "Window closed");
                window_correct = 0;
            }
        }

        EvaluationReport {
            algorithm: algorithm.to_string(),
            stream: stream.name().to_string(),
            instances,
            correct,
            accuracy: correct as f64 / instances.max(1) as f64,
            failures,
            windows,
            elapsed_ms: start.elapsed().as_secs_f64() * 1000.0,
        }
    }
}

impl Default for Prequential {
    fn default() -> Self {
        Self::new(1_000)
    }
}
