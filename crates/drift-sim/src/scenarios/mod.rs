//! Synthetic drifting streams
//!
//! Seeded generators with known concept changes:
//! - **sea**: abrupt threshold switches over two relevant features
//! - **hyperplane**: a rotating decision boundary (gradual drift)
//! - **blobs**: Gaussian class clusters that swap places

pub mod blobs;
pub mod hyperplane;
pub mod sea;

use drift_core::Instance;

/// Trait for labeled stream sources
///
/// Generators are deterministic for a given seed so runs are reproducible.
pub trait StreamGenerator: Send {
    /// Human-readable name of the stream
    fn name(&self) -> &str;

    /// Feature count of every produced instance
    fn num_attributes(&self) -> usize;

    /// Number of distinct labels the stream can emit
    fn num_classes(&self) -> usize;

    /// Produce the next labeled instance
    fn next_instance(&mut self) -> Instance;

    /// Produce the next `n` instances
    fn take_instances(&mut self, n: usize) -> Vec<Instance> {
        (0..n).map(|_| self.next_instance()).collect()
    }
}

pub use blobs::SwappingBlobs;
pub use hyperplane::RotatingHyperplane;
pub use sea::SeaConcepts;

/// Create a stream by name with default parameters
pub fn create_stream(name: &str, seed: u64) -> Option<Box<dyn StreamGenerator>> {
    match name.to_lowercase().as_str() {
        "sea" | "sea_concepts" => Some(Box::new(SeaConcepts::new(seed, 2_500, 0.1))),
        "hyperplane" | "rotating_hyperplane" => {
            Some(Box::new(RotatingHyperplane::new(seed, 5, 0.001, 0.05)))
        }
        "blobs" | "swapping_blobs" => Some(Box::new(SwappingBlobs::new(seed, 5_000, 1.0))),
        _ => None,
    }
}

/// List all available streams
pub fn list_streams() -> Vec<(&'static str, &'static str)> {
    vec![
        ("sea", "SEA concepts, abrupt threshold drift every 2500 instances"),
        ("hyperplane", "Rotating hyperplane, gradual drift"),
        ("blobs", "Gaussian clusters whose classes swap at 5000 instances"),
    ]
}
