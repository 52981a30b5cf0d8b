//! Base Learner Contract
//!
//! Both stream classifiers only decide *which* instances or sub-models a base
//! learner sees; the learner itself is pluggable. Anything that can be fit on
//! a weighted batch and asked for per-class votes can serve.
//!
//! Reference learners:
//! - **knn**: weighted k-nearest-neighbor vote
//! - **naive_bayes**: weighted Gaussian naive Bayes
//! - **majority_class**: weighted class-frequency vote

pub mod knn;
pub mod majority;
pub mod naive_bayes;

use crate::error::LearnerError;
use crate::instance::{Instance, Weighted, argmax};
use serde::{Deserialize, Serialize};

pub use knn::KNearest;
pub use majority::MajorityClass;
pub use naive_bayes::GaussianNaiveBayes;

/// Trait for base learners driven by the stream classifiers
///
/// `train` is an incremental batch update: it folds the batch into whatever
/// the learner already knows. Callers that want a fresh fit call `reset`
/// first.
pub trait BaseLearner: Send {
    /// Discard all learned state
    fn reset(&mut self);

    /// Fold a weighted batch into the model
    fn train(&mut self, batch: &[Weighted<'_>]) -> Result<(), LearnerError>;

    /// Per-class vote scores, indexed by class label
    ///
    /// An untrained learner returns an empty vector.
    fn votes(&self, instance: &Instance) -> Result<Vec<f64>, LearnerError>;

    /// Predicted class label
    fn classify(&self, instance: &Instance) -> Result<usize, LearnerError> {
        Ok(argmax(&self.votes(instance)?))
    }

    fn correctly_classifies(&self, instance: &Instance) -> Result<bool, LearnerError> {
        Ok(self.classify(instance)? == instance.label())
    }

    /// Optional neighbor-count capability.
    ///
    /// Returns `true` if the learner accepted the value.
    fn set_neighbor_count(&mut self, _k: usize) -> bool {
        false
    }
}

/// Produces fresh, untrained base learners
pub trait LearnerFactory: Send + Sync {
    fn build(&self) -> Box<dyn BaseLearner>;
}

impl<F> LearnerFactory for F
where
    F: Fn() -> Box<dyn BaseLearner> + Send + Sync,
{
    fn build(&self) -> Box<dyn BaseLearner> {
        self()
    }
}

/// Built-in base learner selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LearnerKind {
    #[default]
    Knn,
    NaiveBayes,
    MajorityClass,
}

impl LearnerKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "knn" | "k_nearest" => Some(Self::Knn),
            "naive_bayes" | "nb" => Some(Self::NaiveBayes),
            "majority_class" | "majority" => Some(Self::MajorityClass),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Knn => "knn",
            Self::NaiveBayes => "naive_bayes",
            Self::MajorityClass => "majority_class",
        }
    }
}

impl LearnerFactory for LearnerKind {
    fn build(&self) -> Box<dyn BaseLearner> {
        match self {
            Self::Knn => Box::new(KNearest::default()),
            Self::NaiveBayes => Box::new(GaussianNaiveBayes::new()),
            Self::MajorityClass => Box::new(MajorityClass::new()),
        }
    }
}

/// Build a learner and forward the neighbor count to it if it accepts one.
pub(crate) fn prepare(factory: &dyn LearnerFactory, neighbors: usize) -> Box<dyn BaseLearner> {
    let mut learner = factory.build();
    learner.set_neighbor_count(neighbors);
    learner
}
