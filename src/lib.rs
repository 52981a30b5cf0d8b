//! # drift-core
//!
//! Incremental classifiers for data streams under concept drift.
//!
//! Two algorithms share a learner-agnostic base-model contract:
//!
//! - [`WindowedSelector`]: spatio-temporal instance selection. Buffered
//!   instances are ranked by a blend of feature distance and age, and a
//!   leave-one-out search picks how many of them to train on.
//! - [`DriftEnsemble`]: chunk-based ensemble whose members are voted by a
//!   sigmoid-discounted history of their errors, with optional pruning by
//!   age or error.
//!
//! Both consume one labeled [`Instance`] at a time through the
//! [`StreamClassifier`] trait. Base learners plug in through
//! [`BaseLearner`] and [`LearnerFactory`].
//!
//! ## Quick Start
//!
//! ```rust
//! use drift_core::{DriftEnsemble, EnsembleConfig, Instance, StreamClassifier};
//!
//! let mut ensemble = DriftEnsemble::new(EnsembleConfig {
//!     period: 50,
//!     ..EnsembleConfig::default()
//! })?;
//!
//! for i in 0..200 {
//!     let x = (i % 10) as f64;
//!     let inst = Instance::new(vec![x], usize::from(x > 4.0));
//!     let _prediction = ensemble.classify(&inst)?;
//!     ensemble.train_on(&inst)?;
//! }
//! assert_eq!(ensemble.rounds(), 4);
//! # Ok::<(), drift_core::Error>(())
//! ```

pub mod algo;
pub mod classifier;
pub mod config;
pub mod error;
pub mod instance;
pub mod learner;
pub mod sync;

pub use algo::{DriftEnsemble, Phase, WindowedSelector};
pub use classifier::StreamClassifier;
pub use config::{EnsembleConfig, PruningStrategy, WindowConfig};
pub use error::{Error, LearnerError, Result};
pub use instance::{Instance, Weighted};
pub use learner::{BaseLearner, LearnerFactory, LearnerKind};
pub use sync::Shared;
