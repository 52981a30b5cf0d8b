//! # drift-sim - Drift Stream Simulation and Evaluation
//!
//! Seeded synthetic streams with known concept changes, plus a prequential
//! runner for measuring how the drift-core classifiers track them.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────┐   Instance   ┌──────────────────────────┐
//! │   StreamGenerator    │─────────────▶│       Prequential        │
//! │  sea | hyperplane |  │              │  classify, then train_on │
//! │        blobs         │              │  windowed accuracy       │
//! └──────────────────────┘              └────────────┬─────────────┘
//!                                                    ▼
//!                                          EvaluationReport (JSON)
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use drift_core::{DriftEnsemble, EnsembleConfig};
//! use drift_sim::{Prequential, scenarios};
//!
//! let mut stream = scenarios::create_stream("sea", 42).unwrap();
//! let mut ensemble = DriftEnsemble::new(EnsembleConfig::default()).unwrap();
//! let report = Prequential::new(1_000).run("ensemble", &mut ensemble, stream.as_mut(), 10_000);
//! println!("{}", serde_json::to_string_pretty(&report).unwrap());
//! ```

pub mod prequential;
pub mod scenarios;

pub use prequential::{EvaluationReport, Prequential, WindowPoint};
pub use scenarios::{StreamGenerator, create_stream, list_streams};
