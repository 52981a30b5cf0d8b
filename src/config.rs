//! Classifier Configuration
//!
//! Both stream classifiers are configured from plain serde structs. Every
//! field has a default, so a JSON document only needs the values it changes:
//!
//! ```json
//! { "period": 200, "neighbors": 5, "distance_proportion": 0.3 }
//! ```
//!
//! Constructors call `validate()` and refuse invalid settings up front.

use crate::error::{Error, Result};
use crate::learner::LearnerKind;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

const MAX_NEIGHBORS: usize = 50;

/// Ensemble pruning policy applied once the size cap is exceeded
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PruningStrategy {
    /// Keep every member
    #[default]
    None,
    /// Remove the oldest member
    Age,
    /// Remove the member with the highest error in the current round
    Error,
}

impl PruningStrategy {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "none" | "no" => Some(Self::None),
            "age" => Some(Self::Age),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Age => "age",
            Self::Error => "error",
        }
    }
}

/// Settings for the windowed neighbor selector
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub learner: LearnerKind,
    /// Warm-up length in arrivals
    pub period: usize,
    /// Leave-one-out fold count, also forwarded to neighbor-based learners
    pub neighbors: usize,
    /// Space/time blend: 0 is purely spatial, 1 purely temporal
    pub distance_proportion: f64,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            learner: LearnerKind::Knn,
            period: 100,
            neighbors: 3,
            distance_proportion: 0.5,
        }
    }
}

impl WindowConfig {
    pub fn validate(&self) -> Result<()> {
        if self.period == 0 {
            return Err(Error::invalid("period", "must be at least 1"));
        }
        validate_neighbors(self.neighbors)?;
        if self.period < self.neighbors {
            return Err(Error::invalid(
                "period",
                format!(
                    "must be at least neighbors ({}), got {}",
                    self.neighbors, self.period
                ),
            ));
        }
        if !(0.0..=1.0).contains(&self.distance_proportion) {
            return Err(Error::invalid(
                "distance_proportion",
                format!("must lie in [0, 1], got {}", self.distance_proportion),
            ));
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        from_json(json, Self::validate)
    }
}

/// Settings for the drift-adaptive ensemble
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EnsembleConfig {
    pub learner: LearnerKind,
    /// Forwarded to neighbor-based learners
    pub neighbors: usize,
    /// Chunk size between retraining rounds
    pub period: usize,
    pub sigmoid_slope: f64,
    pub sigmoid_crossing_point: f64,
    /// Members retained before pruning kicks in
    pub ensemble_size: usize,
    pub pruning: PruningStrategy,
    /// Forward the chunk distribution to the base learner instead of unit weights
    pub weighted_training: bool,
}

impl Default for EnsembleConfig {
    fn default() -> Self {
        Self {
            learner: LearnerKind::Knn,
            neighbors: 3,
            period: 500,
            sigmoid_slope: 0.5,
            sigmoid_crossing_point: 10.0,
            ensemble_size: 15,
            pruning: PruningStrategy::None,
            weighted_training: false,
        }
    }
}

impl EnsembleConfig {
    pub fn validate(&self) -> Result<()> {
        if self.period == 0 {
            return Err(Error::invalid("period", "must be at least 1"));
        }
        validate_neighbors(self.neighbors)?;
        if !self.sigmoid_slope.is_finite() || self.sigmoid_slope < 0.0 {
            return Err(Error::invalid(
                "sigmoid_slope",
                format!("must be finite and non-negative, got {}", self.sigmoid_slope),
            ));
        }
        if !self.sigmoid_crossing_point.is_finite() || self.sigmoid_crossing_point < 0.0 {
            return Err(Error::invalid(
                "sigmoid_crossing_point",
                format!(
                    "must be finite and non-negative, got {}",
                    self.sigmoid_crossing_point
                ),
            ));
        }
        if self.ensemble_size == 0 {
            return Err(Error::invalid("ensemble_size", "must be at least 1"));
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        from_json(json, Self::validate)
    }
}

fn validate_neighbors(k: usize) -> Result<()> {
    if !(1..=MAX_NEIGHBORS).contains(&k) {
        return Err(Error::invalid(
            "neighbors",
            format!("must lie in 1..={MAX_NEIGHBORS}, got {k}"),
        ));
    }
    Ok(())
}

fn from_json<T: DeserializeOwned>(json: &str, validate: fn(&T) -> Result<()>) -> Result<T> {
    let config: T = serde_json::from_str(json)?;
    validate(&config)?;
    Ok(config)
}
