//! Ensemble members and their evaluation history.
//!
//! A member owns its learner together with everything derived from it: the
//! normalized error `bkt` of every round since creation, the matching
//! sigmoid history weights, and the current voting weight. Keeping them in
//! one record means insertion and removal can never leave them misaligned.

use crate::learner::BaseLearner;

/// Upper bound for `ekt / (1 - ekt)` as `ekt` approaches 1
pub const MAX_NORMALIZED_ERROR: f64 = 1e8;

/// Smallest weighted error used for the voting weight; `ln(1 / floor)` is the
/// saturated weight of a member that has never erred
pub const MIN_WEIGHTED_ERROR: f64 = 1e-8;

pub struct EnsembleMember {
    learner: Box<dyn BaseLearner>,
    round: u64,
    voting_weight: f64,
    normalized_errors: Vec<f64>,
    history_weights: Vec<f64>,
}

impl EnsembleMember {
    /// A member created in `round` with an empty history.
    pub fn new(learner: Box<dyn BaseLearner>, round: u64) -> Self {
        Self {
            learner,
            round,
            voting_weight: 0.0,
            normalized_errors: Vec::new(),
            history_weights: Vec::new(),
        }
    }

    pub fn learner(&self) -> &dyn BaseLearner {
        self.learner.as_ref()
    }

    /// Round (1-based) in which the member was trained
    pub fn round(&self) -> u64 {
        self.round
    }

    pub fn voting_weight(&self) -> f64 {
        self.voting_weight
    }

    pub fn normalized_errors(&self) -> &[f64] {
        &self.normalized_errors
    }

    pub fn history_weights(&self) -> &[f64] {
        &self.history_weights
    }

    /// Fold one round's weighted error `ekt` and sigmoid weight `wkt` into the
    /// history, then recompute the voting weight.
    ///
    /// The appended history weight is `wkt` normalized against the running
    /// sum of the earlier entries.
    pub fn record_round(&mut self, ekt: f64, wkt: f64) -> f64 {
        self.normalized_errors.push(normalized_error(ekt));

        let previous: f64 = self.history_weights.iter().sum();
        let total = previous + wkt;
        self.history_weights
            .push(if total > 0.0 { wkt / total } else { 0.0 });

        self.voting_weight = voting_weight(self.weighted_error());
        self.voting_weight
    }

    /// `sbkt`: normalized errors averaged under the history weights
    pub fn weighted_error(&self) -> f64 {
        self.history_weights
            .iter()
            .zip(&self.normalized_errors)
            .map(|(w, b)| w * b)
            .sum()
    }
}

impl std::fmt::Debug for EnsembleMember {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnsembleMember")
            .field("round", &self.round)
            .field("voting_weight", &self.voting_weight)
            .field("normalized_errors", &self.normalized_errors)
            .field("history_weights", &self.history_weights)
            .finish_non_exhaustive()
    }
}

/// `bkt = ekt / (1 - ekt)`, capped so a total miss stays finite
pub fn normalized_error(ekt: f64) -> f64 {
    if ekt >= 1.0 {
        return MAX_NORMALIZED_ERROR;
    }
    (ekt / (1.0 - ekt)).clamp(0.0, MAX_NORMALIZED_ERROR)
}

/// Logistic recency weight for member `k` (1-based) when the ensemble holds
/// `t` members.
pub fn sigmoid_weight(t: usize, k: usize, slope: f64, crossing_point: f64) -> f64 {
    let age = t as f64 - k as f64 - crossing_point;
    1.0 / (1.0 + (-slope * age).exp())
}

/// `ln(1 / sbkt)`, saturating at `ln(1 / MIN_WEIGHTED_ERROR)`.
pub fn voting_weight(sbkt: f64) -> f64 {
    if !sbkt.is_finite() {
        return -MAX_NORMALIZED_ERROR.ln();
    }
    (1.0 / sbkt.max(MIN_WEIGHTED_ERROR)).ln()
}
