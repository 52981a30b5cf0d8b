//! Drift-Adaptive Ensemble
//!
//! Incremental ensemble for non-stationary streams. Arrivals accumulate in a
//! chunk; every `period` arrivals a round runs:
//!
//! 1. reweight the chunk by the current ensemble's mistakes
//! 2. train a new member on the chunk
//! 3. measure every member's weighted error `ekt` on the chunk
//! 4. fold `ekt` into each member's sigmoid-discounted history and derive
//!    its voting weight `ln(1 / sbkt)`
//! 5. prune one member if the ensemble outgrew its cap
//!
//! All base-learner calls of a round happen before anything is committed, so
//! a failing learner leaves the ensemble exactly as it was.
//!
//! Reference: Elwell & Polikar, "Incremental learning of concept drift in
//! non-stationary environments", IEEE Trans. Neural Networks 22(10), 2011.

use super::aggregate::combine_votes;
use super::member::{EnsembleMember, sigmoid_weight};
use super::pruning::{select_victim, worst_member};
use super::reweight::{self, ChunkWeights};
use crate::classifier::StreamClassifier;
use crate::config::EnsembleConfig;
use crate::error::{LearnerError, Result};
use crate::instance::{Instance, Weighted, argmax, check_width, unit_weighted};
use crate::learner::{BaseLearner, LearnerFactory, prepare};
use tracing::{debug, info, warn};

/// Members whose weighted error exceeds this are clamped or replaced
const CHANCE_ERROR: f64 = 0.5;

/// Summary of one completed round
#[derive(Clone, Debug, PartialEq)]
pub struct RoundSummary {
    pub round: u64,
    /// Ensemble error on the chunk before the new member was added
    pub ensemble_error: Option<f64>,
    /// Weighted error of every member after clamping, in member order
    pub member_errors: Vec<f64>,
    /// True if the new member scored worse than chance and was replaced
    pub replaced_new_member: bool,
    /// Creation round of the member removed by pruning
    pub pruned_round: Option<u64>,
}

pub struct DriftEnsemble {
    config: EnsembleConfig,
    factory: Box<dyn LearnerFactory>,
    members: Vec<EnsembleMember>,
    chunk: Vec<Instance>,
    /// Attribute count fixed by the first accepted instance
    width: Option<usize>,
    rounds: u64,
    last_round: Option<RoundSummary>,
}

impl DriftEnsemble {
    pub fn new(config: EnsembleConfig) -> Result<Self> {
        let factory = Box::new(config.learner);
        Self::with_factory(config, factory)
    }

    pub fn with_factory(config: EnsembleConfig, factory: Box<dyn LearnerFactory>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            chunk: Vec::with_capacity(config.period),
            config,
            factory,
            members: Vec::new(),
            width: None,
            rounds: 0,
            last_round: None,
        })
    }

    pub fn config(&self) -> &EnsembleConfig {
        &self.config
    }

    pub fn members(&self) -> &[EnsembleMember] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Completed rounds since construction or the last reset
    pub fn rounds(&self) -> u64 {
        self.rounds
    }

    /// Instances buffered towards the next round
    pub fn pending(&self) -> usize {
        self.chunk.len()
    }

    pub fn last_round(&self) -> Option<&RoundSummary> {
        self.last_round.as_ref()
    }

    /// Weighted vote of the current members
    pub fn combined_votes(&self, instance: &Instance) -> Result<Vec<f64>> {
        let members = self
            .members
            .iter()
            .map(|m| (m.learner(), m.voting_weight()));
        Ok(combine_votes(members, instance)?)
    }

    fn fresh_learner(&self) -> Box<dyn BaseLearner> {
        prepare(self.factory.as_ref(), self.config.neighbors)
    }

    fn chunk_weights(&self) -> Result<ChunkWeights> {
        if self.members.is_empty() {
            return Ok(reweight::uniform(self.chunk.len()));
        }
        let mut correct = Vec::with_capacity(self.chunk.len());
        for inst in &self.chunk {
            let votes = self.combined_votes(inst)?;
            correct.push(argmax(&votes) == inst.label());
        }
        Ok(reweight::from_correctness(&correct))
    }

    fn run_round(&mut self) -> Result<RoundSummary> {
        let chunk_weights = self.chunk_weights()?;
        let weights = &chunk_weights.weights;

        let mut candidate = self.fresh_learner();
        let batch: Vec<Weighted> = if self.config.weighted_training {
            self.chunk
                .iter()
                .zip(weights)
                .map(|(inst, &w)| Weighted::new(inst, w))
                .collect()
        } else {
            unit_weighted(&self.chunk)
        };
        candidate.train(&batch)?;

        let mut errors = Vec::with_capacity(self.members.len() + 1);
        for member in &self.members {
            let ekt = weighted_error(member.learner(), &self.chunk, weights)?;
            errors.push(ekt.min(CHANCE_ERROR));
        }
        let candidate_error = weighted_error(candidate.as_ref(), &self.chunk, weights)?;
        let replaced = candidate_error > CHANCE_ERROR;
        if replaced {
            candidate = self.fresh_learner();
        }
        errors.push(candidate_error);

        // Nothing below can fail
        self.rounds += 1;
        let round = self.rounds;
        if replaced {
            warn!(
                round,
                error = candidate_error,
                "new member worse than chance on its own chunk, replaced by untrained learner"
            );
        }
        self.members.push(EnsembleMember::new(candidate, round));

        let t = self.members.len();
        let slope = self.config.sigmoid_slope;
        let crossing = self.config.sigmoid_crossing_point;
        for (idx, (member, &ekt)) in self.members.iter_mut().zip(&errors).enumerate() {
            let wkt = sigmoid_weight(t, idx + 1, slope, crossing);
            member.record_round(ekt, wkt);
        }

        let victim = select_victim(
            self.config.pruning,
            t,
            self.config.ensemble_size,
            worst_member(&errors),
        );
        let pruned_round = victim.map(|idx| {
            let removed = self.members.remove(idx);
            info!(
                round,
                strategy = self.config.pruning.name(),
                removed_round = removed.round(),
                "pruned ensemble member"
            );
            removed.round()
        });

        self.chunk.clear();
        debug!(
            round,
            members = self.members.len(),
            ensemble_error = chunk_weights.ensemble_error,
            "ensemble round complete"
        );

        Ok(RoundSummary {
            round,
            ensemble_error: chunk_weights.ensemble_error,
            member_errors: errors,
            replaced_new_member: replaced,
            pruned_round,
        })
    }
}

/// Weight mass of the chunk instances `learner` misclassifies
fn weighted_error(
    learner: &dyn BaseLearner,
    chunk: &[Instance],
    weights: &[f64],
) -> std::result::Result<f64, LearnerError> {
    let mut ekt = 0.0;
    for (inst, &w) in chunk.iter().zip(weights) {
        if !learner.correctly_classifies(inst)? {
            ekt += w;
        }
    }
    Ok(ekt)
}

impl StreamClassifier for DriftEnsemble {
    fn train_on(&mut self, instance: &Instance) -> Result<()> {
        check_width(self.width, instance)?;
        self.chunk.push(instance.clone());
        if self.chunk.len() < self.config.period {
            self.width = Some(instance.num_attributes());
            return Ok(());
        }
        match self.run_round() {
            Ok(summary) => {
                self.width = Some(instance.num_attributes());
                self.last_round = Some(summary);
                Ok(())
            }
            Err(e) => {
                self.chunk.pop();
                Err(e)
            }
        }
    }

    fn predict(&mut self, instance: &Instance) -> Result<Vec<f64>> {
        self.combined_votes(instance)
    }

    fn reset(&mut self) {
        self.members.clear();
        self.chunk.clear();
        self.width = None;
        self.rounds = 0;
        self.last_round = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PruningStrategy;
    use crate::error::Error;
    use crate::learner::{KNearest, LearnerKind};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    fn config(period: usize, cap: usize, pruning: PruningStrategy) -> EnsembleConfig {
        EnsembleConfig {
            learner: LearnerKind::Knn,
            neighbors: 3,
            period,
            ensemble_size: cap,
            pruning,
            ..EnsembleConfig::default()
        }
    }

    /// Threshold concept on one feature, flipped when `flipped` is set
    fn concept(n: usize, flipped: bool) -> Vec<Instance> {
        (0..n)
            .map(|i| {
                let x = (i * 37 % 100) as f64 / 10.0;
                let positive = x > 5.0;
                Instance::new(vec![x], usize::from(positive != flipped))
            })
            .collect()
    }

    #[test]
    fn test_first_round_creates_single_member() {
        let mut ensemble = DriftEnsemble::new(config(20, 5, PruningStrategy::None)).unwrap();
        assert!(ensemble.predict(&Instance::new(vec![1.0], 0)).unwrap().is_empty());

        for inst in concept(19, false) {
            ensemble.train_on(&inst).unwrap();
        }
        assert!(ensemble.is_empty());
        assert_eq!(ensemble.pending(), 19);

        ensemble.train_on(&Instance::new(vec![9.9], 1)).unwrap();
        assert_eq!(ensemble.len(), 1);
        assert_eq!(ensemble.pending(), 0);

        let member = &ensemble.members()[0];
        assert_eq!(member.normalized_errors().len(), 1);
        assert_eq!(member.history_weights(), &[1.0]);
        assert!(member.voting_weight().is_finite());
        assert!(member.voting_weight() > 0.0);
        assert_eq!(ensemble.last_round().unwrap().ensemble_error, None);
    }

    #[test]
    fn test_histories_grow_once_per_round() {
        let mut ensemble = DriftEnsemble::new(config(10, 10, PruningStrategy::None)).unwrap();
        for inst in concept(40, false) {
            ensemble.train_on(&inst).unwrap();
        }
        assert_eq!(ensemble.rounds(), 4);
        let lengths: Vec<usize> = ensemble
            .members()
            .iter()
            .map(|m| m.normalized_errors().len())
            .collect();
        assert_eq!(lengths, vec![4, 3, 2, 1]);
        for m in ensemble.members() {
            assert_eq!(m.normalized_errors().len(), m.history_weights().len());
            assert!(m.voting_weight().is_finite());
        }
    }

    #[test]
    fn test_age_pruning_drops_oldest() {
        let mut ensemble = DriftEnsemble::new(config(10, 2, PruningStrategy::Age)).unwrap();
        for inst in concept(50, false) {
            ensemble.train_on(&inst).unwrap();
            assert!(ensemble.len() <= 2);
        }
        let rounds: Vec<u64> = ensemble.members().iter().map(|m| m.round()).collect();
        assert_eq!(rounds, vec![4, 5]);
        assert_eq!(ensemble.last_round().unwrap().pruned_round, Some(3));
    }

    #[test]
    fn test_error_pruning_drops_worst_member() {
        let mut ensemble = DriftEnsemble::new(config(20, 2, PruningStrategy::Error)).unwrap();
        for inst in concept(40, false) {
            ensemble.train_on(&inst).unwrap();
        }
        assert_eq!(ensemble.len(), 2);

        // Drifted chunk: both old members are now wrong, the new one is right
        for inst in concept(20, true) {
            ensemble.train_on(&inst).unwrap();
        }
        let summary = ensemble.last_round().unwrap().clone();
        assert_eq!(ensemble.len(), 2);
        assert_eq!(summary.member_errors.len(), 3);
        let worst = worst_member(&summary.member_errors).unwrap();
        assert!(worst < 2, "a stale member has the highest error");
        assert_eq!(summary.pruned_round, Some(worst as u64 + 1));
        assert!(ensemble.members().iter().any(|m| m.round() == 3));
    }

    #[test]
    fn test_no_pruning_keeps_growing() {
        let mut ensemble = DriftEnsemble::new(config(5, 2, PruningStrategy::None)).unwrap();
        for inst in concept(25, false) {
            ensemble.train_on(&inst).unwrap();
        }
        assert_eq!(ensemble.len(), 5);
    }

    #[test]
    fn test_ensemble_tracks_drift() {
        let mut ensemble = DriftEnsemble::new(config(50, 3, PruningStrategy::Age)).unwrap();
        for inst in concept(100, false) {
            ensemble.train_on(&inst).unwrap();
        }
        let probe = Instance::new(vec![8.0], 1);
        assert_eq!(ensemble.classify(&probe).unwrap(), 1);

        for inst in concept(200, true) {
            ensemble.train_on(&inst).unwrap();
        }
        assert_eq!(ensemble.classify(&probe).unwrap(), 0);
    }

    #[test]
    fn test_predict_is_pure() {
        let mut ensemble = DriftEnsemble::new(config(10, 3, PruningStrategy::Age)).unwrap();
        for inst in concept(30, false) {
            ensemble.train_on(&inst).unwrap();
        }
        let probe = Instance::new(vec![4.2], 0);
        let first = ensemble.predict(&probe).unwrap();
        assert_eq!(ensemble.predict(&probe).unwrap(), first);
        assert_eq!(ensemble.rounds(), 3);
    }

    #[test]
    fn test_worse_than_chance_member_is_replaced() {
        let mut ensemble = DriftEnsemble::new(EnsembleConfig {
            learner: LearnerKind::MajorityClass,
            period: 4,
            ..EnsembleConfig::default()
        })
        .unwrap();
        for _ in 0..4 {
            ensemble.train_on(&Instance::new(vec![0.0], 0)).unwrap();
        }
        assert!(!ensemble.last_round().unwrap().replaced_new_member);

        // The ensemble only misses the lone 1, which therefore carries 4/7 of
        // the weight; a unit-weight majority learner still answers 0
        for label in [0, 0, 0, 1] {
            ensemble.train_on(&Instance::new(vec![0.0], label)).unwrap();
        }
        let summary = ensemble.last_round().unwrap();
        assert!(summary.replaced_new_member);
        assert!((summary.member_errors[0] - 0.5).abs() < 1e-12, "old member is clamped");
        assert!((summary.member_errors[1] - 4.0 / 7.0).abs() < 1e-12);

        let newest = ensemble.members().last().unwrap();
        assert!(newest.learner().votes(&Instance::new(vec![0.0], 0)).unwrap().is_empty());
        assert!(newest.voting_weight() < 0.0);
        assert_eq!(ensemble.len(), 2);
    }

    struct Flaky {
        inner: KNearest,
        fail: Arc<AtomicBool>,
    }

    impl BaseLearner for Flaky {
        fn reset(&mut self) {
            self.inner.reset();
        }
        fn train(&mut self, batch: &[Weighted<'_>]) -> std::result::Result<(), LearnerError> {
            self.inner.train(batch)
        }
        fn votes(&self, instance: &Instance) -> std::result::Result<Vec<f64>, LearnerError> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(LearnerError::Classification("injected".to_string()));
            }
            self.inner.votes(instance)
        }
    }

    #[test]
    fn test_failed_round_leaves_state_untouched() {
        let fail = Arc::new(AtomicBool::new(false));
        let handle = fail.clone();
        let factory = move || -> Box<dyn BaseLearner> {
            Box::new(Flaky {
                inner: KNearest::default(),
                fail: handle.clone(),
            })
        };
        let mut ensemble = DriftEnsemble::with_factory(
            config(10, 3, PruningStrategy::Age),
            Box::new(factory),
        )
        .unwrap();
        let data = concept(20, false);
        for inst in &data[..10] {
            ensemble.train_on(inst).unwrap();
        }
        for inst in &data[10..19] {
            ensemble.train_on(inst).unwrap();
        }
        let weight_before = ensemble.members()[0].voting_weight();

        fail.store(true, Ordering::SeqCst);
        let err = ensemble.train_on(&data[19]).unwrap_err();
        assert!(matches!(err, Error::Learner(LearnerError::Classification(_))));
        assert_eq!(ensemble.len(), 1);
        assert_eq!(ensemble.rounds(), 1);
        assert_eq!(ensemble.pending(), 9);
        assert_eq!(ensemble.members()[0].normalized_errors().len(), 1);
        assert_eq!(ensemble.members()[0].voting_weight(), weight_before);

        fail.store(false, Ordering::SeqCst);
        ensemble.train_on(&data[19]).unwrap();
        assert_eq!(ensemble.len(), 2);
    }

    #[test]
    fn test_wrong_width_arrival_is_rejected() {
        let mut ensemble = DriftEnsemble::new(config(5, 10, PruningStrategy::None)).unwrap();
        let data = concept(27, false);
        for inst in &data[..5] {
            ensemble.train_on(inst).unwrap();
        }
        assert_eq!(ensemble.rounds(), 1);

        let wide = Instance::new(vec![1.0, 2.0], 0);
        let err = ensemble.train_on(&wide).unwrap_err();
        assert!(matches!(
            err,
            Error::DimensionMismatch {
                expected: 1,
                actual: 2
            }
        ));
        assert_eq!(ensemble.pending(), 0);

        // Mid-chunk rejection leaves the partial chunk alone
        ensemble.train_on(&data[5]).unwrap();
        assert!(ensemble.train_on(&wide).is_err());
        assert_eq!(ensemble.pending(), 1);

        for inst in &data[6..] {
            ensemble.train_on(inst).unwrap();
        }
        assert_eq!(ensemble.rounds(), 5);
        assert_eq!(ensemble.pending(), 2);

        ensemble.reset();
        ensemble.train_on(&wide).unwrap();
        assert_eq!(ensemble.pending(), 1);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut ensemble = DriftEnsemble::new(EnsembleConfig {
            learner: LearnerKind::MajorityClass,
            period: 2,
            ..EnsembleConfig::default()
        })
        .unwrap();
        for _ in 0..5 {
            ensemble.train_on(&Instance::new(vec![1.0], 1)).unwrap();
        }
        assert_eq!(ensemble.rounds(), 2);
        ensemble.reset();
        assert!(ensemble.is_empty());
        assert_eq!(ensemble.pending(), 0);
        assert_eq!(ensemble.rounds(), 0);
    }
}
