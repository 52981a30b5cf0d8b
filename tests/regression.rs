use drift_core::{
    DriftEnsemble, EnsembleConfig, Instance, LearnerKind, Phase, PruningStrategy,
    StreamClassifier, WindowConfig, WindowedSelector,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Two uniform features in [0, 10), labeled by `x0 + x1 <= threshold`
fn sea_stream(rng: &mut StdRng, n: usize, threshold: f64) -> Vec<Instance> {
    (0..n)
        .map(|_| {
            let x0: f64 = rng.random_range(0.0..10.0);
            let x1: f64 = rng.random_range(0.0..10.0);
            Instance::new(vec![x0, x1], usize::from(x0 + x1 <= threshold))
        })
        .collect()
}

#[test]
fn test_windowed_selector_ranks_matching_instance_first() {
    let config = WindowConfig {
        learner: LearnerKind::Knn,
        period: 100,
        neighbors: 3,
        distance_proportion: 0.5,
    };
    let mut selector = WindowedSelector::new(config).unwrap();

    let stream: Vec<Instance> = (0..100)
        .map(|i| Instance::new(vec![i as f64], (i / 25) % 2))
        .collect();
    for inst in &stream {
        selector.train_on(inst).unwrap();
    }
    assert_eq!(selector.phase(), Phase::Steady);

    // Same features as arrival #50
    let query = Instance::new(vec![50.0], stream[50].label());
    let ranking = selector.rank(&query).unwrap();
    assert_eq!(ranking[0].position, 50);
    assert_eq!(ranking[0].spatial, 0.0);

    let votes = selector.predict(&query).unwrap();
    let selection = selector.last_selection().unwrap();
    assert!(selection.window >= 3 && selection.window <= 100);
    for &(_, err) in &selection.candidates {
        assert!(selection.error <= err);
    }
    // Every prefix starts at the best-ranked entry, which is #50
    let prefix: Vec<usize> = ranking[..selection.window]
        .iter()
        .map(|e| e.position)
        .collect();
    assert!(prefix.contains(&50));
    assert_eq!(votes.iter().position(|&v| v == 1.0), Some(stream[50].label()));
}

#[test]
fn test_identical_features_rank_by_recency() {
    let mut selector = WindowedSelector::new(WindowConfig::default()).unwrap();
    for i in 0..100 {
        selector
            .train_on(&Instance::new(vec![1.0, 1.0], i % 2))
            .unwrap();
    }
    let ranking = selector.rank(&Instance::new(vec![1.0, 1.0], 0)).unwrap();
    let order: Vec<usize> = ranking.iter().map(|e| e.position).collect();
    let expected: Vec<usize> = (0..100).rev().collect();
    assert_eq!(order, expected);
    assert!(ranking.iter().all(|e| e.score.is_finite()));
}

#[test]
fn test_drift_ensemble_age_pruning_scenario() {
    let config = EnsembleConfig {
        learner: LearnerKind::Knn,
        period: 500,
        ensemble_size: 3,
        pruning: PruningStrategy::Age,
        ..EnsembleConfig::default()
    };
    let mut ensemble = DriftEnsemble::new(config).unwrap();
    let mut rng = StdRng::seed_from_u64(7);

    let mut stream = sea_stream(&mut rng, 1000, 8.0);
    stream.extend(sea_stream(&mut rng, 1000, 12.0));

    let mut sizes_after_round = Vec::new();
    for (i, inst) in stream.iter().enumerate() {
        ensemble.train_on(inst).unwrap();
        if (i + 1) % 500 == 0 {
            sizes_after_round.push(ensemble.len());
        }
    }

    assert_eq!(ensemble.rounds(), 4);
    assert_eq!(sizes_after_round, vec![1, 2, 3, 3]);
    let rounds: Vec<u64> = ensemble.members().iter().map(|m| m.round()).collect();
    assert_eq!(rounds, vec![2, 3, 4]);
    assert_eq!(ensemble.last_round().unwrap().pruned_round, Some(1));

    for member in ensemble.members() {
        assert!(member.voting_weight().is_finite());
        assert_eq!(
            member.normalized_errors().len(),
            member.history_weights().len()
        );
    }
}

#[test]
fn test_ensemble_size_never_exceeds_cap() {
    for pruning in [PruningStrategy::Age, PruningStrategy::Error] {
        let config = EnsembleConfig {
            learner: LearnerKind::NaiveBayes,
            period: 50,
            ensemble_size: 4,
            pruning,
            ..EnsembleConfig::default()
        };
        let mut ensemble = DriftEnsemble::new(config).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        for (i, inst) in sea_stream(&mut rng, 600, 9.0).iter().enumerate() {
            ensemble.train_on(inst).unwrap();
            if i >= 250 {
                assert!(ensemble.len() <= 4, "{:?} let the ensemble grow", pruning);
            }
        }
        assert_eq!(ensemble.rounds(), 12);
        assert_eq!(ensemble.len(), 4);
    }
}

#[test]
fn test_first_chunk_member_weight_from_own_history() {
    let config = EnsembleConfig {
        period: 100,
        ..EnsembleConfig::default()
    };
    let mut ensemble = DriftEnsemble::new(config).unwrap();
    let mut rng = StdRng::seed_from_u64(3);
    for inst in sea_stream(&mut rng, 100, 10.0) {
        ensemble.train_on(&inst).unwrap();
    }
    assert_eq!(ensemble.len(), 1);
    let member = &ensemble.members()[0];
    assert_eq!(member.normalized_errors().len(), 1);
    let bkt = member.normalized_errors()[0];
    let expected = (1.0 / bkt.max(drift_core::algo::member::MIN_WEIGHTED_ERROR)).ln();
    assert!((member.voting_weight() - expected).abs() < 1e-9);
}

#[test]
fn test_prequential_predictions_are_stable() {
    let mut rng = StdRng::seed_from_u64(5);
    let stream = sea_stream(&mut rng, 160, 10.0);

    let mut selector = WindowedSelector::new(WindowConfig {
        period: 30,
        neighbors: 3,
        ..WindowConfig::default()
    })
    .unwrap();
    let mut ensemble = DriftEnsemble::new(EnsembleConfig {
        period: 40,
        ..EnsembleConfig::default()
    })
    .unwrap();

    for inst in &stream[..120] {
        selector.train_on(inst).unwrap();
        ensemble.train_on(inst).unwrap();
    }
    for inst in &stream[120..] {
        assert_eq!(selector.predict(inst).unwrap(), selector.predict(inst).unwrap());
        assert_eq!(ensemble.predict(inst).unwrap(), ensemble.predict(inst).unwrap());
    }
}
