//! Ensemble pruning decisions.

use crate::config::PruningStrategy;

/// Index of the member to remove, if any.
///
/// Nothing is removed until `size` exceeds `cap`. `worst` is the index of the
/// member with the highest error in the current round.
pub fn select_victim(
    strategy: PruningStrategy,
    size: usize,
    cap: usize,
    worst: Option<usize>,
) -> Option<usize> {
    if size <= cap {
        return None;
    }
    match strategy {
        PruningStrategy::None => None,
        PruningStrategy::Age => Some(0),
        PruningStrategy::Error => worst.filter(|&idx| idx < size),
    }
}

/// Index of the highest error. Ties go to the lowest index, the oldest of
/// the tied members.
pub fn worst_member(errors: &[f64]) -> Option<usize> {
    let mut worst = None;
    let mut max = f64::NEG_INFINITY;
    for (idx, &e) in errors.iter().enumerate() {
        if e > max {
            max = e;
            worst = Some(idx);
        }
    }
    worst
}
