//! Chunk reweighting at period boundaries.
//!
//! Instances the current ensemble gets wrong keep a full `1/m` share while
//! correctly classified ones are scaled down by the ensemble error `et`, so
//! the new member and the member evaluation focus on what the ensemble has
//! not yet learned.

/// Weights for one chunk plus the ensemble error that produced them
#[derive(Clone, Debug, PartialEq)]
pub struct ChunkWeights {
    /// Distribution over the chunk, sums to 1
    pub weights: Vec<f64>,
    /// Fraction of the chunk the ensemble misclassified, `None` for the first chunk
    pub ensemble_error: Option<f64>,
}

/// Uniform `1/m` weights, used before any member exists.
pub fn uniform(m: usize) -> ChunkWeights {
    let share = if m > 0 { 1.0 / m as f64 } else { 0.0 };
    ChunkWeights {
        weights: vec![share; m],
        ensemble_error: None,
    }
}

/// Weights from the ensemble's per-instance correctness.
///
/// When the ensemble gets every instance right all raw weights are zero and
/// the distribution falls back to uniform.
pub fn from_correctness(correct: &[bool]) -> ChunkWeights {
    let m = correct.len();
    if m == 0 {
        return uniform(0);
    }
    let share = 1.0 / m as f64;
    let misses = correct.iter().filter(|&&ok| !ok).count();
    let et = misses as f64 * share;

    let mut weights: Vec<f64> = correct
        .iter()
        .map(|&ok| share * if ok { et } else { 1.0 })
        .collect();
    let sum: f64 = weights.iter().sum();
    if sum > 0.0 {
        weights.iter_mut().for_each(|w| *w /= sum);
    } else {
        weights.iter_mut().for_each(|w| *w = share);
    }

    ChunkWeights {
        weights,
        ensemble_error: Some(et),
    }
}
