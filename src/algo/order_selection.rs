//! Model-Order Selection
//!
//! Picks how many of the best-ranked instances to train on. For every prefix
//! length `i` in `k..=n` the first `k` instances of the prefix are used as a
//! leave-one-out validation set: each is held out in turn, a learner is fit on
//! the remaining `i - 1` instances, and the held-out label is checked. The
//! prefix with the lowest mean error wins; the first minimum wins ties.
//!
//! Cost is `O(n * k)` training calls per selection.

use crate::error::Result;
use crate::instance::{Instance, Weighted};
use crate::learner::BaseLearner;
use serde::Serialize;

/// Outcome of one model-order search
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Selection {
    /// Chosen prefix length
    pub window: usize,
    /// Mean leave-one-out error of the chosen prefix
    pub error: f64,
    /// `(prefix length, mean leave-one-out error)` for every evaluated prefix
    pub candidates: Vec<(usize, f64)>,
}

/// Run the leave-one-out search over prefixes of `ranked`.
///
/// `scratch` is reset before every fit; its final state is unspecified.
/// When `ranked` holds fewer than `k` instances no prefix is evaluated and
/// the whole slice is selected.
pub fn select_window(
    ranked: &[&Instance],
    k: usize,
    scratch: &mut dyn BaseLearner,
) -> Result<Selection> {
    let n = ranked.len();
    let k = k.max(1);
    let mut candidates = Vec::with_capacity(n.saturating_sub(k) + 1);
    let mut best: Option<(usize, f64)> = None;

    for prefix in k..=n {
        let error = leave_one_out_error(&ranked[..prefix], k, scratch)?;
        candidates.push((prefix, error));
        if best.is_none_or(|(_, best_error)| error < best_error) {
            best = Some((prefix, error));
        }
    }

    let (window, error) = best.unwrap_or((n, 0.0));
    Ok(Selection {
        window,
        error,
        candidates,
    })
}

/// Mean 0/1 error over the first `folds` held-out positions of `prefix`.
fn leave_one_out_error(
    prefix: &[&Instance],
    folds: usize,
    scratch: &mut dyn BaseLearner,
) -> Result<f64> {
    let folds = folds.min(prefix.len());
    if folds == 0 {
        return Ok(0.0);
    }

    let mut errors = 0usize;
    let mut training: Vec<Weighted> = Vec::with_capacity(prefix.len().saturating_sub(1));
    for held_out in 0..folds {
        training.clear();
        training.extend(
            prefix
                .iter()
                .enumerate()
                .filter(|&(pos, _)| pos != held_out)
                .map(|(_, inst)| Weighted::unit(inst)),
        );

        scratch.reset();
        scratch.train(&training)?;
        if !scratch.correctly_classifies(prefix[held_out])? {
            errors += 1;
        }
    }
    Ok(errors as f64 / folds as f64)
}
