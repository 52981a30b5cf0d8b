//! Weighted vote aggregation across ensemble members.

use crate::error::LearnerError;
use crate::instance::Instance;
use crate::learner::BaseLearner;

/// Combine member votes for `instance`.
///
/// Each member with a positive voting weight contributes its vote vector
/// normalized to a distribution and scaled by that weight. Members whose
/// votes sum to zero contribute nothing. With no contributions the result is
/// empty.
pub fn combine_votes<'a, I>(members: I, instance: &Instance) -> Result<Vec<f64>, LearnerError>
where
    I: IntoIterator<Item = (&'a dyn BaseLearner, f64)>,
{
    let mut combined: Vec<f64> = Vec::new();
    for (learner, weight) in members {
        if weight <= 0.0 {
            continue;
        }
        let votes = learner.votes(instance)?;
        let sum: f64 = votes.iter().sum();
        if sum <= 0.0 {
            continue;
        }
        if votes.len() > combined.len() {
            combined.resize(votes.len(), 0.0);
        }
        for (acc, v) in combined.iter_mut().zip(&votes) {
            *acc += v / sum * weight;
        }
    }
    Ok(combined)
}
