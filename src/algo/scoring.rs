//! Spatio-temporal Window Scoring
//!
//! Ranks buffered instances against a query by a convex blend of feature-space
//! distance and time since arrival:
//!
//! ```text
//! score = (1 - alpha) * spatial / max_spatial + alpha * (now - arrival) / now
//! ```
//!
//! `alpha = 0` gives case-based selection, `alpha = 1` pure recency.

use crate::error::{Error, Result};
use crate::instance::{Instance, euclidean};

/// A buffered instance with its arrival index
#[derive(Clone, Debug)]
pub struct Stamped {
    pub instance: Instance,
    pub arrival: u64,
}

/// Distances of one buffered instance to the current query
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScoredEntry {
    /// Position of the instance in the insertion-ordered buffer
    pub position: usize,
    pub spatial: f64,
    pub temporal: f64,
    /// Blended, normalized score (lower ranks first)
    pub score: f64,
}

/// Score every buffered instance against `query` and sort ascending.
///
/// `now` is the current arrival index. Ties keep insertion order. Fails
/// without partial output if any buffered instance differs in width from the
/// query.
pub fn score_buffer(
    buffer: &[Stamped],
    query: &Instance,
    now: u64,
    alpha: f64,
) -> Result<Vec<ScoredEntry>> {
    let mut entries = Vec::with_capacity(buffer.len());
    let mut max_spatial = 0.0f64;

    for (position, stamped) in buffer.iter().enumerate() {
        let spatial = euclidean(stamped.instance.features(), query.features()).ok_or(
            Error::DimensionMismatch {
                expected: stamped.instance.num_attributes(),
                actual: query.num_attributes(),
            },
        )?;
        let temporal = now.saturating_sub(stamped.arrival) as f64;
        max_spatial = max_spatial.max(spatial);
        entries.push(ScoredEntry {
            position,
            spatial,
            temporal,
            score: 0.0,
        });
    }

    for entry in &mut entries {
        // All-equidistant buffers contribute nothing spatially
        let spatial_norm = if max_spatial > 0.0 {
            entry.spatial / max_spatial
        } else {
            0.0
        };
        let temporal_norm = if now > 0 {
            entry.temporal / now as f64
        } else {
            0.0
        };
        entry.score = (1.0 - alpha) * spatial_norm + alpha * temporal_norm;
    }

    // sort_by is stable, so equal scores keep buffer order
    entries.sort_by(|a, b| a.score.total_cmp(&b.score));
    Ok(entries)
}
