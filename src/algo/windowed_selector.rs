//! Windowed Neighbor Selector
//!
//! Instance-selection classifier for drifting streams. Every arrival is kept
//! in an insertion-ordered buffer. During warm-up the production learner is
//! refit on the whole buffer after each arrival. Once `period` arrivals have
//! been seen, each prediction:
//!
//! 1. ranks the buffer by blended spatio-temporal distance to the query
//! 2. runs a leave-one-out search for the best prefix of that ranking
//! 3. refits the production learner on the winning prefix
//!
//! Reference: Žliobaitė, "Combining similarity in time and space for training
//! set formation under concept drift", Intelligent Data Analysis 15(4), 2011.

use super::order_selection::{Selection, select_window};
use super::scoring::{ScoredEntry, Stamped, score_buffer};
use crate::classifier::StreamClassifier;
use crate::config::WindowConfig;
use crate::error::Result;
use crate::instance::{Instance, check_width, one_hot, unit_weighted};
use crate::learner::{BaseLearner, LearnerFactory, prepare};
use tracing::debug;

/// Processing phase, switched once and for good when the buffer fills
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Warmup,
    Steady,
}

pub struct WindowedSelector {
    config: WindowConfig,
    factory: Box<dyn LearnerFactory>,
    buffer: Vec<Stamped>,
    model: Box<dyn BaseLearner>,
    arrivals: u64,
    last_selection: Option<Selection>,
}

impl WindowedSelector {
    /// Create a selector using the configured built-in learner
    pub fn new(config: WindowConfig) -> Result<Self> {
        let factory = Box::new(config.learner);
        Self::with_factory(config, factory)
    }

    /// Create a selector that draws learners from a custom factory
    pub fn with_factory(config: WindowConfig, factory: Box<dyn LearnerFactory>) -> Result<Self> {
        config.validate()?;
        let model = prepare(factory.as_ref(), config.neighbors);
        Ok(Self {
            config,
            factory,
            buffer: Vec::new(),
            model,
            arrivals: 0,
            last_selection: None,
        })
    }

    pub fn phase(&self) -> Phase {
        if self.arrivals < self.config.period as u64 {
            Phase::Warmup
        } else {
            Phase::Steady
        }
    }

    pub fn config(&self) -> &WindowConfig {
        &self.config
    }

    /// Number of instances seen since construction or the last reset
    pub fn arrivals(&self) -> u64 {
        self.arrivals
    }

    pub fn buffer(&self) -> &[Stamped] {
        &self.buffer
    }

    /// Outcome of the most recent steady-state model-order search
    pub fn last_selection(&self) -> Option<&Selection> {
        self.last_selection.as_ref()
    }

    /// Rank the buffer against `query` without touching the model.
    pub fn rank(&self, query: &Instance) -> Result<Vec<ScoredEntry>> {
        score_buffer(
            &self.buffer,
            query,
            self.arrivals,
            self.config.distance_proportion,
        )
    }

    fn fresh_learner(&self) -> Box<dyn BaseLearner> {
        prepare(self.factory.as_ref(), self.config.neighbors)
    }

    /// Select a window for `query` and refit the production learner on it.
    fn reselect(&mut self, query: &Instance) -> Result<()> {
        let ranking = self.rank(query)?;
        let ranked: Vec<&Instance> = ranking
            .iter()
            .map(|entry| &self.buffer[entry.position].instance)
            .collect();

        let mut scratch = self.fresh_learner();
        let selection = select_window(&ranked, self.config.neighbors, scratch.as_mut())?;

        let mut model = self.fresh_learner();
        model.train(&unit_weighted(ranked[..selection.window].iter().copied()))?;

        debug!(
            window = selection.window,
            loo_error = selection.error,
            candidates = selection.candidates.len(),
            buffered = self.buffer.len(),
            "selected training window"
        );
        self.model = model;
        self.last_selection = Some(selection);
        Ok(())
    }
}

impl StreamClassifier for WindowedSelector {
    fn train_on(&mut self, instance: &Instance) -> Result<()> {
        let width = self.buffer.first().map(|s| s.instance.num_attributes());
        check_width(width, instance)?;
        self.buffer.push(Stamped {
            instance: instance.clone(),
            arrival: self.arrivals,
        });

        if self.phase() == Phase::Warmup {
            let mut model = self.fresh_learner();
            if let Err(e) = model.train(&unit_weighted(self.buffer.iter().map(|s| &s.instance))) {
                self.buffer.pop();
                return Err(e.into());
            }
            self.model = model;
        }

        self.arrivals += 1;
        if self.arrivals == self.config.period as u64 {
            debug!(
                period = self.config.period,
                "warm-up complete, switching to windowed selection"
            );
        }
        Ok(())
    }

    fn predict(&mut self, instance: &Instance) -> Result<Vec<f64>> {
        if self.phase() == Phase::Steady {
            self.reselect(instance)?;
        }
        if self.arrivals == 0 {
            return Ok(one_hot(0));
        }
        Ok(one_hot(self.model.classify(instance)?))
    }

    fn reset(&mut self) {
        self.buffer.clear();
        self.arrivals = 0;
        self.last_selection = None;
        self.model = self.fresh_learner();
    }
}
