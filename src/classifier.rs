//! Per-instance interface shared by both stream classifiers.

use crate::error::Result;
use crate::instance::{Instance, argmax};

/// An online classifier fed one labeled instance at a time.
///
/// Every call runs to completion before returning. `predict` may perform a
/// full retraining pass (windowed selection) and is therefore `&mut self`,
/// but repeated calls with the same input and no intervening `train_on`
/// yield the same votes.
pub trait StreamClassifier {
    /// Fold one labeled instance into the model
    fn train_on(&mut self, instance: &Instance) -> Result<()>;

    /// Per-class vote vector for `instance`
    fn predict(&mut self, instance: &Instance) -> Result<Vec<f64>>;

    /// Predicted class, lowest index on ties, 0 when no votes are available
    fn classify(&mut self, instance: &Instance) -> Result<usize> {
        Ok(argmax(&self.predict(instance)?))
    }

    /// Return to the freshly constructed state
    fn reset(&mut self);
}

impl<C: StreamClassifier + ?Sized> StreamClassifier for Box<C> {
    fn train_on(&mut self, instance: &Instance) -> Result<()> {
        (**self).train_on(instance)
    }

    fn predict(&mut self, instance: &Instance) -> Result<Vec<f64>> {
        (**self).predict(instance)
    }

    fn reset(&mut self) {
        (**self).reset()
    }
}
