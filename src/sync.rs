//! Shared handle for multi-threaded arrival dispatch.
//!
//! The classifiers mutate their state on every call, so concurrent callers
//! must serialize whole `train_on` / `predict` calls. `Shared` does that with
//! one mutex around the classifier.

use crate::classifier::StreamClassifier;
use crate::error::{Error, Result};
use crate::instance::Instance;
use std::sync::{Arc, Mutex, MutexGuard};

pub struct Shared<C> {
    inner: Arc<Mutex<C>>,
}

impl<C> Clone for Shared<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: StreamClassifier> Shared<C> {
    pub fn new(classifier: C) -> Self {
        Self {
            inner: Arc::new(Mutex::new(classifier)),
        }
    }

    /// Lock the classifier for a sequence of calls
    pub fn lock(&self) -> Result<MutexGuard<'_, C>> {
        self.inner.lock().map_err(|_| Error::Poisoned)
    }

    pub fn train_on(&self, instance: &Instance) -> Result<()> {
        self.lock()?.train_on(instance)
    }

    pub fn predict(&self, instance: &Instance) -> Result<Vec<f64>> {
        self.lock()?.predict(instance)
    }

    pub fn classify(&self, instance: &Instance) -> Result<usize> {
        self.lock()?.classify(instance)
    }

    pub fn reset(&self) -> Result<()> {
        self.lock()?.reset();
        Ok(())
    }
}
