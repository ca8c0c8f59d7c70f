//! Object classification and its per-object cache.
//!
//! The classifier is an external, possibly slow service.  It must be
//! idempotent per object, so results are cached by [`ObjectId`] and each
//! object is classified at most once per run.

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;
use tracing::debug;

use wh_core::ObjectId;
use wh_grid::{ImageRef, Object};

use crate::TaskResult;

// ── Category ──────────────────────────────────────────────────────────────────

/// A classifier label, e.g. `"bottle"`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct Category(pub String);

impl Category {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Category {
    fn from(s: &str) -> Self {
        Category(s.to_owned())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ── Classifier ────────────────────────────────────────────────────────────────

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClassifyError {
    #[error("classifier returned no label for {0}")]
    NoLabel(String),

    #[error("classifier unavailable: {0}")]
    Unavailable(String),
}

/// `classify(image) -> category`.
///
/// Implementations must be `Send + Sync`: with the `parallel` feature the
/// cache calls them from Rayon workers.
pub trait Classifier: Send + Sync {
    fn classify(&self, image: &ImageRef) -> Result<Category, ClassifyError>;
}

impl<F> Classifier for F
where
    F: Fn(&ImageRef) -> Result<Category, ClassifyError> + Send + Sync,
{
    fn classify(&self, image: &ImageRef) -> Result<Category, ClassifyError> {
        self(image)
    }
}

/// Labels an image by its file stem (`"can.png"` → `can`).  A deterministic
/// local stand-in for a vision service.
pub struct StemClassifier;

impl Classifier for StemClassifier {
    fn classify(&self, image: &ImageRef) -> Result<Category, ClassifyError> {
        match image.stem() {
            "" => Err(ClassifyError::NoLabel(image.as_str().to_owned())),
            stem => Ok(Category(stem.to_owned())),
        }
    }
}

// ── ClassifierCache ───────────────────────────────────────────────────────────

/// Classification results keyed by object id.
#[derive(Default, Debug)]
pub struct ClassifierCache {
    entries: HashMap<ObjectId, Category>,
    calls:   usize,
}

impl ClassifierCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: ObjectId) -> Option<&Category> {
        self.entries.get(&id)
    }

    /// How many times the underlying classifier has been invoked.
    pub fn calls(&self) -> usize {
        self.calls
    }

    /// Classify `object`, consulting the cache first.  The flag is `true`
    /// when the classifier was actually called.
    pub fn classify(
        &mut self,
        classifier: &dyn Classifier,
        object:     &Object,
    ) -> TaskResult<(Category, bool)> {
        if let Some(category) = self.entries.get(&object.id) {
            return Ok((category.clone(), false));
        }
        let category = classifier.classify(&object.image)?;
        self.calls += 1;
        debug!(object = %object.id, %category, "classified");
        self.entries.insert(object.id, category.clone());
        Ok((category, true))
    }

    /// Classify every uncached object in `objects` in one batch and return
    /// the new entries.  Each distinct object is sent to the classifier once.
    pub fn prefetch(
        &mut self,
        classifier: &dyn Classifier,
        objects:    &[&Object],
    ) -> TaskResult<Vec<(ObjectId, Category)>> {
        let mut pending: Vec<&Object> = objects
            .iter()
            .copied()
            .filter(|o| !self.entries.contains_key(&o.id))
            .collect();
        pending.sort_by_key(|o| o.id);
        pending.dedup_by_key(|o| o.id);

        #[cfg(not(feature = "parallel"))]
        let results: Vec<(ObjectId, Result<Category, ClassifyError>)> = pending
            .iter()
            .map(|o| (o.id, classifier.classify(&o.image)))
            .collect();

        #[cfg(feature = "parallel")]
        let results: Vec<(ObjectId, Result<Category, ClassifyError>)> = {
            use rayon::prelude::*;
            pending
                .par_iter()
                .map(|o| (o.id, classifier.classify(&o.image)))
                .collect()
        };

        let mut fresh = Vec::with_capacity(results.len());
        for (id, result) in results {
            let category = result?;
            self.calls += 1;
            self.entries.insert(id, category.clone());
            fresh.push((id, category));
        }
        Ok(fresh)
    }
}
