//! Run slice. Session-scoped: never written to storage.

use std::sync::Arc;

use crate::domain::{Run, RunId};

/// Runs, most recently added first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSlice {
    runs: Arc<Vec<Run>>,
}

impl RunSlice {
    pub fn runs(&self) -> &Arc<Vec<Run>> {
        &self.runs
    }

    /// Prepend regardless of timestamp
    pub fn add_run(&mut self, run: Run) {
        let mut next = Vec::with_capacity(self.runs.len() + 1);
        next.push(run);
        next.extend(self.runs.iter().cloned());
        self.runs = Arc::new(next);
    }

    pub fn delete_run(&mut self, id: &RunId) {
        if self.runs.iter().any(|run| &run.id == id) {
            let next = self.runs.iter().filter(|run| &run.id != id).cloned().collect();
            self.runs = Arc::new(next);
        }
    }

    pub fn clear_runs(&mut self) {
        self.runs = Arc::new(Vec::new());
    }
}
