//! Per-iteration hook for clustering algorithms.

use crate::dataset::{Clustering, Dataset};
use crate::error::Result;

/// Called by an iterative algorithm after every update of its state.
pub trait IterationObserver {
    /// Inspect the state reached after iteration `iter` (0-based).
    ///
    /// An error stops the algorithm and is returned to its caller.
    fn on_iteration(
        &mut self,
        iter: usize,
        dataset: &Dataset,
        clustering: &Clustering,
    ) -> Result<()>;
}

/// Observer that does nothing.
impl IterationObserver for () {
    fn on_iteration(&mut self, _: usize, _: &Dataset, _: &Clustering) -> Result<()> {
        Ok(())
    }
}
