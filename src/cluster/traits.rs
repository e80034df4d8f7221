//! Clustering traits.

use crate::dataset::{Clustering, Dataset};
use crate::error::Result;

/// An algorithm that partitions a [`Dataset`] into clusters.
pub trait ClusterAlgorithm {
    /// Fit the model to data and return centroids plus one label per point.
    fn fit(&self, dataset: &Dataset) -> Result<Clustering>;

    /// Get the number of clusters.
    fn n_clusters(&self) -> usize;
}
