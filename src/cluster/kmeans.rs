//! K-means clustering over a [`Dataset`].
//!
//! Lloyd's algorithm:
//!
//! 1. Seed k centroids with k-means++
//! 2. **Assign**: each point to its nearest centroid (squared Euclidean)
//! 3. **Update**: each centroid to the mean of its points
//! 4. Repeat until the squared centroid shift drops below `tol`
//!
//! A cluster that loses all of its points is reseeded from a random point.
//! After every iteration the observer sees the current centroids and
//! assignments, which is how snapshot files are produced.

use super::traits::ClusterAlgorithm;
use crate::dataset::{Clustering, Dataset};
use crate::error::{Error, Result};
use crate::observer::IterationObserver;
use log::{debug, trace};
use ndarray::{Array2, ArrayView1, ArrayView2};
use rand::prelude::*;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// K-means clustering algorithm.
#[derive(Debug, Clone)]
pub struct Kmeans {
    /// Number of clusters.
    k: usize,
    /// Maximum iterations.
    max_iter: usize,
    /// Convergence tolerance.
    tol: f64,
    /// Random seed.
    seed: Option<u64>,
}

impl Kmeans {
    /// Create a new K-means clusterer.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            max_iter: 100,
            tol: 1e-4,
            seed: None,
        }
    }

    /// Set maximum iterations.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set convergence tolerance.
    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    /// Set random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Run k-means, reporting the state after every iteration to `observer`.
    pub fn fit_with_observer<O: IterationObserver>(
        &self,
        dataset: &Dataset,
        observer: &mut O,
    ) -> Result<Clustering> {
        let n = dataset.n_points();
        let d = dataset.n_dims();
        if n == 0 {
            return Err(Error::EmptyInput);
        }
        if self.k == 0 || self.k > n {
            return Err(Error::InvalidClusterCount {
                requested: self.k,
                n_items: n,
            });
        }

        let data = dataset.view()?;

        let mut rng: Box<dyn RngCore> = match self.seed {
            Some(s) => Box::new(StdRng::seed_from_u64(s)),
            None => Box::new(rand::rng()),
        };

        let mut centroids = self.init_centroids(&data, &mut rng);
        let mut labels = vec![0usize; n];

        for iter in 0..self.max_iter {
            self.assign(&data, &centroids, &mut labels);

            let mut new_centroids = Array2::<f32>::zeros((self.k, d));
            let mut counts = vec![0usize; self.k];
            for (i, &k) in labels.iter().enumerate() {
                let mut row = new_centroids.row_mut(k);
                row += &data.row(i);
                counts[k] += 1;
            }
            for (k, &count) in counts.iter().enumerate() {
                if count > 0 {
                    new_centroids.row_mut(k).mapv_inplace(|v| v / count as f32);
                } else {
                    let idx = rng.random_range(0..n);
                    trace!("cluster {k} is empty, reseeding from point {idx}");
                    new_centroids.row_mut(k).assign(&data.row(idx));
                }
            }

            let shift: f32 = centroids
                .iter()
                .zip(new_centroids.iter())
                .map(|(a, b)| (a - b).powi(2))
                .sum();
            centroids = new_centroids;
            trace!("iteration {iter}: centroid shift {shift}");

            let state = to_clustering(dataset, &centroids, &labels)?;
            observer.on_iteration(iter, dataset, &state)?;

            if shift < self.tol as f32 {
                debug!("k-means converged after {} iterations", iter + 1);
                return Ok(state);
            }
        }

        debug!("k-means stopped at max_iter={}", self.max_iter);
        to_clustering(dataset, &centroids, &labels)
    }

    /// Initialize centroids using k-means++ algorithm.
    fn init_centroids(&self, data: &ArrayView2<'_, f32>, rng: &mut impl Rng) -> Array2<f32> {
        let n = data.nrows();
        let d = data.ncols();
        let mut centroids = Array2::zeros((self.k, d));

        let first = rng.random_range(0..n);
        centroids.row_mut(0).assign(&data.row(first));

        for i in 1..self.k {
            let distances: Vec<f32> = data
                .rows()
                .into_iter()
                .map(|point| {
                    (0..i)
                        .map(|c| Self::squared_distance(&point, &centroids.row(c)))
                        .fold(f32::MAX, f32::min)
                })
                .collect();

            // Sample proportional to squared distance
            let total: f32 = distances.iter().sum();
            if total == 0.0 {
                let idx = rng.random_range(0..n);
                centroids.row_mut(i).assign(&data.row(idx));
                continue;
            }

            let threshold = rng.random::<f32>() * total;
            let mut cumsum = 0.0;
            let mut selected = n - 1;
            for (j, &dist) in distances.iter().enumerate() {
                cumsum += dist;
                if cumsum >= threshold {
                    selected = j;
                    break;
                }
            }

            centroids.row_mut(i).assign(&data.row(selected));
        }

        centroids
    }

    fn nearest(&self, point: &ArrayView1<'_, f32>, centroids: &Array2<f32>) -> usize {
        let mut best_cluster = 0;
        let mut best_dist = f32::MAX;
        for k in 0..self.k {
            let dist = Self::squared_distance(point, &centroids.row(k));
            if dist < best_dist {
                best_dist = dist;
                best_cluster = k;
            }
        }
        best_cluster
    }

    #[cfg(feature = "parallel")]
    fn assign(&self, data: &ArrayView2<'_, f32>, centroids: &Array2<f32>, labels: &mut [usize]) {
        labels.par_iter_mut().enumerate().for_each(|(i, label)| {
            *label = self.nearest(&data.row(i), centroids);
        });
    }

    #[cfg(not(feature = "parallel"))]
    fn assign(&self, data: &ArrayView2<'_, f32>, centroids: &Array2<f32>, labels: &mut [usize]) {
        for (i, label) in labels.iter_mut().enumerate() {
            *label = self.nearest(&data.row(i), centroids);
        }
    }

    /// Compute squared Euclidean distance.
    fn squared_distance(a: &ArrayView1<'_, f32>, b: &ArrayView1<'_, f32>) -> f32 {
        a.iter().zip(b.iter()).map(|(x, y)| (x - y).powi(2)).sum()
    }
}

fn to_clustering(
    dataset: &Dataset,
    centroids: &Array2<f32>,
    labels: &[usize],
) -> Result<Clustering> {
    Clustering::new(dataset, centroids.iter().copied().collect(), labels.to_vec())
}

impl ClusterAlgorithm for Kmeans {
    fn fit(&self, dataset: &Dataset) -> Result<Clustering> {
        self.fit_with_observer(dataset, &mut ())
    }

    fn n_clusters(&self) -> usize {
        self.k
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_blobs() -> Dataset {
        Dataset::from_rows(&[
            vec![0.0, 0.0],
            vec![0.1, 0.1],
            vec![10.0, 10.0],
            vec![10.1, 10.1],
        ])
        .unwrap()
    }

    #[test]
    fn test_kmeans_basic() {
        let clustering = Kmeans::new(2).with_seed(42).fit(&two_blobs()).unwrap();
        let labels = clustering.cluster_of();

        assert_eq!(labels[0], labels[1]);
        assert_eq!(labels[2], labels[3]);
        assert_ne!(labels[0], labels[2]);

        let c = clustering.centroid(labels[2]);
        assert!((c[0] - 10.05).abs() < 1e-4);
        assert!((c[1] - 10.05).abs() < 1e-4);
    }

    #[test]
    fn test_kmeans_all_points_assigned() {
        let rows: Vec<Vec<f32>> = (0..50)
            .map(|i| vec![i as f32 * 0.1, (i % 5) as f32])
            .collect();
        let ds = Dataset::from_rows(&rows).unwrap();

        let clustering = Kmeans::new(5).with_seed(123).fit(&ds).unwrap();

        assert_eq!(clustering.cluster_of().len(), 50);
        assert_eq!(clustering.n_clusters(), 5);
        assert_eq!(clustering.centroids().len(), 10);
        for &label in clustering.cluster_of() {
            assert!(label < 5, "label {} out of range", label);
        }
    }

    #[test]
    fn test_kmeans_k_equals_n() {
        let ds = Dataset::from_rows(&[vec![0.0, 0.0], vec![1.0, 0.0], vec![0.0, 1.0]]).unwrap();
        let clustering = Kmeans::new(3).with_seed(42).fit(&ds).unwrap();

        let unique: std::collections::HashSet<_> = clustering.cluster_of().iter().collect();
        assert_eq!(unique.len(), 3);
    }

    #[test]
    fn test_kmeans_deterministic_with_seed() {
        let ds = two_blobs();
        let a = Kmeans::new(2).with_seed(42).fit(&ds).unwrap();
        let b = Kmeans::new(2).with_seed(42).fit(&ds).unwrap();
        assert_eq!(a, b, "same seed should give same result");
    }

    #[test]
    fn test_kmeans_empty_input_error() {
        let ds = Dataset::from_flat(2, vec![]).unwrap();
        assert_eq!(Kmeans::new(2).fit(&ds), Err(Error::EmptyInput));
    }

    #[test]
    fn test_kmeans_invalid_k_error() {
        let ds = Dataset::from_rows(&[vec![0.0, 0.0], vec![1.0, 1.0]]).unwrap();
        assert!(Kmeans::new(5).fit(&ds).is_err());
        assert!(Kmeans::new(0).fit(&ds).is_err());
    }

    struct Recorder {
        iterations: Vec<usize>,
        fail_at: Option<usize>,
    }

    impl IterationObserver for Recorder {
        fn on_iteration(&mut self, iter: usize, ds: &Dataset, cl: &Clustering) -> Result<()> {
            assert_eq!(cl.cluster_of().len(), ds.n_points());
            self.iterations.push(iter);
            if self.fail_at == Some(iter) {
                return Err(Error::Io("stop".into()));
            }
            Ok(())
        }
    }

    #[test]
    fn test_observer_sees_every_iteration() {
        let mut rec = Recorder {
            iterations: vec![],
            fail_at: None,
        };
        Kmeans::new(2)
            .with_seed(7)
            .with_max_iter(10)
            .fit_with_observer(&two_blobs(), &mut rec)
            .unwrap();
        assert!(!rec.iterations.is_empty());
        let expected: Vec<usize> = (0..rec.iterations.len()).collect();
        assert_eq!(rec.iterations, expected);
    }

    #[test]
    fn test_observer_error_stops_run() {
        let mut rec = Recorder {
            iterations: vec![],
            fail_at: Some(0),
        };
        let result = Kmeans::new(2)
            .with_tol(0.0)
            .with_seed(1)
            .fit_with_observer(&two_blobs(), &mut rec);
        assert_eq!(result, Err(Error::Io("stop".into())));
        assert_eq!(rec.iterations, vec![0]);
    }
}
