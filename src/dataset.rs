//! In-memory dataset and clustering result.
//!
//! Both structures keep their coordinates in one row-major `Vec<f32>`: the
//! value for row `i`, column `d` lives at offset `i * n_dims + d`.

use ndarray::ArrayView2;

use crate::error::{Error, Result};

/// A rectangular table of points, one row per point.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    n_dims: usize,
    n_points: usize,
    data: Vec<f32>,
}

impl Dataset {
    /// Wrap a row-major value array of `n_points × n_dims` floats.
    pub fn from_flat(n_dims: usize, data: Vec<f32>) -> Result<Self> {
        if n_dims == 0 {
            return Err(Error::InvalidParameter {
                name: "n_dims",
                message: "must be positive",
            });
        }
        if data.len() % n_dims != 0 {
            return Err(Error::NonRectangular {
                tokens: data.len(),
                n_dims,
            });
        }
        Ok(Self {
            n_dims,
            n_points: data.len() / n_dims,
            data,
        })
    }

    /// Build a dataset from one vector per point.
    pub fn from_rows(rows: &[Vec<f32>]) -> Result<Self> {
        let first = rows.first().ok_or(Error::EmptyInput)?;
        let n_dims = first.len();
        let mut data = Vec::with_capacity(rows.len() * n_dims);
        for row in rows {
            if row.len() != n_dims {
                return Err(Error::ShapeMismatch {
                    expected: format!("{n_dims} columns"),
                    actual: format!("{} columns", row.len()),
                });
            }
            data.extend_from_slice(row);
        }
        Self::from_flat(n_dims, data)
    }

    /// Number of columns per point.
    pub fn n_dims(&self) -> usize {
        self.n_dims
    }

    /// Number of points.
    pub fn n_points(&self) -> usize {
        self.n_points
    }

    /// The row-major value array.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Coordinates of point `i`.
    ///
    /// Panics if `i >= n_points`.
    pub fn point(&self, i: usize) -> &[f32] {
        &self.data[i * self.n_dims..(i + 1) * self.n_dims]
    }

    /// Iterate over points in row order.
    pub fn points(&self) -> impl ExactSizeIterator<Item = &[f32]> + '_ {
        self.data.chunks_exact(self.n_dims)
    }

    /// Borrow the values as an `n_points × n_dims` matrix.
    pub fn view(&self) -> Result<ArrayView2<'_, f32>> {
        ArrayView2::from_shape((self.n_points, self.n_dims), &self.data).map_err(|e| {
            Error::ShapeMismatch {
                expected: format!("{}x{}", self.n_points, self.n_dims),
                actual: e.to_string(),
            }
        })
    }

    /// Give back the value array.
    pub fn into_inner(self) -> Vec<f32> {
        self.data
    }
}

/// Centroids and per-point assignments produced by a clustering algorithm.
#[derive(Debug, Clone, PartialEq)]
pub struct Clustering {
    n_clusters: usize,
    n_dims: usize,
    centroids: Vec<f32>,
    cluster_of: Vec<usize>,
}

impl Clustering {
    /// Pair a row-major centroid array with the assignment of every point of `dataset`.
    pub fn new(dataset: &Dataset, centroids: Vec<f32>, cluster_of: Vec<usize>) -> Result<Self> {
        let n_dims = dataset.n_dims();
        if centroids.len() % n_dims != 0 {
            return Err(Error::ShapeMismatch {
                expected: format!("multiple of {n_dims} centroid values"),
                actual: format!("{} values", centroids.len()),
            });
        }
        if cluster_of.len() != dataset.n_points() {
            return Err(Error::ShapeMismatch {
                expected: format!("{} assignments", dataset.n_points()),
                actual: format!("{} assignments", cluster_of.len()),
            });
        }
        let n_clusters = centroids.len() / n_dims;
        if let Some(&bad) = cluster_of.iter().find(|&&c| c >= n_clusters) {
            return Err(Error::InvalidClusterCount {
                requested: bad + 1,
                n_items: n_clusters,
            });
        }
        Ok(Self {
            n_clusters,
            n_dims,
            centroids,
            cluster_of,
        })
    }

    /// Number of clusters.
    pub fn n_clusters(&self) -> usize {
        self.n_clusters
    }

    /// Number of coordinates per centroid.
    pub fn n_dims(&self) -> usize {
        self.n_dims
    }

    /// Row-major centroid array.
    pub fn centroids(&self) -> &[f32] {
        &self.centroids
    }

    /// Coordinates of centroid `j`.
    pub fn centroid(&self, j: usize) -> &[f32] {
        &self.centroids[j * self.n_dims..(j + 1) * self.n_dims]
    }

    /// Cluster id of every point, in dataset row order.
    pub fn cluster_of(&self) -> &[usize] {
        &self.cluster_of
    }

    /// Check that this result describes `dataset`.
    pub fn check_matches(&self, dataset: &Dataset) -> Result<()> {
        if self.n_dims != dataset.n_dims() || self.cluster_of.len() != dataset.n_points() {
            return Err(Error::ShapeMismatch {
                expected: format!("{}x{}", dataset.n_points(), dataset.n_dims()),
                actual: format!("{}x{}", self.cluster_of.len(), self.n_dims),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_by_two() -> Dataset {
        Dataset::from_flat(2, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap()
    }

    #[test]
    fn test_row_major_layout() {
        let ds = three_by_two();
        assert_eq!(ds.n_points(), 3);
        assert_eq!(ds.point(1), &[3.0, 4.0]);
        assert_eq!(ds.view().unwrap()[[2, 1]], 6.0);
        assert_eq!(ds.points().len(), 3);
    }

    #[test]
    fn test_from_flat_rejects_ragged() {
        assert_eq!(
            Dataset::from_flat(3, vec![0.0; 5]),
            Err(Error::NonRectangular {
                tokens: 5,
                n_dims: 3
            })
        );
        assert!(Dataset::from_flat(0, vec![]).is_err());
    }

    #[test]
    fn test_from_rows() {
        let ds = Dataset::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(ds.as_slice(), &[1.0, 2.0, 3.0, 4.0]);
        assert!(Dataset::from_rows(&[vec![1.0], vec![1.0, 2.0]]).is_err());
        assert_eq!(Dataset::from_rows(&[]), Err(Error::EmptyInput));
    }

    #[test]
    fn test_clustering_shape_checks() {
        let ds = three_by_two();
        let ok = Clustering::new(&ds, vec![0.0, 0.0, 9.0, 9.0], vec![0, 1, 1]).unwrap();
        assert_eq!(ok.n_clusters(), 2);
        assert_eq!(ok.centroid(1), &[9.0, 9.0]);
        assert!(ok.check_matches(&ds).is_ok());

        assert!(Clustering::new(&ds, vec![0.0; 3], vec![0, 0, 0]).is_err());
        assert!(Clustering::new(&ds, vec![0.0; 2], vec![0, 0]).is_err());
        assert!(matches!(
            Clustering::new(&ds, vec![0.0; 2], vec![0, 1, 0]),
            Err(Error::InvalidClusterCount { .. })
        ));
    }

    #[test]
    fn test_check_matches_other_dataset() {
        let ds = three_by_two();
        let clustering = Clustering::new(&ds, vec![0.0, 0.0], vec![0, 0, 0]).unwrap();
        let other = Dataset::from_flat(3, vec![0.0; 6]).unwrap();
        assert!(clustering.check_matches(&other).is_err());
    }
}
