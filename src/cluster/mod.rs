//! Clustering algorithms that fill a [`Clustering`](crate::Clustering).
//!
//! These are consumers of the dataset reader: they take a loaded
//! [`Dataset`](crate::Dataset) and produce the centroids and assignments
//! that the result writer prints.
//!
//! ```rust
//! use gridload::cluster::{ClusterAlgorithm, Kmeans};
//!
//! let ds = gridload::read_dataset("0 0\n0.1 0.1\n10 10\n10.1 10.1\n".as_bytes()).unwrap();
//! let clustering = Kmeans::new(2).with_seed(42).fit(&ds).unwrap();
//! let labels = clustering.cluster_of();
//! assert_eq!(labels[0], labels[1]);
//! assert_ne!(labels[0], labels[2]);
//! ```

mod kmeans;
mod traits;

pub use kmeans::Kmeans;
pub use traits::ClusterAlgorithm;
