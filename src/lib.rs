//! # gridload
//!
//! Load a whitespace-separated numeric point file whose shape is not declared,
//! and write clustering results back as text.
//!
//! The reader infers the number of columns from the first line and the number
//! of rows from the total token count, then loads every value into one flat
//! row-major array. The writer prints centroids and per-point assignments in a
//! fixed layout; with the `snapshot` feature it can also dump numbered
//! per-iteration files for animation.
//!
//! **Default build** is I/O only. A k-means driver is opt-in via the `cluster`
//! feature.
//!
//! ```rust
//! use gridload::{read_dataset, write_results, Clustering};
//!
//! let ds = read_dataset("1 2\n3 4\n".as_bytes()).unwrap();
//! let clustering = Clustering::new(&ds, vec![2.0, 3.0], vec![0, 0]).unwrap();
//!
//! let mut out = Vec::new();
//! write_results(&mut out, &ds, &clustering).unwrap();
//! assert!(String::from_utf8(out).unwrap().starts_with("# Centroids:\n#\n#   0 :"));
//! ```

/// Allocation of the flat value array.
pub mod alloc;
#[cfg(feature = "cluster")]
pub mod cluster;
pub mod dataset;
/// Error types used across `gridload`.
pub mod error;
pub mod observer;
pub mod reader;
pub mod scan;
#[cfg(feature = "snapshot")]
pub mod snapshot;
pub mod writer;


pub use dataset::{Clustering, Dataset};
pub use error::{Error, Result};
pub use observer::IterationObserver;
pub use reader::{read_dataset, DatasetReader, DEFAULT_MAX_LINE_LEN};
pub use writer::{write_results, ResultWriter, DEFAULT_PRECISION};

#[cfg(feature = "cluster")]
pub use cluster::{ClusterAlgorithm, Kmeans};

#[cfg(feature = "snapshot")]
pub use snapshot::SnapshotWriter;
