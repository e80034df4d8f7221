//! Numbered per-iteration snapshots, for turning a run into an animation.
//!
//! Each iteration produces two files in the target directory:
//!
//! - `centroids_NNN.txt`: one line per centroid, coordinates only.
//! - `clusters_NNN.txt`: one line per point, coordinates then cluster id.
//!
//! `NNN` is the iteration number padded to three digits. Every value is
//! followed by a single space. Writing snapshots is slow; leave it off for
//! timed runs.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{error, trace};

use crate::dataset::{Clustering, Dataset};
use crate::error::{Error, Result};
use crate::observer::IterationObserver;
use crate::writer::{write_points, DEFAULT_PRECISION};

/// Writes snapshot files into one directory.
#[derive(Debug, Clone)]
pub struct SnapshotWriter {
    dir: PathBuf,
}

impl Default for SnapshotWriter {
    fn default() -> Self {
        Self::new(".")
    }
}

impl SnapshotWriter {
    /// Snapshot writer targeting `dir`, which must already exist.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Target directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the centroid snapshot for `iter`.
    pub fn centroids_path(&self, iter: usize) -> PathBuf {
        self.dir.join(format!("centroids_{iter:03}.txt"))
    }

    /// Path of the assignment snapshot for `iter`.
    pub fn clusters_path(&self, iter: usize) -> PathBuf {
        self.dir.join(format!("clusters_{iter:03}.txt"))
    }

    /// Write the centroid coordinates reached at iteration `iter`.
    pub fn save_centroids(&self, iter: usize, clustering: &Clustering) -> Result<()> {
        let path = self.centroids_path(iter);
        let mut out = create(&path)?;
        for j in 0..clustering.n_clusters() {
            for v in clustering.centroid(j) {
                write!(out, "{v:.prec$} ", prec = DEFAULT_PRECISION)?;
            }
            writeln!(out)?;
        }
        out.flush()?;
        trace!("wrote {}", path.display());
        Ok(())
    }

    /// Write every point with its cluster id at iteration `iter`.
    pub fn save_clusters(
        &self,
        iter: usize,
        dataset: &Dataset,
        clustering: &Clustering,
    ) -> Result<()> {
        clustering.check_matches(dataset)?;
        let path = self.clusters_path(iter);
        let mut out = create(&path)?;
        write_points(&mut out, dataset, clustering, DEFAULT_PRECISION)?;
        out.flush()?;
        trace!("wrote {}", path.display());
        Ok(())
    }
}

impl IterationObserver for SnapshotWriter {
    fn on_iteration(
        &mut self,
        iter: usize,
        dataset: &Dataset,
        clustering: &Clustering,
    ) -> Result<()> {
        self.save_centroids(iter, clustering)?;
        self.save_clusters(iter, dataset, clustering)
    }
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    match File::create(path) {
        Ok(file) => Ok(BufWriter::new(file)),
        Err(e) => {
            error!("can not open file \"{}\" for writing: {e}", path.display());
            Err(Error::SnapshotOpen {
                path: path.to_path_buf(),
                message: e.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn sample() -> (Dataset, Clustering) {
        let ds = Dataset::from_flat(2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let cl = Clustering::new(&ds, vec![0.5, 0.5, 3.0, 4.0], vec![0, 1]).unwrap();
        (ds, cl)
    }

    #[test]
    fn test_file_names_are_zero_padded() {
        let w = SnapshotWriter::new("out");
        assert_eq!(w.centroids_path(7), Path::new("out/centroids_007.txt"));
        assert_eq!(w.clusters_path(42), Path::new("out/clusters_042.txt"));
        assert_eq!(w.clusters_path(1234), Path::new("out/clusters_1234.txt"));
    }

    #[test]
    fn test_save_centroids_format() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let (_, cl) = sample();
        let w = SnapshotWriter::new(dir.path());
        w.save_centroids(3, &cl)?;
        let text = fs::read_to_string(dir.path().join("centroids_003.txt"))?;
        assert_eq!(text, "0.500000 0.500000 \n3.000000 4.000000 \n");
        Ok(())
    }

    #[test]
    fn test_save_clusters_format() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let (ds, cl) = sample();
        SnapshotWriter::new(dir.path()).save_clusters(0, &ds, &cl)?;
        let text = fs::read_to_string(dir.path().join("clusters_000.txt"))?;
        assert_eq!(text, "1.000000 2.000000 0\n3.000000 4.000000 1\n");
        Ok(())
    }

    #[test]
    fn test_observer_writes_both_files() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let (ds, cl) = sample();
        let mut w = SnapshotWriter::new(dir.path());
        w.on_iteration(1, &ds, &cl)?;
        assert!(dir.path().join("centroids_001.txt").is_file());
        assert!(dir.path().join("clusters_001.txt").is_file());
        Ok(())
    }

    #[test]
    fn test_missing_directory_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");
        let (_, cl) = sample();
        let err = SnapshotWriter::new(&missing).save_centroids(0, &cl).unwrap_err();
        match err {
            Error::SnapshotOpen { path, .. } => {
                assert_eq!(path, missing.join("centroids_000.txt"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
