//! Text output of a finished clustering.
//!
//! Layout:
//!
//! ```text
//! # Centroids:
//! #
//! #   0 : 0.500000 0.500000
//! #   1 : 4.000000 4.500000
//! #
//! 1.000000 2.000000 0
//! 7.000000 8.000000 1
//! ```
//!
//! Centroid lines carry the cluster index right-aligned in three columns.
//! Every point line lists the coordinates, each followed by one space, and
//! ends with the integer cluster id. Values are printed in fixed-point
//! notation with six decimals unless configured otherwise; non-finite values
//! print as `inf`, `-inf` and `NaN`, all of which the reader accepts.

use std::io::Write;

use crate::dataset::{Clustering, Dataset};
use crate::error::Result;

/// Default number of decimals, matching C's `%f`.
pub const DEFAULT_PRECISION: usize = 6;

/// Writer for the final result file.
#[derive(Debug, Clone)]
pub struct ResultWriter {
    precision: usize,
}

impl Default for ResultWriter {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
        }
    }
}

impl ResultWriter {
    /// Writer printing six decimals.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of decimals printed for every coordinate.
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Configured number of decimals.
    pub fn precision(&self) -> usize {
        self.precision
    }

    /// Write the centroid block followed by every point and its cluster id.
    pub fn write<W: Write>(
        &self,
        out: &mut W,
        dataset: &Dataset,
        clustering: &Clustering,
    ) -> Result<()> {
        clustering.check_matches(dataset)?;

        writeln!(out, "# Centroids:")?;
        writeln!(out, "#")?;
        for j in 0..clustering.n_clusters() {
            write!(out, "# {j:3} :")?;
            for v in clustering.centroid(j) {
                write!(out, " {v:.prec$}", prec = self.precision)?;
            }
            writeln!(out)?;
        }
        writeln!(out, "#")?;
        write_points(out, dataset, clustering, self.precision)
    }

    /// Render the result file into a string.
    pub fn render(&self, dataset: &Dataset, clustering: &Clustering) -> Result<String> {
        let mut buf = Vec::new();
        self.write(&mut buf, dataset, clustering)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

/// One line per point: coordinates then cluster id.
pub(crate) fn write_points<W: Write>(
    out: &mut W,
    dataset: &Dataset,
    clustering: &Clustering,
    precision: usize,
) -> Result<()> {
    for (point, cluster) in dataset.points().zip(clustering.cluster_of()) {
        for v in point {
            write!(out, "{v:.precision$} ")?;
        }
        writeln!(out, "{cluster}")?;
    }
    Ok(())
}

/// Write results with the default format.
pub fn write_results<W: Write>(
    out: &mut W,
    dataset: &Dataset,
    clustering: &Clustering,
) -> Result<()> {
    ResultWriter::new().write(out, dataset, clustering)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn single() -> (Dataset, Clustering) {
        let ds = Dataset::from_flat(2, vec![1.0, 2.0]).unwrap();
        let cl = Clustering::new(&ds, vec![0.5, 0.5], vec![0]).unwrap();
        (ds, cl)
    }

    #[test]
    fn test_single_centroid_single_point() -> Result<()> {
        let (ds, cl) = single();
        let text = ResultWriter::new().render(&ds, &cl)?;
        assert_eq!(
            text,
            "# Centroids:\n#\n#   0 : 0.500000 0.500000\n#\n1.000000 2.000000 0\n"
        );
        Ok(())
    }

    #[test]
    fn test_index_alignment_and_ids() -> Result<()> {
        let ds = Dataset::from_flat(1, vec![3.0, -1.25]).unwrap();
        let mut centroids = vec![0.0; 12];
        centroids[11] = 7.0;
        let cl = Clustering::new(&ds, centroids, vec![11, 3])?;
        let text = ResultWriter::new().render(&ds, &cl)?;
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[2], "#   0 : 0.000000");
        assert_eq!(lines[13], "#  11 : 7.000000");
        assert_eq!(lines[14], "#");
        assert_eq!(lines[15], "3.000000 11");
        assert_eq!(lines[16], "-1.250000 3");
        Ok(())
    }

    #[test]
    fn test_custom_precision() -> Result<()> {
        let (ds, cl) = single();
        let text = ResultWriter::new().with_precision(2).render(&ds, &cl)?;
        assert!(text.contains("#   0 : 0.50 0.50\n"));
        assert!(text.ends_with("1.00 2.00 0\n"));
        Ok(())
    }

    #[test]
    fn test_mismatched_clustering_rejected() {
        let (_, cl) = single();
        let other = Dataset::from_flat(2, vec![0.0; 4]).unwrap();
        let mut out = Vec::new();
        assert!(matches!(
            write_results(&mut out, &other, &cl),
            Err(Error::ShapeMismatch { .. })
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn test_write_failure_reported() {
        struct Full;
        impl Write for Full {
            fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::Other, "no space"))
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }
        let (ds, cl) = single();
        assert_eq!(
            write_results(&mut Full, &ds, &cl),
            Err(Error::Io("no space".to_string()))
        );
    }
}
