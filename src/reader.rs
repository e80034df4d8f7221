//! Shape-inferring dataset reader.
//!
//! The input is a whitespace-separated grid of numbers whose shape is not
//! declared anywhere. The reader works it out from the data:
//!
//! 1. **Columns**: count the numeric tokens on the first line. Only the first
//!    `max_line_len - 1` bytes of that line are looked at; longer lines are
//!    silently cut, which under-counts the columns. Keep the first line short.
//! 2. **Rows**: count every numeric token in the input and divide by the
//!    column count. A remainder means the grid is not rectangular.
//! 3. **Load**: allocate `rows × columns` values and parse every token into
//!    them in row-major order.
//!
//! The whole stream is buffered once and all three passes run over the
//! buffer, so the source does not need to be seekable.
//!
//! After the first line, row boundaries are not enforced: only the token
//! count matters, so `"1 2\n3\n4\n"` loads as two rows of two.
//!
//! ```rust
//! let ds = gridload::read_dataset("1.0 2.0\n3.0 4.0\n5.0 6.0\n".as_bytes()).unwrap();
//! assert_eq!((ds.n_points(), ds.n_dims()), (3, 2));
//! assert_eq!(ds.as_slice(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
//! ```

use std::io::Read;

use log::{debug, warn};

use crate::alloc::{checked_len, try_alloc_values};
use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::scan::Scanner;

/// Size of the first-line buffer, including room for a terminator.
pub const DEFAULT_MAX_LINE_LEN: usize = 1024;

/// Reader configuration.
#[derive(Debug, Clone)]
pub struct DatasetReader {
    /// First-line buffer size; at most `max_line_len - 1` bytes are sniffed.
    max_line_len: usize,
}

impl Default for DatasetReader {
    fn default() -> Self {
        Self {
            max_line_len: DEFAULT_MAX_LINE_LEN,
        }
    }
}

impl DatasetReader {
    /// Reader with the default 1024-byte first-line buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the first-line buffer size. Must be at least 2.
    pub fn with_max_line_len(mut self, max_line_len: usize) -> Self {
        self.max_line_len = max_line_len;
        self
    }

    /// Configured first-line buffer size.
    pub fn max_line_len(&self) -> usize {
        self.max_line_len
    }

    /// Read the whole stream and build a [`Dataset`] from it.
    pub fn read<R: Read>(&self, mut reader: R) -> Result<Dataset> {
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf)?;
        self.parse(&buf)
    }

    /// Build a [`Dataset`] from an in-memory buffer.
    pub fn parse(&self, buf: &[u8]) -> Result<Dataset> {
        if self.max_line_len < 2 {
            return Err(Error::InvalidParameter {
                name: "max_line_len",
                message: "must be at least 2",
            });
        }

        let n_dims = self.count_columns(buf);
        if n_dims == 0 {
            return Err(Error::EmptyHeader);
        }

        let tokens = Scanner::new(buf).count();
        if tokens % n_dims != 0 {
            return Err(Error::NonRectangular { tokens, n_dims });
        }
        let n_points = tokens / n_dims;
        debug!("inferred shape: {n_points} points x {n_dims} dims");

        let expected = checked_len(n_points, n_dims)?;
        let mut data = try_alloc_values(expected)?;

        let mut scanner = Scanner::new(buf);
        let mut found = 0;
        for slot in data.iter_mut() {
            let token = scanner.next().ok_or(Error::Truncated { expected, found })?;
            *slot = token.value()?;
            found += 1;
        }

        if !scanner.at_end() {
            warn!(
                "ignoring non-numeric content at byte {} after {} values",
                scanner.offset(),
                expected
            );
        }

        Dataset::from_flat(n_dims, data)
    }

    /// Number of tokens on the (possibly cut) first line.
    fn count_columns(&self, buf: &[u8]) -> usize {
        let limit = self.max_line_len - 1;
        let line_end = buf
            .iter()
            .position(|&b| b == b'\n')
            .map_or(buf.len(), |nl| nl + 1);
        if line_end > limit {
            warn!(
                "first line is longer than {limit} bytes; columns are counted on the prefix only"
            );
        }
        Scanner::new(&buf[..line_end.min(limit)]).count()
    }
}

/// Read a dataset with the default configuration.
pub fn read_dataset<R: Read>(reader: R) -> Result<Dataset> {
    DatasetReader::new().read(reader)
}
