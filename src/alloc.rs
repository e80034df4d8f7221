//! Allocation of the flat value array.
//!
//! Two flavours are offered. [`try_alloc_values`] reports exhaustion as
//! [`Error::AllocationFailed`] so the caller can decide what to do;
//! [`alloc_values`] never hands back a partial result and instead diverges
//! through the global allocation-error handler, which aborts the process.

use std::alloc::{handle_alloc_error, Layout};

use crate::error::{Error, Result};

/// Number of values in an `n_points × n_dims` array, checked for overflow.
pub fn checked_len(n_points: usize, n_dims: usize) -> Result<usize> {
    n_points
        .checked_mul(n_dims)
        .ok_or(Error::AllocationFailed { bytes: usize::MAX })
}

/// Allocate `len` zeroed values, or report why the allocator refused.
pub fn try_alloc_values(len: usize) -> Result<Vec<f32>> {
    let bytes = len
        .checked_mul(std::mem::size_of::<f32>())
        .ok_or(Error::AllocationFailed { bytes: usize::MAX })?;

    let mut values = Vec::new();
    values
        .try_reserve_exact(len)
        .map_err(|_| Error::AllocationFailed { bytes })?;
    values.resize(len, 0.0);
    Ok(values)
}

/// Allocate `len` zeroed values, terminating the process on failure.
pub fn alloc_values(len: usize) -> Vec<f32> {
    match try_alloc_values(len) {
        Ok(values) => values,
        Err(_) => {
            let layout = Layout::array::<f32>(len).unwrap_or_else(|_| Layout::new::<f32>());
            handle_alloc_error(layout)
        }
    }
}
