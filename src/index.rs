#![allow(dead_code)]

use log::trace;

use crate::error::MaxSumError;

// Converts a coordinate tuple sub into a column-major linear index over the domain sizes.
// The first variable varies fastest.
//
// sub[k] must satisfy 0 <= sub[k] < sizes[k]. Callers that have already validated this via
// sub2ind_checked may call this directly in hot loops.
pub fn sub2ind(sizes: &[usize], sub: &[usize]) -> usize {
    debug_assert_eq!(sizes.len(), sub.len());
    let mut index = 0;
    let mut stride = 1;
    for (k, &s) in sub.iter().enumerate() {
        debug_assert!(s < sizes[k], "subindex out of range");
        index += s * stride;
        stride *= sizes[k];
    }
    index
}

// Checked variant of sub2ind that validates every coordinate against its domain size.
pub fn sub2ind_checked(sizes: &[usize], sub: &[usize]) -> Result<usize, MaxSumError> {
    if sizes.len() != sub.len() {
        return Err(MaxSumError::BadDomain {
            reason: format!(
                "subindex has {} coordinates, expected {}",
                sub.len(),
                sizes.len()
            ),
        });
    }
    for (k, &s) in sub.iter().enumerate() {
        if s >= sizes[k] {
            return Err(MaxSumError::OutOfRange {
                index: s,
                domain_size: sizes[k],
            });
        }
    }
    Ok(sub2ind(sizes, sub))
}

// Converts a column-major linear index into its coordinate tuple, given the domain sizes.
// idx must satisfy 0 <= idx < product(sizes).
pub fn ind2sub(sizes: &[usize], mut idx: usize) -> Vec<usize> {
    let mut sub = vec![0; sizes.len()];
    for (k, &s) in sizes.iter().enumerate() {
        sub[k] = idx % s;
        idx /= s;
    }
    sub
}

// Checked variant of ind2sub that validates idx against the product of sizes.
pub fn ind2sub_checked(sizes: &[usize], idx: usize) -> Result<Vec<usize>, MaxSumError> {
    let domain_size: usize = sizes.iter().product();
    trace!("ind2sub_checked({:?}, {})", sizes, idx);
    if idx >= domain_size {
        return Err(MaxSumError::OutOfRange { index: idx, domain_size });
    }
    Ok(ind2sub(sizes, idx))
}

// Computes product(sizes), treating the empty product (a constant function's domain) as 1.
pub fn domain_size_of(sizes: &[usize]) -> usize {
    sizes.iter().product()
}
