//! Cauchy matrix construction.

use crate::gf::GfContext;

/// Builds the m×k Cauchy matrix `M[i][j] = inv(add(k+i, j))`.
///
/// Pure function: no state, no caching. `{0..k-1}` and `{k..k+m-1}` are
/// disjoint by construction (the caller has already enforced `k+m <= 256`),
/// so `add(k+i, j)` is never zero and every entry is a well-defined inverse.
/// Any square submatrix of rows/columns of a Cauchy matrix is non-singular
/// in GF(256), which is what gives the code its MDS (any-k-of-n) property.
pub fn cauchy_matrix(gf: &GfContext, k: usize, m: usize) -> Vec<Vec<u8>> {
	(0..m)
		.map(|i| {
			let row = (k + i) as u8;
			(0..k).map(|j| gf.inv(gf.add(row, j as u8))).collect()
		})
		.collect()
}
