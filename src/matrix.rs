//! Gauss-Jordan matrix inversion over GF(2^8).

use crate::error::Error;
use crate::gf::GfContext;

/// Inverts an n×n byte matrix in GF(256) via Gauss-Jordan elimination on an
/// augmented n×2n matrix.
///
/// Pivot selection: a lineage of C implementations of this algorithm compare
/// pivot candidates as signed bytes and call the winner "largest", a
/// comparison that is algebraically meaningless over GF(256). This
/// implementation instead takes the first non-zero entry at or below the
/// diagonal — any deterministic choice is conformant, and none of the
/// round-trip tests depend on which one is made.
pub fn invert(matrix: &[Vec<u8>], gf: &GfContext) -> Result<Vec<Vec<u8>>, Error> {
	let n = matrix.len();
	let mut aug: Vec<Vec<u8>> = Vec::with_capacity(n);
	for (row_idx, row) in matrix.iter().enumerate() {
		if row.len() != n {
			return Err(Error::InvalidParameters(format!(
				"matrix to invert must be square: row {row_idx} has {} entries, expected {n}",
				row.len()
			)));
		}
		let mut augmented = vec![0u8; 2 * n];
		augmented[..n].copy_from_slice(row);
		augmented[n + row_idx] = 1;
		aug.push(augmented);
	}

	for col in 0..n {
		let pivot = (col..n)
			.find(|&r| aug[r][col] != 0)
			.ok_or_else(|| Error::MatrixOperation(format!("singular matrix: no non-zero pivot in column {col}")))?;
		aug.swap(col, pivot);

		let scale = gf.inv(aug[col][col]);
		if scale != 1 {
			for entry in aug[col].iter_mut() {
				*entry = gf.mul(*entry, scale);
			}
		}

		for row in 0..n {
			if row == col {
				continue;
			}
			let factor = aug[row][col];
			if factor == 0 {
				continue;
			}
			for c in 0..(2 * n) {
				aug[row][c] ^= gf.mul(aug[col][c], factor);
			}
		}
	}

	Ok(aug.into_iter().map(|row| row[n..].to_vec()).collect())
}
