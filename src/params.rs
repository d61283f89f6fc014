//! Shared parameter validation for the encoder and decoder entry points.

use crate::error::Error;

/// Validates the `(k, m, block_bytes)` invariants common to encode and
/// decode: `k >= 1`, `m >= 1`, `k + m <= 256`, `block_bytes` a positive
/// multiple of 8.
pub fn validate(k: usize, m: usize, block_bytes: usize) -> Result<(), Error> {
	if k == 0 {
		return Err(Error::InvalidParameters("k must be >= 1".into()));
	}
	if m == 0 {
		return Err(Error::InvalidParameters("m must be >= 1".into()));
	}
	if k + m > 256 {
		return Err(Error::InvalidParameters(format!("k + m must be <= 256, got {}", k + m)));
	}
	if block_bytes == 0 {
		return Err(Error::InvalidParameters("block_bytes must be > 0".into()));
	}
	if block_bytes % 8 != 0 {
		return Err(Error::InvalidParameters(format!("block_bytes must be a multiple of 8, got {block_bytes}")));
	}
	Ok(())
}
