//! Encode pipeline: Cauchy matrix × data blocks, in GF(256).

use crate::cauchy::cauchy_matrix;
use crate::error::Error;
use crate::gf::GfContext;
use crate::params::validate;

/// Consumes a `GfContext` and k data blocks, writing m parity blocks into a
/// single caller-supplied output buffer.
pub struct Encoder<'gf> {
	gf: &'gf GfContext,
}

impl<'gf> Encoder<'gf> {
	pub fn new(gf: &'gf GfContext) -> Self {
		Encoder { gf }
	}

	/// Encodes `data` (k blocks of `block_bytes` each) into `recovery`, a
	/// single contiguous buffer of `m * block_bytes` bytes.
	pub fn encode(&self, k: usize, m: usize, data: &[&[u8]], recovery: &mut [u8], block_bytes: usize) -> Result<(), Error> {
		validate(k, m, block_bytes)?;

		if data.len() != k {
			return Err(Error::NullData(format!("expected {k} data blocks, got {}", data.len())));
		}
		for (idx, block) in data.iter().enumerate() {
			if block.len() != block_bytes {
				return Err(Error::NullData(format!(
					"data block {idx} has length {}, expected {block_bytes}",
					block.len()
				)));
			}
		}

		let expected_len = m
			.checked_mul(block_bytes)
			.ok_or_else(|| Error::InvalidParameters("m * block_bytes overflows usize".into()))?;
		if recovery.len() != expected_len {
			return Err(Error::NullData(format!(
				"recovery buffer has length {}, expected {expected_len}",
				recovery.len()
			)));
		}

		log::trace!("encoding k={k} m={m} block_bytes={block_bytes}");

		recovery.fill(0);

		let matrix = cauchy_matrix(self.gf, k, m);

		for i in 0..m {
			let out = &mut recovery[i * block_bytes..(i + 1) * block_bytes];
			for j in 0..k {
				let coef = matrix[i][j];
				if coef == 0 {
					continue;
				}
				let src = data[j];
				if coef == 1 {
					for p in 0..block_bytes {
						out[p] ^= src[p];
					}
				} else {
					for p in 0..block_bytes {
						out[p] ^= self.gf.mul(src[p], coef);
					}
				}
			}
		}

		Ok(())
	}
}
