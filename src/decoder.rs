//! Decode pipeline: missing-set detection, submatrix construction and
//! inversion, block reconstruction.

use crate::block::Block;
use crate::cauchy::cauchy_matrix;
use crate::error::Error;
use crate::gf::GfContext;
use crate::matrix::invert;
use crate::params::validate;

/// Orchestrates reconstruction of missing data blocks from whichever k or
/// more of the k+m blocks survived.
pub struct Decoder<'gf> {
	gf: &'gf GfContext,
}

impl<'gf> Decoder<'gf> {
	pub fn new(gf: &'gf GfContext) -> Self {
		Decoder { gf }
	}

	/// Reconstructs missing data blocks in place into `blocks`.
	///
	/// `blocks` must have length >= k; present entries carry a `block_bytes`
	/// payload and a `row` in `[0, k+m)`. On success every row in `[0,k)` is
	/// present in `blocks` with its original payload; reconstructed blocks
	/// are installed into slots that were `Block::Absent` on entry, in scan
	/// order (callers must discover blocks by `row`, not position).
	pub fn decode(&self, k: usize, m: usize, blocks: &mut [Block], block_bytes: usize) -> Result<(), Error> {
		validate(k, m, block_bytes)?;

		if blocks.len() < k {
			return Err(Error::InsufficientBlocks { needed: k, available: blocks.len() });
		}

		log::trace!("decoding k={k} m={m} block_bytes={block_bytes}");

		// Step 1: missing-set detection among data rows [0, k).
		let mut present_data = vec![false; k];
		for block in blocks.iter() {
			if let Block::Present(b) = block {
				let row = b.row as usize;
				if row < k {
					present_data[row] = true;
				}
			}
		}
		let missing_indices: Vec<usize> = (0..k).filter(|&i| !present_data[i]).collect();
		let missing_count = missing_indices.len();

		// Step 2: short-circuit when nothing is missing.
		if missing_count == 0 {
			return Ok(());
		}

		if missing_count > m {
			return Err(Error::InsufficientBlocks { needed: k, available: k - missing_count });
		}

		// Step 3: collect `missing_count` distinct present recovery rows.
		let mut recovery_rows: Vec<usize> = Vec::with_capacity(missing_count);
		let mut seen_recovery = vec![false; m];
		for block in blocks.iter() {
			if recovery_rows.len() == missing_count {
				break;
			}
			if let Block::Present(b) = block {
				let row = b.row as usize;
				if row >= k && row < k + m {
					let r = row - k;
					if !seen_recovery[r] {
						seen_recovery[r] = true;
						recovery_rows.push(r);
					}
				}
			}
		}
		if recovery_rows.len() < missing_count {
			return Err(Error::InsufficientBlocks { needed: missing_count, available: recovery_rows.len() });
		}

		// Step 4: build the full Cauchy matrix and the square submatrix S.
		let matrix = cauchy_matrix(self.gf, k, m);
		let mut sub = vec![vec![0u8; missing_count]; missing_count];
		for (t, &rrow) in recovery_rows.iter().enumerate() {
			for (u, &midx) in missing_indices.iter().enumerate() {
				sub[t][u] = matrix[rrow][midx];
			}
		}

		// Step 5: invert S.
		let sub_inv = invert(&sub, self.gf).map_err(|e| match e {
			Error::MatrixOperation(msg) => {
				log::warn!("singular submatrix during decode: {msg}");
				Error::MatrixOperation(msg)
			}
			other => other,
		})?;

		// Step 6: reconstruct each missing column. Scoped so the immutable
		// borrows of `blocks` (via the payload references below) end before
		// the mutable pass that installs reconstructed blocks.
		let reconstructed: Vec<(u8, Vec<u8>)> = {
			let mut data_payload: Vec<Option<&[u8]>> = vec![None; k];
			let mut recovery_payload: Vec<Option<&[u8]>> = vec![None; m];
			for block in blocks.iter() {
				if let Block::Present(b) = block {
					let row = b.row as usize;
					if row < k {
						data_payload[row] = Some(&b.payload[..]);
					} else if row < k + m {
						recovery_payload[row - k] = Some(&b.payload[..]);
					}
				}
			}

			let mut out = Vec::with_capacity(missing_count);
			for u in 0..missing_count {
				let mut acc = vec![0u8; block_bytes];
				for (t, &rrow) in recovery_rows.iter().enumerate() {
					let mut rt = recovery_payload[rrow]
						.ok_or_else(|| Error::BlockBuffer(format!("recovery block {rrow} unexpectedly absent")))?
						.to_vec();

					for l in 0..k {
						if present_data[l] {
							let coef = matrix[rrow][l];
							if coef == 0 {
								continue;
							}
							let src = data_payload[l]
								.ok_or_else(|| Error::BlockBuffer(format!("data block {l} unexpectedly absent")))?;
							if coef == 1 {
								for p in 0..block_bytes {
									rt[p] ^= src[p];
								}
							} else {
								for p in 0..block_bytes {
									rt[p] ^= self.gf.mul(src[p], coef);
								}
							}
						}
					}

					let coef = sub_inv[u][t];
					if coef == 0 {
						continue;
					}
					if coef == 1 {
						for p in 0..block_bytes {
							acc[p] ^= rt[p];
						}
					} else {
						for p in 0..block_bytes {
							acc[p] ^= self.gf.mul(rt[p], coef);
						}
					}
				}
				out.push((missing_indices[u] as u8, acc));
			}
			out
		};

		let mut slots = blocks.iter_mut().filter(|b| !b.is_present());
		for (row, payload) in reconstructed {
			let slot = slots
				.next()
				.ok_or_else(|| Error::BlockBuffer("no empty slot available for a reconstructed block".into()))?;
			*slot = Block::present(row, payload);
		}

		Ok(())
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::encoder::Encoder;

	fn build(gf: &GfContext, k: usize, m: usize, data: &[Vec<u8>], block_bytes: usize) -> (Vec<Vec<u8>>, Vec<Vec<u8>>) {
		let refs: Vec<&[u8]> = data.iter().map(|v| v.as_slice()).collect();
		let mut recovery_buf = vec![0u8; m * block_bytes];
		Encoder::new(gf).encode(k, m, &refs, &mut recovery_buf, block_bytes).unwrap();
		let recovery: Vec<Vec<u8>> = recovery_buf.chunks(block_bytes).map(|c| c.to_vec()).collect();
		(data.to_vec(), recovery)
	}

	#[test]
	fn s1_two_data_two_parity_drop_all_data() {
		let gf = GfContext::new();
		let data = vec![vec![1, 2, 3, 4, 5, 6, 7, 8], vec![9, 10, 11, 12, 13, 14, 15, 16]];
		let (data, recovery) = build(&gf, 2, 2, &data, 8);

		let mut blocks = vec![
			Block::absent(),
			Block::absent(),
			Block::present(2, recovery[0].clone()),
			Block::present(3, recovery[1].clone()),
		];

		Decoder::new(&gf).decode(2, 2, &mut blocks, 8).unwrap();

		assert_eq!(blocks[0].payload().unwrap(), &data[0][..]);
		assert_eq!(blocks[1].payload().unwrap(), &data[1][..]);
	}

	#[test]
	fn s3_idempotent_when_nothing_missing() {
		let gf = GfContext::new();
		let data = vec![vec![1u8; 8], vec![2u8; 8], vec![3u8; 8]];
		let (data, recovery) = build(&gf, 3, 1, &data, 8);

		let mut blocks = vec![
			Block::present(0, data[0].clone()),
			Block::present(1, data[1].clone()),
			Block::present(2, data[2].clone()),
		];
		let before = blocks.clone();

		Decoder::new(&gf).decode(3, 1, &mut blocks, 8).unwrap();
		assert_eq!(blocks, before, "decode must not touch payloads when nothing is missing");
		let _ = recovery; // unused: no recovery block even offered
	}

	#[test]
	fn s4_fewer_than_k_present_fails_insufficient_blocks() {
		let gf = GfContext::new();
		let data = vec![vec![1u8; 8], vec![2u8; 8], vec![3u8; 8], vec![4u8; 8]];
		let (data, recovery) = build(&gf, 4, 2, &data, 8);

		let mut blocks = vec![
			Block::present(0, data[0].clone()),
			Block::absent(),
			Block::absent(),
			Block::present(4, recovery[0].clone()),
			Block::present(5, recovery[1].clone()),
		];

		let err = Decoder::new(&gf).decode(4, 2, &mut blocks, 8).unwrap_err();
		assert!(matches!(err, Error::InsufficientBlocks { .. }));
	}

	#[test]
	fn s5_exactly_k_present_with_max_missing_data_succeeds() {
		let gf = GfContext::new();
		let data: Vec<Vec<u8>> = (0..5u8).map(|i| vec![i; 8]).collect();
		let (data, recovery) = build(&gf, 5, 3, &data, 8);

		let mut blocks = vec![
			Block::present(0, data[0].clone()),
			Block::present(1, data[1].clone()),
			Block::absent(),
			Block::absent(),
			Block::absent(),
			Block::present(5, recovery[0].clone()),
			Block::present(6, recovery[1].clone()),
			Block::present(7, recovery[2].clone()),
		];

		Decoder::new(&gf).decode(5, 3, &mut blocks, 8).unwrap();
		for i in 0..5 {
			assert_eq!(blocks[i].payload().unwrap(), &data[i][..]);
		}
	}

	#[test]
	fn singular_submatrix_cannot_arise_from_well_formed_cauchy_inputs() {
		// sanity: a correctly-built recovery-row/missing-index pairing is
		// always invertible since it is itself a Cauchy submatrix.
		let gf = GfContext::new();
		let data: Vec<Vec<u8>> = (0..8u8).map(|i| vec![i; 8]).collect();
		let (data, recovery) = build(&gf, 8, 4, &data, 8);

		let mut blocks: Vec<Block> = (0..8)
			.map(|i| if i % 2 == 0 { Block::absent() } else { Block::present(i as u8, data[i].clone()) })
			.chain((0..4).map(|i| Block::present((8 + i) as u8, recovery[i].clone())))
			.collect();

		Decoder::new(&gf).decode(8, 4, &mut blocks, 8).unwrap();
		for i in (0..8).step_by(2) {
			assert_eq!(blocks[i].payload().unwrap(), &data[i][..]);
		}
	}
}
