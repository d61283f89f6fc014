//! Thin wrapper over `reed-solomon-erasure`'s GF(256) engine, used only by
//! the `compare` bench to sanity-check this crate's throughput against a
//! well known crates.io coder. Not used by [`crate::encode`]/[`crate::decode`].

use reed_solomon_erasure::galois_8::ReedSolomon;

pub fn coder(k: usize, m: usize) -> ReedSolomon {
	ReedSolomon::new(k, m).expect("k, m already validated by the caller")
}

/// Splits `payload` into `k` shards of `block_bytes`, zero-padding the last
/// one, then appends `m` freshly-computed parity shards in place.
pub fn encode(k: usize, m: usize, block_bytes: usize, payload: &[u8]) -> Vec<Vec<u8>> {
	let r = coder(k, m);

	let mut shards: Vec<Vec<u8>> = payload
		.chunks(block_bytes)
		.map(|chunk| {
			let mut shard = vec![0u8; block_bytes];
			shard[..chunk.len()].copy_from_slice(chunk);
			shard
		})
		.collect();
	shards.resize(k, vec![0u8; block_bytes]);
	shards.extend(std::iter::repeat(vec![0u8; block_bytes]).take(m));

	r.encode(&mut shards).expect("shard count and lengths match k, m, block_bytes by construction");
	shards
}

/// Reconstructs missing shards in `shards` (a k+m-length vector with `None`
/// in place of every dropped shard) in place.
pub fn reconstruct(k: usize, m: usize, shards: &mut [Option<Vec<u8>>]) {
	let r = coder(k, m);
	r.reconstruct(shards).expect("caller has verified at least k shards survive");
}
