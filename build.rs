use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use std::env;
use std::path::PathBuf;

/// Size of the deterministic pseudorandom fixture consumed by `BYTES` in
/// `src/lib.rs`. Must cover the largest `k * block_bytes` any bench slices
/// out of it (currently `64 * 4096` in `benches/criterion.rs`), with room
/// to spare, without bloating the build.
const FIXTURE_BYTES: usize = 1 << 20;

fn main() {
	let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));

	let mut rng = StdRng::seed_from_u64(0xC00C_1E55);
	let mut data = vec![0u8; FIXTURE_BYTES];
	rng.fill(&mut data[..]);

	fs_err::write(out_dir.join("rand_data.bin"), &data).expect("failed to write test fixture");

	println!("cargo:rerun-if-changed=build.rs");
}
