//! Pure-software Cauchy-Reed-Solomon erasure coding over GF(2^8).
//!
//! Given k equal-sized data blocks, [`encode`] produces m equal-sized
//! recovery blocks such that any k of the resulting k+m blocks are
//! sufficient for [`decode`] to reconstruct the original k data blocks.
//! There is no SIMD path and no native-code fallback: every byte goes
//! through the table-driven GF(256) arithmetic in [`GfContext`].
//!
//! ```
//! use cauchy_reed_solomon::{initialize, encode, decode, Block};
//!
//! let gf = initialize();
//! let _ = gf.polynomial();
//!
//! let data: [&[u8]; 2] = [&[1, 2, 3, 4, 5, 6, 7, 8], &[9, 10, 11, 12, 13, 14, 15, 16]];
//! let mut recovery = vec![0u8; 2 * 8];
//! encode(2, 2, &data, &mut recovery, 8).unwrap();
//!
//! let mut blocks = vec![
//!     Block::absent(),
//!     Block::absent(),
//!     Block::present(2, recovery[0..8].to_vec()),
//!     Block::present(3, recovery[8..16].to_vec()),
//! ];
//! decode(2, 2, &mut blocks, 8).unwrap();
//! assert_eq!(blocks[0].payload().unwrap(), data[0]);
//! assert_eq!(blocks[1].payload().unwrap(), data[1]);
//! ```

mod block;
mod cauchy;
mod decoder;
mod encoder;
mod error;
mod gf;
mod matrix;
mod params;
pub mod sidecar;

#[cfg(feature = "compare")]
pub mod status_quo;

pub use block::{Block, PresentBlock};
pub use decoder::Decoder;
pub use encoder::Encoder;
pub use error::Error;
pub use gf::GfContext;

use once_cell::sync::OnceCell;

static GF: OnceCell<GfContext> = OnceCell::new();

/// One-time bring-up of the process-wide GF(256) field tables.
///
/// Idempotent: the first call builds the tables and stores them behind a
/// `OnceCell`; every later call (from any thread) returns the same
/// `'static` reference without rebuilding anything.
pub fn initialize() -> &'static GfContext {
	GF.get_or_init(GfContext::new)
}

fn context() -> Result<&'static GfContext, Error> {
	GF.get().ok_or(Error::UninitializedContext)
}

/// Encodes `data` (k blocks of `block_bytes` bytes) into `recovery`, a
/// single contiguous buffer of `m * block_bytes` bytes. Requires
/// [`initialize`] to have been called first.
pub fn encode(k: usize, m: usize, data: &[&[u8]], recovery: &mut [u8], block_bytes: usize) -> Result<(), Error> {
	let gf = context()?;
	Encoder::new(gf).encode(k, m, data, recovery, block_bytes)
}

/// Reconstructs missing data blocks in place into `blocks`. Requires
/// [`initialize`] to have been called first.
pub fn decode(k: usize, m: usize, blocks: &mut [Block], block_bytes: usize) -> Result<(), Error> {
	let gf = context()?;
	Decoder::new(gf).decode(k, m, blocks, block_bytes)
}

/// A deterministic pseudorandom byte blob generated at build time, used by
/// tests and benches that need filler data without checking a binary
/// fixture into the repository.
pub const BYTES: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/rand_data.bin"));
