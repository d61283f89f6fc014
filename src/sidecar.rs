//! On-disk sidecar format used by the CLI/file-splitting collaborator.
//!
//! This is explicitly *not* part of the arithmetic core: it is plain
//! `std::fs` I/O over the documented file scheme, kept here —
//! unconditionally compiled, no extra dependencies — so both the `cli`
//! binary and tests can drive it without pulling in `clap`.
//!
//! Layout for a payload split as `<basename>`:
//! - `<basename>.info`: ASCII `originalSize,k,m,blockSize`
//! - `<basename>.d<i>` for i in [0,k): data blocks, each `blockSize` bytes
//! - `<basename>.r<i>` for i in [0,m): recovery blocks, each `blockSize` bytes
//! - `<basename>.reconstructed`: output, truncated to `originalSize`

use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SidecarInfo {
	pub original_size: u64,
	pub k: usize,
	pub m: usize,
	pub block_size: usize,
}

impl SidecarInfo {
	pub fn write(&self, basename: &Path) -> io::Result<()> {
		let contents = format!("{},{},{},{}", self.original_size, self.k, self.m, self.block_size);
		fs::write(info_path(basename), contents)
	}

	pub fn read(basename: &Path) -> io::Result<Self> {
		let contents = fs::read_to_string(info_path(basename))?;
		let mut fields = contents.trim().split(',');

		let mut next_field = |what: &'static str| -> io::Result<&str> {
			fields.next().ok_or_else(|| io::Error::new(ErrorKind::InvalidData, format!("sidecar info missing {what}")))
		};

		let original_size: u64 = next_field("originalSize")?
			.parse()
			.map_err(|_| io::Error::new(ErrorKind::InvalidData, "originalSize is not a valid integer"))?;
		let k: usize = next_field("k")?.parse().map_err(|_| io::Error::new(ErrorKind::InvalidData, "k is not a valid integer"))?;
		let m: usize = next_field("m")?.parse().map_err(|_| io::Error::new(ErrorKind::InvalidData, "m is not a valid integer"))?;
		let block_size: usize = next_field("blockSize")?
			.parse()
			.map_err(|_| io::Error::new(ErrorKind::InvalidData, "blockSize is not a valid integer"))?;

		Ok(SidecarInfo { original_size, k, m, block_size })
	}
}

pub fn info_path(basename: &Path) -> PathBuf {
	with_suffix(basename, "info")
}

pub fn data_block_path(basename: &Path, i: usize) -> PathBuf {
	with_suffix(basename, &format!("d{i}"))
}

pub fn recovery_block_path(basename: &Path, i: usize) -> PathBuf {
	with_suffix(basename, &format!("r{i}"))
}

pub fn reconstructed_path(basename: &Path) -> PathBuf {
	with_suffix(basename, "reconstructed")
}

fn with_suffix(basename: &Path, suffix: &str) -> PathBuf {
	let mut name = basename.as_os_str().to_owned();
	name.push(".");
	name.push(suffix);
	PathBuf::from(name)
}

/// Splits `payload` into `k` data blocks of `block_size` bytes, zero-padding
/// the final block as needed, and writes them as `<basename>.d<i>` files.
pub fn write_data_blocks(basename: &Path, payload: &[u8], k: usize, block_size: usize) -> io::Result<()> {
	for i in 0..k {
		let start = i * block_size;
		let mut block = vec![0u8; block_size];
		if start < payload.len() {
			let end = (start + block_size).min(payload.len());
			block[..end - start].copy_from_slice(&payload[start..end]);
		}
		fs::write(data_block_path(basename, i), &block)?;
	}
	Ok(())
}

/// Writes `recovery`, a `m * block_size`-byte buffer, as `<basename>.r<i>`
/// files.
pub fn write_recovery_blocks(basename: &Path, recovery: &[u8], m: usize, block_size: usize) -> io::Result<()> {
	for i in 0..m {
		let chunk = &recovery[i * block_size..(i + 1) * block_size];
		fs::write(recovery_block_path(basename, i), chunk)?;
	}
	Ok(())
}

/// Reads a single block file, verifying it is exactly `block_size` bytes.
pub fn read_block(path: &Path, block_size: usize) -> io::Result<Vec<u8>> {
	let data = fs::read(path)?;
	if data.len() != block_size {
		return Err(io::Error::new(
			ErrorKind::InvalidData,
			format!("block {} has length {}, expected {block_size}", path.display(), data.len()),
		));
	}
	Ok(data)
}

/// Concatenates `k` recovered data blocks and truncates to `original_size`,
/// writing the result to `<basename>.reconstructed`.
pub fn write_reconstructed(basename: &Path, data_blocks: &[Vec<u8>], original_size: u64) -> io::Result<()> {
	let mut out = Vec::with_capacity(data_blocks.iter().map(|b| b.len()).sum());
	for block in data_blocks {
		out.extend_from_slice(block);
	}
	out.truncate(original_size as usize);
	fs::write(reconstructed_path(basename), out)
}
