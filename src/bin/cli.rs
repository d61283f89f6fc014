use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use cauchy_reed_solomon::sidecar::{self, SidecarInfo};
use cauchy_reed_solomon::{initialize, Block};
use clap::{Parser, Subcommand};
use log::{error, info};

/// Splits a file into Cauchy-Reed-Solomon data/recovery blocks, or
/// reconstructs one from a partial set of them.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Reads `input`, splits it into k data blocks and m recovery blocks,
	/// and writes the sidecar file set next to `basename`.
	Encode {
		input: PathBuf,
		basename: PathBuf,
		#[arg(short, long)]
		k: usize,
		#[arg(short, long)]
		m: usize,
		#[arg(short, long, default_value_t = 4096)]
		block_size: usize,
	},
	/// Reads whichever `<basename>.d<i>` / `<basename>.r<i>` files are
	/// present and writes `<basename>.reconstructed`.
	Decode { basename: PathBuf },
}

fn main() -> ExitCode {
	env_logger::init();
	let cli = Cli::parse();

	let result = match cli.command {
		Command::Encode { input, basename, k, m, block_size } => run_encode(&input, &basename, k, m, block_size),
		Command::Decode { basename } => run_decode(&basename),
	};

	match result {
		Ok(()) => ExitCode::SUCCESS,
		Err(message) => {
			error!("{message}");
			ExitCode::FAILURE
		}
	}
}

fn run_encode(input: &PathBuf, basename: &PathBuf, k: usize, m: usize, block_size: usize) -> Result<(), String> {
	let payload = fs::read(input).map_err(|e| format!("reading {}: {e}", input.display()))?;
	let original_size = payload.len() as u64;

	let gf = initialize();
	let padded_blocks = payload.len().div_ceil(block_size).max(k);
	if padded_blocks != k {
		return Err(format!("input splits into {padded_blocks} blocks of {block_size} bytes, but k={k} was requested"));
	}

	sidecar::write_data_blocks(basename, &payload, k, block_size).map_err(|e| e.to_string())?;

	let data_blocks: Vec<Vec<u8>> = (0..k)
		.map(|i| sidecar::read_block(&sidecar::data_block_path(basename, i), block_size))
		.collect::<std::io::Result<_>>()
		.map_err(|e| e.to_string())?;
	let data_refs: Vec<&[u8]> = data_blocks.iter().map(|b| b.as_slice()).collect();

	let mut recovery = vec![0u8; m * block_size];
	cauchy_reed_solomon::encode(k, m, &data_refs, &mut recovery, block_size).map_err(|e| e.to_string())?;
	sidecar::write_recovery_blocks(basename, &recovery, m, block_size).map_err(|e| e.to_string())?;

	let info = SidecarInfo { original_size, k, m, block_size };
	info.write(basename).map_err(|e| e.to_string())?;

	info!("encoded {} into {k} data + {m} recovery blocks at {}", input.display(), basename.display());
	let _ = gf.polynomial();
	Ok(())
}

fn run_decode(basename: &PathBuf) -> Result<(), String> {
	let info = SidecarInfo::read(basename).map_err(|e| format!("reading sidecar info for {}: {e}", basename.display()))?;
	initialize();

	let mut blocks: Vec<Block> = Vec::with_capacity(info.k + info.m);
	for i in 0..info.k {
		let path = sidecar::data_block_path(basename, i);
		blocks.push(match sidecar::read_block(&path, info.block_size) {
			Ok(payload) => Block::present(i as u8, payload),
			Err(_) => Block::absent(),
		});
	}
	for i in 0..info.m {
		let path = sidecar::recovery_block_path(basename, i);
		blocks.push(match sidecar::read_block(&path, info.block_size) {
			Ok(payload) => Block::present((info.k + i) as u8, payload),
			Err(_) => Block::absent(),
		});
	}

	cauchy_reed_solomon::decode(info.k, info.m, &mut blocks, info.block_size).map_err(|e| e.to_string())?;

	let data_blocks: Vec<Vec<u8>> = blocks[..info.k]
		.iter()
		.map(|b| b.payload().map(|p| p.to_vec()).ok_or_else(|| "missing data block survived decode".to_string()))
		.collect::<Result<_, _>>()?;

	sidecar::write_reconstructed(basename, &data_blocks, info.original_size).map_err(|e| e.to_string())?;
	info!("reconstructed {} bytes into {}.reconstructed", info.original_size, basename.display());
	Ok(())
}
