use cauchy_reed_solomon::{decode, encode, initialize, Block, BYTES};
use iai::black_box;

const K: usize = 16;
const M: usize = 4;
const BLOCK_BYTES: usize = BYTES.len() / K;

fn data_blocks() -> Vec<&'static [u8]> {
	BYTES[..K * BLOCK_BYTES].chunks(BLOCK_BYTES).collect()
}

fn bench_encode() {
	initialize();
	let data = data_blocks();
	let mut recovery = vec![0u8; M * BLOCK_BYTES];
	encode(K, M, black_box(&data), &mut recovery, BLOCK_BYTES).unwrap();
}

fn bench_roundtrip_with_max_missing() {
	initialize();
	let data = data_blocks();
	let mut recovery = vec![0u8; M * BLOCK_BYTES];
	encode(K, M, &data, &mut recovery, BLOCK_BYTES).unwrap();

	let mut blocks: Vec<Block> = (0..K)
		.map(|i| if i < M { Block::absent() } else { Block::present(i as u8, data[i].to_vec()) })
		.chain((0..M).map(|i| Block::present((K + i) as u8, recovery[i * BLOCK_BYTES..(i + 1) * BLOCK_BYTES].to_vec())))
		.collect();

	decode(black_box(K), black_box(M), &mut blocks, BLOCK_BYTES).unwrap();
}

iai::main!(bench_encode, bench_roundtrip_with_max_missing);
