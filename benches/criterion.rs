use cauchy_reed_solomon::{decode, encode, initialize, Block, BYTES};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

const SHAPES: [(usize, usize); 3] = [(4, 2), (16, 4), (64, 16)];
const BLOCK_BYTES: usize = 4096;

fn data_blocks(k: usize) -> Vec<&'static [u8]> {
	BYTES[..k * BLOCK_BYTES].chunks(BLOCK_BYTES).collect()
}

fn bench_encode(c: &mut Criterion) {
	initialize();
	let mut group = c.benchmark_group("encode");
	for (k, m) in SHAPES {
		let data = data_blocks(k);
		group.bench_with_input(BenchmarkId::from_parameter(format!("k{k}m{m}")), &(k, m), |b, &(k, m)| {
			let mut recovery = vec![0u8; m * BLOCK_BYTES];
			b.iter(|| encode(k, m, &data, &mut recovery, BLOCK_BYTES).unwrap());
		});
	}
	group.finish();
}

fn bench_decode_max_missing(c: &mut Criterion) {
	initialize();
	let mut group = c.benchmark_group("decode_max_missing");
	for (k, m) in SHAPES {
		let data = data_blocks(k);
		let mut recovery = vec![0u8; m * BLOCK_BYTES];
		encode(k, m, &data, &mut recovery, BLOCK_BYTES).unwrap();

		group.bench_with_input(BenchmarkId::from_parameter(format!("k{k}m{m}")), &(k, m), |b, &(k, m)| {
			b.iter(|| {
				let mut blocks: Vec<Block> = (0..k)
					.map(|i| if i < m { Block::absent() } else { Block::present(i as u8, data[i].to_vec()) })
					.chain(
						(0..m).map(|i| Block::present((k + i) as u8, recovery[i * BLOCK_BYTES..(i + 1) * BLOCK_BYTES].to_vec())),
					)
					.collect();
				decode(k, m, &mut blocks, BLOCK_BYTES).unwrap();
			});
		});
	}
	group.finish();
}

#[cfg(feature = "compare")]
fn bench_compare_reed_solomon_erasure(c: &mut Criterion) {
	use cauchy_reed_solomon::status_quo;

	let mut group = c.benchmark_group("compare_reed_solomon_erasure");
	for (k, m) in SHAPES {
		let payload = &BYTES[..k * BLOCK_BYTES];
		group.bench_with_input(BenchmarkId::from_parameter(format!("k{k}m{m}")), &(k, m), |b, &(k, m)| {
			b.iter(|| status_quo::encode(k, m, BLOCK_BYTES, payload));
		});
	}
	group.finish();
}

#[cfg(feature = "compare")]
criterion_group!(benches, bench_encode, bench_decode_max_missing, bench_compare_reed_solomon_erasure);
#[cfg(not(feature = "compare"))]
criterion_group!(benches, bench_encode, bench_decode_max_missing);
criterion_main!(benches);
