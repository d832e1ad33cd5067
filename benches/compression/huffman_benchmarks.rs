use bee_compress::{compress_slice, decompress_slice, CompressOptions, FormatVersion};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn sample_input(len: usize) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(1);
    // skewed towards low byte values so the codes have varied lengths
    (0..len)
        .map(|_| (rng.gen::<u8>() as u32 * rng.gen::<u8>() as u32 / 255) as u8)
        .collect()
}

fn bench_huffman(c: &mut Criterion) {
    let mut group = c.benchmark_group("huffman");
    for size in [4 * 1024, 256 * 1024] {
        let input = sample_input(size);
        group.throughput(Throughput::Bytes(size as u64));
        for version in [FormatVersion::Frequency, FormatVersion::Canonical] {
            let options = CompressOptions::new(version);
            let archive = compress_slice(&input, &options).unwrap();

            group.bench_with_input(
                BenchmarkId::new(format!("compress {}", version), size),
                &input,
                |b, input| b.iter(|| compress_slice(black_box(input), &options).unwrap()),
            );
            group.bench_with_input(
                BenchmarkId::new(format!("decompress {}", version), size),
                &archive,
                |b, archive| b.iter(|| decompress_slice(black_box(archive)).unwrap()),
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_huffman);
criterion_main!(benches);
