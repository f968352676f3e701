//! Performance benchmarks for the crypto pipeline

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dlcrypt::{sha1, sign, verify, Cipher, KeyPair};
use num_bigint::ToBigUint;

fn benchmark_key_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("key_generation");
    group.sample_size(10);

    for bits in [64u64, 100, 128].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(bits), bits, |b, &bits| {
            b.iter(|| KeyPair::generate(bits).expect("key generation failed"));
        });
    }

    group.finish();
}

fn benchmark_cipher(c: &mut Criterion) {
    let mut group = c.benchmark_group("cipher");

    let keypair = KeyPair::generate(100).expect("key generation failed");
    let cipher = Cipher::new(keypair.public_key.clone());
    let block = 0x4142_4344u32.to_biguint().unwrap();

    group.bench_function("encrypt", |b| {
        b.iter(|| cipher.encrypt(black_box(&block)).expect("encryption failed"));
    });

    let packet = cipher.encrypt(&block).expect("encryption failed");
    group.bench_function("decrypt", |b| {
        b.iter(|| {
            cipher
                .decrypt(black_box(&packet), &keypair.private_key)
                .expect("decryption failed")
        });
    });

    group.finish();
}

fn benchmark_sha1(c: &mut Criterion) {
    let mut group = c.benchmark_group("sha1");

    for size in [64usize, 1024, 65536].iter() {
        let data = vec![0xABu8; *size];
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| sha1(black_box(data)));
        });
    }

    group.finish();
}

fn benchmark_signature(c: &mut Criterion) {
    let mut group = c.benchmark_group("signature");

    let keypair = KeyPair::generate(100).expect("key generation failed");
    let message = b"benchmark message";

    group.bench_function("sign", |b| {
        b.iter(|| sign(black_box(message), &keypair).expect("signing failed"));
    });

    let packet = sign(message, &keypair).expect("signing failed");
    group.bench_function("verify", |b| {
        b.iter(|| verify(black_box(&packet), &keypair.public_key).expect("verification failed"));
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_key_generation,
    benchmark_cipher,
    benchmark_sha1,
    benchmark_signature
);
criterion_main!(benches);
