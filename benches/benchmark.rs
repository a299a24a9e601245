use criterion::{criterion_group, criterion_main, Criterion};
use rand_chacha::rand_core::SeedableRng;
use ring_tesla::traits::{KeyGen, Signer, Verifier};
use ring_tesla::{ring_tesla_i, ring_tesla_ii};


pub fn criterion_benchmark(c: &mut Criterion) {
    let message = [0u8, 1, 2, 3, 4, 5, 6, 7];
    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(123);

    let scheme_i = ring_tesla_i::scheme();
    let (vk_i, sk_i) = scheme_i.try_keygen_with_rng(&mut rng).unwrap();
    let sig_i = sk_i.try_sign_with_rng(&mut rng, &message).unwrap();
    let sig_i_bytes = scheme_i.encode_signature(&sig_i).unwrap();

    let scheme_ii = ring_tesla_ii::scheme();
    let (vk_ii, sk_ii) = scheme_ii.try_keygen_with_rng(&mut rng).unwrap();
    let sig_ii = sk_ii.try_sign_with_rng(&mut rng, &message).unwrap();

    c.bench_function("ring_tesla_i public params", |b| b.iter(|| scheme_i.gen_public_params_with_rng(&mut rng)));
    c.bench_function("ring_tesla_i keygen", |b| b.iter(|| scheme_i.try_keygen_with_rng(&mut rng)));
    c.bench_function("ring_tesla_i sign", |b| b.iter(|| sk_i.try_sign_with_rng(&mut rng, &message)));
    c.bench_function("ring_tesla_i verify", |b| b.iter(|| vk_i.verify(&message, &sig_i)));
    c.bench_function("ring_tesla_i verify bytes", |b| b.iter(|| vk_i.verify_bytes(&message, &sig_i_bytes)));

    c.bench_function("ring_tesla_ii keygen", |b| b.iter(|| scheme_ii.try_keygen_with_rng(&mut rng)));
    c.bench_function("ring_tesla_ii sign", |b| b.iter(|| sk_ii.try_sign_with_rng(&mut rng, &message)));
    c.bench_function("ring_tesla_ii verify", |b| b.iter(|| vk_ii.verify(&message, &sig_ii)));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

// cargo bench
// Signing rejects roughly two attempts in three, so sign timings vary more than verify.
