#![no_main]
use libfuzzer_sys::fuzz_target;
use rand_chacha::rand_core::SeedableRng;
use ring_tesla::traits::{KeyGen, Signer, Verifier};
use ring_tesla::{ring_tesla_i, ring_tesla_ii};


fuzz_target!(|data: &[u8]| {
    if data.len() < 8 {
        return;
    }
    let (seed, msg) = data.split_at(8);
    let seed = u64::from_le_bytes(seed.try_into().unwrap());
    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(seed);

    for scheme in [ring_tesla_i::scheme(), ring_tesla_ii::scheme()] {
        let (vk, sk) = scheme.try_keygen_with_rng(&mut rng).unwrap();
        let sig = sk.try_sign_with_rng(&mut rng, msg).unwrap();
        assert!(sig.z().iter().all(|&e| e.abs() <= scheme.params().z_bound()));
        assert!(vk.verify(msg, &sig));
        let bytes = scheme.encode_signature(&sig).unwrap();
        assert!(vk.verify_bytes(msg, &bytes));
    }
});
