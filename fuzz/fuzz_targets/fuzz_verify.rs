#![no_main]
use libfuzzer_sys::fuzz_target;
use rand_chacha::rand_core::SeedableRng;
use ring_tesla::traits::{KeyGen, Signer, Verifier};
use ring_tesla::{ring_tesla_i, RingTesla, SigningKey, VerifyingKey};
use std::sync::OnceLock;


fn keypair() -> &'static (VerifyingKey, SigningKey) {
    static KEYS: OnceLock<(VerifyingKey, SigningKey)> = OnceLock::new();
    KEYS.get_or_init(|| {
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(42);
        ring_tesla_i::scheme().try_keygen_with_rng(&mut rng).unwrap()
    })
}


fuzz_target!(|data: &[u8]| {
    let scheme: RingTesla = ring_tesla_i::scheme();
    let (vk, sk) = keypair();

    // Arbitrary bytes as a signature must be rejected without panicking
    let (msg, sig_bytes) = data.split_at(data.len().saturating_sub(ring_tesla_i::SIG_LEN));
    let _ = vk.verify_bytes(msg, sig_bytes);
    let _ = vk.verify_bytes(msg, data);

    // A valid signature verifies; the same signature over a modified message does not
    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(data.len() as u64);
    let sig = sk.try_sign_with_rng(&mut rng, data).unwrap();
    assert!(vk.verify(data, &sig));
    let mut modified = data.to_vec();
    modified.push(1);
    assert!(!vk.verify(&modified, &sig));

    // Flipping any single bit of the encoding invalidates it
    if !data.is_empty() {
        let mut bytes = scheme.encode_signature(&sig).unwrap();
        let bit = usize::from(data[0]) % (8 * bytes.len());
        bytes[bit / 8] ^= 1 << (bit % 8);
        assert!(!vk.verify_bytes(data, &bytes));
    }
});
