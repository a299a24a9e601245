#![no_main]
use libfuzzer_sys::fuzz_target;
use rand_chacha::rand_core::SeedableRng;
use ring_tesla::traits::{SerDes, Signer, Verifier};
use ring_tesla::{ring_tesla_i, SigningKey, VerifyingKey};


fuzz_target!(|data: &[u8]| {
    let scheme = ring_tesla_i::scheme();

    // Decoders are total; anything they accept must be usable
    let _ = scheme.decode_signature(data);
    let _ = scheme.decode_public_params(data);

    let mut vk_bytes = vec![0u8; ring_tesla_i::VK_LEN];
    let n = data.len().min(vk_bytes.len());
    vk_bytes[..n].copy_from_slice(&data[..n]);
    if let Ok(vk) = VerifyingKey::try_from_bytes(&scheme, &vk_bytes) {
        let _ = vk.verify_bytes(data, data);
    }

    let mut sk_bytes = vec![0u8; ring_tesla_i::SK_LEN];
    let n = data.len().min(sk_bytes.len());
    sk_bytes[..n].copy_from_slice(&data[..n]);
    if let Ok(sk) = SigningKey::try_from_bytes(&scheme, &sk_bytes) {
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(7);
        if let Ok(sig) = sk.try_sign_with_rng(&mut rng, data) {
            let _ = sk.get_public_key().verify(data, &sig);
        }
    }
});
