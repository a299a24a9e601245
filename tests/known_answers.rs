// This file pins byte layouts with fixed inputs, and checks that seeded key generation and
// signing are reproducible end to end.

use rand_chacha::rand_core::SeedableRng;
use ring_tesla::traits::{KeyGen, SerDes, Signer};
use ring_tesla::{ring_tesla_i, ring_tesla_ii, Poly, PublicParams, Signature, VerifyingKey};


#[test]
fn test_signature_layout() {
    let scheme = ring_tesla_i::scheme();
    let bound = scheme.params().z_bound();
    let mut z = vec![0; 512];
    z[0] = bound;
    z[1] = -bound;
    z[2] = 1;
    let sig = Signature::new(Poly::from(z), vec![0xAB; 32]);

    // c′ first, then 23-bit fields of (B − U) − z_i, least significant bit first
    let bytes = scheme.encode_signature(&sig).unwrap();
    assert_eq!(bytes.len(), ring_tesla_i::SIG_LEN);
    assert_eq!(&bytes[..32], &[0xAB; 32]);
    assert_eq!(hex::encode(&bytes[32..44]), "0000009af37fe6fc4f73fea7");
    assert_eq!(hex::encode(&bytes[bytes.len() - 6..]), "69ceff34e77f");
    assert_eq!(scheme.decode_signature(&bytes).unwrap(), sig);
}


#[test]
fn test_public_params_layout() {
    let scheme = ring_tesla_ii::scheme();
    let half_q = scheme.params().half_q();
    let mut a1 = vec![0; 512];
    a1[0] = half_q;
    a1[1] = -half_q;
    let pp = PublicParams { a1: Poly::from(a1), a2: Poly::zero(512) };

    // 26-bit fields of ⌊q/2⌋ − a_i: 0, then q − 1, then ⌊q/2⌋ repeated
    let bytes = scheme.encode_public_params(&pp).unwrap();
    assert_eq!(bytes.len(), 2 * 512 * 26 / 8);
    let field = |i: usize| {
        let bit = 26 * i;
        let word = u64::from_le_bytes(bytes[bit / 8..bit / 8 + 8].try_into().unwrap());
        (word >> (bit % 8)) & ((1 << 26) - 1)
    };
    assert_eq!(field(0), 0);
    assert_eq!(field(1), 51_750_912);
    assert_eq!(field(2), 25_875_456);
    assert_eq!(field(600), 25_875_456);
    assert_eq!(*scheme.decode_public_params(&bytes).unwrap(), pp);
}


#[test]
fn test_seeded_runs_are_reproducible() {
    for scheme in [ring_tesla_i::scheme(), ring_tesla_ii::scheme()] {
        let run = |seed: u64| {
            let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(seed);
            let (vk, sk) = scheme.try_keygen_with_rng(&mut rng).unwrap();
            let sig = sk.try_sign_with_rng(&mut rng, b"known answer").unwrap();
            (vk.into_bytes(), scheme.encode_signature(&sig).unwrap())
        };
        let (vk_a, sig_a) = run(123);
        let (vk_b, sig_b) = run(123);
        assert_eq!(vk_a, vk_b);
        assert_eq!(sig_a, sig_b);

        let (vk_c, sig_c) = run(456);
        assert_ne!(vk_a, vk_c);
        assert_ne!(sig_a, sig_c);

        let vk = VerifyingKey::try_from_bytes(&scheme, &vk_a).unwrap();
        assert!(vk.verify_bytes(b"known answer", &sig_a));
        assert!(!vk.verify_bytes(b"known answer", &sig_c));
    }
}
