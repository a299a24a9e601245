// This file implements the hash adapter, the commitment encoding and the challenge encoder

use crate::conversion::coeffs_to_le_bytes;
use crate::params::{HashFn, ParameterSet};
use crate::types::Poly;
use sha2::{Digest, Sha256, Sha512};
use sha3::{Sha3_256, Sha3_512};


/// Runs a list of byte-slice references through `D` and returns the digest bytes.
fn digest_with<D: Digest>(v: &[&[u8]]) -> Vec<u8> {
    let mut hasher = D::new();
    v.iter().for_each(|b| hasher.update(b));
    hasher.finalize().to_vec()
}


/// Black-box digest of the concatenation of `v`, producing `hash.output_bits()` bits.
pub(crate) fn h(hash: HashFn, v: &[&[u8]]) -> Vec<u8> {
    match hash {
        HashFn::Sha256 => digest_with::<Sha256>(v),
        HashFn::Sha512 => digest_with::<Sha512>(v),
        HashFn::Sha3_256 => digest_with::<Sha3_256>(v),
        HashFn::Sha3_512 => digest_with::<Sha3_512>(v),
    }
}


/// Commitment hash `c′ = H(name ‖ |M| ‖ M ‖ ⌊v1⌉_d ‖ ⌊v2⌉_d)`.
///
/// The parameter-set name is length-prefixed by one byte and the message by its length as
/// a little-endian `u64`; the rounded coefficients follow as fixed-width little-endian `i32`
/// fields. With `n` fixed by the parameter set no two distinct inputs share a preimage.
#[allow(clippy::cast_possible_truncation)] // names are short constants
pub(crate) fn commitment_hash(params: &ParameterSet, message: &[u8], r1: &Poly, r2: &Poly) -> Vec<u8> {
    debug_assert!(params.name.len() < 256, "commitment_hash: name too long");
    debug_assert_eq!(r1.len(), params.n, "commitment_hash: bad r1 length");
    debug_assert_eq!(r2.len(), params.n, "commitment_hash: bad r2 length");
    let name_len = [params.name.len() as u8];
    let msg_len = (message.len() as u64).to_le_bytes();
    h(
        params.hash,
        &[&name_len, params.name.as_bytes(), &msg_len, message, &coeffs_to_le_bytes(r1), &coeffs_to_le_bytes(r2)],
    )
}


/// Reads `len` bits starting at bit offset `start` of `bytes`, most significant bit first.
fn read_bits(bytes: &[u8], start: usize, len: usize) -> u32 {
    debug_assert!(len <= 32, "read_bits: too many bits");
    (start..start + len).fold(0u32, |acc, pos| {
        let bit = (bytes[pos / 8] >> (7 - (pos % 8))) & 1;
        (acc << 1) | u32::from(bit)
    })
}


/// Maps a digest to the sparse ternary challenge polynomial.
///
/// The digest is split, most significant bit first, into `w` blocks of `kappa / w` bits. In
/// each block the top bit is the sign and the following `ceil(log2 n)` bits are the index;
/// `c[index]` becomes `+1` when the sign bit is set and `−1` otherwise. Trailing bits of the
/// block and of the digest are unused. Two blocks landing on the same index leave the later
/// block's sign in place, so the weight can fall below `w`.
///
/// Callers guarantee `digest.len() == kappa / 8`.
pub(crate) fn encode(params: &ParameterSet, digest: &[u8]) -> Poly {
    debug_assert_eq!(digest.len() * 8, params.kappa, "encode: bad digest length");
    let block_size = params.block_size();
    let index_bits = params.num_index_bits();
    let mut c = vec![0i32; params.n];

    for block in 0..params.w {
        let start = block * block_size;
        let sign = read_bits(digest, start, 1);
        let index = read_bits(digest, start + 1, index_bits) as usize;
        c[index] = if sign == 1 { 1 } else { -1 };
    }

    Poly(c)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{RING_TESLA_I, RING_TESLA_II};
    use rand_chacha::rand_core::{RngCore, SeedableRng};

    #[test]
    fn test_h_lengths() {
        assert_eq!(h(HashFn::Sha256, &[b"abc"]).len(), 32);
        assert_eq!(h(HashFn::Sha512, &[b"abc"]).len(), 64);
        assert_eq!(h(HashFn::Sha3_256, &[b"abc"]).len(), 32);
        assert_eq!(h(HashFn::Sha3_512, &[b"abc"]).len(), 64);
        // slices are simply concatenated
        assert_eq!(h(HashFn::Sha256, &[b"a", b"bc"]), h(HashFn::Sha256, &[b"abc"]));
        assert_eq!(
            hex::encode(h(HashFn::Sha256, &[b"abc"])),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_read_bits() {
        let bytes = [0b1010_0000u8, 0xFF];
        assert_eq!(read_bits(&bytes, 0, 1), 1);
        assert_eq!(read_bits(&bytes, 1, 1), 0);
        assert_eq!(read_bits(&bytes, 0, 4), 0b1010);
        assert_eq!(read_bits(&bytes, 6, 4), 0b0011);
    }

    #[test]
    fn test_encode_known_digest() {
        // 13-bit blocks. Block 0 = 1 000000011 000 -> +1 at index 3.
        // Every later block is all zero bits -> sign 0, index 0 -> -1 at index 0.
        let mut digest = [0u8; 32];
        digest[0] = 0b1000_0000;
        digest[1] = 0b1100_0000;
        let c = encode(&RING_TESLA_I, &digest);
        assert_eq!(c[3], 1);
        assert_eq!(c[0], -1);
        assert_eq!(c.iter().filter(|&&e| e != 0).count(), 2);
    }

    #[test]
    fn test_encode_all_ones_digest() {
        // every block: sign 1, index 511 -> a single +1 at the top coefficient
        let digest = [0xFFu8; 32];
        let c = encode(&RING_TESLA_I, &digest);
        assert_eq!(c[511], 1);
        assert_eq!(c.iter().filter(|&&e| e != 0).count(), 1);
    }

    #[test]
    fn test_encode_deterministic_and_shaped() {
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(123);
        for params in [RING_TESLA_I, RING_TESLA_II] {
            for _ in 0..256 {
                let mut digest = vec![0u8; params.digest_len()];
                rng.fill_bytes(&mut digest);
                let c1 = encode(&params, &digest);
                let c2 = encode(&params, &digest);
                assert_eq!(c1, c2);
                assert_eq!(c1.len(), params.n);
                assert!(c1.iter().all(|&e| (-1..=1).contains(&e)));
                let weight = c1.iter().filter(|&&e| e != 0).count();
                assert!((1..=params.w).contains(&weight));
            }
        }
    }

    #[test]
    fn test_encode_hex_digest() {
        let digest = hex::decode("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad").unwrap();
        let c = encode(&RING_TESLA_I, &digest);
        // 0xba = 1011_1010, 0x78 = 0111_1000: block 0 has index 0b011101001 = 233
        assert_ne!(c[233], 0);
        assert_eq!(c, encode(&RING_TESLA_I, &digest));
    }

    #[test]
    fn test_commitment_hash_layout() {
        let mut r1 = vec![0; 512];
        r1[0] = 1;
        r1[1] = -1;
        r1[511] = 5;
        let mut r2 = vec![0; 512];
        r2[0] = -2;

        // [12] ‖ "Ring-TESLA-I" ‖ 2u64 LE ‖ "ab" ‖ r1 as i32 LE ‖ r2 as i32 LE
        let mut expected = vec![12u8];
        expected.extend_from_slice(b"Ring-TESLA-I");
        expected.extend_from_slice(&[2, 0, 0, 0, 0, 0, 0, 0]);
        expected.extend_from_slice(b"ab");
        r1.iter().chain(r2.iter()).for_each(|e: &i32| expected.extend_from_slice(&e.to_le_bytes()));
        assert_eq!(expected.len(), 1 + 12 + 8 + 2 + 2 * 4 * 512);
        assert_eq!(&expected[23..31], &[1, 0, 0, 0, 0xFF, 0xFF, 0xFF, 0xFF]);

        let digest = commitment_hash(&RING_TESLA_I, b"ab", &Poly(r1.clone()), &Poly(r2.clone()));
        assert_eq!(digest, h(HashFn::Sha256, &[expected.as_slice()]));
        assert_eq!(hex::encode(&digest), "00d1bf4675e61edd3190a3fd6a3c16d0dd9c033e54e7ebe303fa4c9af8687b5e");

        let digest = commitment_hash(&RING_TESLA_II, b"ab", &Poly(r1), &Poly(r2));
        assert_eq!(
            hex::encode(&digest),
            "d6765ee150f48199c66bba0be603fc8193ff7198ae6c019bf6e56b74faf16f0e\
             910052c79237a3e06e389943ee343f503b9ec15f2342a1eb11b50d028ce33ba6"
        );
    }

    #[test]
    fn test_commitment_hash_is_injective_on_boundaries() {
        let r = Poly(vec![1; 512]);
        let a = commitment_hash(&RING_TESLA_I, b"12", &r, &r);
        let b = commitment_hash(&RING_TESLA_I, b"1", &r, &r);
        assert_ne!(a, b);

        // moving a value between the two commitment halves changes the digest
        let mut r1 = vec![0; 512];
        r1[511] = 7;
        let mut r2 = vec![0; 512];
        r2[0] = 7;
        let x = commitment_hash(&RING_TESLA_I, b"", &Poly(r1.clone()), &Poly(vec![0; 512]));
        let y = commitment_hash(&RING_TESLA_I, b"", &Poly(vec![0; 512]), &Poly(r2));
        assert_ne!(x, y);

        // distinct parameter sets never share a digest
        let z = commitment_hash(&RING_TESLA_II, b"", &Poly(r1), &Poly(vec![0; 512]));
        assert_ne!(x.len(), z.len());
    }
}
