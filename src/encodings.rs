//! This file implements the byte encodings of Ring-TESLA keys, public parameters and signatures

use crate::conversion::{bit_pack, bit_unpack, coeffs_from_le_bytes, coeffs_to_le_bytes};
use crate::error::{Error, Result};
use crate::helpers::{ensure, infinity_norm};
use crate::params::ParameterSet;
use crate::ring_tesla::tail_check;
use crate::types::{Poly, PublicKey, PublicParams, SecretKey, Signature};


/// Packs one centered ring element, offset by `⌊q/2⌋`, into `bitlen(q − 1)` bits per coefficient.
fn ring_elem_encode(params: &ParameterSet, p: &Poly) -> Vec<u8> {
    bit_pack(p, params.half_q(), params.half_q())
}


fn ring_elem_decode(params: &ParameterSet, v: &[u8]) -> Result<Poly> {
    bit_unpack(v, params.n, params.half_q(), params.half_q())
}


/// Encodes the public parameters as `a1 ‖ a2`. Not exposed to untrusted input.
///
/// **Input**:  `a1, a2` with coefficients in `[−⌊q/2⌋, ⌊q/2⌋]`. <br>
/// **Output**: A byte string of length `params.public_params_len()`.
pub(crate) fn public_params_encode(params: &ParameterSet, pp: &PublicParams) -> Vec<u8> {
    let mut out = ring_elem_encode(params, &pp.a1);
    out.extend(ring_elem_encode(params, &pp.a2));
    debug_assert_eq!(out.len(), params.public_params_len(), "public_params_encode: length miscalculation");
    out
}


/// Reverses [`public_params_encode`]. Takes untrusted input.
///
/// # Errors
/// Returns an error on a wrong length or an out-of-range coefficient.
pub(crate) fn public_params_decode(params: &ParameterSet, v: &[u8]) -> Result<PublicParams> {
    ensure!(v.len() == params.public_params_len(), Error::Decoding("public parameters have the wrong length"));
    let (a1, a2) = v.split_at(v.len() / 2);
    Ok(PublicParams { a1: ring_elem_decode(params, a1)?, a2: ring_elem_decode(params, a2)? })
}


/// Encodes a verifying key as `a1 ‖ a2 ‖ t1 ‖ t2`.
///
/// **Output**: A byte string of length `params.verifying_key_len()`.
pub(crate) fn vk_encode(params: &ParameterSet, pp: &PublicParams, pk: &PublicKey) -> Vec<u8> {
    // 1: vk ← a1 ‖ a2
    let mut out = public_params_encode(params, pp);

    // 2: vk ← vk ‖ t1 ‖ t2
    out.extend(ring_elem_encode(params, &pk.t1));
    out.extend(ring_elem_encode(params, &pk.t2));

    // 3: return vk
    debug_assert_eq!(out.len(), params.verifying_key_len(), "vk_encode: length miscalculation");
    out
}


/// Reverses [`vk_encode`]. Takes untrusted input.
///
/// # Errors
/// Returns an error on a wrong length or an out-of-range coefficient.
pub(crate) fn vk_decode(params: &ParameterSet, v: &[u8]) -> Result<(PublicParams, PublicKey)> {
    ensure!(v.len() == params.verifying_key_len(), Error::Decoding("verifying key has the wrong length"));
    let (pp_bytes, t_bytes) = v.split_at(params.public_params_len());

    // 1: (a1, a2) ← public parameters
    let pp = public_params_decode(params, pp_bytes)?;

    // 2: (t1, t2) ← remaining two ring elements
    let (t1, t2) = t_bytes.split_at(t_bytes.len() / 2);
    let pk = PublicKey { t1: ring_elem_decode(params, t1)?, t2: ring_elem_decode(params, t2)? };

    // 3: return (pp, pk)
    Ok((pp, pk))
}


/// Encodes a signing key as `a1 ‖ a2 ‖ s ‖ e1 ‖ e2`, the secret polynomials as 4-byte
/// little-endian integers. The output holds secret material.
pub(crate) fn sk_encode(params: &ParameterSet, pp: &PublicParams, sk: &SecretKey) -> Vec<u8> {
    let mut out = public_params_encode(params, pp);
    out.extend(coeffs_to_le_bytes(&sk.s));
    out.extend(coeffs_to_le_bytes(&sk.e1));
    out.extend(coeffs_to_le_bytes(&sk.e2));
    debug_assert_eq!(out.len(), params.signing_key_len(), "sk_encode: length miscalculation");
    out
}


/// Reverses [`sk_encode`]. Takes untrusted input, so the secret polynomials are held to
/// what key generation can produce: `|s_i|, |e_i| ≤ ⌊q/2⌋` and both error polynomials pass
/// the tail check.
///
/// # Errors
/// Returns an error on a wrong length or on secret polynomials key generation would reject.
pub(crate) fn sk_decode(params: &ParameterSet, v: &[u8]) -> Result<(PublicParams, SecretKey)> {
    ensure!(v.len() == params.signing_key_len(), Error::Decoding("signing key has the wrong length"));
    let (pp_bytes, secret) = v.split_at(params.public_params_len());
    let pp = public_params_decode(params, pp_bytes)?;

    let step = 4 * params.n;
    let sk = SecretKey {
        s: coeffs_from_le_bytes(&secret[..step], params.n)?,
        e1: coeffs_from_le_bytes(&secret[step..2 * step], params.n)?,
        e2: coeffs_from_le_bytes(&secret[2 * step..], params.n)?,
    };

    let half_q = i64::from(params.half_q());
    ensure!(
        [&sk.s, &sk.e1, &sk.e2].iter().all(|p| infinity_norm(p) <= half_q),
        Error::Decoding("secret coefficient out of range")
    );
    ensure!(
        tail_check(params, &sk.e1) && tail_check(params, &sk.e2),
        Error::Decoding("secret error polynomial fails the tail check")
    );
    Ok((pp, sk))
}


/// Encodes a signature as `c′ ‖ BitPack(z, B − U, B − U)`.
///
/// **Input**:  `c′` of `kappa / 8` bytes and `z` with coefficients in `[−(B − U), B − U]`. <br>
/// **Output**: A byte string of length `params.sig_len()`.
pub(crate) fn sig_encode(params: &ParameterSet, sig: &Signature) -> Vec<u8> {
    debug_assert_eq!(sig.c_prime.len(), params.digest_len(), "sig_encode: bad digest length");
    let mut out = sig.c_prime.clone();
    out.extend(bit_pack(&sig.z, params.z_bound(), params.z_bound()));
    debug_assert_eq!(out.len(), params.sig_len(), "sig_encode: length miscalculation");
    out
}


/// Reverses [`sig_encode`]. Takes untrusted input.
///
/// # Errors
/// Returns an error on a wrong length or a `z` coefficient outside `[−(B − U), B − U]`.
pub(crate) fn sig_decode(params: &ParameterSet, v: &[u8]) -> Result<Signature> {
    ensure!(v.len() == params.sig_len(), Error::Decoding("signature has the wrong length"));
    let (c_prime, z_bytes) = v.split_at(params.digest_len());
    let z = bit_unpack(z_bytes, params.n, params.z_bound(), params.z_bound())?;
    Ok(Signature { z, c_prime: c_prime.to_vec() })
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{RING_TESLA_I, RING_TESLA_II};
    use crate::ring_tesla::{gen_public_params, key_gen, sign};
    use rand_chacha::rand_core::SeedableRng;

    #[test]
    fn test_roundtrips() {
        for params in [RING_TESLA_I, RING_TESLA_II] {
            let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(123);
            let pp = gen_public_params(&mut rng, &params);
            let (sk, pk) = key_gen(&mut rng, &params, &pp, 100).unwrap();
            let sig = sign(&mut rng, &params, &pp, &sk, b"round trip", 1000).unwrap();

            let pp_bytes = public_params_encode(&params, &pp);
            assert_eq!(public_params_decode(&params, &pp_bytes).unwrap(), pp);

            let vk_bytes = vk_encode(&params, &pp, &pk);
            assert_eq!(vk_bytes.len(), params.verifying_key_len());
            assert_eq!(vk_decode(&params, &vk_bytes).unwrap(), (pp.clone(), pk.clone()));

            let sk_bytes = sk_encode(&params, &pp, &sk);
            let (pp2, sk2) = sk_decode(&params, &sk_bytes).unwrap();
            assert_eq!(pp2, pp);
            assert_eq!((sk2.s.clone(), sk2.e1.clone(), sk2.e2.clone()), (sk.s.clone(), sk.e1.clone(), sk.e2.clone()));

            let sig_bytes = sig_encode(&params, &sig);
            assert_eq!(sig_bytes.len(), params.sig_len());
            assert_eq!(sig_decode(&params, &sig_bytes).unwrap(), sig);
        }
    }

    #[test]
    fn test_decode_rejects_malformed() {
        let params = RING_TESLA_I;
        assert!(matches!(sig_decode(&params, &[0u8; 10]), Err(Error::Decoding(_))));
        assert!(matches!(vk_decode(&params, &[]), Err(Error::Decoding(_))));
        assert!(matches!(sk_decode(&params, &vec![0u8; params.signing_key_len() - 1]), Err(Error::Decoding(_))));

        // an all-ones z field decodes to 2^23 - 1 > 2(B - U)
        let mut sig = vec![0u8; params.sig_len()];
        sig[params.digest_len()..].iter_mut().for_each(|b| *b = 0xFF);
        assert_eq!(sig_decode(&params, &sig), Err(Error::Decoding("packed coefficient out of range")));

        // a heavy error tail is refused
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(456);
        let pp = gen_public_params(&mut rng, &params);
        let heavy = SecretKey { s: Poly::zero(params.n), e1: Poly::from(vec![1000; params.n]), e2: Poly::zero(params.n) };
        let bytes = sk_encode(&params, &pp, &heavy);
        assert!(matches!(sk_decode(&params, &bytes), Err(Error::Decoding(_))));
    }
}
