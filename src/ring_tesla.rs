// This file implements Ring-TESLA key generation, signing and verification

use crate::error::{Error, Result};
use crate::hashing::{commitment_hash, encode};
use crate::helpers::{add, multiply, reduce, subtract};
use crate::high_low::{check_bounds, check_z, round_poly};
use crate::params::ParameterSet;
use crate::sampling::{sample_gaussian, sample_uniform_bounded};
use crate::types::{Poly, PublicKey, PublicParams, SecretKey, Signature};
use rand_core::CryptoRngCore;
use tracing::{debug, trace, warn};


/// Samples the public ring elements `a1, a2` uniformly from `[−⌊q/2⌋, ⌊q/2⌋]`.
pub(crate) fn gen_public_params(rng: &mut impl CryptoRngCore, params: &ParameterSet) -> PublicParams {
    let a1 = sample_uniform_bounded(rng, params.n, params.half_q());
    let a2 = sample_uniform_bounded(rng, params.n, params.half_q());
    PublicParams { a1, a2 }
}


/// Tail-weight check on an error polynomial: the sum of its `w` algebraically largest
/// coefficients must not exceed `L`. Works on a copy so `e` keeps its order.
pub(crate) fn tail_check(params: &ParameterSet, e: &Poly) -> bool {
    debug_assert!(params.w >= 1 && params.w <= e.len(), "tail_check: w out of range");
    let mut sorted = e.to_vec();
    let _ = sorted.select_nth_unstable_by(params.w - 1, |a, b| b.cmp(a));
    let tail: i64 = sorted[..params.w].iter().map(|&x| i64::from(x)).sum();
    tail <= i64::from(params.l)
}


/// `t_i ← reduce(a_i·s + e_i)` for both public ring elements.
fn derive_public_key(params: &ParameterSet, pp: &PublicParams, sk: &SecretKey) -> Result<PublicKey> {
    let t1 = reduce(&add(&multiply(&pp.a1, &sk.s, params.q)?, &sk.e1)?, params.q);
    let t2 = reduce(&add(&multiply(&pp.a2, &sk.s, params.q)?, &sk.e2)?, params.q);
    Ok(PublicKey { t1, t2 })
}


/// Key generation against existing public parameters.
///
/// **Input**: `rng`, the parameter set, public `(a1, a2)` and a retry cap. <br>
/// **Output**: Secret key `(s, e1, e2)` and public key `(t1, t2)`.
///
/// # Errors
/// Returns `SamplingExhausted` when no candidate passes the tail check within
/// `max_attempts`; propagates sampler and ring errors.
pub(crate) fn key_gen(
    rng: &mut impl CryptoRngCore, params: &ParameterSet, pp: &PublicParams, max_attempts: u32,
) -> Result<(SecretKey, PublicKey)> {
    for attempt in 1..=max_attempts {
        //
        // 1: s, e1, e2 ← D_σ^n
        let sk = SecretKey {
            s: sample_gaussian(rng, params.n, params.sigma)?,
            e1: sample_gaussian(rng, params.n, params.sigma)?,
            e2: sample_gaussian(rng, params.n, params.sigma)?,
        };

        // 2: if tail(e1) > L or tail(e2) > L then restart    ▷ rejected keys are zeroized on drop
        if !(tail_check(params, &sk.e1) && tail_check(params, &sk.e2)) {
            debug!(attempt, params = params.name, "key generation rejected: error tail above L");
            continue;
        }

        // 3: t_i ← a_i·s + e_i mod± q
        let pk = derive_public_key(params, pp, &sk)?;
        trace!(attempt, params = params.name, "key generation accepted");

        // 4: return (sk, pk)
        return Ok((sk, pk));
    }

    warn!(attempts = max_attempts, params = params.name, "key generation exhausted its attempts");
    Err(Error::SamplingExhausted { attempts: max_attempts })
}


/// Recomputes the public key matching a secret key.
///
/// # Errors
/// Returns `DimensionMismatch` when the key does not match the public parameters.
pub(crate) fn private_to_public_key(params: &ParameterSet, pp: &PublicParams, sk: &SecretKey) -> Result<PublicKey> {
    derive_public_key(params, pp, sk)
}


/// Rejection-sampling signer.
///
/// **Input**: `rng`, the parameter set, public `(a1, a2)`, the secret key, a message and a
/// retry cap. <br>
/// **Output**: Signature `(z, c′)` with `‖z‖∞ ≤ B − U`.
///
/// # Errors
/// Returns `SamplingExhausted` when no attempt is accepted within `max_attempts`;
/// propagates ring errors on mismatched key dimensions.
#[allow(clippy::similar_names)]
pub(crate) fn sign(
    rng: &mut impl CryptoRngCore, params: &ParameterSet, pp: &PublicParams, sk: &SecretKey, message: &[u8],
    max_attempts: u32,
) -> Result<Signature> {
    let q = params.q;

    for attempt in 1..=max_attempts {
        //
        // 1: y ← uniform in [−B, B]^n
        let y = sample_uniform_bounded(rng, params.n, params.b);

        // 2: v_i ← a_i·y mod± q
        let v1 = multiply(&pp.a1, &y, q)?;
        let v2 = multiply(&pp.a2, &y, q)?;

        // 3: c′ ← H(⌊v1⌉_d, ⌊v2⌉_d, M)    ▷ Commitment hash
        let c_prime = commitment_hash(params, message, &round_poly(&v1, params.d), &round_poly(&v2, params.d));

        // 4: c ← F(c′)    ▷ Sparse ternary challenge
        let c = encode(params, &c_prime);

        // 5: z ← y + s·c    ▷ Response
        let z = add(&y, &multiply(&c, &sk.s, q)?)?;

        // 6: w_i ← v_i − e_i·c mod± q
        let w1 = reduce(&subtract(&v1, &multiply(&c, &sk.e1, q)?)?, q);
        let w2 = reduce(&subtract(&v2, &multiply(&c, &sk.e2, q)?)?, q);

        // 7: if w1, w2 fall near a rounding boundary or z is too large then restart
        if !check_bounds(params, &w1) || !check_bounds(params, &w2) {
            debug!(attempt, params = params.name, "signature rejected: commitment margin");
            continue;
        }
        if !check_z(params, &z) {
            debug!(attempt, params = params.name, "signature rejected: response bound");
            continue;
        }

        // 8: return (z, c′)
        trace!(attempt, params = params.name, "signature accepted");
        return Ok(Signature { z, c_prime });
    }

    warn!(attempts = max_attempts, params = params.name, "signing exhausted its attempts");
    Err(Error::SamplingExhausted { attempts: max_attempts })
}


/// Verifier. Total: any shape, bound or dimension problem yields `false`.
///
/// **Input**: The parameter set, public `(a1, a2)`, public key `(t1, t2)`, message and
/// signature `(z, c′)`. <br>
/// **Output**: Boolean.
pub(crate) fn verify(
    params: &ParameterSet, pp: &PublicParams, pk: &PublicKey, message: &[u8], sig: &Signature,
) -> bool {
    verify_inner(params, pp, pk, message, sig).unwrap_or(false)
}


fn verify_inner(
    params: &ParameterSet, pp: &PublicParams, pk: &PublicKey, message: &[u8], sig: &Signature,
) -> Result<bool> {
    let q = params.q;

    // 1: if |z| ≠ n or |c′| ≠ κ/8 then return false
    if sig.z.len() != params.n || sig.c_prime.len() != params.digest_len() {
        return Ok(false);
    }

    // 2: if ‖z‖∞ > B − U then return false
    if !check_z(params, &sig.z) {
        return Ok(false);
    }

    // 3: c ← F(c′)
    let c = encode(params, &sig.c_prime);

    // 4: w′_i ← a_i·z − t_i·c mod± q
    let w1 = reduce(&subtract(&multiply(&pp.a1, &sig.z, q)?, &multiply(&c, &pk.t1, q)?)?, q);
    let w2 = reduce(&subtract(&multiply(&pp.a2, &sig.z, q)?, &multiply(&c, &pk.t2, q)?)?, q);

    // 5: c″ ← H(⌊w′1⌉_d, ⌊w′2⌉_d, M)
    let c_check = commitment_hash(params, message, &round_poly(&w1, params.d), &round_poly(&w2, params.d));

    // 6: return c″ = c′
    Ok(c_check == sig.c_prime)
}
