// This file implements the randomized samplers: uniform-bounded and Gaussian-approximating

use crate::error::{Error, Result};
use crate::types::Poly;
use rand::Rng;
use rand_core::CryptoRngCore;
use rand_distr::{Distribution, Normal};


/// Samples `n` coefficients independently and uniformly from `[−bound, bound]`.
///
/// Used for the public `a1, a2` (`bound = ⌊q/2⌋`) and for the per-attempt blinding
/// polynomial `y` (`bound = B`).
pub(crate) fn sample_uniform_bounded(rng: &mut impl CryptoRngCore, n: usize, bound: i32) -> Poly {
    debug_assert!(bound >= 0, "sample_uniform_bounded: negative bound");
    (0..n).map(|_| rng.gen_range(-bound..=bound)).collect()
}


/// Samples `n` coefficients from `N(0, sigma)`, each truncated toward zero.
///
/// This only approximates the discrete Gaussian the security argument assumes; a hardened
/// build would swap in a table- or rejection-based discrete sampler here.
///
/// # Errors
/// Returns an error if `sigma` is not a valid standard deviation.
#[allow(clippy::cast_possible_truncation)] // saturating cast; |x| is tiny relative to i32
pub(crate) fn sample_gaussian(rng: &mut impl CryptoRngCore, n: usize, sigma: f64) -> Result<Poly> {
    let normal = Normal::new(0.0, sigma).map_err(|_| Error::Parameter("sigma is not a valid standard deviation"))?;
    Ok((0..n).map(|_| normal.sample(rng).trunc() as i32).collect())
}
