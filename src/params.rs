//! Named Ring-TESLA parameter sets and their validation.
//!
//! A [`ParameterSet`] fixes every constant of a scheme instance. The derived quantities
//! (encoder block size, index width, rejection thresholds and encoded lengths) are computed
//! from it, so two instances built from different sets never interoperate.

use crate::error::{Error, Result};
use crate::helpers::{bitlen, ensure};


/// Hash function producing the `kappa`-bit commitment digest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HashFn {
    /// SHA2-256, 256-bit output.
    Sha256,
    /// SHA2-512, 512-bit output.
    Sha512,
    /// SHA3-256, 256-bit output.
    Sha3_256,
    /// SHA3-512, 512-bit output.
    Sha3_512,
}

impl HashFn {
    /// Digest length in bits.
    #[must_use]
    pub const fn output_bits(self) -> usize {
        match self {
            HashFn::Sha256 | HashFn::Sha3_256 => 256,
            HashFn::Sha512 | HashFn::Sha3_512 => 512,
        }
    }
}


/// The immutable constant set `{n, w, sigma, B, d, U, L, q, lambda, kappa}` of one scheme
/// instance, plus the hash function that yields `kappa` bits.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParameterSet {
    /// Human-readable name; also absorbed into every commitment hash.
    pub name: &'static str,
    /// Ring dimension; polynomials have exactly `n` coefficients.
    pub n: usize,
    /// Hamming weight of the challenge polynomial.
    pub w: usize,
    /// Standard deviation of the secret/error Gaussian.
    pub sigma: f64,
    /// Bound on the blinding polynomial `y`.
    pub b: i32,
    /// Number of low-order bits discarded by commitment rounding.
    pub d: u32,
    /// Rejection margin on the response `z`.
    pub u: i32,
    /// Tail-weight threshold for error polynomials and commitment margin.
    pub l: i32,
    /// Ring modulus.
    pub q: i32,
    /// Claimed bit security.
    pub lambda: usize,
    /// Digest length in bits.
    pub kappa: usize,
    /// Digest function.
    pub hash: HashFn,
}


/// Ring-TESLA-I: `n = 512`, `q = 39960577`, 256-bit SHA-256 digest.
pub const RING_TESLA_I: ParameterSet = ParameterSet {
    name: "Ring-TESLA-I",
    n: 512,
    w: 19,
    sigma: 52.0,
    b: (1 << 22) - 1,
    d: 23,
    u: 3173,
    l: 2766,
    q: 39_960_577,
    lambda: 128,
    kappa: 256,
    hash: HashFn::Sha256,
};


/// Ring-TESLA-II: same ring dimension and bounds as Ring-TESLA-I with `q = 51750913` and a
/// 512-bit SHA3-512 digest.
pub const RING_TESLA_II: ParameterSet = ParameterSet {
    name: "Ring-TESLA-II",
    n: 512,
    w: 19,
    sigma: 52.0,
    b: (1 << 22) - 1,
    d: 23,
    u: 3173,
    l: 2766,
    q: 51_750_913,
    lambda: 128,
    kappa: 512,
    hash: HashFn::Sha3_512,
};


impl ParameterSet {
    /// Checks the set for internal consistency.
    ///
    /// # Errors
    /// Returns [`Error::Parameter`] naming the first violated constraint.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.n >= 8 && self.n.is_power_of_two(), Error::Parameter("n must be a power of two >= 8"));
        ensure!(self.w >= 1 && self.w <= self.n, Error::Parameter("w must be in 1..=n"));
        ensure!(self.kappa == self.hash.output_bits(), Error::Parameter("kappa must match hash output"));
        ensure!(self.lambda <= self.kappa, Error::Parameter("lambda must not exceed kappa"));
        ensure!(self.block_size() > self.num_index_bits(), Error::Parameter("block size too small for index"));
        ensure!(self.block_size() <= 32, Error::Parameter("block size exceeds 32 bits"));
        ensure!(self.q > 2 && self.q % 2 == 1, Error::Parameter("q must be odd"));
        ensure!((1..=30).contains(&self.d), Error::Parameter("d must be in 1..=30"));
        ensure!(self.l > 0 && self.l < (1 << (self.d - 1)), Error::Parameter("L must be in 0 < L < 2^(d-1)"));
        ensure!(self.l < self.half_q(), Error::Parameter("L must be below q/2"));
        ensure!(self.u > 0 && self.u < self.b, Error::Parameter("U must be in 0 < U < B"));
        ensure!(self.b <= self.half_q(), Error::Parameter("B must not exceed q/2"));
        ensure!(self.sigma.is_finite() && self.sigma > 0.0, Error::Parameter("sigma must be positive"));

        // Every negacyclic product of centered operands must fit the i64 accumulator
        let half_q = i128::from(self.half_q());
        let worst = i128::try_from(self.n).map_err(|_| Error::Parameter("n too large"))? * half_q * half_q;
        ensure!(worst < i128::from(i64::MAX), Error::Parameter("n * (q/2)^2 overflows i64"));
        Ok(())
    }

    /// `⌊q/2⌋`, the largest centered representative.
    #[must_use]
    pub const fn half_q(&self) -> i32 { self.q / 2 }

    /// Encoder block size `kappa / w` in bits.
    #[must_use]
    pub const fn block_size(&self) -> usize { self.kappa / self.w }

    /// Encoder index width `ceil(log2(n))` in bits.
    #[must_use]
    pub const fn num_index_bits(&self) -> usize { self.n.next_power_of_two().trailing_zeros() as usize }

    /// Largest permitted `|z_i|`, i.e. `B − U`.
    #[must_use]
    pub const fn z_bound(&self) -> i32 { self.b - self.u }

    /// Largest permitted `|w_i mod± 2^d|`, i.e. `2^(d−1) − L`.
    #[must_use]
    pub const fn low_bits_bound(&self) -> i32 { (1 << (self.d - 1)) - self.l }

    /// Digest length in bytes.
    #[must_use]
    pub const fn digest_len(&self) -> usize { self.kappa / 8 }

    /// Length of an encoded signature in bytes.
    #[must_use]
    pub const fn sig_len(&self) -> usize {
        self.digest_len() + self.n * bitlen(2 * self.z_bound()) / 8
    }

    /// Length of encoded public parameters `(a1, a2)` in bytes.
    #[must_use]
    pub const fn public_params_len(&self) -> usize { 2 * self.n * bitlen(self.q - 1) / 8 }

    /// Length of an encoded verifying key in bytes.
    #[must_use]
    pub const fn verifying_key_len(&self) -> usize { 2 * self.public_params_len() }

    /// Length of an encoded signing key in bytes.
    #[must_use]
    pub const fn signing_key_len(&self) -> usize { self.public_params_len() + 3 * 4 * self.n }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_sets_validate() {
        assert_eq!(RING_TESLA_I.validate(), Ok(()));
        assert_eq!(RING_TESLA_II.validate(), Ok(()));
        assert_eq!(RING_TESLA_I.block_size(), 13);
        assert_eq!(RING_TESLA_II.block_size(), 26);
        assert_eq!(RING_TESLA_I.num_index_bits(), 9);
        assert_eq!(RING_TESLA_I.z_bound(), 4_191_130);
        assert_eq!(RING_TESLA_I.low_bits_bound(), 4_191_538);
    }

    #[test]
    fn encoded_lengths() {
        // bitlen(2 * 4191130) = 23, bitlen(q - 1) = 26
        assert_eq!(RING_TESLA_I.sig_len(), 32 + 512 * 23 / 8);
        assert_eq!(RING_TESLA_II.sig_len(), 64 + 512 * 23 / 8);
        assert_eq!(RING_TESLA_I.public_params_len(), 2 * 512 * 26 / 8);
        assert_eq!(RING_TESLA_I.signing_key_len(), 3328 + 6144);
    }

    #[test]
    fn rejects_inconsistent_sets() {
        let not_pow2 = ParameterSet { n: 500, ..RING_TESLA_I };
        assert!(matches!(not_pow2.validate(), Err(Error::Parameter(_))));

        // 256 / 40 = 6 bits per block cannot hold a sign bit plus 9 index bits
        let tiny_blocks = ParameterSet { w: 40, ..RING_TESLA_I };
        assert!(matches!(tiny_blocks.validate(), Err(Error::Parameter(_))));

        let wrong_kappa = ParameterSet { kappa: 512, ..RING_TESLA_I };
        assert!(matches!(wrong_kappa.validate(), Err(Error::Parameter(_))));

        let even_q = ParameterSet { q: 39_960_576, ..RING_TESLA_I };
        assert!(matches!(even_q.validate(), Err(Error::Parameter(_))));

        let big_u = ParameterSet { u: RING_TESLA_I.b, ..RING_TESLA_I };
        assert!(matches!(big_u.validate(), Err(Error::Parameter(_))));

        let bad_sigma = ParameterSet { sigma: f64::NAN, ..RING_TESLA_I };
        assert!(matches!(bad_sigma.validate(), Err(Error::Parameter(_))));

        let big_l = ParameterSet { l: 1 << 22, ..RING_TESLA_I };
        assert!(matches!(big_l.validate(), Err(Error::Parameter(_))));
    }
}
