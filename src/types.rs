use core::ops::Deref;
use zeroize::{Zeroize, ZeroizeOnDrop};


/// A polynomial in `Z_q[x]/(x^n + 1)`, held as exactly `n` signed coefficients where index
/// `i` is the coefficient of `x^i`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Zeroize)]
pub struct Poly(pub(crate) Vec<i32>);

impl Poly {
    /// The all-zero polynomial of length `n`.
    #[must_use]
    pub fn zero(n: usize) -> Self { Poly(vec![0; n]) }

    /// Coefficients, lowest degree first.
    #[must_use]
    pub fn coeffs(&self) -> &[i32] { &self.0 }

    /// Consumes the polynomial, returning its coefficient vector.
    #[must_use]
    pub fn into_coeffs(self) -> Vec<i32> { self.0 }
}

impl Deref for Poly {
    type Target = [i32];

    fn deref(&self) -> &[i32] { &self.0 }
}

impl From<Vec<i32>> for Poly {
    fn from(coeffs: Vec<i32>) -> Self { Poly(coeffs) }
}

impl FromIterator<i32> for Poly {
    fn from_iter<I: IntoIterator<Item = i32>>(iter: I) -> Self { Poly(iter.into_iter().collect()) }
}


/// The public ring elements `(a1, a2)`, uniform over `[−⌊q/2⌋, ⌊q/2⌋]`. Shared read-only by
/// the signer and any number of verifiers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicParams {
    /// First public ring element.
    pub a1: Poly,
    /// Second public ring element.
    pub a2: Poly,
}


/// The secret key `(s, e1, e2)`: small Gaussian-shaped polynomials owned by the signer.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey {
    pub(crate) s: Poly,
    pub(crate) e1: Poly,
    pub(crate) e2: Poly,
}

// Secret coefficients stay out of logs and panic messages
impl core::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SecretKey").finish_non_exhaustive()
    }
}


/// The public key `(t1, t2)` with `t_i = reduce(a_i·s + e_i)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey {
    /// `reduce(a1·s + e1)`.
    pub t1: Poly,
    /// `reduce(a2·s + e2)`.
    pub t2: Poly,
}


/// A signature `(z, c′)`: the response polynomial and the raw commitment digest. The
/// challenge polynomial is not carried; the verifier re-derives it from `c′`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    pub(crate) z: Poly,
    pub(crate) c_prime: Vec<u8>,
}

impl Signature {
    /// Assembles a signature from its parts. No validation happens here; verification
    /// rejects any shape or bound violation.
    #[must_use]
    pub fn new(z: Poly, c_prime: Vec<u8>) -> Self { Signature { z, c_prime } }

    /// The response polynomial `z`.
    #[must_use]
    pub fn z(&self) -> &Poly { &self.z }

    /// The commitment digest `c′`.
    #[must_use]
    pub fn c_prime(&self) -> &[u8] { &self.c_prime }
}
