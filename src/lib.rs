#![deny(clippy::pedantic, warnings, missing_docs, unsafe_code)]
// Almost all of the 'allow' category...
#![deny(absolute_paths_not_starting_with_crate, dead_code)]
#![deny(elided_lifetimes_in_paths, explicit_outlives_requirements, keyword_idents)]
#![deny(macro_use_extern_crate, meta_variable_misuse, missing_abi)]
#![deny(non_ascii_idents, rust_2021_incompatible_closure_captures)]
#![deny(rust_2021_incompatible_or_patterns, rust_2021_prefixes_incompatible_syntax)]
#![deny(rust_2021_prelude_collisions, trivial_casts, trivial_numeric_casts)]
#![deny(unsafe_op_in_unsafe_fn, unstable_features, unused_extern_crates)]
#![deny(unused_import_braces, unused_lifetimes, unused_macro_rules)]
//
#![doc = include_str!("../README.md")]


// Implements the Ring-TESLA lattice-based signature scheme over Z_q[x]/(x^n + 1), in the
// Fiat-Shamir-with-aborts paradigm.

// Functionality map
//
// Parameter sets and validation                            --> params.rs
// Ring arithmetic: multiply, add, subtract, reduce         --> helpers.rs
// Uniform-bounded and Gaussian samplers                    --> sampling.rs
// Commitment hash and digest -> challenge encoder          --> hashing.rs
// Commitment rounding, check_bounds, check_z               --> high_low.rs
// KeyGen / Sign / Verify                                   --> from lib.rs to ring_tesla.rs
// Bit packing and little-endian coefficient fields         --> conversion.rs
// Key, public parameter and signature encodings            --> encodings.rs
// Types are in types.rs, traits are in traits.rs, errors are in error.rs...

// Note that debug_assert! statements enforce correct program construction and are not involved
// in any operational dataflow (so are good fuzz targets). The ensure! statements implement
// conservative dataflow validation and do not panic. Verification is total: every malformed
// input maps to `false`.

// Note that the rejection loops in key generation and signing leak their iteration counts
// through timing, and the Gaussian sampler is a rounded continuous normal. Neither is hardened
// against side channels.

/// The `rand_core` types are re-exported so that users of ring-tesla do not
/// have to worry about using the exact correct version of `rand_core`.
pub use rand_core::{CryptoRng, CryptoRngCore, RngCore};

mod conversion;
mod encodings;
mod error;
mod hashing;
mod helpers;
mod high_low;
mod params;
mod ring_tesla;
mod sampling;
mod types;

/// All functionality is covered by traits, such that consumers can utilize trait objects as desired.
pub mod traits;

pub use crate::error::{Error, Result};
pub use crate::params::{HashFn, ParameterSet, RING_TESLA_I, RING_TESLA_II};
pub use crate::types::{Poly, PublicKey, PublicParams, Signature};

use crate::helpers::{ensure, infinity_norm};
use crate::traits::{KeyGen, SerDes, Signer, Verifier};
use crate::types::SecretKey;
use std::sync::Arc;

/// Default cap on key-generation attempts before `Error::SamplingExhausted`.
pub const DEFAULT_MAX_KEYGEN_ATTEMPTS: u32 = 100;

/// Default cap on signing attempts before `Error::SamplingExhausted`.
pub const DEFAULT_MAX_SIGN_ATTEMPTS: u32 = 1000;


// ----- SCHEME INSTANCE -----

/// A validated Ring-TESLA instance: one [`ParameterSet`] plus the retry caps of its
/// rejection loops. Implements the [`traits::KeyGen`] trait.
///
/// Every key and signature produced through an instance is tied to its parameter set;
/// nothing produced under one set verifies under another.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingTesla {
    params: ParameterSet,
    max_keygen_attempts: u32,
    max_sign_attempts: u32,
}

impl RingTesla {
    /// Validates `params` and builds an instance with the default retry caps.
    ///
    /// # Errors
    /// Returns [`Error::Parameter`] when the set is internally inconsistent.
    ///
    /// # Examples
    /// ```rust
    /// use ring_tesla::{ParameterSet, RingTesla, RING_TESLA_I};
    ///
    /// assert!(RingTesla::new(RING_TESLA_I).is_ok());
    /// assert!(RingTesla::new(ParameterSet { n: 500, ..RING_TESLA_I }).is_err());
    /// ```
    pub fn new(params: ParameterSet) -> Result<Self> {
        params.validate()?;
        Ok(Self::from_validated(params))
    }

    // Named sets are validated by their own tests
    pub(crate) const fn from_validated(params: ParameterSet) -> Self {
        Self {
            params,
            max_keygen_attempts: DEFAULT_MAX_KEYGEN_ATTEMPTS,
            max_sign_attempts: DEFAULT_MAX_SIGN_ATTEMPTS,
        }
    }

    /// Replaces the key-generation retry cap.
    #[must_use]
    pub const fn with_max_keygen_attempts(mut self, attempts: u32) -> Self {
        self.max_keygen_attempts = attempts;
        self
    }

    /// Replaces the signing retry cap.
    #[must_use]
    pub const fn with_max_sign_attempts(mut self, attempts: u32) -> Self {
        self.max_sign_attempts = attempts;
        self
    }

    /// The parameter set of this instance.
    #[must_use]
    pub const fn params(&self) -> &ParameterSet { &self.params }

    /// Generates fresh public parameters `(a1, a2)` using the OS default random number generator.
    #[cfg(feature = "default-rng")]
    #[must_use]
    pub fn gen_public_params(&self) -> Arc<PublicParams> { self.gen_public_params_with_rng(&mut rand_core::OsRng) }

    /// Generates fresh public parameters `(a1, a2)` using the supplied random number generator.
    /// The result may be shared by any number of key pairs.
    pub fn gen_public_params_with_rng(&self, rng: &mut impl CryptoRngCore) -> Arc<PublicParams> {
        Arc::new(ring_tesla::gen_public_params(rng, &self.params))
    }

    /// Generates a key pair over existing (for example deployment-wide) public parameters.
    ///
    /// # Errors
    /// Returns [`Error::Parameter`] when `pp` does not have `n` coefficients per element or a
    /// coefficient lies outside `[−⌊q/2⌋, ⌊q/2⌋]`, and `SamplingExhausted` when key generation
    /// exhausts its retry cap.
    ///
    /// # Examples
    /// ```rust
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// use ring_tesla::{RingTesla, RING_TESLA_I};
    /// use ring_tesla::traits::{Signer, Verifier};
    /// use rand_chacha::rand_core::SeedableRng;
    ///
    /// let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(123);
    /// let scheme = RingTesla::new(RING_TESLA_I)?;
    /// let pp = scheme.gen_public_params_with_rng(&mut rng);
    /// let (vk_a, sk_a) = scheme.try_keygen_with_public_params(&mut rng, pp.clone())?;
    /// let (vk_b, _sk_b) = scheme.try_keygen_with_public_params(&mut rng, pp)?;
    /// let sig = sk_a.try_sign_with_rng(&mut rng, b"shared parameters")?;
    /// assert!(vk_a.verify(b"shared parameters", &sig));
    /// assert!(!vk_b.verify(b"shared parameters", &sig));
    /// # Ok(())}
    /// ```
    pub fn try_keygen_with_public_params(
        &self, rng: &mut impl CryptoRngCore, pp: Arc<PublicParams>,
    ) -> Result<(VerifyingKey, SigningKey)> {
        self.check_public_params(&pp).map_err(Error::Parameter)?;
        let (sk, pk) = ring_tesla::key_gen(rng, &self.params, &pp, self.max_keygen_attempts)?;
        let vk = VerifyingKey { scheme: *self, pp: Arc::clone(&pp), pk: pk.clone() };
        let sk = SigningKey { scheme: *self, pp, sk, pk };
        Ok((vk, sk))
    }

    /// Encodes a signature as `c′ ‖ BitPack(z)`, `params().sig_len()` bytes.
    ///
    /// # Errors
    /// Returns [`Error::Encoding`] when the signature does not have this instance's shape or
    /// a coefficient of `z` exceeds `B − U`.
    pub fn encode_signature(&self, sig: &Signature) -> Result<Vec<u8>> {
        ensure!(sig.z.len() == self.params.n, Error::Encoding("signature z has the wrong length"));
        ensure!(sig.c_prime.len() == self.params.digest_len(), Error::Encoding("signature digest has the wrong length"));
        ensure!(high_low::check_z(&self.params, &sig.z), Error::Encoding("signature z out of range"));
        Ok(encodings::sig_encode(&self.params, sig))
    }

    /// Decodes a signature produced by [`RingTesla::encode_signature`].
    ///
    /// # Errors
    /// Returns [`Error::Decoding`] on a wrong length or an out-of-range coefficient.
    pub fn decode_signature(&self, bytes: &[u8]) -> Result<Signature> { encodings::sig_decode(&self.params, bytes) }

    /// Encodes public parameters as `a1 ‖ a2`, `params().public_params_len()` bytes.
    ///
    /// # Errors
    /// Returns [`Error::Encoding`] when either element has the wrong length or a coefficient
    /// outside `[−⌊q/2⌋, ⌊q/2⌋]`.
    pub fn encode_public_params(&self, pp: &PublicParams) -> Result<Vec<u8>> {
        self.check_public_params(pp).map_err(Error::Encoding)?;
        Ok(encodings::public_params_encode(&self.params, pp))
    }

    /// Decodes public parameters produced by [`RingTesla::encode_public_params`].
    ///
    /// # Errors
    /// Returns [`Error::Decoding`] on a wrong length or an out-of-range coefficient.
    pub fn decode_public_params(&self, bytes: &[u8]) -> Result<Arc<PublicParams>> {
        encodings::public_params_decode(&self.params, bytes).map(Arc::new)
    }

    // Caller-supplied public parameters must fit the ring and the key encodings
    fn check_public_params(&self, pp: &PublicParams) -> core::result::Result<(), &'static str> {
        let n = self.params.n;
        ensure!(pp.a1.len() == n && pp.a2.len() == n, "public parameters have the wrong length");
        let half_q = i64::from(self.params.half_q());
        ensure!(infinity_norm(&pp.a1) <= half_q && infinity_norm(&pp.a2) <= half_q, "public parameters out of range");
        Ok(())
    }
}


impl KeyGen for RingTesla {
    type SigningKey = SigningKey;
    type VerifyingKey = VerifyingKey;

    fn try_keygen_with_rng(&self, rng: &mut impl CryptoRngCore) -> Result<(VerifyingKey, SigningKey)> {
        let pp = self.gen_public_params_with_rng(rng);
        self.try_keygen_with_public_params(rng, pp)
    }
}


// ----- KEYS -----

/// Signing key: the secret `(s, e1, e2)` together with the shared public parameters and the
/// precomputed public key. Implements the [`traits::Signer`] and [`traits::SerDes`] traits.
///
/// The secret polynomials are zeroized when the key is dropped.
#[derive(Clone)]
pub struct SigningKey {
    scheme: RingTesla,
    pp: Arc<PublicParams>,
    sk: SecretKey, // zeroized on drop
    pk: PublicKey,
}

// Secret coefficients stay out of logs and panic messages
impl core::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SigningKey").field("params", &self.scheme.params.name).finish_non_exhaustive()
    }
}

impl SigningKey {
    /// The scheme instance this key belongs to.
    #[must_use]
    pub const fn scheme(&self) -> &RingTesla { &self.scheme }

    /// The public parameters this key was generated over.
    #[must_use]
    pub fn public_params(&self) -> &Arc<PublicParams> { &self.pp }
}


impl Signer for SigningKey {
    type Signature = Signature;
    type VerifyingKey = VerifyingKey;

    fn try_sign_with_rng(&self, rng: &mut impl CryptoRngCore, message: &[u8]) -> Result<Signature> {
        ring_tesla::sign(rng, &self.scheme.params, &self.pp, &self.sk, message, self.scheme.max_sign_attempts)
    }

    fn get_public_key(&self) -> VerifyingKey {
        VerifyingKey { scheme: self.scheme, pp: Arc::clone(&self.pp), pk: self.pk.clone() }
    }
}


/// Verifying key: the public key `(t1, t2)` together with the shared public parameters.
/// Implements the [`traits::Verifier`] and [`traits::SerDes`] traits.
#[derive(Clone, Debug, PartialEq)]
pub struct VerifyingKey {
    scheme: RingTesla,
    pp: Arc<PublicParams>,
    pk: PublicKey,
}

impl VerifyingKey {
    /// The scheme instance this key belongs to.
    #[must_use]
    pub const fn scheme(&self) -> &RingTesla { &self.scheme }

    /// The public parameters this key was generated over.
    #[must_use]
    pub fn public_params(&self) -> &Arc<PublicParams> { &self.pp }

    /// The public key `(t1, t2)`.
    #[must_use]
    pub const fn public_key(&self) -> &PublicKey { &self.pk }

    /// Decodes `sig_bytes` and verifies it; a decoding failure is simply `false`.
    #[must_use]
    pub fn verify_bytes(&self, message: &[u8], sig_bytes: &[u8]) -> bool {
        encodings::sig_decode(&self.scheme.params, sig_bytes).is_ok_and(|sig| self.verify(message, &sig))
    }
}


impl Verifier for VerifyingKey {
    type Signature = Signature;

    fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        ring_tesla::verify(&self.scheme.params, &self.pp, &self.pk, message, signature)
    }
}


// ----- SERIALIZATION AND DESERIALIZATION ---

impl SerDes for SigningKey {
    fn into_bytes(self) -> Vec<u8> { encodings::sk_encode(&self.scheme.params, &self.pp, &self.sk) }

    fn try_from_bytes(scheme: &RingTesla, bytes: &[u8]) -> Result<Self> {
        let (pp, sk) = encodings::sk_decode(&scheme.params, bytes)?;
        let pk = ring_tesla::private_to_public_key(&scheme.params, &pp, &sk)?;
        Ok(SigningKey { scheme: *scheme, pp: Arc::new(pp), sk, pk })
    }
}


impl SerDes for VerifyingKey {
    fn into_bytes(self) -> Vec<u8> { encodings::vk_encode(&self.scheme.params, &self.pp, &self.pk) }

    fn try_from_bytes(scheme: &RingTesla, bytes: &[u8]) -> Result<Self> {
        let (pp, pk) = encodings::vk_decode(&scheme.params, bytes)?;
        Ok(VerifyingKey { scheme: *scheme, pp: Arc::new(pp), pk })
    }
}


// This common functionality is injected into each named parameter set namespace, and is
// a lightweight wrapper around `RingTesla`.
macro_rules! functionality {
    () => {
        use crate::traits::KeyGen;
        use crate::{Result, RingTesla, SigningKey, VerifyingKey};
        use rand_core::CryptoRngCore;

        /// Signature length in bytes.
        pub const SIG_LEN: usize = PARAMS.sig_len();
        /// Verifying key length in bytes.
        pub const VK_LEN: usize = PARAMS.verifying_key_len();
        /// Signing key length in bytes.
        pub const SK_LEN: usize = PARAMS.signing_key_len();


        /// Scheme instance for this parameter set with the default retry caps.
        #[must_use]
        pub const fn scheme() -> RingTesla { RingTesla::from_validated(PARAMS) }


        /// Generates public parameters and a key pair specific to this parameter set, using
        /// the **default OS** random number generator.
        ///
        /// # Errors
        /// Returns an error when key generation exhausts its retry cap.
        #[cfg(feature = "default-rng")]
        pub fn try_keygen() -> Result<(VerifyingKey, SigningKey)> { scheme().try_keygen() }


        /// Generates public parameters and a key pair specific to this parameter set, using
        /// the **provided** random number generator.
        ///
        /// # Errors
        /// Returns an error when key generation exhausts its retry cap.
        pub fn try_keygen_with_rng(rng: &mut impl CryptoRngCore) -> Result<(VerifyingKey, SigningKey)> {
            scheme().try_keygen_with_rng(rng)
        }


        #[cfg(test)]
        mod tests {
            use super::*;
            use crate::traits::{SerDes, Signer, Verifier};
            use rand_chacha::rand_core::SeedableRng;

            #[test]
            fn smoke_test() {
                let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(123);
                let message1 = [0u8, 1, 2, 3, 4, 5, 6, 7];
                let message2 = [7u8, 7, 7, 7, 7, 7, 7, 7];

                for _i in 0..8 {
                    let (vk, sk) = try_keygen_with_rng(&mut rng).unwrap();
                    let sig = sk.try_sign_with_rng(&mut rng, &message1).unwrap();
                    assert!(vk.verify(&message1, &sig));
                    assert!(!vk.verify(&message2, &sig));
                    assert_eq!(vk, sk.get_public_key());

                    let sig_bytes = scheme().encode_signature(&sig).unwrap();
                    assert_eq!(sig_bytes.len(), SIG_LEN);
                    assert!(vk.verify_bytes(&message1, &sig_bytes));
                    assert!(!vk.verify_bytes(&message1, &sig_bytes[1..]));
                    assert_eq!(vk.clone().into_bytes().len(), VK_LEN);
                    assert_eq!(sk.clone().into_bytes().len(), SK_LEN);
                }

                #[cfg(feature = "default-rng")]
                {
                    let (vk, sk) = try_keygen().unwrap();
                    let sig = sk.try_sign(&message1).unwrap();
                    assert!(vk.verify(&message1, &sig));
                    assert!(!vk.verify(&message2, &sig));
                }
            }
        }
    };
}


/// # Functionality for the **Ring-TESLA-I** parameter set.
///
/// `n = 512`, `q = 39960577`, a 256-bit SHA-256 commitment digest, and claimed bit security
/// 128.
///
/// **1)** The basic usage is for an originator to start with the [`ring_tesla_i::try_keygen`]
/// function below to generate both a [`VerifyingKey`] and a [`SigningKey`]. The resulting
/// [`SigningKey`] implements the [`traits::Signer`] trait, which supplies functions to sign
/// byte-array messages, such as [`traits::Signer::try_sign()`].
///
/// **2)** Both keys implement the [`traits::SerDes`] trait. The originator utilizes
/// [`traits::SerDes::into_bytes()`] to serialize them for storage and/or transmission, and
/// the remote party utilizes [`traits::SerDes::try_from_bytes()`] with [`ring_tesla_i::scheme()`]
/// to deserialize them.
///
/// **3)** Finally, the remote party uses [`traits::Verifier::verify()`] (or
/// [`VerifyingKey::verify_bytes()`] for an encoded signature) to verify the message.
///
/// See the top-level [crate] documentation for example code that implements the above flow.
#[cfg(feature = "ring-tesla-i")]
pub mod ring_tesla_i {
    /// The parameter set of this namespace.
    pub const PARAMS: crate::ParameterSet = crate::RING_TESLA_I;

    functionality!();
}


/// # Functionality for the **Ring-TESLA-II** parameter set.
///
/// Same ring dimension and bounds as Ring-TESLA-I with `q = 51750913` and a 512-bit SHA3-512
/// commitment digest.
///
/// Usage follows [`ring_tesla_i`]; keys and signatures of the two sets never interoperate.
#[cfg(feature = "ring-tesla-ii")]
pub mod ring_tesla_ii {
    /// The parameter set of this namespace.
    pub const PARAMS: crate::ParameterSet = crate::RING_TESLA_II;

    functionality!();
}
