use crate::error::Result;
use rand_core::CryptoRngCore;
#[cfg(feature = "default-rng")]
use rand_core::OsRng;


/// The `KeyGen` trait is implemented by a configured scheme instance, so that key pairs of
/// any parameter set can be produced through one interface.
pub trait KeyGen {
    /// A verifying key bound to the scheme's parameter set and public parameters.
    type VerifyingKey;
    /// A signing key bound to the scheme's parameter set and public parameters.
    type SigningKey;

    /// Generates fresh public parameters and a key pair over them. <br>
    /// This function utilizes the OS default random number generator.
    /// # Errors
    /// Returns an error when key generation exhausts its retry cap.
    /// # Examples
    /// ```rust
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// # #[cfg(all(feature = "ring-tesla-i", feature = "default-rng"))] {
    /// use ring_tesla::ring_tesla_i;
    /// use ring_tesla::traits::{KeyGen, Signer, Verifier};
    ///
    /// let message = [0u8, 1, 2, 3, 4, 5, 6, 7];
    ///
    /// let (vk, sk) = ring_tesla_i::scheme().try_keygen()?; // Generate both keys
    /// let sig = sk.try_sign(&message)?; // Use the signing key to sign the message
    /// assert!(vk.verify(&message, &sig)); // Use the verifying key to check it
    /// # }
    /// # Ok(())}
    /// ```
    #[cfg(feature = "default-rng")]
    fn try_keygen(&self) -> Result<(Self::VerifyingKey, Self::SigningKey)> {
        self.try_keygen_with_rng(&mut OsRng)
    }

    /// Generates fresh public parameters and a key pair over them. <br>
    /// This function utilizes a supplied random number generator.
    /// # Errors
    /// Returns an error when key generation exhausts its retry cap.
    /// # Examples
    /// ```rust
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// # #[cfg(feature = "ring-tesla-ii")] {
    /// use ring_tesla::ring_tesla_ii;
    /// use ring_tesla::traits::{KeyGen, Signer, Verifier};
    /// use rand_chacha::rand_core::SeedableRng;
    ///
    /// let message = [0u8, 1, 2, 3, 4, 5, 6, 7];
    /// let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(123);
    ///
    /// let (vk, sk) = ring_tesla_ii::scheme().try_keygen_with_rng(&mut rng)?;
    /// let sig = sk.try_sign_with_rng(&mut rng, &message)?;
    /// assert!(vk.verify(&message, &sig));
    /// # }
    /// # Ok(())}
    /// ```
    fn try_keygen_with_rng(&self, rng: &mut impl CryptoRngCore) -> Result<(Self::VerifyingKey, Self::SigningKey)>;
}


/// The Signer trait is implemented for the `SigningKey` struct.
pub trait Signer {
    /// The signature type produced.
    type Signature;
    /// The matching verifying key type.
    type VerifyingKey;

    /// Attempts to sign the given message, returning a signature on success, or an error if
    /// the rejection loop ran out of attempts. This function utilizes the default OS RNG and
    /// runs in variable time.
    ///
    /// # Errors
    /// Returns an error when signing exhausts its retry cap.
    #[cfg(feature = "default-rng")]
    fn try_sign(&self, message: &[u8]) -> Result<Self::Signature> { self.try_sign_with_rng(&mut OsRng, message) }

    /// Attempts to sign the given message, returning a signature on success, or an error if
    /// the rejection loop ran out of attempts. This function utilizes a supplied RNG and runs
    /// in variable time.
    ///
    /// # Errors
    /// Returns an error when signing exhausts its retry cap.
    fn try_sign_with_rng(&self, rng: &mut impl CryptoRngCore, message: &[u8]) -> Result<Self::Signature>;

    /// Returns the verifying key matching this signing key.
    fn get_public_key(&self) -> Self::VerifyingKey;
}


/// The Verifier trait is implemented for the `VerifyingKey` struct.
pub trait Verifier {
    /// The signature type accepted.
    type Signature;

    /// Verifies a signature with respect to this key. Never panics or errors: a malformed,
    /// out-of-bounds, foreign or forged signature simply yields `false`.
    /// # Examples
    /// ```rust
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// # #[cfg(feature = "ring-tesla-i")] {
    /// use ring_tesla::ring_tesla_i;
    /// use ring_tesla::traits::{KeyGen, Signer, Verifier};
    /// use rand_chacha::rand_core::SeedableRng;
    ///
    /// let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(123);
    /// let (vk, sk) = ring_tesla_i::scheme().try_keygen_with_rng(&mut rng)?;
    /// let sig = sk.try_sign_with_rng(&mut rng, b"Hello, World")?;
    /// assert!(vk.verify(b"Hello, World", &sig));
    /// assert!(!vk.verify(b"Kenny is awesome", &sig));
    /// # }
    /// # Ok(())}
    /// ```
    fn verify(&self, message: &[u8], signature: &Self::Signature) -> bool;
}


/// The `SerDes` trait provides validated serialization and deserialization of keys. Lengths
/// depend on the parameter set, so deserialization takes the scheme instance the bytes
/// belong to.
pub trait SerDes {
    /// Produces the byte encoding of the key.
    /// # Examples
    /// ```rust
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// # #[cfg(feature = "ring-tesla-i")] {
    /// use ring_tesla::ring_tesla_i;
    /// use ring_tesla::traits::{KeyGen, SerDes, Signer, Verifier};
    /// use rand_chacha::rand_core::SeedableRng;
    ///
    /// let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(123);
    /// let scheme = ring_tesla_i::scheme();
    /// let (vk, sk) = scheme.try_keygen_with_rng(&mut rng)?;
    /// let vk_bytes = vk.into_bytes(); // Serialize the verifying key
    /// let sk_bytes = sk.into_bytes(); // Serialize the signing key
    /// assert_eq!(vk_bytes.len(), ring_tesla_i::VK_LEN);
    /// let vk2 = ring_tesla::VerifyingKey::try_from_bytes(&scheme, &vk_bytes)?;
    /// let sk2 = ring_tesla::SigningKey::try_from_bytes(&scheme, &sk_bytes)?;
    /// let sig = sk2.try_sign_with_rng(&mut rng, b"serialized")?;
    /// assert!(vk2.verify(b"serialized", &sig));
    /// # }
    /// # Ok(())}
    /// ```
    fn into_bytes(self) -> Vec<u8>;

    /// Consumes a byte string produced by [`SerDes::into_bytes`] under `scheme`; performs
    /// validation.
    /// # Errors
    /// Returns an error on malformed input.
    fn try_from_bytes(scheme: &crate::RingTesla, bytes: &[u8]) -> Result<Self>
    where
        Self: Sized;
}
