//! Error type shared by every fallible operation in the crate.

use thiserror::Error;


/// Errors surfaced by scheme construction, key generation, signing and (de)serialization.
///
/// Signature verification never produces an `Error`; a bad signature is simply `false`.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The parameter set is invalid or internally inconsistent, or supplied public
    /// parameters do not fit it.
    #[error("invalid parameters: {0}")]
    Parameter(&'static str),

    /// Ring arithmetic was invoked on polynomials of differing length.
    #[error("polynomial dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Length of the left-hand operand.
        expected: usize,
        /// Length of the offending operand.
        found: usize,
    },

    /// A coefficient left the `i32` range during unreduced arithmetic.
    #[error("coefficient overflow in unreduced arithmetic")]
    Overflow,

    /// A rejection-sampling loop hit its configured retry cap.
    #[error("rejection sampling exhausted after {attempts} attempts")]
    SamplingExhausted {
        /// Number of complete attempts made.
        attempts: u32,
    },

    /// A value handed in for encoding does not fit its encoding.
    #[error("encoding error: {0}")]
    Encoding(&'static str),

    /// Key or signature bytes were malformed.
    #[error("decoding error: {0}")]
    Decoding(&'static str),
}


/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;
