// This file implements the bit-level and little-endian packing of polynomial coefficients

use crate::error::{Error, Result};
use crate::helpers::{bitlen, ensure};
use crate::types::Poly;


/// Encodes a polynomial `w` with coefficients in `[−a, b]` into a byte string, each
/// coefficient stored as `b − w_i` in `bitlen(a + b)` bits, least significant bit first.
/// This function is not exposed to unvalidated input.
///
/// **Input**:  `a, b ≥ 0` with `a + b > 0`, and `w` whose coefficients all lie in `[−a, b]`. <br>
/// **Output**: A byte string of length `n·bitlen(a + b) / 8`.
#[allow(clippy::cast_sign_loss)] // b − coeff is non-negative
pub(crate) fn bit_pack(w: &[i32], a: i32, b: i32) -> Vec<u8> {
    debug_assert!(a >= 0 && b >= 0 && a.checked_add(b).is_some_and(|s| s > 0), "bit_pack: a/b out of range");
    debug_assert!(w.iter().all(|&e| (-a..=b).contains(&e)), "bit_pack: w out of range");
    let bits = bitlen(a + b); // Calculate each element bit length
    debug_assert_eq!((w.len() * bits) % 8, 0, "bit_pack: output is not byte aligned");

    let mut bytes_out = Vec::with_capacity(w.len() * bits / 8);
    let mut temp = 0u64; // To insert new values on the left/MSB and pop output values from the right/LSB
    let mut bit_index = 0; // Number of bits accumulated in temp

    for &coeff in w {
        temp |= u64::from((b - coeff) as u32) << bit_index;
        bit_index += bits;
        // while we have at least a byte's worth of bits in temp
        while bit_index > 7 {
            bytes_out.push(temp.to_le_bytes()[0]);
            temp >>= 8;
            bit_index -= 8;
        }
    }

    bytes_out
}


/// Reverses [`bit_pack`]. Takes untrusted input via deserialization.
///
/// **Input**:  `n`, `a`, `b` as used for packing and a byte string of length `n·bitlen(a + b) / 8`. <br>
/// **Output**: A polynomial of `n` coefficients in `[−a, b]`.
///
/// # Errors
/// Returns an error on a wrong input length or a coefficient outside `[−a, b]`.
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)] // masked to at most 31 bits
pub(crate) fn bit_unpack(v: &[u8], n: usize, a: i32, b: i32) -> Result<Poly> {
    debug_assert!(a >= 0 && b >= 0 && a.checked_add(b).is_some_and(|s| s > 0), "bit_unpack: a/b out of range");
    let bits = bitlen(a + b);
    ensure!(v.len() * 8 == n * bits, Error::Decoding("packed polynomial has the wrong length"));

    let mask = (1u64 << bits) - 1;
    let mut w_out = Vec::with_capacity(n);
    let mut temp = 0u64;
    let mut bit_index = 0;

    for &byte in v {
        temp |= u64::from(byte) << bit_index;
        bit_index += 8;
        while bit_index >= bits {
            let stored = (temp & mask) as i32;
            ensure!(stored <= a + b, Error::Decoding("packed coefficient out of range"));
            w_out.push(b - stored);
            bit_index -= bits;
            temp >>= bits;
        }
    }

    Ok(Poly(w_out))
}


/// Writes each coefficient as a 4-byte little-endian two's complement integer.
pub(crate) fn coeffs_to_le_bytes(w: &[i32]) -> Vec<u8> { w.iter().flat_map(|e| e.to_le_bytes()).collect() }


/// Reverses [`coeffs_to_le_bytes`], requiring exactly `n` coefficients.
///
/// # Errors
/// Returns an error when `v` is not exactly `4·n` bytes long.
pub(crate) fn coeffs_from_le_bytes(v: &[u8], n: usize) -> Result<Poly> {
    ensure!(v.len() == 4 * n, Error::Decoding("little-endian polynomial has the wrong length"));
    Ok(v.chunks_exact(4).map(|c| i32::from_le_bytes([c[0], c[1], c[2], c[3]])).collect())
}
