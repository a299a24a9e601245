// This file implements the ring arithmetic over Z_q[x]/(x^n + 1) plus small shared utilities

use crate::error::{Error, Result};
use crate::types::Poly;


/// If the condition is not met, return the given error. Borrowed from the `anyhow` crate.
macro_rules! ensure {
    ($cond:expr, $err:expr $(,)?) => {
        if !$cond {
            return Err($err);
        }
    };
}

pub(crate) use ensure; // make available throughout crate


/// Bit length required to express `a` in bits
#[allow(clippy::cast_sign_loss)] // a is positive
pub(crate) const fn bitlen(a: i32) -> usize { a.ilog2() as usize + 1 }


/// Mod +/- of `m` by `a`: the unique element `m′` in `−a/2 < m′ ≤ a/2` congruent to `m`
/// modulo `a`. Exact integer arithmetic; no floating-point quotient estimate is involved.
#[allow(clippy::cast_possible_truncation)] // result magnitude is at most a/2
pub(crate) fn mod_pm(m: i64, a: i32) -> i32 {
    let a = i64::from(a);
    let t = m.rem_euclid(a);
    if t <= (a / 2) {
        t as i32
    } else {
        (t - a) as i32
    }
}


/// Largest coefficient magnitude of `w`, as seen without any reduction.
pub(crate) fn infinity_norm(w: &Poly) -> i64 {
    w.iter().map(|&e| i64::from(e).abs()).max().unwrap_or(0)
}


fn ensure_same_len(a: &Poly, b: &Poly) -> Result<()> {
    ensure!(a.len() == b.len(), Error::DimensionMismatch { expected: a.len(), found: b.len() });
    Ok(())
}


/// Maps every coefficient to its centered representative in `(−q/2, q/2]`.
pub(crate) fn reduce(a: &Poly, q: i32) -> Poly {
    a.iter().map(|&e| mod_pm(i64::from(e), q)).collect()
}


/// Negacyclic product in `Z_q[x]/(x^n + 1)`: `a_i·b_j` lands on `x^{(i+j) mod n}`, negated
/// when `i + j ≥ n` because `x^n ≡ −1`. Operands are centered first, so each product is at
/// most `(q/2)^2` and the `i64` accumulator holds `n` of them (checked by `validate()`).
/// The result is reduced into `(−q/2, q/2]`.
///
/// # Errors
/// Returns `DimensionMismatch` when the operands differ in length.
pub(crate) fn multiply(a: &Poly, b: &Poly, q: i32) -> Result<Poly> {
    ensure_same_len(a, b)?;
    let n = a.len();
    let a_c: Vec<i64> = a.iter().map(|&e| i64::from(mod_pm(i64::from(e), q))).collect();
    let b_c: Vec<i64> = b.iter().map(|&e| i64::from(mod_pm(i64::from(e), q))).collect();
    let mut acc = vec![0i64; n];

    for (i, &a_i) in a_c.iter().enumerate() {
        // sparse challenges make most rows vanish
        if a_i == 0 {
            continue;
        }
        let (low, high) = b_c.split_at(n - i);
        // j < n - i: no wrap
        for (acc_k, &b_j) in acc[i..].iter_mut().zip(low) {
            *acc_k += a_i * b_j;
        }
        // j ≥ n - i: wraps to (i + j - n) with a sign flip
        for (acc_k, &b_j) in acc[..i].iter_mut().zip(high) {
            *acc_k -= a_i * b_j;
        }
    }

    Ok(acc.into_iter().map(|e| mod_pm(e, q)).collect())
}


/// Component-wise sum, no reduction.
///
/// # Errors
/// Returns `DimensionMismatch` when the operands differ in length, `Overflow` when a
/// coefficient leaves the `i32` range.
pub(crate) fn add(a: &Poly, b: &Poly) -> Result<Poly> {
    ensure_same_len(a, b)?;
    a.iter().zip(b.iter()).map(|(&x, &y)| x.checked_add(y).ok_or(Error::Overflow)).collect()
}


/// Component-wise difference, no reduction.
///
/// # Errors
/// Returns `DimensionMismatch` when the operands differ in length, `Overflow` when a
/// coefficient leaves the `i32` range.
pub(crate) fn subtract(a: &Poly, b: &Poly) -> Result<Poly> {
    ensure_same_len(a, b)?;
    a.iter().zip(b.iter()).map(|(&x, &y)| x.checked_sub(y).ok_or(Error::Overflow)).collect()
}
