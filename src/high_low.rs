use crate::helpers::mod_pm;
use crate::params::ParameterSet;
use crate::types::Poly;


/// Rounds `x` by dropping its `d` low-order bits: `(x − (x mod± 2^d)) / 2^d`.
///
/// The signer and verifier both hash `round_d` of their commitment values, so two inputs
/// that differ by less than the distance to the nearest rounding boundary hash identically.
pub(crate) fn round_d(x: i32, d: u32) -> i32 {
    debug_assert!((1..=30).contains(&d), "round_d: d out of range");
    // 1: r0 ← x mod± 2^d
    let r0 = mod_pm(i64::from(x), 1 << d);
    // 2: return (x − r0) / 2^d
    (x - r0) >> d
}


/// Applies [`round_d`] to every coefficient.
pub(crate) fn round_poly(p: &Poly, d: u32) -> Poly { p.iter().map(|&x| round_d(x, d)).collect() }


/// Commitment-margin check on a reduced `w = reduce(v − e·c)`.
///
/// Fails when any coefficient's low part `w_j mod± 2^d` lies within `L` of a rounding
/// boundary, or when `w_j` lies within `L` of `±⌊q/2⌋`. Either would let the `e·c`
/// difference (bounded by `L` through the key-generation tail check) change the rounded
/// value, and the verifier would then hash something other than what the signer hashed.
pub(crate) fn check_bounds(params: &ParameterSet, w: &Poly) -> bool {
    let low_bound = i64::from(params.low_bits_bound());
    let wrap_bound = i64::from(params.half_q() - params.l);
    w.iter().all(|&e| {
        let low = i64::from(mod_pm(i64::from(e), 1 << params.d));
        low.abs() <= low_bound && i64::from(e).abs() <= wrap_bound
    })
}


/// Response check: every `|z_j| ≤ B − U`. Also applied by the verifier to untrusted input,
/// so magnitudes are taken in `i64`.
pub(crate) fn check_z(params: &ParameterSet, z: &Poly) -> bool {
    let bound = i64::from(params.z_bound());
    z.iter().all(|&e| i64::from(e).abs() <= bound)
}
