/// Coefficients `a0..a7` of the normalized elastance curve `End(avg) = Σ aᵢ·tNdⁱ`.
///
/// Empirical constants of the single-beat method as encoded in the reference template.
pub const END_AVG_COEFFICIENTS: [f64; 8] = [
    0.35695, -7.2266, 74.249, -307.39, 684.54, -856.92, 571.95, -159.1,
];

/// Division that follows the template's blank-on-error convention.
///
/// Absent when either operand is absent, when the denominator is exactly zero,
/// or when the quotient is not finite.
pub fn safe_divide(numerator: Option<f64>, denominator: Option<f64>) -> Option<f64> {
    let (num, den) = (numerator?, denominator?);
    if den == 0.0 {
        return None;
    }
    let quotient = num / den;
    quotient.is_finite().then_some(quotient)
}

/// Average normalized elastance at normalized time `tnd` (Horner form).
pub fn end_avg(tnd: f64) -> f64 {
    END_AVG_COEFFICIENTS
        .iter()
        .rev()
        .fold(0.0, |acc, &coeff| acc * tnd + coeff)
}
