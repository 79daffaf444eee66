use fixed::types::I32F32;

/// Q32.32 fixed-point: 32 integer bits, 32 fractional bits.
///
/// Arrival weights are stored in this form so that sampling is bit-exact
/// across platforms.
pub type Fixed64 = I32F32;

/// Ticks are the atomic unit of simulation time.
pub type Ticks = u64;

/// Convert an f64 to Fixed64. Use only for initialization, never in sim loop.
#[inline]
pub fn f64_to_fixed64(v: f64) -> Fixed64 {
    Fixed64::from_num(v)
}

/// Convert Fixed64 to f64. Use only for display, never in sim loop.
#[inline]
pub fn fixed64_to_f64(v: Fixed64) -> f64 {
    v.to_num::<f64>()
}

/// `1 - sum(weights)`, saturating at the representable range.
///
/// Used to derive the implicit "no arrival" weight from the per-component
/// chances.
pub fn remainder_of_one(weights: &[Fixed64]) -> Fixed64 {
    weights
        .iter()
        .fold(Fixed64::from_num(1), |acc, &w| acc.saturating_sub(w))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed64_basic_arithmetic() {
        let a = f64_to_fixed64(0.25);
        let b = f64_to_fixed64(0.5);
        assert_eq!(fixed64_to_f64(a + b), 0.75);
    }

    #[test]
    fn remainder_of_two_thirds() {
        let third = f64_to_fixed64(1.0 / 3.0);
        let rest = remainder_of_one(&[third, third]);
        assert!((fixed64_to_f64(rest) - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn remainder_goes_negative_when_oversubscribed() {
        let w = f64_to_fixed64(0.75);
        assert!(remainder_of_one(&[w, w]) < Fixed64::ZERO);
    }

    #[test]
    fn remainder_of_nothing_is_one() {
        assert_eq!(remainder_of_one(&[]), Fixed64::from_num(1));
    }

    #[test]
    fn fixed64_determinism() {
        let a = f64_to_fixed64(1.0 / 3.0);
        let b = f64_to_fixed64(1.0 / 3.0);
        assert_eq!(a, b);
        assert_eq!(a * f64_to_fixed64(3.0), b * f64_to_fixed64(3.0));
    }
}
