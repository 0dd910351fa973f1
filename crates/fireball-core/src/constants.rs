//! Physical constants and numerical floors shared across the workspace.
//!
//! Natural units throughout: energy density in fm⁻⁴, baryon density in
//! fm⁻³, lengths in fm.

/// ħc in GeV·fm. Converts GeV/fm³ to fm⁻⁴ (divide) and back (multiply).
pub const HBARC: f64 = 0.19733;

/// Smallest energy density (fm⁻⁴) any initialized cell may carry.
///
/// Sub-floor values are raised to this floor silently.
pub const EPSILON_FLOOR: f64 = 1e-11;

/// Clamp an energy density to [`EPSILON_FLOOR`].
///
/// NaN is mapped to the floor as well, since `f64::max` returns the
/// non-NaN operand.
#[inline]
pub fn floor_epsilon(epsilon: f64) -> f64 {
    epsilon.max(EPSILON_FLOOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_raises_small_values() {
        assert_eq!(floor_epsilon(0.0), EPSILON_FLOOR);
        assert_eq!(floor_epsilon(-3.0), EPSILON_FLOOR);
        assert_eq!(floor_epsilon(f64::NAN), EPSILON_FLOOR);
    }

    #[test]
    fn floor_keeps_large_values() {
        assert_eq!(floor_epsilon(2.5), 2.5);
        assert_eq!(floor_epsilon(EPSILON_FLOOR), EPSILON_FLOOR);
    }
}
