//! Massless ideal quark-gluon gas.

use std::f64::consts::PI;

use fireball_core::{floor_epsilon, EquationOfState};

/// Conformal ideal gas of gluons and massless quarks.
///
/// With `g = π²/90 · (2(Nc² − 1) + 7/2 · Nc · Nf)`:
///
/// - `ε = 3 g T⁴`, so `T = (ε / 3g)^{1/4}`
/// - `p = ε / 3`
/// - `ε(s) = 3/4 · s · (3s / 12g)^{1/3}`
///
/// Baryon density does not enter; the gas carries no net charge
/// susceptibility.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IdealGas {
    /// Number of colors.
    pub nc: f64,
    /// Number of effective massless flavors.
    pub nf: f64,
}

impl Default for IdealGas {
    fn default() -> Self {
        Self { nc: 3.0, nf: 2.5 }
    }
}

impl IdealGas {
    /// Create a gas with explicit color and flavor counts.
    pub fn new(nc: f64, nf: f64) -> Self {
        Self { nc, nf }
    }

    /// Effective degrees-of-freedom prefactor `g`.
    pub fn dof_factor(&self) -> f64 {
        PI * PI / 90.0 * (2.0 * (self.nc * self.nc - 1.0) + 3.5 * self.nc * self.nf)
    }

    /// `dε/dT` at fixed baryon density.
    pub fn de_dt(&self, epsilon: f64, _rhob: f64) -> f64 {
        let g = self.dof_factor();
        12.0 * g * (epsilon / (3.0 * g)).powf(0.75)
    }

    /// Baryon-number susceptibility. Always zero.
    pub fn chi_b(&self, _epsilon: f64, _rhob: f64) -> f64 {
        0.0
    }

    /// Correlation length `max(1/T, √χ_B)`.
    ///
    /// ε is raised to the energy-density floor first, so an empty cell
    /// gets a large but finite length instead of `inf`.
    pub fn correlation_length(&self, epsilon: f64, rhob: f64) -> f64 {
        let epsilon = floor_epsilon(epsilon);
        let t = self.temperature(epsilon, rhob);
        (1.0 / t).max(self.chi_b(epsilon, rhob).sqrt())
    }
}

impl EquationOfState for IdealGas {
    fn entropy_to_energy(&self, s: f64, _rhob: f64) -> f64 {
        let g = self.dof_factor();
        0.75 * s * (3.0 * s / (4.0 * 3.0 * g)).powf(1.0 / 3.0)
    }

    fn pressure(&self, epsilon: f64, _rhob: f64) -> f64 {
        epsilon / 3.0
    }

    fn temperature(&self, epsilon: f64, _rhob: f64) -> f64 {
        (epsilon / (3.0 * self.dof_factor())).powf(0.25)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-10 * a.abs().max(b.abs()).max(1.0)
    }

    #[test]
    fn default_dof_factor() {
        let eos = IdealGas::default();
        let expected = PI * PI / 90.0 * (16.0 + 26.25);
        assert!(close(eos.dof_factor(), expected));
    }

    #[test]
    fn pressure_is_a_third() {
        let eos = IdealGas::default();
        assert_eq!(eos.pressure(9.0, 0.0), 3.0);
    }

    #[test]
    fn temperature_inverts_stefan_boltzmann() {
        let eos = IdealGas::default();
        let t: f64 = 2.0;
        let eps = 3.0 * eos.dof_factor() * t.powi(4);
        assert!(close(eos.temperature(eps, 0.0), t));
    }

    #[test]
    fn correlation_length_is_inverse_temperature() {
        let eos = IdealGas::default();
        let eps = 5.0;
        let t = eos.temperature(eps, 0.0);
        assert!(close(eos.correlation_length(eps, 0.0), 1.0 / t));
        assert_eq!(eos.chi_b(eps, 0.0), 0.0);
    }

    #[test]
    fn correlation_length_is_finite_in_vacuum() {
        let eos = IdealGas::default();
        for eps in [0.0, -1.0] {
            let xi = eos.correlation_length(eps, 0.0);
            assert!(xi.is_finite());
            assert_eq!(xi, eos.correlation_length(fireball_core::EPSILON_FLOOR, 0.0));
        }
    }

    proptest! {
        #[test]
        fn entropy_conversion_is_thermodynamically_consistent(t in 0.05f64..5.0) {
            // s = (ε + p)/T for a gas without chemical potential.
            let eos = IdealGas::default();
            let g = eos.dof_factor();
            let eps = 3.0 * g * t.powi(4);
            let s = (eps + eos.pressure(eps, 0.0)) / t;
            prop_assert!(close(eos.entropy_to_energy(s, 0.0), eps));
        }

        #[test]
        fn de_dt_matches_finite_difference(t in 0.1f64..3.0) {
            let eos = IdealGas::default();
            let g = eos.dof_factor();
            let h = 1e-5;
            let eps = |t: f64| 3.0 * g * t.powi(4);
            let numeric = (eps(t + h) - eps(t - h)) / (2.0 * h);
            let analytic = eos.de_dt(eps(t), 0.0);
            prop_assert!((numeric - analytic).abs() <= 1e-5 * analytic);
        }
    }
}
