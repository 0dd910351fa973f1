//! Collaborator traits: the equation of state and hydrodynamic sources.

use crate::cell::{FlowVec, REST_FLOW};

/// Thermodynamic queries the initializer needs from an equation of state.
///
/// Units: ε in fm⁻⁴, s and ρ_B in fm⁻³, T in fm⁻¹.
pub trait EquationOfState: Send + Sync {
    /// Energy density for a given entropy density and baryon density.
    fn entropy_to_energy(&self, s: f64, rhob: f64) -> f64;

    /// Pressure `p(ε, ρ_B)`.
    fn pressure(&self, epsilon: f64, rhob: f64) -> f64;

    /// Temperature `T(ε, ρ_B)`.
    fn temperature(&self, epsilon: f64, rhob: f64) -> f64;
}

/// Energy-momentum and conserved-charge source densities deposited into
/// the fluid by an external model.
///
/// Implementations are queried once per accessed spacetime point and
/// must be read-only (`&self`), so that η slices can be filled in
/// parallel against a shared source.
///
/// All four-vectors use the τ-scaled η component convention of
/// [`FlowVec`].
pub trait HydroSource: Send + Sync {
    /// Earliest proper time at which the source deposits anything.
    fn tau_min(&self) -> f64;

    /// Latest proper time at which the source deposits anything.
    fn tau_max(&self) -> f64;

    /// Energy-momentum source `J^μ` at `(τ, x, y, η)`.
    fn energy_source(&self, tau: f64, x: f64, y: f64, eta: f64, u: &FlowVec) -> [f64; 4];

    /// Net-baryon source density.
    fn baryon_source(&self, _tau: f64, _x: f64, _y: f64, _eta: f64, _u: &FlowVec) -> f64 {
        0.0
    }

    /// Electric-charge source density.
    fn charge_source(&self, _tau: f64, _x: f64, _y: f64, _eta: f64, _u: &FlowVec) -> f64 {
        0.0
    }

    /// Strangeness source density.
    fn strangeness_source(&self, _tau: f64, _x: f64, _y: f64, _eta: f64, _u: &FlowVec) -> f64 {
        0.0
    }

    /// Width Δτ of the frames the source bins its deposits into, if it
    /// has one. Integrating with any other step double-counts or skips
    /// deposits.
    fn frame_width(&self) -> Option<f64> {
        None
    }

    /// Energy-momentum deposited from [`tau_min`](Self::tau_min) up to and
    /// including the frame at `tau`, expressed as a density at `tau`.
    ///
    /// Frames sit at `τᵢ = τ_min + i·Δτ` for `i = 0 ..= ⌊(τ − τ_min)/Δτ⌋`;
    /// each contributes `τᵢ·J(τᵢ)·Δτ`, and the sum is divided by `τ`.
    /// Nothing is deposited for `τ < τ_min`. The fluid is taken at rest.
    fn energy_source_before_tau(
        &self,
        tau: f64,
        x: f64,
        y: f64,
        eta: f64,
        delta_tau: f64,
    ) -> [f64; 4] {
        let mut total = [0.0; 4];
        for tau_i in integration_steps(self.tau_min(), tau, delta_tau) {
            let j = self.energy_source(tau_i, x, y, eta, &REST_FLOW);
            for (acc, component) in total.iter_mut().zip(j) {
                *acc += tau_i * component;
            }
        }
        for acc in total.iter_mut() {
            *acc *= delta_tau / tau;
        }
        total
    }

    /// Net-baryon density deposited before `tau`, by the same rule as
    /// [`energy_source_before_tau`](Self::energy_source_before_tau).
    fn baryon_source_before_tau(&self, tau: f64, x: f64, y: f64, eta: f64, delta_tau: f64) -> f64 {
        let total: f64 = integration_steps(self.tau_min(), tau, delta_tau)
            .map(|tau_i| tau_i * self.baryon_source(tau_i, x, y, eta, &REST_FLOW))
            .sum();
        total * delta_tau / tau
    }
}

/// Relative slack when deciding whether `τ` lands on a frame.
const STEP_SLACK: f64 = 1e-9;

fn integration_steps(tau_min: f64, tau: f64, delta_tau: f64) -> impl Iterator<Item = f64> {
    let frames = if delta_tau > 0.0 && tau >= tau_min {
        ((tau - tau_min) / delta_tau + STEP_SLACK).floor() as usize + 1
    } else {
        0
    };
    (0..frames).map(move |i| tau_min + i as f64 * delta_tau)
}
