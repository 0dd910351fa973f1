//! Per-cell fluid state: energy and baryon density, flow, viscous terms.

use std::ops::{Index, IndexMut};

/// Flow four-velocity `(u^τ, u^x, u^y, u^η)`.
///
/// The η component is stored τ-scaled (`τ·u^η`), so that the
/// normalization reads `(u^τ)² − (u^x)² − (u^y)² − (u^η)² = 1`.
pub type FlowVec = [f64; 4];

/// Fluid at rest in the Milne frame.
pub const REST_FLOW: FlowVec = [1.0, 0.0, 0.0, 0.0];

/// Build a normalized flow vector from its spatial components.
///
/// `u^τ = √(1 + ux² + uy² + uη²)`.
#[inline]
pub fn flow_from_spatial(ux: f64, uy: f64, ueta: f64) -> FlowVec {
    [(1.0 + ux * ux + uy * uy + ueta * ueta).sqrt(), ux, uy, ueta]
}

/// The ten independent components of the symmetric shear-stress tensor
/// `W^{μν}`, in the order ττ, τx, τy, τη, xx, xy, xη, yy, yη, ηη.
///
/// Components carrying an η index are stored τ-scaled, matching
/// [`FlowVec`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ShearTensor(pub [f64; 10]);

impl ShearTensor {
    /// `W^{ττ}` slot.
    pub const TT: usize = 0;
    /// `W^{τx}` slot.
    pub const TX: usize = 1;
    /// `W^{τy}` slot.
    pub const TY: usize = 2;
    /// `W^{τη}` slot.
    pub const TE: usize = 3;
    /// `W^{xx}` slot.
    pub const XX: usize = 4;
    /// `W^{xy}` slot.
    pub const XY: usize = 5;
    /// `W^{xη}` slot.
    pub const XE: usize = 6;
    /// `W^{yy}` slot.
    pub const YY: usize = 7;
    /// `W^{yη}` slot.
    pub const YE: usize = 8;
    /// `W^{ηη}` slot.
    pub const EE: usize = 9;

    /// The all-zero tensor.
    pub const ZERO: Self = Self([0.0; 10]);

    /// Storage slot for the `(mu, nu)` component, either order.
    ///
    /// # Panics
    ///
    /// Panics if `mu` or `nu` is greater than 3.
    pub fn slot(mu: usize, nu: usize) -> usize {
        let (a, b) = if mu <= nu { (mu, nu) } else { (nu, mu) };
        assert!(b < 4, "tensor index ({mu}, {nu}) out of range");
        // Row offsets of the packed upper triangle: 0, 4, 7, 9.
        const ROW: [usize; 4] = [0, 4, 7, 9];
        ROW[a] + (b - a)
    }

    /// Component `W^{mu nu}`.
    pub fn get(&self, mu: usize, nu: usize) -> f64 {
        self.0[Self::slot(mu, nu)]
    }

    /// Trace under the metric `diag(+, −, −, −)` of the τ-scaled components.
    pub fn trace(&self) -> f64 {
        self.0[Self::TT] - self.0[Self::XX] - self.0[Self::YY] - self.0[Self::EE]
    }

    /// `u_μ W^{μν}` for each ν, lowering `u` with `diag(+, −, −, −)`.
    pub fn contract_flow(&self, u: &FlowVec) -> [f64; 4] {
        let lower = [u[0], -u[1], -u[2], -u[3]];
        let mut out = [0.0; 4];
        for (nu, slot) in out.iter_mut().enumerate() {
            *slot = (0..4).map(|mu| lower[mu] * self.get(mu, nu)).sum();
        }
        out
    }

    /// Multiply every component by `factor`.
    pub fn scaled(mut self, factor: f64) -> Self {
        for w in self.0.iter_mut() {
            *w *= factor;
        }
        self
    }
}

impl Index<usize> for ShearTensor {
    type Output = f64;

    fn index(&self, slot: usize) -> &f64 {
        &self.0[slot]
    }
}

impl IndexMut<usize> for ShearTensor {
    fn index_mut(&mut self, slot: usize) -> &mut f64 {
        &mut self.0[slot]
    }
}

/// One lattice cell of the fluid.
///
/// `Default` yields an all-zero cell, including a zero flow vector; that
/// is the state of a freshly allocated snapshot before any fill.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Cell {
    /// Energy density ε (fm⁻⁴).
    pub epsilon: f64,
    /// Net baryon density ρ_B (fm⁻³).
    pub rhob: f64,
    /// Flow four-velocity.
    pub u: FlowVec,
    /// Shear-stress tensor.
    pub wmunu: ShearTensor,
    /// Bulk viscous pressure correction π_b (fm⁻⁴).
    pub pi_b: f64,
}

impl Cell {
    /// A cell at rest with no viscous corrections.
    pub fn at_rest(epsilon: f64, rhob: f64) -> Self {
        Self {
            epsilon,
            rhob,
            u: REST_FLOW,
            wmunu: ShearTensor::ZERO,
            pi_b: 0.0,
        }
    }

    /// A cell with the given flow and no viscous corrections.
    pub fn with_flow(epsilon: f64, rhob: f64, u: FlowVec) -> Self {
        Self {
            u,
            ..Self::at_rest(epsilon, rhob)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_follow_packed_order() {
        assert_eq!(ShearTensor::slot(0, 0), ShearTensor::TT);
        assert_eq!(ShearTensor::slot(0, 3), ShearTensor::TE);
        assert_eq!(ShearTensor::slot(1, 1), ShearTensor::XX);
        assert_eq!(ShearTensor::slot(1, 3), ShearTensor::XE);
        assert_eq!(ShearTensor::slot(2, 2), ShearTensor::YY);
        assert_eq!(ShearTensor::slot(2, 3), ShearTensor::YE);
        assert_eq!(ShearTensor::slot(3, 3), ShearTensor::EE);
    }

    #[test]
    fn slot_is_symmetric() {
        for mu in 0..4 {
            for nu in 0..4 {
                assert_eq!(ShearTensor::slot(mu, nu), ShearTensor::slot(nu, mu));
            }
        }
    }

    #[test]
    fn flow_from_spatial_is_normalized() {
        let u = flow_from_spatial(0.3, -0.4, 0.2);
        let norm = u[0] * u[0] - u[1] * u[1] - u[2] * u[2] - u[3] * u[3];
        assert!((norm - 1.0).abs() < 1e-14);
    }

    #[test]
    fn default_cell_is_zeroed() {
        let c = Cell::default();
        assert_eq!(c.epsilon, 0.0);
        assert_eq!(c.u, [0.0; 4]);
        assert_eq!(c.wmunu, ShearTensor::ZERO);
    }

    #[test]
    fn contract_flow_at_rest_picks_time_row() {
        let mut w = ShearTensor::ZERO;
        w[ShearTensor::TX] = 2.0;
        let c = w.contract_flow(&REST_FLOW);
        assert_eq!(c, [0.0, 2.0, 0.0, 0.0]);
    }
}
