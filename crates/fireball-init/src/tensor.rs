//! Completion of the shear-stress tensor from its spatial components.
//!
//! Given the flow `u` and the five independent spatial components
//! `(xx, xy, xη, yy, yη)`, the remaining five follow from tracelessness
//! and `u_μ W^{μν} = 0`. The evaluation order is fixed: `ηη` first,
//! then the τ row (`τx`, `τy`, `τη`), then `ττ`.

use std::fmt;

use fireball_core::{FlowVec, ShearTensor};

/// Smallest `|(u^τ)² − (u^η)²|` accepted by [`reconstruct`].
pub const DEGENERACY_TOLERANCE: f64 = 1e-10;

/// The five independently supplied spatial shear components.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SpatialShear {
    /// `W^{xx}`
    pub xx: f64,
    /// `W^{xy}`
    pub xy: f64,
    /// `W^{xη}`
    pub xeta: f64,
    /// `W^{yy}`
    pub yy: f64,
    /// `W^{yη}`
    pub yeta: f64,
}

/// `(u^τ)² − (u^η)²` fell below [`DEGENERACY_TOLERANCE`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DegenerateDenominator {
    /// The offending denominator.
    pub denominator: f64,
}

impl fmt::Display for DegenerateDenominator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(u^tau)^2 - (u^eta)^2 = {:e} is too small to reconstruct W^etaeta",
            self.denominator
        )
    }
}

impl std::error::Error for DegenerateDenominator {}

/// Build the full traceless, flow-orthogonal tensor.
///
/// For a normalized flow `(u^τ)² − (u^η)² = 1 + (u^x)² + (u^y)² ≥ 1`,
/// so the guard only trips on unnormalized input.
pub fn reconstruct(u: &FlowVec, s: &SpatialShear) -> Result<ShearTensor, DegenerateDenominator> {
    let [ut, ux, uy, ue] = *u;
    let denominator = ut * ut - ue * ue;
    if denominator.abs() < DEGENERACY_TOLERANCE || ut.abs() < DEGENERACY_TOLERANCE {
        return Err(DegenerateDenominator { denominator });
    }

    let ee = (2.0 * (ux * uy * s.xy + ux * ue * s.xeta + uy * ue * s.yeta)
        - (ut * ut - ux * ux) * s.xx
        - (ut * ut - uy * uy) * s.yy)
        / denominator;
    let tx = (s.xx * ux + s.xy * uy + s.xeta * ue) / ut;
    let ty = (s.xy * ux + s.yy * uy + s.yeta * ue) / ut;
    let te = (s.xeta * ux + s.yeta * uy + ee * ue) / ut;
    let tt = (tx * ux + ty * uy + te * ue) / ut;

    Ok(ShearTensor([
        tt, tx, ty, te, s.xx, s.xy, s.xeta, s.yy, s.yeta, ee,
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fireball_core::flow_from_spatial;
    use proptest::prelude::*;

    #[test]
    fn rest_frame_keeps_spatial_block() {
        let s = SpatialShear {
            xx: 1.0,
            xy: 0.2,
            xeta: 0.0,
            yy: -0.5,
            yeta: 0.0,
        };
        let w = reconstruct(&[1.0, 0.0, 0.0, 0.0], &s).unwrap();
        assert_eq!(w[ShearTensor::TX], 0.0);
        assert_eq!(w[ShearTensor::TT], 0.0);
        assert!((w[ShearTensor::EE] + 0.5).abs() < 1e-15);
        assert!(w.trace().abs() < 1e-15);
    }

    #[test]
    fn light_like_longitudinal_flow_is_rejected() {
        let err = reconstruct(&[1.0, 0.0, 0.0, 1.0], &SpatialShear::default()).unwrap_err();
        assert_eq!(err.denominator, 0.0);
    }

    proptest! {
        #[test]
        fn reconstructed_tensor_is_traceless_and_transverse(
            ux in -3.0f64..3.0,
            uy in -3.0f64..3.0,
            ue in -3.0f64..3.0,
            xx in -1.0f64..1.0,
            xy in -1.0f64..1.0,
            xeta in -1.0f64..1.0,
            yy in -1.0f64..1.0,
            yeta in -1.0f64..1.0,
        ) {
            let u = flow_from_spatial(ux, uy, ue);
            let s = SpatialShear { xx, xy, xeta, yy, yeta };
            let w = reconstruct(&u, &s).unwrap();
            let scale = 1.0 + w.0.iter().fold(0.0f64, |m, v| m.max(v.abs())) * u[0] * u[0];
            prop_assert!(w.trace().abs() <= 1e-10 * scale);
            for component in w.contract_flow(&u) {
                prop_assert!(component.abs() <= 1e-10 * scale);
            }
        }
    }
}
