//! Gaussian smearing kernels.
//!
//! Both kernels integrate to one over the Milne volume
//! `dx dy τ dη`, so that a particle's conserved quantities are
//! deposited exactly once.
//!
//! Covariant kernel, with `r = (Δx, Δy, τΔη)` and particle velocity `v`:
//!
//! ```text
//! K = γ / (2πσ²)^{3/2} · exp(−(r² + (γ v·r)²) / (2σ²))
//! ```
//!
//! Non-covariant kernel, with separate transverse and rapidity widths:
//!
//! ```text
//! K = exp(−(Δx² + Δy²)/(2σ²) − Δη²/(2σ_η²)) / ((2π)^{3/2} σ² σ_η τ)
//! ```

use std::f64::consts::PI;

use fireball_core::SourceError;

/// A smearing kernel with a hard cutoff at `n_sigma_cut` widths.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SmearingKernel {
    sigma: f64,
    sigma_eta: f64,
    covariant: bool,
    n_sigma_cut: f64,
}

impl SmearingKernel {
    /// Build a kernel, rejecting non-positive widths or cutoff.
    pub fn new(
        sigma: f64,
        sigma_eta: f64,
        covariant: bool,
        n_sigma_cut: f64,
    ) -> Result<Self, SourceError> {
        for (name, value) in [
            ("sigma", sigma),
            ("sigma_eta", sigma_eta),
            ("n_sigma_cut", n_sigma_cut),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(SourceError::InvalidKernel {
                    reason: format!("{name} must be finite and > 0, got {value}"),
                });
            }
        }
        Ok(Self {
            sigma,
            sigma_eta,
            covariant,
            n_sigma_cut,
        })
    }

    /// Transverse width σ (fm).
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Rapidity width σ_η of the non-covariant kernel.
    pub fn sigma_eta(&self) -> f64 {
        self.sigma_eta
    }

    /// Whether the covariant form is used.
    pub fn is_covariant(&self) -> bool {
        self.covariant
    }

    /// Whether a separation is inside the cutoff box.
    pub fn in_support(&self, dx: f64, dy: f64, deta: f64, tau: f64) -> bool {
        let reach = self.n_sigma_cut * self.sigma;
        if dx.abs() > reach || dy.abs() > reach {
            return false;
        }
        if self.covariant {
            (tau * deta).abs() <= reach
        } else {
            deta.abs() <= self.n_sigma_cut * self.sigma_eta
        }
    }

    /// Kernel value at separation `(dx, dy, deta)` from a particle with
    /// velocity `v = (p^x, p^y, τp^η) / p^τ`, evaluated at proper time
    /// `tau`. Zero outside the cutoff box.
    pub fn weight(&self, dx: f64, dy: f64, deta: f64, v: [f64; 3], tau: f64) -> f64 {
        if !self.in_support(dx, dy, deta, tau) {
            return 0.0;
        }
        let s2 = self.sigma * self.sigma;
        if self.covariant {
            let r = [dx, dy, tau * deta];
            let v2 = v[0] * v[0] + v[1] * v[1] + v[2] * v[2];
            // Massless or faster-than-light input: treat as at rest.
            let gamma = if v2 < 1.0 { 1.0 / (1.0 - v2).sqrt() } else { 1.0 };
            let r2 = r[0] * r[0] + r[1] * r[1] + r[2] * r[2];
            let ur = gamma * (v[0] * r[0] + v[1] * r[1] + v[2] * r[2]);
            gamma / (2.0 * PI * s2).powf(1.5) * (-(r2 + ur * ur) / (2.0 * s2)).exp()
        } else {
            let se = self.sigma_eta;
            let norm = (2.0 * PI).powf(1.5) * s2 * se * tau;
            (-(dx * dx + dy * dy) / (2.0 * s2) - deta * deta / (2.0 * se * se)).exp() / norm
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Midpoint sum of `K · τ` over a box well inside the cutoff.
    fn integrate(k: &SmearingKernel, v: [f64; 3], tau: f64) -> f64 {
        let (n, half) = (60usize, 2.4);
        let h = 2.0 * half / n as f64;
        let h_eta = h / tau;
        let mut total = 0.0;
        for i in 0..n {
            let dx = -half + (i as f64 + 0.5) * h;
            for j in 0..n {
                let dy = -half + (j as f64 + 0.5) * h;
                for l in 0..n {
                    let deta = (-half + (l as f64 + 0.5) * h) / tau;
                    total += k.weight(dx, dy, deta, v, tau) * tau * h * h * h_eta;
                }
            }
        }
        total
    }

    #[test]
    fn rejects_bad_widths() {
        assert!(SmearingKernel::new(0.0, 1.0, true, 4.0).is_err());
        assert!(SmearingKernel::new(0.5, f64::NAN, true, 4.0).is_err());
        assert!(SmearingKernel::new(0.5, 1.0, true, -1.0).is_err());
    }

    #[test]
    fn covariant_kernel_is_normalized_at_rest() {
        let k = SmearingKernel::new(0.5, 1.0, true, 5.0).unwrap();
        assert!((integrate(&k, [0.0; 3], 1.3) - 1.0).abs() < 1e-3);
    }

    #[test]
    fn covariant_kernel_is_normalized_when_moving() {
        let k = SmearingKernel::new(0.5, 1.0, true, 5.0).unwrap();
        assert!((integrate(&k, [0.4, -0.2, 0.3], 0.8) - 1.0).abs() < 1e-3);
    }

    #[test]
    fn non_covariant_kernel_is_normalized() {
        let k = SmearingKernel::new(0.5, 0.4, false, 5.0).unwrap();
        // Box half-width 2.4 fm at τ = 1.2 covers 5 σ_η in rapidity.
        assert!((integrate(&k, [0.0; 3], 1.2) - 1.0).abs() < 1e-3);
    }

    #[test]
    fn cutoff_is_hard() {
        let k = SmearingKernel::new(0.5, 1.0, true, 3.0).unwrap();
        assert!(k.weight(1.49, 0.0, 0.0, [0.0; 3], 1.0) > 0.0);
        assert_eq!(k.weight(1.51, 0.0, 0.0, [0.0; 3], 1.0), 0.0);
        assert_eq!(k.weight(0.0, 0.0, 1.6, [0.0; 3], 1.0), 0.0);
    }

    proptest! {
        #[test]
        fn weight_is_non_negative_and_even(
            dx in -3.0f64..3.0,
            dy in -3.0f64..3.0,
            deta in -2.0f64..2.0,
            vx in -0.5f64..0.5,
            vy in -0.5f64..0.5,
            tau in 0.2f64..3.0,
        ) {
            let k = SmearingKernel::new(0.6, 0.8, true, 4.0).unwrap();
            let w = k.weight(dx, dy, deta, [vx, vy, 0.0], tau);
            prop_assert!(w >= 0.0);
            let mirrored = k.weight(-dx, -dy, -deta, [vx, vy, 0.0], tau);
            prop_assert!((w - mirrored).abs() <= 1e-12 * (1.0 + w));
        }
    }
}
