//! Rapidity envelopes for energy and net-baryon deposition.
//!
//! All functions here are pure: they depend only on η and the parameters
//! captured in [`LongitudinalProfile`].

use std::f64::consts::PI;

use fireball_core::InitError;

use crate::config::LongitudinalConfig;

/// Shape of the energy/entropy envelope.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnvelopeShape {
    /// Flat plateau with Gaussian tails beyond `|η| = flat/2`.
    PlateauGaussian,
    /// Woods–Saxon with radius `flat/2` and diffuseness `fall_off`.
    WoodsSaxon,
}

impl EnvelopeShape {
    /// Parse the integer selector used in configuration files.
    pub fn from_selector(selector: i32) -> Result<Self, InitError> {
        match selector {
            1 => Ok(Self::PlateauGaussian),
            2 => Ok(Self::WoodsSaxon),
            _ => Err(InitError::UnsupportedProfile {
                kind: "energy",
                selector,
            }),
        }
    }
}

/// Shape of the symmetric net-baryon envelope.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BaryonShape {
    /// Two Gaussians of common width centered at `±η₀`.
    DoubleGaussian,
    /// Plateau of height A inside `|η| < η₀` with Gaussian tails.
    PlateauTails,
}

impl BaryonShape {
    /// Parse the integer selector used in configuration files.
    pub fn from_selector(selector: i32) -> Result<Self, InitError> {
        match selector {
            1 => Ok(Self::DoubleGaussian),
            2 => Ok(Self::PlateauTails),
            _ => Err(InitError::UnsupportedProfile {
                kind: "baryon",
                selector,
            }),
        }
    }
}

/// Rapidity-dependent multipliers for deposition.
///
/// # Examples
///
/// ```
/// use fireball_init::{LongitudinalConfig, LongitudinalProfile};
///
/// let cfg = LongitudinalConfig { eta_flat: 4.0, eta_fall_off: 1.0, ..Default::default() };
/// let profile = LongitudinalProfile::from_config(&cfg, 1.0).unwrap();
/// assert!((profile.envelope(3.0) - (-0.5f64).exp()).abs() < 1e-12);
/// assert_eq!(profile.envelope(1.5), 1.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct LongitudinalProfile {
    envelope: EnvelopeShape,
    baryon: BaryonShape,
    eta_flat: f64,
    eta_fall_off: f64,
    beam_rapidity: f64,
    eta_rhob_0: f64,
    eta_rhob_width: f64,
    width_1: f64,
    width_2: f64,
    plateau_height: f64,
    tau0: f64,
}

impl LongitudinalProfile {
    /// Build from configuration. Baryon envelopes are normalized per unit
    /// proper time, so `tau0` is captured here.
    pub fn from_config(cfg: &LongitudinalConfig, tau0: f64) -> Result<Self, InitError> {
        Ok(Self {
            envelope: EnvelopeShape::from_selector(cfg.envelope)?,
            baryon: BaryonShape::from_selector(cfg.baryon_shape)?,
            eta_flat: cfg.eta_flat,
            eta_fall_off: cfg.eta_fall_off,
            beam_rapidity: cfg.beam_rapidity,
            eta_rhob_0: cfg.eta_rhob_0,
            eta_rhob_width: cfg.eta_rhob_width,
            width_1: cfg.eta_rhob_width_1,
            width_2: cfg.eta_rhob_width_2,
            plateau_height: cfg.eta_rhob_plateau_height,
            tau0,
        })
    }

    /// The same profile evaluated at a different τ₀.
    pub fn with_tau0(mut self, tau0: f64) -> Self {
        self.tau0 = tau0;
        self
    }

    /// Symmetric energy/entropy envelope.
    pub fn envelope(&self, eta: f64) -> f64 {
        match self.envelope {
            EnvelopeShape::PlateauGaussian => {
                let a = (eta.abs() - self.eta_flat / 2.0) / self.eta_fall_off;
                if a > 0.0 {
                    (-a * a / 2.0).exp()
                } else {
                    1.0
                }
            }
            EnvelopeShape::WoodsSaxon => {
                let r = self.eta_flat / 2.0;
                let a = self.eta_fall_off;
                (1.0 + (-r / a).exp()) / (1.0 + ((eta.abs() - r) / a).exp())
            }
        }
    }

    /// Projectile-side weight `envelope · (1 − η/y_beam)`.
    pub fn left(&self, eta: f64) -> f64 {
        if eta.abs() < self.beam_rapidity {
            self.envelope(eta) * (1.0 - eta / self.beam_rapidity)
        } else {
            0.0
        }
    }

    /// Target-side weight `envelope · (1 + η/y_beam)`.
    pub fn right(&self, eta: f64) -> f64 {
        if eta.abs() < self.beam_rapidity {
            self.envelope(eta) * (1.0 + eta / self.beam_rapidity)
        } else {
            0.0
        }
    }

    /// Symmetric net-baryon envelope, normalized to unit longitudinal
    /// integral at τ₀.
    pub fn baryon_envelope(&self, eta: f64) -> f64 {
        let eta_0 = self.eta_rhob_0;
        match self.baryon {
            BaryonShape::DoubleGaussian => {
                let w = self.eta_rhob_width;
                let norm = 1.0 / (2.0 * (2.0 * PI).sqrt() * w * self.tau0);
                let a1 = (eta - eta_0) / w;
                let a2 = (eta + eta_0) / w;
                norm * ((-a1 * a1 / 2.0).exp() + (-a2 * a2 / 2.0).exp())
            }
            BaryonShape::PlateauTails => {
                let abs_eta = eta.abs();
                let (d1, d2, a) = (self.width_1, self.width_2, self.plateau_height);
                let norm = 1.0
                    / (self.tau0
                        * ((2.0 * PI).sqrt() * d1
                            + (1.0 - a) * (2.0 * PI).sqrt() * d2
                            + 2.0 * a * eta_0));
                let a1 = (abs_eta - eta_0) / d1;
                let a2 = (abs_eta - eta_0) / d2;
                if abs_eta > eta_0 {
                    norm * (-a1 * a1 / 2.0).exp()
                } else {
                    norm * (a + (1.0 - a) * (-a2 * a2 / 2.0).exp())
                }
            }
        }
    }

    /// Projectile-side baryon weight, peaked at `−|η₀|`.
    pub fn baryon_left(&self, eta: f64) -> f64 {
        let eta_0 = -self.eta_rhob_0.abs();
        let width = if eta < eta_0 { self.width_1 } else { self.width_2 };
        self.split_gaussian(eta, eta_0, width)
    }

    /// Target-side baryon weight, peaked at `+|η₀|`.
    pub fn baryon_right(&self, eta: f64) -> f64 {
        let eta_0 = self.eta_rhob_0.abs();
        let width = if eta < eta_0 { self.width_2 } else { self.width_1 };
        self.split_gaussian(eta, eta_0, width)
    }

    fn split_gaussian(&self, eta: f64, eta_0: f64, width: f64) -> f64 {
        let norm = 2.0 / (PI.sqrt() * self.tau0 * (self.width_1 + self.width_2));
        let arg = (eta - eta_0) / width;
        norm * (-arg * arg).exp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn profile(envelope: i32, baryon: i32) -> LongitudinalProfile {
        let cfg = LongitudinalConfig {
            envelope,
            baryon_shape: baryon,
            eta_flat: 4.0,
            eta_fall_off: 1.0,
            beam_rapidity: 5.0,
            eta_rhob_0: 2.0,
            eta_rhob_width: 1.0,
            eta_rhob_width_1: 0.5,
            eta_rhob_width_2: 1.5,
            eta_rhob_plateau_height: 0.3,
        };
        LongitudinalProfile::from_config(&cfg, 1.0).unwrap()
    }

    #[test]
    fn plateau_gaussian_tail() {
        let p = profile(1, 1);
        assert!((p.envelope(3.0) - (-0.5f64).exp()).abs() < 1e-12);
        assert!((p.envelope(3.0) - 0.6065).abs() < 1e-4);
        assert_eq!(p.envelope(2.0), 1.0);
        assert_eq!(p.envelope(-1.0), 1.0);
    }

    #[test]
    fn double_gaussian_at_peak() {
        let p = profile(1, 1);
        let norm = 1.0 / (2.0 * (2.0 * PI).sqrt());
        // First term sits on its peak, second is four widths away.
        let expected = norm * (1.0 + (-8.0f64).exp());
        assert!((p.baryon_envelope(2.0) - expected).abs() < 1e-14);
    }

    #[test]
    fn plateau_tails_is_continuous_at_eta_0() {
        let p = profile(1, 2);
        let inside = p.baryon_envelope(2.0 - 1e-9);
        let outside = p.baryon_envelope(2.0 + 1e-9);
        assert!((inside - outside).abs() < 1e-6);
    }

    #[test]
    fn plateau_tails_integrates_to_inverse_tau0() {
        let cfg = LongitudinalConfig {
            baryon_shape: 2,
            eta_rhob_0: 2.0,
            eta_rhob_width_1: 0.5,
            eta_rhob_width_2: 0.4,
            eta_rhob_plateau_height: 0.3,
            ..Default::default()
        };
        let p = LongitudinalProfile::from_config(&cfg, 1.0).unwrap().with_tau0(0.5);
        let h = 1e-3;
        let total: f64 = (-20_000..=20_000)
            .map(|i| p.baryon_envelope(i as f64 * h) * h)
            .sum();
        assert!((total - 2.0).abs() < 1e-3);
    }

    #[test]
    fn baryon_left_right_mirror() {
        let p = profile(1, 1);
        for eta in [-3.0, -1.0, 0.0, 0.7, 2.5] {
            assert!((p.baryon_left(eta) - p.baryon_right(-eta)).abs() < 1e-14);
        }
        let peak = 2.0 / (PI.sqrt() * 2.0);
        assert!((p.baryon_right(2.0) - peak).abs() < 1e-14);
    }

    #[test]
    fn weights_vanish_beyond_beam_rapidity() {
        let p = profile(2, 1);
        assert_eq!(p.left(5.0), 0.0);
        assert_eq!(p.right(-6.0), 0.0);
    }

    #[test]
    fn unsupported_selectors() {
        assert_eq!(
            EnvelopeShape::from_selector(3),
            Err(InitError::UnsupportedProfile {
                kind: "energy",
                selector: 3
            })
        );
        assert!(matches!(
            BaryonShape::from_selector(0),
            Err(InitError::UnsupportedProfile { kind: "baryon", .. })
        ));
    }

    proptest! {
        #[test]
        fn woods_saxon_is_one_at_midrapidity(flat in 0.0f64..10.0, fall_off in 0.05f64..5.0) {
            let cfg = LongitudinalConfig {
                envelope: 2,
                eta_flat: flat,
                eta_fall_off: fall_off,
                ..Default::default()
            };
            let p = LongitudinalProfile::from_config(&cfg, 1.0).unwrap();
            prop_assert!((p.envelope(0.0) - 1.0).abs() < 1e-12);
        }

        #[test]
        fn left_right_swap_symmetry(eta in -8.0f64..8.0, selector in 1i32..=2) {
            let p = profile(selector, 1);
            let here = p.left(eta) + p.right(eta);
            let mirrored = p.left(-eta) + p.right(-eta);
            prop_assert!((here - mirrored).abs() < 1e-12);
            prop_assert!((p.left(eta) - p.right(-eta)).abs() < 1e-12);
        }
    }
}
