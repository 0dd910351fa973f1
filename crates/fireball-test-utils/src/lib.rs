//! Test utilities and mock collaborators for Fireball development.
//!
//! Provides simple implementations of the collaborator traits
//! ([`EquationOfState`], [`HydroSource`]) whose outputs are easy to
//! predict by hand, plus the [`fixtures`] module for writing input files
//! in every layout the initializer reads.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{ProfileDir, SnapshotLayout};

use fireball_core::{EquationOfState, FlowVec, HydroSource};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// EOS with `ε(s) = s` and `p = ε/3`.
///
/// Makes entropy-mode deposition numerically identical to the deposited
/// value, and the bulk correction `ε/3 − p` exactly zero.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConformalEos;

impl EquationOfState for ConformalEos {
    fn entropy_to_energy(&self, s: f64, _rhob: f64) -> f64 {
        s
    }

    fn pressure(&self, epsilon: f64, _rhob: f64) -> f64 {
        epsilon / 3.0
    }

    fn temperature(&self, epsilon: f64, _rhob: f64) -> f64 {
        epsilon.max(0.0).powf(0.25)
    }
}

/// Source depositing a constant `J^μ` and baryon density everywhere
/// for `tau_min <= τ < tau_max`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UniformSource {
    pub tau_min: f64,
    pub tau_max: f64,
    pub j: [f64; 4],
    pub rhob: f64,
}

impl UniformSource {
    pub fn new(tau_min: f64, tau_max: f64, j_tau: f64, rhob: f64) -> Self {
        Self {
            tau_min,
            tau_max,
            j: [j_tau, 0.0, 0.0, 0.0],
            rhob,
        }
    }

    fn active(&self, tau: f64) -> bool {
        tau >= self.tau_min && tau < self.tau_max
    }
}

impl HydroSource for UniformSource {
    fn tau_min(&self) -> f64 {
        self.tau_min
    }

    fn tau_max(&self) -> f64 {
        self.tau_max
    }

    fn energy_source(&self, tau: f64, _x: f64, _y: f64, _eta: f64, _u: &FlowVec) -> [f64; 4] {
        if self.active(tau) {
            self.j
        } else {
            [0.0; 4]
        }
    }

    fn baryon_source(&self, tau: f64, _x: f64, _y: f64, _eta: f64, _u: &FlowVec) -> f64 {
        if self.active(tau) {
            self.rhob
        } else {
            0.0
        }
    }
}

/// `nx · ny` non-negative values drawn from a seeded ChaCha8 stream.
///
/// Roughly 10% of the values are exactly zero, so fills exercise the
/// energy floor.
pub fn random_transverse(nx: usize, ny: usize, seed: u64) -> Vec<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..nx * ny)
        .map(|_| {
            if rng.gen_bool(0.1) {
                0.0
            } else {
                rng.gen_range(0.0..5.0)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fireball_core::REST_FLOW;

    #[test]
    fn random_transverse_is_deterministic() {
        assert_eq!(random_transverse(4, 5, 7), random_transverse(4, 5, 7));
        assert_ne!(random_transverse(4, 5, 7), random_transverse(4, 5, 8));
        assert!(random_transverse(8, 8, 1).iter().all(|v| *v >= 0.0));
    }

    #[test]
    fn uniform_source_window_is_half_open() {
        let s = UniformSource::new(0.5, 1.0, 2.0, 0.1);
        assert_eq!(s.energy_source(0.5, 0.0, 0.0, 0.0, &REST_FLOW)[0], 2.0);
        assert_eq!(s.energy_source(1.0, 0.0, 0.0, 0.0, &REST_FLOW)[0], 0.0);
        assert_eq!(s.baryon_source(0.4, 0.0, 0.0, 0.0, &REST_FLOW), 0.0);
    }
}
