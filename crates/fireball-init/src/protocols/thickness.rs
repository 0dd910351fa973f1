//! Participant-thickness profile (protocol 11).
//!
//! ε and ρ_B are built from projectile and target thickness functions
//! with asymmetric rapidity weights:
//!
//! ```text
//! value = (T_A · left(η) + T_B · right(η)) · s_factor
//! ρ_B   = T_A^B · baryon_left(η) + T_B^B · baryon_right(η)
//! ```
//!
//! The fluid starts at rest.

use std::path::PathBuf;

use fireball_core::{Cell, InitError};

use crate::config::{DepositionMode, InitConfig};
use crate::context::SliceContext;
use crate::longitudinal::LongitudinalProfile;
use crate::protocol::{GridSetup, InitProtocol, InitResources};

use super::TransverseTable;

/// Thickness-function profile.
#[derive(Debug)]
pub struct ThicknessProfile {
    paths: [PathBuf; 4],
    deposition: DepositionMode,
    s_factor: f64,
    rhob_enabled: bool,
    longitudinal: LongitudinalProfile,
    t_a: TransverseTable,
    t_b: TransverseTable,
    baryon_a: TransverseTable,
    baryon_b: TransverseTable,
}

impl ThicknessProfile {
    /// Registry factory.
    pub fn from_config(cfg: &InitConfig) -> Result<Box<dyn InitProtocol>, InitError> {
        let p = &cfg.paths;
        Ok(Box::new(Self {
            paths: [
                p.thickness_a.clone(),
                p.thickness_b.clone(),
                p.baryon_thickness_a.clone(),
                p.baryon_thickness_b.clone(),
            ],
            deposition: cfg.deposition,
            s_factor: cfg.s_factor,
            rhob_enabled: cfg.rhob_enabled,
            longitudinal: LongitudinalProfile::from_config(&cfg.longitudinal, cfg.tau0)?,
            t_a: TransverseTable::default(),
            t_b: TransverseTable::default(),
            baryon_a: TransverseTable::default(),
            baryon_b: TransverseTable::default(),
        }))
    }
}

impl InitProtocol for ThicknessProfile {
    fn name(&self) -> &str {
        "thickness"
    }

    fn load(
        &mut self,
        setup: &GridSetup,
        _resources: &mut InitResources<'_>,
    ) -> Result<(), InitError> {
        let (nx, ny) = (setup.lattice.nx, setup.lattice.ny);
        self.longitudinal = self.longitudinal.clone().with_tau0(setup.tau0);
        self.t_a = TransverseTable::read(&self.paths[0], nx, ny)?;
        self.t_b = TransverseTable::read(&self.paths[1], nx, ny)?;
        if self.rhob_enabled {
            self.baryon_a = TransverseTable::read(&self.paths[2], nx, ny)?;
            self.baryon_b = TransverseTable::read(&self.paths[3], nx, ny)?;
        }
        Ok(())
    }

    fn fill_slice(&self, ctx: &mut SliceContext<'_>) -> Result<(), InitError> {
        let eta = ctx.eta();
        let (left, right) = (self.longitudinal.left(eta), self.longitudinal.right(eta));
        let (baryon_left, baryon_right) = if self.rhob_enabled {
            (
                self.longitudinal.baryon_left(eta),
                self.longitudinal.baryon_right(eta),
            )
        } else {
            (0.0, 0.0)
        };
        let eos = ctx.eos();
        for ix in 0..ctx.nx() {
            for iy in 0..ctx.ny() {
                let rhob = if self.rhob_enabled {
                    self.baryon_a.at(ix, iy) * baryon_left + self.baryon_b.at(ix, iy) * baryon_right
                } else {
                    0.0
                };
                let weighted = self.t_a.at(ix, iy) * left + self.t_b.at(ix, iy) * right;
                let epsilon = self
                    .deposition
                    .energy_density(weighted, self.s_factor, rhob, eos);
                ctx.write(ix, iy, Cell::at_rest(epsilon, rhob));
            }
        }
        Ok(())
    }
}
