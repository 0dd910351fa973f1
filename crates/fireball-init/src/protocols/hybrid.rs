//! Thickness background with local fluctuations (protocol 101).
//!
//! The background entropy density is built from T_A and T_B exactly as
//! in the thickness profile and converted through the EOS. A per-cell
//! file of `c0 c1 c2 δε δρ_B` rows, ordered η outermost then x then y,
//! adds an energy excess (GeV/fm³) and sets ρ_B.

use std::path::PathBuf;

use fireball_core::{Cell, InitError, HBARC};

use crate::config::InitConfig;
use crate::context::SliceContext;
use crate::longitudinal::LongitudinalProfile;
use crate::protocol::{GridSetup, InitProtocol, InitResources};
use crate::reader;

use super::TransverseTable;

/// Hybrid background + fluctuation profile.
#[derive(Debug)]
pub struct HybridProfile {
    fluctuation_path: PathBuf,
    thickness_paths: [PathBuf; 2],
    s_factor: f64,
    longitudinal: LongitudinalProfile,
    t_a: TransverseTable,
    t_b: TransverseTable,
    /// `(δε, δρ_B)` per cell in file order.
    excess: Vec<(f64, f64)>,
}

impl HybridProfile {
    /// Registry factory.
    pub fn from_config(cfg: &InitConfig) -> Result<Box<dyn InitProtocol>, InitError> {
        Ok(Box::new(Self {
            fluctuation_path: cfg.paths.profile.clone(),
            thickness_paths: [cfg.paths.thickness_a.clone(), cfg.paths.thickness_b.clone()],
            s_factor: cfg.s_factor,
            longitudinal: LongitudinalProfile::from_config(&cfg.longitudinal, cfg.tau0)?,
            t_a: TransverseTable::default(),
            t_b: TransverseTable::default(),
            excess: Vec::new(),
        }))
    }
}

impl InitProtocol for HybridProfile {
    fn name(&self) -> &str {
        "hybrid"
    }

    fn load(
        &mut self,
        setup: &GridSetup,
        _resources: &mut InitResources<'_>,
    ) -> Result<(), InitError> {
        let lattice = &setup.lattice;
        self.longitudinal = self.longitudinal.clone().with_tau0(setup.tau0);
        self.t_a = TransverseTable::read(&self.thickness_paths[0], lattice.nx, lattice.ny)?;
        self.t_b = TransverseTable::read(&self.thickness_paths[1], lattice.nx, lattice.ny)?;

        let cells = lattice.cell_count();
        let table = reader::read_table(&self.fluctuation_path, 5)?;
        table.require_rows(cells)?;
        self.excess = (0..cells)
            .map(|i| {
                let r = table.row(i);
                (r[3], r[4])
            })
            .collect();
        Ok(())
    }

    fn fill_slice(&self, ctx: &mut SliceContext<'_>) -> Result<(), InitError> {
        let eta = ctx.eta();
        let (left, right) = (self.longitudinal.left(eta), self.longitudinal.right(eta));
        let (nx, ny, ieta) = (ctx.nx(), ctx.ny(), ctx.ieta());
        let eos = ctx.eos();
        for ix in 0..nx {
            for iy in 0..ny {
                let (d_epsilon, d_rhob) = self.excess[iy + ny * (ix + nx * ieta)];
                let entropy =
                    (self.t_a.at(ix, iy) * left + self.t_b.at(ix, iy) * right) * self.s_factor;
                let epsilon = eos.entropy_to_energy(entropy, 0.0) + d_epsilon / HBARC;
                ctx.write(ix, iy, Cell::at_rest(epsilon, d_rhob));
            }
        }
        Ok(())
    }
}
