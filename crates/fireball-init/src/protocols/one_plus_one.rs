//! 1+1D longitudinal benchmark (protocol 1).
//!
//! Energy and baryon densities are tabulated against η only and
//! broadcast over a minimal 2 × 2 transverse plane.

use std::path::PathBuf;

use fireball_core::{Cell, InitError, HBARC};
use fireball_grid::Lattice;

use crate::config::InitConfig;
use crate::context::SliceContext;
use crate::protocol::{GridSetup, InitProtocol, InitResources};
use crate::reader;

/// `η ε` rows, ε in GeV/fm³.
pub const ENERGY_FILE: &str = "e_baryon_init.dat";
/// `η ρ_B` rows.
pub const BARYON_FILE: &str = "rhoB_baryon_init.dat";

/// Longitudinal test profile.
#[derive(Debug)]
pub struct LongitudinalTestProfile {
    dir: PathBuf,
    epsilon: Vec<f64>,
    rhob: Vec<f64>,
}

impl LongitudinalTestProfile {
    /// Lattice every run of this protocol uses.
    pub fn lattice() -> Lattice {
        Lattice {
            nx: 2,
            ny: 2,
            neta: 695,
            dx: 0.1,
            dy: 0.1,
            deta: 0.02,
            x_size: 0.0,
            y_size: 0.0,
            eta_size: 0.0,
        }
        .with_derived_sizes()
    }

    /// Read tables from `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            epsilon: Vec::new(),
            rhob: Vec::new(),
        }
    }

    /// Registry factory.
    pub fn from_config(cfg: &InitConfig) -> Result<Box<dyn InitProtocol>, InitError> {
        Ok(Box::new(Self::new(&cfg.paths.longitudinal_test_dir)))
    }
}

impl InitProtocol for LongitudinalTestProfile {
    fn name(&self) -> &str {
        "longitudinal_1p1d"
    }

    fn resolve(
        &mut self,
        setup: &mut GridSetup,
        _resources: &mut InitResources<'_>,
    ) -> Result<(), InitError> {
        setup.lattice = Self::lattice();
        log::info!(
            "overwriting lattice: nx={} ny={} neta={} dx={} dy={} deta={}",
            setup.lattice.nx,
            setup.lattice.ny,
            setup.lattice.neta,
            setup.lattice.dx,
            setup.lattice.dy,
            setup.lattice.deta
        );
        Ok(())
    }

    fn load(
        &mut self,
        setup: &GridSetup,
        _resources: &mut InitResources<'_>,
    ) -> Result<(), InitError> {
        let neta = setup.lattice.neta;
        let column = |name: &str| -> Result<Vec<f64>, InitError> {
            let table = reader::read_table(&self.dir.join(name), 2)?;
            table.require_rows(neta)?;
            Ok((0..neta).map(|i| table.row(i)[1]).collect())
        };
        let epsilon = column(ENERGY_FILE)?;
        let rhob = column(BARYON_FILE)?;
        self.epsilon = epsilon;
        self.rhob = rhob;
        Ok(())
    }

    fn fill_slice(&self, ctx: &mut SliceContext<'_>) -> Result<(), InitError> {
        let ieta = ctx.ieta();
        let cell = Cell::at_rest(self.epsilon[ieta] / HBARC, self.rhob[ieta]);
        for ix in 0..ctx.nx() {
            for iy in 0..ctx.ny() {
                ctx.write(ix, iy, cell);
            }
        }
        Ok(())
    }
}
