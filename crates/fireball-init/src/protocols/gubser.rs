//! Gubser-flow analytic benchmark (protocol 0).
//!
//! Reads one transverse slice and broadcasts it along η. With shear
//! transport on, a single viscous slice supplies ε, flow, and the shear
//! tensor. Without it, two ideal slices at τ = 1.00 and τ = 0.98 fm give
//! the current and previous flow for time differencing.

use std::path::{Path, PathBuf};

use fireball_core::{flow_from_spatial, Cell, InitError, ShearTensor};

use crate::config::InitConfig;
use crate::context::SliceContext;
use crate::protocol::{GridSetup, InitProtocol, InitResources};
use crate::reader::{self, Table};

/// Viscous slice: `x y ε ux uy πxx πyy πxy πττ πτx πτy πηη`.
pub const VISCOUS_FILE: &str = "Initial_Profile.dat";
/// Ideal slice at the initial time: `x y ε ρB ux uy`.
pub const IDEAL_FILE: &str = "y=0_tau=1.00_ideal.dat";
/// Ideal slice one step earlier.
pub const IDEAL_PREVIOUS_FILE: &str = "y=0_tau=0.98_ideal.dat";

#[derive(Debug)]
enum Slices {
    Unloaded,
    Viscous(Table),
    Ideal { current: Table, previous: Table },
}

/// Gubser-flow benchmark profile.
#[derive(Debug)]
pub struct GubserProfile {
    dir: PathBuf,
    shear_enabled: bool,
    slices: Slices,
}

impl GubserProfile {
    /// Read slices from `dir`.
    pub fn new(dir: impl Into<PathBuf>, shear_enabled: bool) -> Self {
        Self {
            dir: dir.into(),
            shear_enabled,
            slices: Slices::Unloaded,
        }
    }

    /// Registry factory.
    pub fn from_config(cfg: &InitConfig) -> Result<Box<dyn InitProtocol>, InitError> {
        Ok(Box::new(Self::new(&cfg.paths.gubser_dir, cfg.shear_enabled)))
    }

    fn read(path: &Path, columns: usize, cells: usize) -> Result<Table, InitError> {
        let mut table = reader::read_table(path, columns)?;
        table.require_rows(cells)?;
        table.truncate(cells);
        Ok(table)
    }
}

impl InitProtocol for GubserProfile {
    fn name(&self) -> &str {
        "gubser"
    }

    fn load(
        &mut self,
        setup: &GridSetup,
        _resources: &mut InitResources<'_>,
    ) -> Result<(), InitError> {
        let cells = setup.lattice.slice_len();
        self.slices = if self.shear_enabled {
            Slices::Viscous(Self::read(&self.dir.join(VISCOUS_FILE), 12, cells)?)
        } else {
            Slices::Ideal {
                current: Self::read(&self.dir.join(IDEAL_FILE), 6, cells)?,
                previous: Self::read(&self.dir.join(IDEAL_PREVIOUS_FILE), 6, cells)?,
            }
        };
        Ok(())
    }

    fn fill_slice(&self, ctx: &mut SliceContext<'_>) -> Result<(), InitError> {
        let ny = ctx.ny();
        for ix in 0..ctx.nx() {
            for iy in 0..ny {
                let idx = iy + ix * ny;
                match &self.slices {
                    Slices::Viscous(table) => {
                        let r = table.row(idx);
                        let mut cell = Cell::with_flow(r[2], 0.0, flow_from_spatial(r[3], r[4], 0.0));
                        cell.wmunu = ShearTensor([
                            r[8], r[9], r[10], 0.0, r[5], r[7], 0.0, r[6], 0.0, r[11],
                        ]);
                        ctx.write(ix, iy, cell);
                    }
                    Slices::Ideal { current, previous } => {
                        let r = current.row(idx);
                        let p = previous.row(idx);
                        let now = Cell::with_flow(r[2], r[3], flow_from_spatial(r[4], r[5], 0.0));
                        let before = Cell {
                            u: flow_from_spatial(p[4], p[5], 0.0),
                            ..now
                        };
                        ctx.write_pair(ix, iy, now, before);
                    }
                    Slices::Unloaded => {
                        return Err(InitError::Grid {
                            reason: "gubser profile filled before load".to_string(),
                        })
                    }
                }
            }
        }
        Ok(())
    }
}
