//! Pre-equilibrium snapshot profiles (protocols 8, 9, 91, 92).
//!
//! Both read one file whose first line declares the lattice and whose
//! data rows cover one transverse slice, ix-major. The slice is
//! broadcast along η, weighted by the energy envelope.
//!
//! - Protocol 8 rows: `η x y ε uτ ux uy c7 c8 c9 c10`.
//! - Protocols 9/91/92 rows: `η x y ε uτ ux uy uη πττ πτx πτy πτη πxx πxy
//!   πxη πyy πyη πηη`.

use std::path::{Path, PathBuf};

use fireball_core::{
    floor_epsilon, flow_from_spatial, Cell, FlowVec, InitError, ProtocolId, ShearTensor,
    REST_FLOW,
};

use crate::config::{DepositionMode, InitConfig};
use crate::context::SliceContext;
use crate::longitudinal::LongitudinalProfile;
use crate::protocol::{GridSetup, InitProtocol, InitResources};
use crate::reader::{self, SnapshotHeader, Table};
use crate::tensor::{self, SpatialShear};

/// η spacing forced by the tensor snapshot protocols.
pub const TENSOR_DETA: f64 = 0.1;

/// Read the snapshot and check it covers `nx · ny` rows.
fn read_slice(path: &Path, columns: usize) -> Result<(SnapshotHeader, Table), InitError> {
    let (header, mut table) = reader::read_snapshot(path, columns)?;
    let cells = (header.nx * header.ny).max(1);
    table.require_rows(cells)?;
    table.truncate(cells);
    Ok((header, table))
}

/// Apply transverse extents from the header and sizes from the first row.
fn apply_header(setup: &mut GridSetup, header: &SnapshotHeader, first_row: &[f64]) {
    let lattice = &mut setup.lattice;
    lattice.nx = header.nx;
    lattice.ny = header.ny;
    lattice.dx = header.dx;
    lattice.dy = header.dy;
    *lattice = lattice.with_derived_sizes();
    lattice.x_size = -2.0 * first_row[1];
    lattice.y_size = -2.0 * first_row[2];
}

fn log_lattice(protocol: &str, setup: &GridSetup) {
    let l = &setup.lattice;
    log::info!(
        "{protocol}: overwriting lattice: neta={} nx={} ny={} deta={} dx={} dy={}",
        l.neta,
        l.nx,
        l.ny,
        l.deta,
        l.dx,
        l.dy
    );
    log::info!(
        "{protocol}: eta_size={} x_size={} y_size={}",
        l.eta_size,
        l.x_size,
        l.y_size
    );
}

#[derive(Clone, Copy, Debug)]
struct FlowCell {
    value: f64,
    u: FlowVec,
}

/// Snapshot with energy (or entropy) density and transverse flow.
#[derive(Debug)]
pub struct GlasmaFlowProfile {
    path: PathBuf,
    deposition: DepositionMode,
    s_factor: f64,
    longitudinal: LongitudinalProfile,
    cells: Vec<FlowCell>,
}

impl GlasmaFlowProfile {
    /// Registry factory.
    pub fn from_config(cfg: &InitConfig) -> Result<Box<dyn InitProtocol>, InitError> {
        Ok(Box::new(Self {
            path: cfg.paths.profile.clone(),
            deposition: cfg.deposition,
            s_factor: cfg.s_factor,
            longitudinal: LongitudinalProfile::from_config(&cfg.longitudinal, cfg.tau0)?,
            cells: Vec::new(),
        }))
    }
}

impl InitProtocol for GlasmaFlowProfile {
    fn name(&self) -> &str {
        "glasma_flow"
    }

    fn resolve(
        &mut self,
        setup: &mut GridSetup,
        _resources: &mut InitResources<'_>,
    ) -> Result<(), InitError> {
        let (header, table) = read_slice(&self.path, 11)?;
        apply_header(setup, &header, table.row(0));
        log_lattice(self.name(), setup);
        self.cells = (0..table.len())
            .map(|i| {
                let r = table.row(i);
                FlowCell {
                    value: r[3],
                    u: flow_from_spatial(r[5], r[6], 0.0),
                }
            })
            .collect();
        Ok(())
    }

    fn fill_slice(&self, ctx: &mut SliceContext<'_>) -> Result<(), InitError> {
        let envelope = self.longitudinal.envelope(ctx.eta());
        let eos = ctx.eos();
        let ny = ctx.ny();
        for ix in 0..ctx.nx() {
            for iy in 0..ny {
                let c = self.cells[iy + ix * ny];
                let epsilon =
                    self.deposition
                        .energy_density(c.value * envelope, self.s_factor, 0.0, eos);
                ctx.write(ix, iy, Cell::with_flow(epsilon, 0.0, c.u));
            }
        }
        Ok(())
    }
}

/// Which parts of a tensor snapshot are used.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TensorVariant {
    /// Energy, flow, shear tensor, and bulk pressure (protocol 9).
    Full,
    /// Energy and flow (protocol 91).
    EnergyFlow,
    /// Energy only, fluid at rest (protocol 92).
    EnergyOnly,
}

impl TensorVariant {
    /// Variant for a protocol id, if it is one of 9, 91, 92.
    pub fn from_protocol(id: ProtocolId) -> Option<Self> {
        match id.0 {
            9 => Some(Self::Full),
            91 => Some(Self::EnergyFlow),
            92 => Some(Self::EnergyOnly),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct TensorCell {
    value: f64,
    u: FlowVec,
    w: ShearTensor,
}

/// Snapshot carrying the full energy-momentum tensor.
#[derive(Debug)]
pub struct GlasmaTensorProfile {
    path: PathBuf,
    variant: TensorVariant,
    deposition: DepositionMode,
    s_factor: f64,
    longitudinal: LongitudinalProfile,
    cells: Vec<TensorCell>,
}

impl GlasmaTensorProfile {
    /// Build a profile of the given variant.
    pub fn new(cfg: &InitConfig, variant: TensorVariant) -> Result<Self, InitError> {
        Ok(Self {
            path: cfg.paths.profile.clone(),
            variant,
            deposition: cfg.deposition,
            s_factor: cfg.s_factor,
            longitudinal: LongitudinalProfile::from_config(&cfg.longitudinal, cfg.tau0)?,
            cells: Vec::new(),
        })
    }

    /// Registry factory; the variant follows `cfg.protocol`.
    pub fn from_config(cfg: &InitConfig) -> Result<Box<dyn InitProtocol>, InitError> {
        let variant = TensorVariant::from_protocol(cfg.protocol)
            .ok_or(InitError::UnknownProtocol { id: cfg.protocol.0 })?;
        Ok(Box::new(Self::new(cfg, variant)?))
    }

    fn convert_row(&self, idx: usize, r: &[f64], tau0: f64) -> Result<TensorCell, InitError> {
        let (ux, uy, ueta_raw) = (r[5], r[6], r[7]);
        // u^τ comes from the unscaled u^η.
        let mut u = flow_from_spatial(ux, uy, ueta_raw);
        u[3] = ueta_raw * tau0;

        let w = if self.variant == TensorVariant::Full {
            let s = SpatialShear {
                xx: r[12] * self.s_factor,
                xy: r[13] * self.s_factor,
                xeta: r[14] * tau0 * self.s_factor,
                yy: r[15] * self.s_factor,
                yeta: r[16] * tau0 * self.s_factor,
            };
            tensor::reconstruct(&u, &s).map_err(|e| InitError::DegenerateFlow {
                cell: idx,
                denominator: e.denominator,
            })?
        } else {
            ShearTensor::ZERO
        };

        Ok(TensorCell {
            value: r[3],
            u,
            w,
        })
    }
}

impl InitProtocol for GlasmaTensorProfile {
    fn name(&self) -> &str {
        match self.variant {
            TensorVariant::Full => "glasma_tensor",
            TensorVariant::EnergyFlow => "glasma_energy_flow",
            TensorVariant::EnergyOnly => "glasma_energy",
        }
    }

    fn resolve(
        &mut self,
        setup: &mut GridSetup,
        _resources: &mut InitResources<'_>,
    ) -> Result<(), InitError> {
        let (header, table) = read_slice(&self.path, 18)?;
        setup.lattice.neta = header.neta;
        setup.lattice.deta = TENSOR_DETA;
        apply_header(setup, &header, table.row(0));
        log_lattice(self.name(), setup);

        let tau0 = setup.tau0;
        self.cells = (0..table.len())
            .map(|i| self.convert_row(i, table.row(i), tau0))
            .collect::<Result<_, _>>()?;
        Ok(())
    }

    fn fill_slice(&self, ctx: &mut SliceContext<'_>) -> Result<(), InitError> {
        let envelope = self.longitudinal.envelope(ctx.eta());
        let eos = ctx.eos();
        let ny = ctx.ny();
        for ix in 0..ctx.nx() {
            for iy in 0..ny {
                let c = &self.cells[iy + ix * ny];
                let epsilon = floor_epsilon(self.deposition.energy_density(
                    c.value * envelope,
                    self.s_factor,
                    0.0,
                    eos,
                ));
                let cell = match self.variant {
                    TensorVariant::Full => Cell {
                        epsilon,
                        rhob: 0.0,
                        u: c.u,
                        wmunu: c.w,
                        pi_b: epsilon / 3.0 - eos.pressure(epsilon, 0.0),
                    },
                    TensorVariant::EnergyFlow => Cell::with_flow(epsilon, 0.0, c.u),
                    TensorVariant::EnergyOnly => Cell::with_flow(epsilon, 0.0, REST_FLOW),
                };
                ctx.write(ix, iy, cell);
            }
        }
        Ok(())
    }
}
