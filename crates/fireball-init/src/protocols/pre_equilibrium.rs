//! Pre-equilibrium hand-off profile (protocol 42).
//!
//! Consumes the [`HandOffBuffers`] from the [`HandOffContext`] exactly
//! once. The transverse extent follows from the vector length and the
//! configured η count.
//!
//! [`HandOffContext`]: crate::HandOffContext

use fireball_core::{Cell, HandOffError, InitError, ShearTensor, HBARC};

use crate::config::InitConfig;
use crate::context::SliceContext;
use crate::handoff::HandOffBuffers;
use crate::protocol::{GridSetup, InitProtocol, InitResources};

/// Slots whose components carry one η index and are scaled by τ₀.
const ETA_SLOTS: [usize; 4] = [
    ShearTensor::TE,
    ShearTensor::XE,
    ShearTensor::YE,
    ShearTensor::EE,
];

/// Hand-off profile.
#[derive(Debug)]
pub struct PreEquilibriumProfile {
    s_factor: f64,
    buffers: Option<HandOffBuffers>,
}

impl PreEquilibriumProfile {
    /// Registry factory.
    pub fn from_config(cfg: &InitConfig) -> Result<Box<dyn InitProtocol>, InitError> {
        Ok(Box::new(Self {
            s_factor: cfg.s_factor,
            buffers: None,
        }))
    }
}

impl InitProtocol for PreEquilibriumProfile {
    fn name(&self) -> &str {
        "pre_equilibrium"
    }

    fn resolve(
        &mut self,
        setup: &mut GridSetup,
        resources: &mut InitResources<'_>,
    ) -> Result<(), InitError> {
        let buffers = resources.hand_off.buffers()?;
        buffers.check_lengths()?;
        let n = buffers.transverse_extent(setup.lattice.neta)?;
        let lattice = &mut setup.lattice;
        lattice.nx = n;
        lattice.ny = n;
        let eta_size = lattice.eta_size;
        *lattice = lattice.with_derived_sizes();
        lattice.eta_size = eta_size;
        log::info!(
            "{}: overwriting lattice: neta={} nx={n} ny={n}, x_size={} y_size={} eta_size={}",
            self.name(),
            lattice.neta,
            lattice.x_size,
            lattice.y_size,
            lattice.eta_size
        );
        Ok(())
    }

    fn load(
        &mut self,
        _setup: &GridSetup,
        resources: &mut InitResources<'_>,
    ) -> Result<(), InitError> {
        self.buffers = Some(resources.hand_off.take()?);
        Ok(())
    }

    fn fill_slice(&self, ctx: &mut SliceContext<'_>) -> Result<(), InitError> {
        let b = self
            .buffers
            .as_ref()
            .ok_or(HandOffError::NotPopulated)?;
        let (tau0, ieta, nx) = (ctx.tau0(), ctx.ieta(), ctx.nx());
        for ix in 0..nx {
            for iy in 0..ctx.ny() {
                let idx = ix + (iy + ieta * nx) * nx;
                let mut wmunu = ShearTensor(std::array::from_fn(|slot| b.pi[slot][idx] / HBARC));
                for slot in ETA_SLOTS {
                    wmunu[slot] *= tau0;
                }
                let cell = Cell {
                    epsilon: b.energy_density[idx] * self.s_factor / HBARC,
                    rhob: 0.0,
                    u: [b.u_tau[idx], b.u_x[idx], b.u_y[idx], tau0 * b.u_eta[idx]],
                    wmunu,
                    pi_b: b.bulk_pi[idx] / HBARC,
                };
                ctx.write(ix, iy, cell);
            }
        }
        Ok(())
    }
}
